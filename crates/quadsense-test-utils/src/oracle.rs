//! A programmable physics oracle for tests.

use std::collections::HashMap;
use std::fmt;

use quadsense_core::error::OracleError;
use quadsense_core::oracle::{ContactPoint, JointReading, MotorCommand, PhysicsOracle};
use quadsense_core::types::{BasePose, BaseVelocity};

/// Per-tick velocity script: `(tick, timestep_secs) -> world-frame velocity`.
type VelocityScript = Box<dyn Fn(u64, f64) -> BaseVelocity + Send>;

// ---------------------------------------------------------------------------
// ScriptedOracle
// ---------------------------------------------------------------------------

/// A [`PhysicsOracle`] whose answers are scripted by the test.
///
/// Tests set the base pose/velocity (or a per-tick velocity script), joint
/// readings, and contact records, then inspect the motor commands and reset
/// calls the harness issued.  Failure flags let a test inject an oracle
/// fault on the next call of each kind.
pub struct ScriptedOracle {
    connected: bool,
    timestep: f64,
    tick: u64,
    pose: BasePose,
    velocity: BaseVelocity,
    velocity_script: Option<VelocityScript>,
    joints: HashMap<usize, JointReading>,
    contacts: Vec<ContactPoint>,

    /// Motor commands received, in issue order.
    pub commands: Vec<(usize, MotorCommand)>,
    /// Joint teleports received, in issue order.
    pub joint_resets: Vec<(usize, f64)>,
    /// Base teleports received, in issue order.
    pub base_resets: Vec<BasePose>,
    /// Completed `step()` calls.
    pub steps_taken: u64,

    fail_next_step: bool,
    fail_next_query: bool,
    fail_next_command: bool,
    fail_connect: bool,
}

impl fmt::Debug for ScriptedOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedOracle")
            .field("connected", &self.connected)
            .field("timestep", &self.timestep)
            .field("tick", &self.tick)
            .field("pose", &self.pose)
            .field("velocity", &self.velocity)
            .field(
                "velocity_script",
                &self.velocity_script.as_ref().map(|_| "<fn>"),
            )
            .field("joints", &self.joints)
            .field("contacts", &self.contacts)
            .field("commands", &self.commands)
            .field("joint_resets", &self.joint_resets)
            .field("base_resets", &self.base_resets)
            .field("steps_taken", &self.steps_taken)
            .field("fail_next_step", &self.fail_next_step)
            .field("fail_next_query", &self.fail_next_query)
            .field("fail_next_command", &self.fail_next_command)
            .field("fail_connect", &self.fail_connect)
            .finish()
    }
}

impl ScriptedOracle {
    /// A disconnected oracle with identity pose, zero velocity, zeroed
    /// joints, and no contacts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connected: false,
            timestep: 0.0,
            tick: 0,
            pose: BasePose::identity(),
            velocity: BaseVelocity::zeros(),
            velocity_script: None,
            joints: HashMap::new(),
            contacts: Vec::new(),
            commands: Vec::new(),
            joint_resets: Vec::new(),
            base_resets: Vec::new(),
            steps_taken: 0,
            fail_next_step: false,
            fail_next_query: false,
            fail_next_command: false,
            fail_connect: false,
        }
    }

    /// Builder: set the base pose.
    #[must_use]
    pub fn with_pose(mut self, pose: BasePose) -> Self {
        self.pose = pose;
        self
    }

    /// Builder: set a constant world-frame base velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: BaseVelocity) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: script the world-frame velocity per tick.  Evaluated after
    /// every `step()`; tick 0 is the pre-step value.
    #[must_use]
    pub fn with_velocity_script(
        mut self,
        script: impl Fn(u64, f64) -> BaseVelocity + Send + 'static,
    ) -> Self {
        self.velocity = script(0, self.timestep);
        self.velocity_script = Some(Box::new(script));
        self
    }

    /// Builder: set the reading of one oracle joint index.
    #[must_use]
    pub fn with_joint_reading(mut self, index: usize, reading: JointReading) -> Self {
        self.joints.insert(index, reading);
        self
    }

    /// Builder: set the contact record list.
    #[must_use]
    pub fn with_contacts(mut self, contacts: Vec<ContactPoint>) -> Self {
        self.contacts = contacts;
        self
    }

    /// Replace the contact record list mid-test.
    pub fn set_contacts(&mut self, contacts: Vec<ContactPoint>) {
        self.contacts = contacts;
    }

    /// Replace the constant velocity mid-test.
    pub fn set_velocity(&mut self, velocity: BaseVelocity) {
        self.velocity = velocity;
    }

    /// Replace the pose mid-test.
    pub fn set_pose(&mut self, pose: BasePose) {
        self.pose = pose;
    }

    /// Replace one joint reading mid-test.
    pub fn set_joint_reading(&mut self, index: usize, reading: JointReading) {
        self.joints.insert(index, reading);
    }

    /// Make the next `step()` fail.
    pub fn fail_next_step(&mut self) {
        self.fail_next_step = true;
    }

    /// Make the next state query fail.
    pub fn fail_next_query(&mut self) {
        self.fail_next_query = true;
    }

    /// Make the next motor command fail.
    pub fn fail_next_command(&mut self) {
        self.fail_next_command = true;
    }

    /// Make `connect()` fail.
    pub fn fail_connect(&mut self) {
        self.fail_connect = true;
    }

    /// Whether `connect()` has been called without a later `disconnect()`.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// The timestep handed to `connect()`.
    #[must_use]
    pub const fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Commands issued to one oracle joint index, in order.
    #[must_use]
    pub fn commands_for(&self, index: usize) -> Vec<MotorCommand> {
        self.commands
            .iter()
            .filter(|(i, _)| *i == index)
            .map(|(_, c)| *c)
            .collect()
    }

    /// Forget all recorded commands and resets.
    pub fn clear_recordings(&mut self) {
        self.commands.clear();
        self.joint_resets.clear();
        self.base_resets.clear();
    }

    fn take_query_failure(&mut self) -> Result<(), OracleError> {
        if self.fail_next_query {
            self.fail_next_query = false;
            return Err(OracleError::QueryFailed("scripted failure".into()));
        }
        Ok(())
    }
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsOracle for ScriptedOracle {
    fn connect(&mut self, timestep_secs: f64) -> Result<(), OracleError> {
        if self.fail_connect {
            return Err(OracleError::ConnectionFailed("scripted failure".into()));
        }
        self.connected = true;
        self.timestep = timestep_secs;
        if let Some(script) = &self.velocity_script {
            self.velocity = script(self.tick, self.timestep);
        }
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), OracleError> {
        self.connected = false;
        Ok(())
    }

    fn step(&mut self) -> Result<(), OracleError> {
        if self.fail_next_step {
            self.fail_next_step = false;
            return Err(OracleError::StepFailed("scripted failure".into()));
        }
        self.tick += 1;
        self.steps_taken += 1;
        if let Some(script) = &self.velocity_script {
            self.velocity = script(self.tick, self.timestep);
        }
        Ok(())
    }

    fn ground_contacts(&mut self) -> Result<Vec<ContactPoint>, OracleError> {
        self.take_query_failure()?;
        Ok(self.contacts.clone())
    }

    fn joint_reading(&self, index: usize) -> Result<JointReading, OracleError> {
        Ok(self.joints.get(&index).copied().unwrap_or_default())
    }

    fn base_pose(&self) -> Result<BasePose, OracleError> {
        Ok(self.pose)
    }

    fn base_velocity(&self) -> Result<BaseVelocity, OracleError> {
        Ok(self.velocity)
    }

    fn command_motor(&mut self, index: usize, command: MotorCommand) -> Result<(), OracleError> {
        if self.fail_next_command {
            self.fail_next_command = false;
            return Err(OracleError::CommandFailed("scripted failure".into()));
        }
        self.commands.push((index, command));
        Ok(())
    }

    fn reset_joint(&mut self, index: usize, position: f64) -> Result<(), OracleError> {
        self.joint_resets.push((index, position));
        let entry = self.joints.entry(index).or_default();
        entry.position = position;
        entry.velocity = 0.0;
        Ok(())
    }

    fn reset_base(&mut self, pose: &BasePose) -> Result<(), OracleError> {
        self.base_resets.push(*pose);
        self.pose = *pose;
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn connect_records_timestep() {
        let mut oracle = ScriptedOracle::new();
        oracle.connect(0.002).unwrap();
        assert!(oracle.is_connected());
        assert!((oracle.timestep() - 0.002).abs() < f64::EPSILON);
    }

    #[test]
    fn step_counts() {
        let mut oracle = ScriptedOracle::new();
        oracle.connect(0.001).unwrap();
        oracle.step().unwrap();
        oracle.step().unwrap();
        assert_eq!(oracle.steps_taken, 2);
    }

    #[test]
    fn velocity_script_follows_tick() {
        let mut oracle = ScriptedOracle::new().with_velocity_script(|tick, _dt| {
            #[allow(clippy::cast_precision_loss)]
            let vx = tick as f64;
            BaseVelocity::new(Vector3::new(vx, 0.0, 0.0), Vector3::zeros())
        });
        oracle.connect(0.001).unwrap();
        assert!((oracle.base_velocity().unwrap().linear.x - 0.0).abs() < f64::EPSILON);
        oracle.step().unwrap();
        assert!((oracle.base_velocity().unwrap().linear.x - 1.0).abs() < f64::EPSILON);
        oracle.step().unwrap();
        assert!((oracle.base_velocity().unwrap().linear.x - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_joint_reads_default() {
        let oracle = ScriptedOracle::new();
        let reading = oracle.joint_reading(99).unwrap();
        assert!((reading.position).abs() < f64::EPSILON);
    }

    #[test]
    fn scripted_joint_reading() {
        let oracle = ScriptedOracle::new().with_joint_reading(
            7,
            JointReading {
                position: 0.67,
                velocity: -0.1,
                torque: 2.0,
            },
        );
        let reading = oracle.joint_reading(7).unwrap();
        assert!((reading.position - 0.67).abs() < f64::EPSILON);
    }

    #[test]
    fn commands_are_recorded_in_order() {
        let mut oracle = ScriptedOracle::new();
        oracle.command_motor(7, MotorCommand::Release).unwrap();
        oracle.command_motor(7, MotorCommand::Torque(1.5)).unwrap();
        assert_eq!(
            oracle.commands_for(7),
            vec![MotorCommand::Release, MotorCommand::Torque(1.5)]
        );
        assert!(oracle.commands_for(9).is_empty());
    }

    #[test]
    fn reset_joint_updates_reading() {
        let mut oracle = ScriptedOracle::new();
        oracle.reset_joint(4, 0.25).unwrap();
        assert!((oracle.joint_reading(4).unwrap().position - 0.25).abs() < f64::EPSILON);
        assert_eq!(oracle.joint_resets, vec![(4, 0.25)]);
    }

    #[test]
    fn failure_flags_fire_once() {
        let mut oracle = ScriptedOracle::new();
        oracle.fail_next_step();
        assert!(oracle.step().is_err());
        assert!(oracle.step().is_ok());

        oracle.fail_next_query();
        assert!(oracle.ground_contacts().is_err());
        assert!(oracle.ground_contacts().is_ok());

        oracle.fail_next_command();
        assert!(oracle.command_motor(0, MotorCommand::Release).is_err());
        assert!(oracle.command_motor(0, MotorCommand::Release).is_ok());
    }

    #[test]
    fn clear_recordings_empties_logs() {
        let mut oracle = ScriptedOracle::new();
        oracle.command_motor(1, MotorCommand::Torque(1.0)).unwrap();
        oracle.reset_base(&BasePose::identity()).unwrap();
        oracle.clear_recordings();
        assert!(oracle.commands.is_empty());
        assert!(oracle.base_resets.is_empty());
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn scripted_oracle_is_send() {
        assert_send::<ScriptedOracle>();
    }
}
