//! The simulation harness: oracle stepping plus one sensor pass per tick.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use quadsense_actuator::dispatcher::{ActuatorDispatcher, ControlMode};
use quadsense_core::config::HarnessConfig;
use quadsense_core::error::{HarnessError, StateError};
use quadsense_core::joints::{Leg, JOINT_COUNT};
use quadsense_core::oracle::PhysicsOracle;
use quadsense_core::seed::SeedTree;
use quadsense_core::time::SimTime;
use quadsense_core::types::{
    BasePose, BaseVelocity, ContactState, Frame, InitialState, SensorFrame,
};
use quadsense_sensor::contact::ContactSensor;
use quadsense_sensor::imu::ImuSensor;
use quadsense_sensor::joints::JointSensor;

// ---------------------------------------------------------------------------
// HarnessState
// ---------------------------------------------------------------------------

/// Harness lifecycle.
///
/// ```text
/// Uninitialized ──init──► Ready ──step──► Stepping ──disconnect──► Disconnected
///                           ▲                │
///                           └────── init ────┘   (re-initialization)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    /// Constructed; the oracle is not connected yet.
    Uninitialized,
    /// Initialized; no tick has been taken since.
    Ready,
    /// At least one tick has been taken; sensor reads are valid.
    Stepping,
    /// Terminal. Every further operation fails.
    Disconnected,
}

// ---------------------------------------------------------------------------
// SimulationHarness
// ---------------------------------------------------------------------------

/// Owns the stepping oracle and orchestrates sensors and actuation.
///
/// Single-threaded and synchronous: every call runs to completion, blocking
/// only on the oracle's own stepping call.  Sensor reads are only valid
/// after `step()` has advanced the tick, and always run in the fixed order
/// contacts, then joints, then IMU; the IMU's finite-difference baseline is
/// anchored to the tick boundary.
///
/// The harness is not safe for concurrent use from multiple callers; wrap it
/// externally if it must cross threads.
#[derive(Debug)]
pub struct SimulationHarness<O: PhysicsOracle> {
    oracle: O,
    config: HarnessConfig,
    state: HarnessState,
    clock: SimTime,
    ticks: u64,
    imu: ImuSensor,
    joints: JointSensor,
    contacts: [ContactSensor; 4],
    dispatcher: ActuatorDispatcher,
    imu_rng: ChaCha8Rng,
    joint_rng: ChaCha8Rng,
}

impl<O: PhysicsOracle> SimulationHarness<O> {
    /// Create a harness around `oracle`.  Validates `config` and derives
    /// the per-sensor noise streams from its seed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](quadsense_core::error::ConfigError) wrapped
    /// in [`HarnessError::Config`] on invalid configuration.
    pub fn new(oracle: O, config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let seeds = SeedTree::new(config.seed);
        let imu = ImuSensor::new(config.timestep_secs, &config.imu)?;
        let joints = JointSensor::new(config.joint_map, &config.joints)?;
        let contacts = Leg::ALL.map(|leg| ContactSensor::from_map(leg, &config.foot_links));
        let dispatcher = ActuatorDispatcher::new(config.joint_map, config.servo.gains());
        let imu_rng = seeds.sensor_rng("imu");
        let joint_rng = seeds.sensor_rng("joints");
        Ok(Self {
            oracle,
            config,
            state: HarnessState::Uninitialized,
            clock: SimTime::new(),
            ticks: 0,
            imu,
            joints,
            contacts,
            dispatcher,
            imu_rng,
            joint_rng,
        })
    }

    // -- state guards --

    fn require_initialized(&self, op: &'static str) -> Result<(), StateError> {
        match self.state {
            HarnessState::Ready | HarnessState::Stepping => Ok(()),
            HarnessState::Uninitialized => Err(StateError::NotInitialized { op }),
            HarnessState::Disconnected => Err(StateError::Disconnected { op }),
        }
    }

    fn require_stepping(&self, op: &'static str) -> Result<(), StateError> {
        match self.state {
            HarnessState::Stepping => Ok(()),
            HarnessState::Ready => Err(StateError::NotStepped { op }),
            HarnessState::Uninitialized => Err(StateError::NotInitialized { op }),
            HarnessState::Disconnected => Err(StateError::Disconnected { op }),
        }
    }

    // -- lifecycle --

    /// Initialize (or re-initialize) the simulation.
    ///
    /// On first use this connects the oracle, which loads the ground plane
    /// and robot.  The base and all twelve joints are teleported to
    /// `initial`, and all sensor state (IMU bias walks, the
    /// finite-difference baseline, contact states, the actuator mode, the
    /// clock, and the tick counter) is cleared.  This is the only path
    /// that clears IMU bias.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::Disconnected`] after `disconnect`, and
    /// propagates oracle connection/reset failures.
    pub fn init(&mut self, initial: &InitialState) -> Result<(), HarnessError> {
        match self.state {
            HarnessState::Disconnected => {
                return Err(StateError::Disconnected { op: "init" }.into());
            }
            HarnessState::Uninitialized => {
                self.oracle.connect(self.config.timestep_secs)?;
            }
            // Re-initialization reuses the live connection.
            HarnessState::Ready | HarnessState::Stepping => {}
        }

        self.oracle.reset_base(&initial.base_pose)?;
        for slot in 0..JOINT_COUNT {
            let index = self.config.joint_map.oracle_index(slot);
            self.oracle
                .reset_joint(index, initial.joint_positions[slot])?;
        }

        self.imu.reset();
        for sensor in &mut self.contacts {
            sensor.update(&[]);
        }
        self.dispatcher =
            ActuatorDispatcher::new(self.config.joint_map, self.config.servo.gains());
        self.clock.reset();
        self.ticks = 0;
        self.state = HarnessState::Ready;

        info!(
            oracle = self.oracle.name(),
            timestep = self.config.timestep_secs,
            "harness initialized"
        );
        Ok(())
    }

    /// Advance the oracle by one fixed timestep, then re-derive the contact
    /// state of all four feet.
    ///
    /// # Errors
    ///
    /// Fails with a [`StateError`] outside Ready/Stepping; oracle failures
    /// propagate and are fatal to the tick.
    pub fn step(&mut self) -> Result<(), HarnessError> {
        self.require_initialized("step")?;
        self.oracle.step()?;

        let records = self.oracle.ground_contacts()?;
        for sensor in &mut self.contacts {
            sensor.update(&records);
        }

        self.ticks += 1;
        self.clock.advance_secs(self.config.timestep_secs);
        self.state = HarnessState::Stepping;
        trace!(tick = self.ticks, time = %self.clock, "stepped");
        Ok(())
    }

    /// Read the full sensor suite for the current tick.
    ///
    /// Joints are read first (with the commanded-torque override while in
    /// torque mode), then the IMU; contact states were already re-derived by
    /// [`step`](Self::step).  Call once per tick; the IMU's
    /// finite-difference baseline advances on every read.
    ///
    /// # Errors
    ///
    /// Fails with a [`StateError`] unless at least one step has completed;
    /// oracle query failures propagate.
    pub fn read_sensors(&mut self) -> Result<SensorFrame, HarnessError> {
        self.require_stepping("read_sensors")?;

        let readout = self.joints.read(
            &self.oracle,
            self.dispatcher.commanded_torque(),
            &mut self.joint_rng,
        )?;
        let imu = self.imu.sample(&self.oracle, &mut self.imu_rng)?;

        debug!(tick = self.ticks, "sensor frame read");
        Ok(SensorFrame {
            tick: self.ticks,
            gyro: imu.angular_velocity,
            accel: imu.linear_acceleration,
            joint_positions: readout.positions,
            joint_velocities: readout.velocities,
            joint_torques: readout.torques,
            contacts: self.contact_states(),
        })
    }

    /// Switch to torque control and drive all joints (N·m, canonical order).
    ///
    /// # Errors
    ///
    /// State and argument violations surface before any motor call; oracle
    /// failures propagate.
    pub fn apply_torque(&mut self, torques: &[f64]) -> Result<(), HarnessError> {
        self.require_initialized("apply_torque")?;
        self.dispatcher.apply_torque(&mut self.oracle, torques)
    }

    /// Switch to position control and servo all joints (rad, canonical
    /// order).
    ///
    /// # Errors
    ///
    /// State and argument violations surface before any motor call; oracle
    /// failures propagate.
    pub fn apply_position(&mut self, positions: &[f64]) -> Result<(), HarnessError> {
        self.require_initialized("apply_position")?;
        self.dispatcher.apply_position(&mut self.oracle, positions)
    }

    /// Release the oracle connection.  Terminal: every later call,
    /// including a second `disconnect`, fails with a [`StateError`].
    ///
    /// # Errors
    ///
    /// [`StateError::Disconnected`] if already disconnected,
    /// [`StateError::NotInitialized`] if never initialized.
    pub fn disconnect(&mut self) -> Result<(), HarnessError> {
        self.require_initialized("disconnect")?;
        self.oracle.disconnect()?;
        self.state = HarnessState::Disconnected;
        info!(ticks = self.ticks, "harness disconnected");
        Ok(())
    }

    // -- accessors --

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> HarnessState {
        self.state
    }

    /// Ticks taken since the last `init`.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time since the last `init`.
    #[must_use]
    pub const fn sim_time(&self) -> SimTime {
        self.clock
    }

    /// The configuration this harness was built with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The dispatcher's active control mode.
    #[must_use]
    pub const fn control_mode(&self) -> ControlMode {
        self.dispatcher.mode()
    }

    /// Contact state of one foot, as of the last completed step.
    #[must_use]
    pub fn contact_state(&self, leg: Leg) -> ContactState {
        self.contacts[leg.index()].state()
    }

    /// All four contact states in canonical leg order.
    #[must_use]
    pub fn contact_states(&self) -> [ContactState; 4] {
        Leg::ALL.map(|leg| self.contacts[leg.index()].state())
    }

    /// Ground-truth base pose straight from the oracle.  Validation tooling
    /// only, never handed to the estimator.
    ///
    /// # Errors
    ///
    /// State guard plus oracle query failures.
    pub fn ground_truth_pose(&self) -> Result<BasePose, HarnessError> {
        self.require_initialized("ground_truth_pose")?;
        Ok(self.oracle.base_pose()?)
    }

    /// Ground-truth base velocity in the requested frame.  Validation
    /// tooling only.
    ///
    /// # Errors
    ///
    /// State guard plus oracle query failures.
    pub fn ground_truth_velocity(&self, frame: Frame) -> Result<BaseVelocity, HarnessError> {
        self.require_initialized("ground_truth_velocity")?;
        let velocity = self.oracle.base_velocity()?;
        Ok(match frame {
            Frame::World => velocity,
            Frame::Local => velocity.to_local(&self.oracle.base_pose()?),
        })
    }

    /// The wrapped oracle.
    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Mutable access to the wrapped oracle (scenario scripting in tests
    /// and tooling).
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
