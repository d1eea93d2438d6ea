//! Dual-mode (torque/position) actuator command dispatch.

use quadsense_core::error::{ArgumentError, HarnessError};
use quadsense_core::joints::{JointIndexMap, JointVector, JOINT_COUNT};
use quadsense_core::oracle::{MotorCommand, PhysicsOracle, ServoGains};

// ---------------------------------------------------------------------------
// ControlMode
// ---------------------------------------------------------------------------

/// The dispatcher's active control mode.
///
/// Exactly one mode is active at a time; switching fully overrides any
/// outstanding command of the other mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Per-joint position servo with fixed gains.
    #[default]
    Position,
    /// Direct per-joint torque drive.
    Torque,
}

// ---------------------------------------------------------------------------
// ActuatorDispatcher
// ---------------------------------------------------------------------------

/// Translates canonical-order command vectors into per-joint motor calls.
///
/// Shares the joint index table with the joint sensor so commands and
/// readings address the same physical joints.  The last commanded torque
/// vector is retained only while torque mode is active: it backs the joint
/// sensor's torque override, and switching to position mode discards it so
/// later torque reads come from the oracle's organic sensor.
#[derive(Debug, Clone)]
pub struct ActuatorDispatcher {
    map: JointIndexMap,
    gains: ServoGains,
    mode: ControlMode,
    commanded_torque: JointVector,
}

impl ActuatorDispatcher {
    /// Create a dispatcher with the given index table and servo gains.
    /// Starts in position mode with no command outstanding.
    #[must_use]
    pub fn new(map: JointIndexMap, gains: ServoGains) -> Self {
        Self {
            map,
            gains,
            mode: ControlMode::Position,
            commanded_torque: JointVector::zeros(),
        }
    }

    /// The active control mode.
    #[must_use]
    pub const fn mode(&self) -> ControlMode {
        self.mode
    }

    /// The position-servo gains.
    #[must_use]
    pub const fn gains(&self) -> ServoGains {
        self.gains
    }

    /// The last commanded torque vector, only while torque mode is active.
    #[must_use]
    pub fn commanded_torque(&self) -> Option<&JointVector> {
        match self.mode {
            ControlMode::Torque => Some(&self.commanded_torque),
            ControlMode::Position => None,
        }
    }

    /// Validate a command slice before any motor call is issued.
    fn validate(command: &[f64]) -> Result<JointVector, ArgumentError> {
        let vector = JointVector::from_slice(command)?;
        if let Some(slot) = command.iter().position(|v| !v.is_finite()) {
            return Err(ArgumentError::CommandNotFinite { slot });
        }
        Ok(vector)
    }

    /// Switch to torque mode and drive every joint with `torques` (N·m,
    /// canonical order).
    ///
    /// Each joint's servo hold is released before its torque command is
    /// issued.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::JointDimMismatch`] unless `torques` has
    /// exactly 12 elements, and [`ArgumentError::CommandNotFinite`] on
    /// NaN/infinite entries; in both cases no motor call is issued.
    /// Oracle command failures propagate.
    pub fn apply_torque<O>(&mut self, oracle: &mut O, torques: &[f64]) -> Result<(), HarnessError>
    where
        O: PhysicsOracle + ?Sized,
    {
        let vector = Self::validate(torques)?;
        self.mode = ControlMode::Torque;
        self.commanded_torque = vector;

        for slot in 0..JOINT_COUNT {
            let index = self.map.oracle_index(slot);
            oracle.command_motor(index, MotorCommand::Release)?;
        }
        for slot in 0..JOINT_COUNT {
            let index = self.map.oracle_index(slot);
            oracle.command_motor(index, MotorCommand::Torque(vector[slot]))?;
        }
        Ok(())
    }

    /// Switch to position mode and servo every joint toward `positions`
    /// (rad, canonical order) with the fixed gains.
    ///
    /// # Errors
    ///
    /// Same validation as [`apply_torque`](Self::apply_torque); no motor
    /// call is issued on rejection.  Oracle command failures propagate.
    pub fn apply_position<O>(
        &mut self,
        oracle: &mut O,
        positions: &[f64],
    ) -> Result<(), HarnessError>
    where
        O: PhysicsOracle + ?Sized,
    {
        let vector = Self::validate(positions)?;
        self.mode = ControlMode::Position;
        self.commanded_torque = JointVector::zeros();

        for slot in 0..JOINT_COUNT {
            let index = self.map.oracle_index(slot);
            oracle.command_motor(
                index,
                MotorCommand::PositionServo {
                    target: vector[slot],
                    gains: self.gains,
                },
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
