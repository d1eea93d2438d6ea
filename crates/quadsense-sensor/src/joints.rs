//! Canonical-order joint readout with noise injection.

use rand::Rng;

use quadsense_core::config::JointNoiseConfig;
use quadsense_core::error::{ConfigError, HarnessError};
use quadsense_core::joints::{JointIndexMap, JointVector, JOINT_COUNT};
use quadsense_core::oracle::PhysicsOracle;
use quadsense_noise::axes::AxisBank;
use quadsense_noise::model::NoiseModel;

// ---------------------------------------------------------------------------
// JointReadout
// ---------------------------------------------------------------------------

/// One tick's joint sensor output, all vectors in canonical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointReadout {
    /// Joint positions (rad).
    pub positions: JointVector,
    /// Joint velocities (rad/s).
    pub velocities: JointVector,
    /// Joint torques (N·m).
    pub torques: JointVector,
}

// ---------------------------------------------------------------------------
// JointSensor
// ---------------------------------------------------------------------------

/// Reads the oracle's per-index joint state into canonical order and injects
/// per-channel Gaussian noise.
///
/// The oracle's internal joint indexing never leaks past this type: the
/// index map is applied on every read, and the map is bijectivity-checked
/// before the sensor exists.
#[derive(Debug, Clone)]
pub struct JointSensor {
    map: JointIndexMap,
    position_noise: AxisBank,
    velocity_noise: AxisBank,
    torque_noise: AxisBank,
    enabled: bool,
}

impl JointSensor {
    /// Create a sensor from the index map and noise parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStdDev`] if any std is negative or
    /// non-finite.
    pub fn new(map: JointIndexMap, config: &JointNoiseConfig) -> Result<Self, ConfigError> {
        let bank = |field: &'static str, std: f64| -> Result<AxisBank, ConfigError> {
            let model = NoiseModel::white(std)
                .map_err(|_| ConfigError::InvalidStdDev { field, value: std })?;
            Ok(AxisBank::uniform_across(&model, JOINT_COUNT))
        };
        Ok(Self {
            map,
            position_noise: bank("joints.position_std", config.position_std)?,
            velocity_noise: bank("joints.velocity_std", config.velocity_std)?,
            torque_noise: bank("joints.torque_std", config.torque_std)?,
            enabled: config.enabled,
        })
    }

    /// Whether noise injection is on.
    #[must_use]
    pub const fn noise_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle noise injection.
    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The index map in use.
    #[must_use]
    pub const fn map(&self) -> &JointIndexMap {
        &self.map
    }

    /// Read all twelve joints into canonical order.
    ///
    /// `torque_override` carries the last commanded torque vector while the
    /// dispatcher is in torque mode; under explicit torque control the
    /// command is authoritative and replaces the oracle's torque sensor.
    ///
    /// # Errors
    ///
    /// Propagates oracle query failures unchanged.
    pub fn read<O, R>(
        &mut self,
        oracle: &O,
        torque_override: Option<&JointVector>,
        rng: &mut R,
    ) -> Result<JointReadout, HarnessError>
    where
        O: PhysicsOracle + ?Sized,
        R: Rng + ?Sized,
    {
        let mut positions = JointVector::zeros();
        let mut velocities = JointVector::zeros();
        let mut torques = JointVector::zeros();

        for slot in 0..JOINT_COUNT {
            let reading = oracle.joint_reading(self.map.oracle_index(slot))?;
            positions[slot] = reading.position;
            velocities[slot] = reading.velocity;
            torques[slot] = reading.torque;
        }

        if let Some(commanded) = torque_override {
            torques = *commanded;
        }

        if self.enabled {
            self.position_noise.apply_slice(positions.as_mut_slice(), rng);
            self.velocity_noise.apply_slice(velocities.as_mut_slice(), rng);
            self.torque_noise.apply_slice(torques.as_mut_slice(), rng);
        }

        Ok(JointReadout {
            positions,
            velocities,
            torques,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
