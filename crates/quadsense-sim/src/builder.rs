//! Fluent harness construction.

use quadsense_core::config::{HarnessConfig, ImuNoiseConfig, JointNoiseConfig, ServoGainConfig};
use quadsense_core::error::HarnessError;
use quadsense_core::joints::{FootLinkMap, JointIndexMap};
use quadsense_core::oracle::PhysicsOracle;

use crate::harness::SimulationHarness;

// ---------------------------------------------------------------------------
// HarnessBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`SimulationHarness`].
///
/// Starts from [`HarnessConfig::default`] (the reference quadruped) and lets
/// callers override individual blocks before `build()` validates the whole
/// configuration once.
pub struct HarnessBuilder<O: PhysicsOracle> {
    oracle: O,
    config: HarnessConfig,
}

impl<O: PhysicsOracle> HarnessBuilder<O> {
    /// Start a builder around `oracle` with default configuration.
    #[must_use]
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            config: HarnessConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the fixed timestep (seconds).
    #[must_use]
    pub fn with_timestep(mut self, timestep_secs: f64) -> Self {
        self.config.timestep_secs = timestep_secs;
        self
    }

    /// Set the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the IMU noise block.
    #[must_use]
    pub fn with_imu_noise(mut self, imu: ImuNoiseConfig) -> Self {
        self.config.imu = imu;
        self
    }

    /// Set the joint noise block.
    #[must_use]
    pub fn with_joint_noise(mut self, joints: JointNoiseConfig) -> Self {
        self.config.joints = joints;
        self
    }

    /// Set the servo gain block.
    #[must_use]
    pub fn with_servo_gains(mut self, servo: ServoGainConfig) -> Self {
        self.config.servo = servo;
        self
    }

    /// Set the joint index table.
    #[must_use]
    pub fn with_joint_map(mut self, map: JointIndexMap) -> Self {
        self.config.joint_map = map;
        self
    }

    /// Set the foot link table.
    #[must_use]
    pub fn with_foot_links(mut self, links: FootLinkMap) -> Self {
        self.config.foot_links = links;
        self
    }

    /// Validate the configuration and build the harness.
    ///
    /// # Errors
    ///
    /// Returns the underlying
    /// [`ConfigError`](quadsense_core::error::ConfigError) on invalid
    /// configuration.
    pub fn build(self) -> Result<SimulationHarness<O>, HarnessError> {
        SimulationHarness::new(self.oracle, self.config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use quadsense_test_utils::ScriptedOracle;

    #[test]
    fn defaults_build() {
        let harness = HarnessBuilder::new(ScriptedOracle::new()).build().unwrap();
        assert!((harness.config().timestep_secs - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_apply() {
        let harness = HarnessBuilder::new(ScriptedOracle::new())
            .with_timestep(0.004)
            .with_seed(99)
            .with_joint_noise(JointNoiseConfig {
                enabled: false,
                ..JointNoiseConfig::default()
            })
            .build()
            .unwrap();
        let config = harness.config();
        assert!((config.timestep_secs - 0.004).abs() < f64::EPSILON);
        assert_eq!(config.seed, 99);
        assert!(!config.joints.enabled);
    }

    #[test]
    fn invalid_override_fails_build() {
        let err = HarnessBuilder::new(ScriptedOracle::new())
            .with_timestep(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn with_config_replaces_everything() {
        let mut config = HarnessConfig::default();
        config.seed = 7;
        let harness = HarnessBuilder::new(ScriptedOracle::new())
            .with_seed(1)
            .with_config(config)
            .build()
            .unwrap();
        assert_eq!(harness.config().seed, 7);
    }
}
