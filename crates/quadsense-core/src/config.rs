use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::joints::{FootLinkMap, JointIndexMap};
use crate::oracle::ServoGains;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_timestep() -> f64 {
    0.001
}
const fn default_gyro_std() -> f64 {
    0.01
}
const fn default_accel_std() -> f64 {
    0.1
}
const fn default_gyro_bias_std() -> f64 {
    0.000_01
}
const fn default_accel_bias_std() -> f64 {
    0.000_1
}
const fn default_position_std() -> f64 {
    0.001
}
const fn default_velocity_std() -> f64 {
    0.1
}
const fn default_torque_std() -> f64 {
    0.1
}
const fn default_true() -> bool {
    true
}
const fn default_kp() -> f64 {
    0.1
}
const fn default_kd() -> f64 {
    0.0001
}
const fn default_max_force() -> f64 {
    30.0
}

// ---------------------------------------------------------------------------
// ImuNoiseConfig
// ---------------------------------------------------------------------------

/// IMU noise parameters: white measurement noise plus bias random walks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuNoiseConfig {
    /// Gyro white-noise std (rad/s, default 0.01).
    #[serde(default = "default_gyro_std")]
    pub gyro_std: f64,

    /// Accelerometer white-noise std (m/s², default 0.1).
    #[serde(default = "default_accel_std")]
    pub accel_std: f64,

    /// Gyro bias random-walk step std per tick (rad/s, default 1e-5).
    #[serde(default = "default_gyro_bias_std")]
    pub gyro_bias_std: f64,

    /// Accelerometer bias random-walk step std per tick (m/s², default 1e-4).
    #[serde(default = "default_accel_bias_std")]
    pub accel_bias_std: f64,
}

impl Default for ImuNoiseConfig {
    fn default() -> Self {
        Self {
            gyro_std: default_gyro_std(),
            accel_std: default_accel_std(),
            gyro_bias_std: default_gyro_bias_std(),
            accel_bias_std: default_accel_bias_std(),
        }
    }
}

// ---------------------------------------------------------------------------
// JointNoiseConfig
// ---------------------------------------------------------------------------

/// Per-channel joint sensor noise parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointNoiseConfig {
    /// Position noise std (rad, default 0.001).
    #[serde(default = "default_position_std")]
    pub position_std: f64,

    /// Velocity noise std (rad/s, default 0.1).
    #[serde(default = "default_velocity_std")]
    pub velocity_std: f64,

    /// Torque noise std (N·m, default 0.1).
    #[serde(default = "default_torque_std")]
    pub torque_std: f64,

    /// Master switch for joint noise injection (default on).
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for JointNoiseConfig {
    fn default() -> Self {
        Self {
            position_std: default_position_std(),
            velocity_std: default_velocity_std(),
            torque_std: default_torque_std(),
            enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// ServoGainConfig
// ---------------------------------------------------------------------------

/// Position-servo gains used by the actuator dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoGainConfig {
    /// Proportional gain (default 0.1).
    #[serde(default = "default_kp")]
    pub kp: f64,

    /// Damping gain (default 0.0001).
    #[serde(default = "default_kd")]
    pub kd: f64,

    /// Force clamp (N·m, default 30).
    #[serde(default = "default_max_force")]
    pub max_force: f64,
}

impl ServoGainConfig {
    /// The gains in the oracle command form.
    #[must_use]
    pub const fn gains(&self) -> ServoGains {
        ServoGains {
            kp: self.kp,
            kd: self.kd,
            max_force: self.max_force,
        }
    }
}

impl Default for ServoGainConfig {
    fn default() -> Self {
        Self {
            kp: default_kp(),
            kd: default_kd(),
            max_force: default_max_force(),
        }
    }
}

// ---------------------------------------------------------------------------
// HarnessConfig
// ---------------------------------------------------------------------------

/// Main harness configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Fixed simulation timestep in seconds (default: 0.001 = 1000 Hz).
    #[serde(default = "default_timestep")]
    pub timestep_secs: f64,

    /// Master random seed. Per-sensor streams are derived from it.
    #[serde(default)]
    pub seed: u64,

    /// IMU noise block.
    #[serde(default)]
    pub imu: ImuNoiseConfig,

    /// Joint sensor noise block.
    #[serde(default)]
    pub joints: JointNoiseConfig,

    /// Position-servo gain block.
    #[serde(default)]
    pub servo: ServoGainConfig,

    /// Canonical-slot → oracle-index table.
    #[serde(default)]
    pub joint_map: JointIndexMap,

    /// Per-leg foot link ids for contact attribution.
    #[serde(default)]
    pub foot_links: FootLinkMap,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timestep_secs: default_timestep(),
            seed: 0,
            imu: ImuNoiseConfig::default(),
            joints: JointNoiseConfig::default(),
            servo: ServoGainConfig::default(),
            joint_map: JointIndexMap::default(),
            foot_links: FootLinkMap::default(),
        }
    }
}

impl HarnessConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.timestep_secs.is_finite() || self.timestep_secs <= 0.0 {
            return Err(ConfigError::InvalidTimestep(self.timestep_secs));
        }
        let stds: [(&'static str, f64); 7] = [
            ("imu.gyro_std", self.imu.gyro_std),
            ("imu.accel_std", self.imu.accel_std),
            ("imu.gyro_bias_std", self.imu.gyro_bias_std),
            ("imu.accel_bias_std", self.imu.accel_bias_std),
            ("joints.position_std", self.joints.position_std),
            ("joints.velocity_std", self.joints.velocity_std),
            ("joints.torque_std", self.joints.torque_std),
        ];
        for (field, value) in stds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidStdDev { field, value });
            }
        }
        if !self.servo.kp.is_finite()
            || !self.servo.kd.is_finite()
            || !self.servo.max_force.is_finite()
            || self.servo.max_force < 0.0
        {
            return Err(ConfigError::InvalidServoGains(format!(
                "kp={}, kd={}, max_force={}",
                self.servo.kp, self.servo.kd, self.servo.max_force
            )));
        }
        // A table coming from a config file bypasses the checked
        // constructor; re-check it here.
        JointIndexMap::new(*self.joint_map.table())?;
        Ok(())
    }

    /// Simulation rate in Hz.
    #[must_use]
    pub fn rate_hz(&self) -> f64 {
        1.0 / self.timestep_secs
    }

    /// Load from a TOML file and validate.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
