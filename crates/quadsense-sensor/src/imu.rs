//! IMU emulation: body-frame rates and specific force with noise and bias.

use nalgebra::Vector3;
use rand::Rng;

use quadsense_core::config::ImuNoiseConfig;
use quadsense_core::error::{ConfigError, HarnessError};
use quadsense_core::oracle::PhysicsOracle;
use quadsense_core::types::{gravity_vector, ImuSample};
use quadsense_noise::axes::AxisBank;
use quadsense_noise::model::NoiseModel;

// ---------------------------------------------------------------------------
// ImuSensor
// ---------------------------------------------------------------------------

/// Synthesizes gyro and accelerometer readings from ground-truth base state.
///
/// The accelerometer output is a specific-force reading: the world-frame
/// acceleration is estimated by backward finite difference over the stored
/// previous velocity, gravity-compensated with `+g`, and rotated into the
/// base frame.  A supported static body therefore reads `[0, 0, +9.81]` and
/// a free-falling one reads zero, like a real accelerometer.
///
/// Gyro and accelerometer biases are per-axis random walks owned by this
/// instance; they accumulate for the lifetime of the sensor and are cleared
/// only by [`reset`](Self::reset).  Two harness instances own two
/// independent bias states.
///
/// Calling contract: [`sample`](Self::sample) must run exactly once per
/// simulation tick.  Skipped ticks silently stretch the finite-difference
/// baseline and corrupt the acceleration estimate; this layer cannot detect
/// that.
#[derive(Debug, Clone)]
pub struct ImuSensor {
    timestep: f64,
    gyro_noise: AxisBank,
    accel_noise: AxisBank,
    gyro_bias: AxisBank,
    accel_bias: AxisBank,
    prev_linear_velocity: Vector3<f64>,
}

impl ImuSensor {
    /// Create an IMU from the fixed timestep and noise parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimestep`] for a non-positive timestep
    /// and [`ConfigError::InvalidStdDev`] for invalid noise parameters.
    pub fn new(timestep: f64, config: &ImuNoiseConfig) -> Result<Self, ConfigError> {
        if !timestep.is_finite() || timestep <= 0.0 {
            return Err(ConfigError::InvalidTimestep(timestep));
        }
        let white = |field: &'static str, std: f64| -> Result<AxisBank, ConfigError> {
            let model = NoiseModel::white(std)
                .map_err(|_| ConfigError::InvalidStdDev { field, value: std })?;
            Ok(AxisBank::uniform_across(&model, 3))
        };
        let walk = |field: &'static str, std: f64| -> Result<AxisBank, ConfigError> {
            let model = NoiseModel::random_walk(std)
                .map_err(|_| ConfigError::InvalidStdDev { field, value: std })?;
            Ok(AxisBank::uniform_across(&model, 3))
        };
        Ok(Self {
            timestep,
            gyro_noise: white("imu.gyro_std", config.gyro_std)?,
            accel_noise: white("imu.accel_std", config.accel_std)?,
            gyro_bias: walk("imu.gyro_bias_std", config.gyro_bias_std)?,
            accel_bias: walk("imu.accel_bias_std", config.accel_bias_std)?,
            prev_linear_velocity: Vector3::zeros(),
        })
    }

    /// Produce one IMU reading from the oracle's current ground truth.
    ///
    /// # Errors
    ///
    /// Propagates oracle query failures unchanged.
    pub fn sample<O, R>(&mut self, oracle: &O, rng: &mut R) -> Result<ImuSample, HarnessError>
    where
        O: PhysicsOracle + ?Sized,
        R: Rng + ?Sized,
    {
        let pose = oracle.base_pose()?;
        let velocity = oracle.base_velocity()?;

        // Backward finite difference over the stored previous velocity,
        // then gravity compensation (specific-force convention).
        let accel_world =
            (velocity.linear - self.prev_linear_velocity) / self.timestep + gravity_vector();
        let accel_local = pose.world_to_local(&accel_world);
        let gyro_local = pose.world_to_local(&velocity.angular);

        self.prev_linear_velocity = velocity.linear;

        // Advance the bias walks, then corrupt with the post-update bias
        // plus fresh white noise.
        let gyro_bias = self.gyro_bias.sample_vector3(rng);
        let accel_bias = self.accel_bias.sample_vector3(rng);
        let angular_velocity = gyro_local + self.gyro_noise.sample_vector3(rng) + gyro_bias;
        let linear_acceleration = accel_local + self.accel_noise.sample_vector3(rng) + accel_bias;

        Ok(ImuSample {
            angular_velocity,
            linear_acceleration,
        })
    }

    /// Clear bias state and the finite-difference baseline.  Called by the
    /// harness on (re-)initialization only.
    pub fn reset(&mut self) {
        self.gyro_bias.reset();
        self.accel_bias.reset();
        self.prev_linear_velocity = Vector3::zeros();
    }

    /// Current accumulated gyro bias.
    #[must_use]
    pub fn gyro_bias(&self) -> Vector3<f64> {
        let b = self.gyro_bias.current();
        Vector3::new(b[0], b[1], b[2])
    }

    /// Current accumulated accelerometer bias.
    #[must_use]
    pub fn accel_bias(&self) -> Vector3<f64> {
        let b = self.accel_bias.current();
        Vector3::new(b[0], b[1], b[2])
    }

    /// The stored previous world-frame linear velocity.
    #[must_use]
    pub const fn previous_linear_velocity(&self) -> Vector3<f64> {
        self.prev_linear_velocity
    }

    /// The fixed timestep (seconds).
    #[must_use]
    pub const fn timestep(&self) -> f64 {
        self.timestep
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
