//! Pre-configured noise models for the reference quadruped's sensors.
//!
//! Parameters follow the sensor characterization used to validate the
//! legged state estimator: white measurement noise on every channel, plus
//! per-tick bias random walks on the IMU.

use crate::axes::AxisBank;
use crate::model::{NoiseError, NoiseModel};

/// Gyroscope white noise (0.01 rad/s std), 3 axes.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn gyro_white() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(&NoiseModel::white(0.01)?, 3))
}

/// Accelerometer white noise (0.1 m/s² std), 3 axes.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn accel_white() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(&NoiseModel::white(0.1)?, 3))
}

/// Gyroscope bias random walk (1e-5 rad/s step std), 3 axes.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn gyro_bias_walk() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(
        &NoiseModel::random_walk(0.000_01)?,
        3,
    ))
}

/// Accelerometer bias random walk (1e-4 m/s² step std), 3 axes.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn accel_bias_walk() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(
        &NoiseModel::random_walk(0.000_1)?,
        3,
    ))
}

/// Joint encoder position noise (0.001 rad std), 12 slots.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn joint_position() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(&NoiseModel::white(0.001)?, 12))
}

/// Joint velocity noise (0.1 rad/s std), 12 slots.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn joint_velocity() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(&NoiseModel::white(0.1)?, 12))
}

/// Joint torque noise (0.1 N·m std), 12 slots.
///
/// # Errors
///
/// Propagates [`NoiseError`] from model construction.
pub fn joint_torque() -> Result<AxisBank, NoiseError> {
    Ok(AxisBank::uniform_across(&NoiseModel::white(0.1)?, 12))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
