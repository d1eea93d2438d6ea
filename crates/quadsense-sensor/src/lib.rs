//! Sensor emulation for the quadsense harness.
//!
//! Three sensors synthesize the estimator-facing stream from ground truth:
//!
//! - [`ContactSensor`](contact::ContactSensor): per-foot contact extraction
//!   from the oracle's raw contact records.
//! - [`JointSensor`](joints::JointSensor): canonical-order joint readout
//!   with per-channel Gaussian noise and the torque-mode override.
//! - [`ImuSensor`](imu::ImuSensor): finite-difference specific force and
//!   body-frame rates, corrupted by white noise and random-walk bias.

pub mod contact;
pub mod imu;
pub mod joints;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::contact::ContactSensor;
    pub use crate::imu::ImuSensor;
    pub use crate::joints::{JointReadout, JointSensor};
}
