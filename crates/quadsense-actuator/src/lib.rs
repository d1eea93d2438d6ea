//! Joint-level actuator command dispatch for the quadsense harness.
//!
//! [`ActuatorDispatcher`] translates canonical-order torque or position
//! vectors into per-joint oracle motor commands, tracking which of the two
//! control modes is active.

pub mod dispatcher;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::dispatcher::{ActuatorDispatcher, ControlMode};
}
