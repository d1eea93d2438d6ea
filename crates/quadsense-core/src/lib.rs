// quadsense-core: Types, traits, config, errors, and seeding for the quadsense harness.

pub mod config;
pub mod error;
pub mod joints;
pub mod oracle;
pub mod seed;
pub mod time;
pub mod types;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{HarnessConfig, ImuNoiseConfig, JointNoiseConfig, ServoGainConfig};
    pub use crate::error::{ArgumentError, ConfigError, HarnessError, OracleError, StateError};
    pub use crate::joints::{
        FootLinkMap, JointIndexMap, JointVector, Leg, LegJoint, JOINTS_PER_LEG, JOINT_COUNT,
    };
    pub use crate::oracle::{ContactPoint, JointReading, MotorCommand, PhysicsOracle, ServoGains};
    pub use crate::types::{
        BasePose, BaseVelocity, ContactState, Frame, ImuSample, InitialState, SensorFrame,
        GRAVITY_MPS2,
    };
}
