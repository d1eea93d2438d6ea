//! Engine-agnostic physics oracle trait.
//!
//! The harness never talks to a physics engine directly: any engine
//! (a pybullet bridge, rapier, a scripted stand-in) implements
//! [`PhysicsOracle`] and is handed to the harness at construction.  The
//! oracle owns scene loading; the harness owns everything sensor-shaped.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::types::{BasePose, BaseVelocity};

// ---------------------------------------------------------------------------
// ContactPoint
// ---------------------------------------------------------------------------

/// One raw contact record between the robot and the ground, as reported by
/// the oracle's collision solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    /// Robot link the contact is attached to.
    pub link_id: i32,
    /// Unit contact normal (world frame).
    pub normal: Vector3<f64>,
    /// Penetration distance (m, negative when interpenetrating).
    pub distance: f64,
    /// Scalar normal force (N).
    pub normal_force: f64,
}

// ---------------------------------------------------------------------------
// JointReading
// ---------------------------------------------------------------------------

/// Noiseless per-joint state at the oracle's own index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointReading {
    /// Joint position (rad).
    pub position: f64,
    /// Joint velocity (rad/s).
    pub velocity: f64,
    /// Torque applied by the joint motor (N·m).
    pub torque: f64,
}

// ---------------------------------------------------------------------------
// MotorCommand
// ---------------------------------------------------------------------------

/// Position-servo gain parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoGains {
    /// Proportional gain.
    pub kp: f64,
    /// Damping gain.
    pub kd: f64,
    /// Force/torque clamp (N·m).
    pub max_force: f64,
}

impl Default for ServoGains {
    /// Gains of the reference quadruped's stance servo.
    fn default() -> Self {
        Self {
            kp: 0.1,
            kd: 0.0001,
            max_force: 30.0,
        }
    }
}

/// A typed low-level motor command for a single joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotorCommand {
    /// Drop any servo hold on the joint (zero commanded force).  Issued
    /// before switching a joint to direct torque drive.
    Release,
    /// Direct torque drive (N·m).
    Torque(f64),
    /// Position servo toward `target` (rad) with the given gains.
    PositionServo {
        target: f64,
        gains: ServoGains,
    },
}

// ---------------------------------------------------------------------------
// PhysicsOracle
// ---------------------------------------------------------------------------

/// Trait that concrete physics engines must implement.
///
/// The oracle is an opaque stepping service: it integrates the equations of
/// motion, resolves contacts, and answers state queries.  All failures are
/// fatal to the current tick: the harness propagates them without retrying,
/// since simulation state after a failed call is undefined.
pub trait PhysicsOracle: Send + 'static {
    /// Establish the simulation session: connect the engine, load the
    /// ground plane and robot body, apply the fixed timestep.
    fn connect(&mut self, timestep_secs: f64) -> Result<(), OracleError>;

    /// Release the simulation session.  No further calls are valid.
    fn disconnect(&mut self) -> Result<(), OracleError>;

    /// Advance the simulation by one fixed timestep.
    fn step(&mut self) -> Result<(), OracleError>;

    /// All contact records between the robot and the ground for the current
    /// tick.  May contain several manifold points per link.
    fn ground_contacts(&mut self) -> Result<Vec<ContactPoint>, OracleError>;

    /// Noiseless joint state at the oracle's own `index`.
    fn joint_reading(&self, index: usize) -> Result<JointReading, OracleError>;

    /// Ground-truth base pose (world frame).
    fn base_pose(&self) -> Result<BasePose, OracleError>;

    /// Ground-truth base velocity (world frame).
    fn base_velocity(&self) -> Result<BaseVelocity, OracleError>;

    /// Issue a motor command to the joint at the oracle's own `index`.
    fn command_motor(&mut self, index: usize, command: MotorCommand) -> Result<(), OracleError>;

    /// Teleport the joint at `index` to `position` (rad), zeroing its
    /// velocity.  Used only during (re-)initialization.
    fn reset_joint(&mut self, index: usize, position: f64) -> Result<(), OracleError>;

    /// Teleport the base to `pose`, zeroing its velocity.  Used only during
    /// (re-)initialization.
    fn reset_base(&mut self, pose: &BasePose) -> Result<(), OracleError>;

    /// Human-readable engine name (e.g., "pybullet-bridge").
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
