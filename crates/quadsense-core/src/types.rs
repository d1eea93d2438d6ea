//! Ground-truth state snapshots and the sensor-facing data types.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::joints::JointVector;

/// Standard gravity magnitude (m/s²).
pub const GRAVITY_MPS2: f64 = 9.81;

/// Gravity compensation vector added to the finite-difference acceleration
/// so the IMU output is a specific-force reading (+z for a supported body).
#[must_use]
pub fn gravity_vector() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, GRAVITY_MPS2)
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Reference frame selector for base-state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Fixed world/inertial frame.
    World,
    /// The robot base's own rotating frame.
    Local,
}

// ---------------------------------------------------------------------------
// BasePose
// ---------------------------------------------------------------------------

/// World-frame base pose, snapshotted once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePose {
    /// Base position (m, world frame).
    pub position: Vector3<f64>,
    /// Base orientation (world frame).
    pub orientation: UnitQuaternion<f64>,
}

impl BasePose {
    /// Create a pose from position and orientation.
    #[must_use]
    pub const fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Identity orientation at the origin.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Rotate a world-frame vector into the base-local frame: `R(q)ᵀ · v`.
    #[must_use]
    pub fn world_to_local(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.orientation.inverse_transform_vector(v)
    }

    /// Rotate a base-local vector into the world frame: `R(q) · v`.
    #[must_use]
    pub fn local_to_world(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.orientation.transform_vector(v)
    }
}

impl Default for BasePose {
    fn default() -> Self {
        Self::identity()
    }
}

// ---------------------------------------------------------------------------
// BaseVelocity
// ---------------------------------------------------------------------------

/// Base linear and angular velocity.
///
/// The oracle reports velocities in the world frame; [`to_local`](Self::to_local)
/// re-expresses them in the base frame via the orientation's rotation
/// transpose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseVelocity {
    /// Linear velocity (m/s).
    pub linear: Vector3<f64>,
    /// Angular velocity (rad/s).
    pub angular: Vector3<f64>,
}

impl BaseVelocity {
    /// Create from linear and angular components.
    #[must_use]
    pub const fn new(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
        Self { linear, angular }
    }

    /// Zero velocity.
    #[must_use]
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Re-express a world-frame velocity in the base-local frame of `pose`:
    /// `v_local = R(q)ᵀ · v_world` for both components.
    #[must_use]
    pub fn to_local(&self, pose: &BasePose) -> Self {
        Self {
            linear: pose.world_to_local(&self.linear),
            angular: pose.world_to_local(&self.angular),
        }
    }
}

// ---------------------------------------------------------------------------
// ContactState
// ---------------------------------------------------------------------------

/// Contact state of one foot, fully recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactState {
    /// Whether any contact record matched this foot this tick.
    pub active: bool,
    /// Unit contact normal (world frame). +Z when inactive.
    pub normal: Vector3<f64>,
    /// Penetration distance (m). Zero when inactive.
    pub distance: f64,
    /// Scalar normal force (N). Zero when inactive.
    pub normal_force: f64,
}

impl ContactState {
    /// The inactive default: +Z normal, zero distance and force.
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            active: false,
            normal: Vector3::z(),
            distance: 0.0,
            normal_force: 0.0,
        }
    }

    /// Contact force vector: `normal_force × normal`.
    #[must_use]
    pub fn force(&self) -> Vector3<f64> {
        self.normal * self.normal_force
    }
}

impl Default for ContactState {
    fn default() -> Self {
        Self::inactive()
    }
}

// ---------------------------------------------------------------------------
// ImuSample
// ---------------------------------------------------------------------------

/// One IMU reading: noisy, biased, base-local.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    /// Angular velocity (rad/s, base frame).
    pub angular_velocity: Vector3<f64>,
    /// Linear acceleration (m/s², base frame, specific-force convention).
    pub linear_acceleration: Vector3<f64>,
}

// ---------------------------------------------------------------------------
// InitialState
// ---------------------------------------------------------------------------

/// Initial generalized configuration applied by the harness at `init`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    /// Initial base pose (world frame).
    pub base_pose: BasePose,
    /// Initial joint positions in canonical order (rad).
    pub joint_positions: JointVector,
}

impl InitialState {
    /// The reference quadruped's standing configuration: base 0.3181 m above
    /// the ground, each leg at [0.0, 0.67, -1.3] rad.
    #[must_use]
    pub fn standing() -> Self {
        let mut joints = JointVector::zeros();
        for leg in crate::joints::Leg::ALL {
            joints.set(leg, crate::joints::LegJoint::Hip, 0.0);
            joints.set(leg, crate::joints::LegJoint::Thigh, 0.67);
            joints.set(leg, crate::joints::LegJoint::Calf, -1.3);
        }
        Self {
            base_pose: BasePose::new(
                Vector3::new(0.0, 0.0, 0.3181),
                UnitQuaternion::identity(),
            ),
            joint_positions: joints,
        }
    }
}

impl Default for InitialState {
    fn default() -> Self {
        Self::standing()
    }
}

// ---------------------------------------------------------------------------
// SensorFrame
// ---------------------------------------------------------------------------

/// The per-tick delivery to the state estimator.
///
/// Everything here is synthesized sensor data in canonical joint order; the
/// estimator is never handed ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Tick index this frame was read at (first tick after init is 1).
    pub tick: u64,
    /// Gyroscope reading (rad/s, base frame).
    pub gyro: Vector3<f64>,
    /// Accelerometer reading (m/s², base frame).
    pub accel: Vector3<f64>,
    /// Joint positions (rad).
    pub joint_positions: JointVector,
    /// Joint velocities (rad/s).
    pub joint_velocities: JointVector,
    /// Joint torques (N·m).
    pub joint_torques: JointVector,
    /// Foot contact states in canonical leg order.
    pub contacts: [ContactState; 4],
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
