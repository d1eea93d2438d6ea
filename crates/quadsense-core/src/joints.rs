//! Canonical joint ordering and the oracle-index lookup tables.
//!
//! Every sensor and actuator vector crossing the harness boundary uses the
//! same fixed 12-slot layout: four legs × three joints, legs in
//! [`Leg::ALL`] order, joints in [`LegJoint::ALL`] order.  The physics
//! oracle indexes joints in its own internal order; [`JointIndexMap`] is the
//! single place that translation lives.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Joints per leg (hip, thigh, calf).
pub const JOINTS_PER_LEG: usize = 3;

/// Total actuated joints on the quadruped.
pub const JOINT_COUNT: usize = 12;

// ---------------------------------------------------------------------------
// Leg
// ---------------------------------------------------------------------------

/// The four legs, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Leg {
    /// All legs in canonical order.  This order defines the slot layout of
    /// every [`JointVector`].
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
    ];

    /// Canonical index of this leg (0..4).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::FrontLeft => 0,
            Self::FrontRight => 1,
            Self::RearLeft => 2,
            Self::RearRight => 3,
        }
    }

    /// Short label ("FL", "FR", "RL", "RR").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontLeft => "FL",
            Self::FrontRight => "FR",
            Self::RearLeft => "RL",
            Self::RearRight => "RR",
        }
    }
}

// ---------------------------------------------------------------------------
// LegJoint
// ---------------------------------------------------------------------------

/// The three joints of a leg, proximal to distal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegJoint {
    /// Hip abduction/adduction.
    Hip,
    /// Thigh pitch.
    Thigh,
    /// Calf (knee) pitch.
    Calf,
}

impl LegJoint {
    /// All joints of a leg, in canonical order.
    pub const ALL: [Self; 3] = [Self::Hip, Self::Thigh, Self::Calf];

    /// Index of this joint within its leg (0..3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hip => 0,
            Self::Thigh => 1,
            Self::Calf => 2,
        }
    }
}

/// Canonical slot (0..12) of a (leg, joint) pair.
#[must_use]
pub const fn canonical_slot(leg: Leg, joint: LegJoint) -> usize {
    leg.index() * JOINTS_PER_LEG + joint.index()
}

// ---------------------------------------------------------------------------
// JointVector
// ---------------------------------------------------------------------------

/// A 12-element vector in canonical per-leg order.
///
/// Used for joint positions (rad), velocities (rad/s), and torques (N·m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointVector([f64; JOINT_COUNT]);

impl JointVector {
    /// All-zero vector.
    #[must_use]
    pub const fn zeros() -> Self {
        Self([0.0; JOINT_COUNT])
    }

    /// Wrap a canonical-order array.
    #[must_use]
    pub const fn new(values: [f64; JOINT_COUNT]) -> Self {
        Self(values)
    }

    /// Build from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::JointDimMismatch`](crate::error::ArgumentError)
    /// if `values` is not exactly 12 elements long.
    pub fn from_slice(values: &[f64]) -> Result<Self, crate::error::ArgumentError> {
        let arr: [f64; JOINT_COUNT] = values.try_into().map_err(|_| {
            crate::error::ArgumentError::JointDimMismatch {
                expected: JOINT_COUNT,
                got: values.len(),
            }
        })?;
        Ok(Self(arr))
    }

    /// Slice view in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Mutable slice view in canonical order.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// The underlying array.
    #[must_use]
    pub const fn into_array(self) -> [f64; JOINT_COUNT] {
        self.0
    }

    /// Value at a (leg, joint) pair.
    #[must_use]
    pub fn get(&self, leg: Leg, joint: LegJoint) -> f64 {
        self.0[canonical_slot(leg, joint)]
    }

    /// Set the value at a (leg, joint) pair.
    pub fn set(&mut self, leg: Leg, joint: LegJoint, value: f64) {
        self.0[canonical_slot(leg, joint)] = value;
    }

    /// The three values of one leg `[hip, thigh, calf]`.
    #[must_use]
    pub fn leg(&self, leg: Leg) -> [f64; JOINTS_PER_LEG] {
        let base = leg.index() * JOINTS_PER_LEG;
        [self.0[base], self.0[base + 1], self.0[base + 2]]
    }

    /// Returns `true` if every element is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Default for JointVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl std::ops::Index<usize> for JointVector {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl std::ops::IndexMut<usize> for JointVector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl From<[f64; JOINT_COUNT]> for JointVector {
    fn from(values: [f64; JOINT_COUNT]) -> Self {
        Self(values)
    }
}

// ---------------------------------------------------------------------------
// JointIndexMap
// ---------------------------------------------------------------------------

/// Lookup table mapping canonical slots to the oracle's internal joint
/// indices.
///
/// `table[slot]` is the oracle index backing canonical slot `slot`.  The
/// table must be injective (no oracle index serves two slots); this is
/// checked once at construction, never inline at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointIndexMap {
    table: [usize; JOINT_COUNT],
}

impl JointIndexMap {
    /// Index table of the reference quadruped (Unitree A1 in pybullet):
    /// FL 7/9/10, FR 2/4/5, RL 17/19/20, RR 12/14/15.
    pub const A1: Self = Self {
        table: [7, 9, 10, 2, 4, 5, 17, 19, 20, 12, 14, 15],
    };

    /// Create a map from a canonical-slot → oracle-index table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonBijectiveJointMap`] if two slots share an
    /// oracle index.
    pub fn new(table: [usize; JOINT_COUNT]) -> Result<Self, ConfigError> {
        for (i, a) in table.iter().enumerate() {
            for b in table.iter().skip(i + 1) {
                if a == b {
                    return Err(ConfigError::NonBijectiveJointMap(format!(
                        "oracle index {a} appears more than once"
                    )));
                }
            }
        }
        Ok(Self { table })
    }

    /// Oracle index backing a canonical slot.
    #[must_use]
    pub const fn oracle_index(&self, slot: usize) -> usize {
        self.table[slot]
    }

    /// Oracle index backing a (leg, joint) pair.
    #[must_use]
    pub fn oracle_index_of(&self, leg: Leg, joint: LegJoint) -> usize {
        self.table[canonical_slot(leg, joint)]
    }

    /// Canonical slot served by an oracle index, if any.
    #[must_use]
    pub fn slot_of(&self, oracle_index: usize) -> Option<usize> {
        self.table.iter().position(|&idx| idx == oracle_index)
    }

    /// The raw slot → oracle-index table.
    #[must_use]
    pub const fn table(&self) -> &[usize; JOINT_COUNT] {
        &self.table
    }
}

impl Default for JointIndexMap {
    fn default() -> Self {
        Self::A1
    }
}

// ---------------------------------------------------------------------------
// FootLinkMap
// ---------------------------------------------------------------------------

/// Per-leg oracle link identifiers for the four feet, used to attribute
/// contact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootLinkMap {
    links: [i32; 4],
}

impl FootLinkMap {
    /// Foot links of the reference quadruped: FL 11, FR 6, RL 21, RR 16.
    pub const A1: Self = Self {
        links: [11, 6, 21, 16],
    };

    /// Create from per-leg link ids in canonical leg order.
    #[must_use]
    pub const fn new(links: [i32; 4]) -> Self {
        Self { links }
    }

    /// Link id of a leg's foot.
    #[must_use]
    pub const fn link(&self, leg: Leg) -> i32 {
        self.links[leg.index()]
    }
}

impl Default for FootLinkMap {
    fn default() -> Self {
        Self::A1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
