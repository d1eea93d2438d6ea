//! Deterministic seed derivation for reproducible sensor streams.
//!
//! [`SeedTree`] is a two-level derivation: one master seed per harness
//! instance, with a named child stream per sensor.  Child seeds are derived
//! by hashing, so the whole sensor stream is reproducible from the master
//! seed alone, and two harness instances with different masters never share
//! a stream.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derive a child seed from a parent seed and a string key.
///
/// Uses `DefaultHasher` (SipHash-1-3) for fast, deterministic mixing.
///
/// # Example
///
/// ```
/// use quadsense_core::seed::derive_seed;
///
/// let child = derive_seed(42, "imu");
/// assert_ne!(child, 42); // derived, not identical
/// assert_eq!(child, derive_seed(42, "imu")); // deterministic
/// ```
#[must_use]
pub fn derive_seed(parent: u64, key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    parent.hash(&mut hasher);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Per-harness seed tree: master seed plus named sensor streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTree {
    master: u64,
}

impl SeedTree {
    /// Create a tree rooted at `master`.
    #[must_use]
    pub const fn new(master: u64) -> Self {
        Self { master }
    }

    /// The master seed.
    #[must_use]
    pub const fn master(&self) -> u64 {
        self.master
    }

    /// Derive the seed for a named sensor stream.
    #[must_use]
    pub fn sensor_seed(&self, sensor: &str) -> u64 {
        derive_seed(self.master, sensor)
    }

    /// Create a `ChaCha8Rng` for a named sensor stream.
    #[must_use]
    pub fn sensor_rng(&self, sensor: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.sensor_seed(sensor))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
