//! Sensor noise primitives for synthetic quadruped sensing.
//!
//! Two scalar models cover everything the harness synthesizes:
//! [`NoiseModel::White`](model::NoiseModel) for zero-mean Gaussian
//! measurement noise, and [`NoiseModel::RandomWalk`](model::NoiseModel) for
//! slowly drifting bias terms.  [`AxisBank`](axes::AxisBank) lifts scalar
//! models to multi-axis sensors, and [`presets`] carries the reference
//! quadruped's parameters.
//!
//! All sampling takes an explicit `&mut R: Rng` so that identical seeds
//! produce identical sensor streams.
//!
//! # Quick Start
//!
//! ```
//! use quadsense_noise::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut noise = NoiseModel::white(0.01).unwrap();
//! let noisy = noise.apply(1.0, &mut rng);
//! ```

pub mod axes;
pub mod model;
pub mod presets;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::axes::AxisBank;
    pub use crate::model::{NoiseError, NoiseModel};
    pub use crate::presets;
}
