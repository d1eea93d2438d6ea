//! Scalar noise models for synthetic sensor channels.
//!
//! [`NoiseModel`] is an enum with static dispatch, no trait objects.
//! Every sampling method takes an explicit `&mut R: Rng` parameter so that
//! determinism is guaranteed when the same seed is provided.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fmt;

// ---------------------------------------------------------------------------
// NoiseError
// ---------------------------------------------------------------------------

/// Validation errors for noise model parameters.
///
/// Implements [`Copy`] for cheap propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseError {
    /// Standard deviation was negative, NaN, or infinite.
    InvalidStdDev { value: f64 },
}

impl fmt::Display for NoiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidStdDev { value } => {
                write!(f, "std_dev must be finite and >= 0, got {value}")
            }
        }
    }
}

impl std::error::Error for NoiseError {}

// ---------------------------------------------------------------------------
// NoiseModel
// ---------------------------------------------------------------------------

/// Scalar noise model.
///
/// Both variants are statically dispatched via `match`.  The stateful
/// [`RandomWalk`](Self::RandomWalk) variant accumulates across calls for the
/// lifetime of the model; [`reset`](Self::reset) returns it to zero and is
/// only invoked on explicit re-initialization, never implicitly.
#[derive(Clone, Debug)]
pub enum NoiseModel {
    /// Zero-mean additive Gaussian: `N(0, std²)`.
    White { std: f64 },
    /// Discrete random walk: each sample adds `N(0, step_std²)` to the
    /// accumulated value and returns the new total.  Variance grows
    /// linearly with the sample count; the expected value stays at zero.
    RandomWalk { step_std: f64, current: f64 },
}

impl NoiseModel {
    /// Create a zero-mean white noise model.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidStdDev`] if `std` is negative, NaN, or
    /// infinite.
    pub fn white(std: f64) -> Result<Self, NoiseError> {
        if !std.is_finite() || std < 0.0 {
            return Err(NoiseError::InvalidStdDev { value: std });
        }
        Ok(Self::White { std })
    }

    /// Create a random-walk model starting at zero.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidStdDev`] if `step_std` is negative, NaN,
    /// or infinite.
    pub fn random_walk(step_std: f64) -> Result<Self, NoiseError> {
        if !step_std.is_finite() || step_std < 0.0 {
            return Err(NoiseError::InvalidStdDev { value: step_std });
        }
        Ok(Self::RandomWalk {
            step_std,
            current: 0.0,
        })
    }

    /// Sample a single noise value.
    ///
    /// For [`RandomWalk`](Self::RandomWalk) this advances the walk by one
    /// step and returns the accumulated value.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        match self {
            Self::White { std } => {
                if *std == 0.0 {
                    return 0.0;
                }
                let dist = Normal::new(0.0, *std).expect("validated in constructor");
                dist.sample(rng)
            }
            Self::RandomWalk { step_std, current } => {
                if *step_std > 0.0 {
                    let dist = Normal::new(0.0, *step_std).expect("validated in constructor");
                    *current += dist.sample(rng);
                }
                *current
            }
        }
    }

    /// Apply noise to a clean value: `value + sample()`.
    pub fn apply<R: Rng + ?Sized>(&mut self, value: f64, rng: &mut R) -> f64 {
        value + self.sample(rng)
    }

    /// Reset internal state.
    ///
    /// Returns a [`RandomWalk`](Self::RandomWalk) to zero; no-op for
    /// [`White`](Self::White).  Call only on explicit re-initialization.
    pub fn reset(&mut self) {
        if let Self::RandomWalk { current, .. } = self {
            *current = 0.0;
        }
    }

    /// Accumulated value of a [`RandomWalk`](Self::RandomWalk); zero for
    /// stateless variants.
    #[must_use]
    pub const fn current(&self) -> f64 {
        match self {
            Self::White { .. } => 0.0,
            Self::RandomWalk { current, .. } => *current,
        }
    }

    /// Returns `true` if this model carries state that [`reset`](Self::reset)
    /// clears.
    #[must_use]
    pub const fn is_stateful(&self) -> bool {
        matches!(self, Self::RandomWalk { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
