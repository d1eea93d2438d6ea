//! Seeded RNG construction for deterministic tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The fixed seed used across quadsense test suites.
pub const TEST_SEED: u64 = 42;

/// A ChaCha8 RNG seeded with [`TEST_SEED`].
#[must_use]
pub fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(TEST_SEED)
}

/// A ChaCha8 RNG with an explicit seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
