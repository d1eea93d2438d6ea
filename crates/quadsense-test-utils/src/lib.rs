//! Test helpers shared by the quadsense crates.
//!
//! [`ScriptedOracle`] is a programmable [`PhysicsOracle`] stand-in: tests
//! script its base motion, joint readings, and contact records, and inspect
//! the motor commands it received.  [`rng`] provides the seeded RNG helper
//! every deterministic test uses.

pub mod oracle;
pub mod rng;

pub use oracle::ScriptedOracle;
pub use rng::test_rng;
