//! Simulation harness orchestration for quadsense.
//!
//! [`SimulationHarness`](harness::SimulationHarness) owns the physics oracle
//! and drives one sensor pass per fixed timestep, delivering a
//! [`SensorFrame`](quadsense_core::types::SensorFrame) per tick and
//! forwarding actuator commands on demand.
//!
//! # Quick Start
//!
//! ```no_run
//! use quadsense_core::prelude::*;
//! use quadsense_sim::prelude::*;
//! # fn oracle() -> quadsense_test_utils::ScriptedOracle { unimplemented!() }
//!
//! let mut harness = HarnessBuilder::new(oracle())
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//! harness.init(&InitialState::standing()).unwrap();
//! harness.step().unwrap();
//! let frame = harness.read_sensors().unwrap();
//! ```

pub mod builder;
pub mod harness;

mod integration;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::builder::HarnessBuilder;
    pub use crate::harness::{HarnessState, SimulationHarness};
}
