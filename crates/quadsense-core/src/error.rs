use thiserror::Error;

/// Top-level error type for the quadsense harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid argument: {0}")]
    Argument(#[from] ArgumentError),

    #[error("Invalid state: {0}")]
    State(#[from] StateError),

    #[error("Oracle failure: {0}")]
    Oracle(#[from] OracleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Command/input validation errors.
///
/// Copy + static payloads for cheap propagation in hot paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Joint vector dimension mismatch: expected {expected}, got {got}")]
    JointDimMismatch { expected: usize, got: usize },

    #[error("Command contains a non-finite value at slot {slot}")]
    CommandNotFinite { slot: usize },
}

/// Lifecycle errors: an operation was attempted in a state that does not
/// permit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("'{op}' requires an initialized harness")]
    NotInitialized { op: &'static str },

    #[error("'{op}' requires at least one completed step")]
    NotStepped { op: &'static str },

    #[error("'{op}' attempted after disconnect")]
    Disconnected { op: &'static str },
}

/// Physics oracle failures.
///
/// All oracle failures are fatal to the current tick: simulation state after
/// a failed step or query is undefined, so nothing at this layer retries.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Step failed: {0}")]
    StepFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Motor command failed: {0}")]
    CommandFailed(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid timestep: {0} (must be finite and > 0)")]
    InvalidTimestep(f64),

    #[error("Invalid standard deviation for {field}: {value} (must be finite and >= 0)")]
    InvalidStdDev { field: &'static str, value: f64 },

    #[error("Invalid servo gains: {0}")]
    InvalidServoGains(String),

    #[error("Joint index table is not a bijection onto 0..12: {0}")]
    NonBijectiveJointMap(String),
}
