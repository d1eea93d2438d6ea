use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SimTime
// ---------------------------------------------------------------------------

/// Integer-nanosecond simulation clock.
///
/// Avoids floating-point accumulation errors by tracking elapsed time as a
/// monotonically increasing `u64` nanosecond count.  Advanced by exactly one
/// timestep per harness tick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SimTime {
    nanos: u64,
}

impl SimTime {
    /// Create a new `SimTime` at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { nanos: 0 }
    }

    /// Create a `SimTime` from a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create a `SimTime` from seconds (as `f64`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs(secs: f64) -> Self {
        Self {
            nanos: (secs * 1_000_000_000.0) as u64,
        }
    }

    /// Raw nanosecond count.
    #[must_use]
    pub const fn nanos(&self) -> u64 {
        self.nanos
    }

    /// Elapsed milliseconds (truncated).
    #[must_use]
    pub const fn millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Elapsed seconds as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Convert to a standard [`Duration`].
    #[must_use]
    pub const fn to_duration(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }

    /// Advance the clock by `delta_secs` seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance_secs(&mut self, delta_secs: f64) {
        let delta_nanos = (delta_secs * 1_000_000_000.0) as u64;
        self.nanos = self.nanos.saturating_add(delta_nanos);
    }

    /// Reset the clock to zero.
    pub fn reset(&mut self) {
        self.nanos = 0;
    }
}

// -- Operator impls --

impl Add<Duration> for SimTime {
    type Output = Self;

    #[allow(clippy::cast_possible_truncation)]
    fn add(self, rhs: Duration) -> Self {
        Self {
            nanos: self.nanos.saturating_add(rhs.as_nanos() as u64),
        }
    }
}

impl AddAssign<Duration> for SimTime {
    #[allow(clippy::cast_possible_truncation)]
    fn add_assign(&mut self, rhs: Duration) {
        self.nanos = self.nanos.saturating_add(rhs.as_nanos() as u64);
    }
}

impl Sub for SimTime {
    type Output = Duration;

    /// Saturating subtraction; never underflows.
    fn sub(self, rhs: Self) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(rhs.nanos))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.nanos / 1_000_000_000;
        let remaining_nanos = self.nanos % 1_000_000_000;
        let millis = remaining_nanos / 1_000_000;
        let micros = (remaining_nanos % 1_000_000) / 1_000;
        write!(f, "{total_secs}.{millis:03}{micros:03}s")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero() {
        let t = SimTime::new();
        assert_eq!(t.nanos(), 0);
        assert!((t.secs_f64() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_secs_converts() {
        let t = SimTime::from_secs(1.5);
        assert_eq!(t.nanos(), 1_500_000_000);
        assert_eq!(t.millis(), 1_500);
    }

    #[test]
    fn advance_secs_accumulates_without_drift() {
        let mut t = SimTime::new();
        for _ in 0..1_000 {
            t.advance_secs(0.001);
        }
        // 1000 × 1ms accumulates to exactly 1s in integer nanoseconds.
        assert_eq!(t.nanos(), 1_000_000_000);
    }

    #[test]
    fn reset_zeroes() {
        let mut t = SimTime::from_secs(2.0);
        t.reset();
        assert_eq!(t, SimTime::new());
    }

    #[test]
    fn add_duration() {
        let t = SimTime::from_secs(1.0) + Duration::from_millis(250);
        assert_eq!(t.millis(), 1_250);
    }

    #[test]
    fn add_assign_duration() {
        let mut t = SimTime::new();
        t += Duration::from_micros(500);
        assert_eq!(t.nanos(), 500_000);
    }

    #[test]
    fn sub_saturates() {
        let early = SimTime::from_secs(1.0);
        let late = SimTime::from_secs(3.0);
        assert_eq!(late - early, Duration::from_secs(2));
        assert_eq!(early - late, Duration::ZERO);
    }

    #[test]
    fn display_format() {
        let t = SimTime::from_secs(1.234_567);
        assert_eq!(t.to_string(), "1.234567s");
    }

    #[test]
    fn to_duration_matches() {
        let t = SimTime::from_secs(0.75);
        assert_eq!(t.to_duration(), Duration::from_millis(750));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn sim_time_is_send_sync() {
        assert_send_sync::<SimTime>();
    }
}
