//! # Global picker configuration.
//!
//! Provides [`Config`] — centralized settings for a [`Picker`](crate::Picker).
//!
//! ## Sentinel values
//! - `check_timeout = 0s` → no deadline; checks run until they settle
//!   (treated as `None` by [`Config::check_limit`])
//! - `bus_capacity` is clamped to a minimum of 1 by the bus

use std::time::Duration;

/// Configuration for a banner-resolution run.
///
/// Defines:
/// - **Deadline behavior**: how long a single eligibility check may take
/// - **Event system**: bus capacity for event delivery
///
/// ## Field semantics
/// - `check_timeout`: Per-banner deadline; a check that has not settled by
///   then is forced ineligible (`0s` = no deadline)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by the bus)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across call sites.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time one eligibility check may take before it is forced to
    /// fail.
    ///
    /// The deadline is independent per banner (not a shared budget for the
    /// whole run). `Duration::ZERO` disables it.
    pub check_timeout: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow telemetry listeners that lag behind more than `bus_capacity`
    /// events skip the oldest ones. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the per-check deadline as an `Option`.
    ///
    /// - `None` → no deadline
    /// - `Some(d)` → checks are forced ineligible after `d`
    #[inline]
    pub fn check_limit(&self) -> Option<Duration> {
        if self.check_timeout == Duration::ZERO {
            None
        } else {
            Some(self.check_timeout)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `check_timeout = 2000ms` (checks slower than this are forced to fail)
    /// - `bus_capacity = 256` (plenty for the handful of events a run emits)
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_millis(2000),
            bus_capacity: 256,
        }
    }
}
