//! # Runtime events emitted during a resolution run.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Check events**: one banner's eligibility check flow (started, passed,
//!   declined, errored, timed out)
//! - **Run events**: the run-level decisions (acknowledged short-circuit,
//!   winner chosen, run completed)
//! - **Telemetry events**: sink misbehavior (overflow, panic)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! banner id, reasons, and the deadline that fired.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Telemetry record shape
//! Two kinds map onto the wire records the picker is contracted to emit:
//! [`EventKind::WinnerChosen`] → component [`PICKER_COMPONENT`] and
//! [`EventKind::CheckTimedOut`] → component [`PICKER_TIMEOUT_COMPONENT`],
//! with the banner id as the value. [`Event::component`] and
//! [`Event::value`] expose exactly that pair; every other kind is internal
//! and returns no component.
//!
//! ## Example
//! ```
//! use std::time::Duration;
//! use bannervisor::{Event, EventKind, PICKER_TIMEOUT_COMPONENT};
//!
//! let ev = Event::new(EventKind::CheckTimedOut)
//!     .with_banner("subscribe")
//!     .with_timeout(Duration::from_secs(2));
//!
//! assert_eq!(ev.kind, EventKind::CheckTimedOut);
//! assert_eq!(ev.component(), Some(PICKER_TIMEOUT_COMPONENT));
//! assert_eq!(ev.value(), Some("subscribe"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Component tag of the record emitted when a winner is chosen.
pub const PICKER_COMPONENT: &str = "banner-picker";

/// Component tag of the record emitted when a check is forced to fail by its
/// deadline.
pub const PICKER_TIMEOUT_COMPONENT: &str = "banner-picker-timeout";

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Check events ===
    /// A banner's eligibility check was dispatched.
    ///
    /// Sets:
    /// - `banner`: banner id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CheckStarted,

    /// The check settled `true`: the banner is eligible.
    ///
    /// Sets:
    /// - `banner`: banner id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CheckPassed,

    /// The check settled `false`: the banner declined to show.
    ///
    /// Sets:
    /// - `banner`: banner id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CheckDeclined,

    /// The check errored instead of settling; treated like `false`.
    ///
    /// Sets:
    /// - `banner`: banner id
    /// - `reason`: error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CheckErrored,

    /// The check exceeded its deadline and was forced to fail.
    ///
    /// Sets:
    /// - `banner`: banner id
    /// - `timeout_ms`: configured deadline (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CheckTimedOut,

    // === Run events ===
    /// The banner was previously dismissed by the user; its check was
    /// skipped and the banner recorded ineligible.
    ///
    /// Sets:
    /// - `banner`: banner id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    BannerAcknowledged,

    /// A winner was declared and its `show()` invoked.
    ///
    /// Sets:
    /// - `banner`: winning banner id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WinnerChosen,

    /// Every banner has a definitive outcome; the run is over.
    ///
    /// Sets:
    /// - `banner`: winning banner id, if any
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RunCompleted,

    // === Telemetry events ===
    /// A telemetry sink dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `banner`: sink name
    /// - `reason`: reason string (e.g., "full", "closed")
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TelemetryOverflow,

    /// A telemetry sink panicked while recording an event.
    ///
    /// Sets:
    /// - `banner`: sink name
    /// - `reason`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TelemetryPanicked,
}

/// Run event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Banner id (or sink name for telemetry events), if applicable.
    pub banner: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Deadline that fired, in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Event classification.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            kind,
            at: SystemTime::now(),
            banner: None,
            reason: None,
            timeout_ms: None,
        }
    }

    /// Attaches a banner id.
    #[inline]
    pub fn with_banner(mut self, banner: impl Into<Arc<str>>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the deadline that fired (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Creates a telemetry overflow event.
    #[inline]
    pub fn telemetry_overflow(sink: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::TelemetryOverflow)
            .with_banner(sink)
            .with_reason(reason)
    }

    /// Creates a telemetry panic event.
    #[inline]
    pub fn telemetry_panicked(sink: &'static str, info: String) -> Self {
        Event::new(EventKind::TelemetryPanicked)
            .with_banner(sink)
            .with_reason(info)
    }

    /// Whether this event reports sink misbehavior (overflow or panic).
    ///
    /// Such reports are never re-reported when their own delivery fails,
    /// which keeps a misbehaving sink from feeding itself.
    #[inline]
    pub fn is_telemetry_report(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TelemetryOverflow | EventKind::TelemetryPanicked
        )
    }

    /// Component tag of the wire record this event maps onto, if any.
    ///
    /// Only [`EventKind::WinnerChosen`] and [`EventKind::CheckTimedOut`]
    /// produce records; everything else is internal.
    pub fn component(&self) -> Option<&'static str> {
        match self.kind {
            EventKind::WinnerChosen => Some(PICKER_COMPONENT),
            EventKind::CheckTimedOut => Some(PICKER_TIMEOUT_COMPONENT),
            _ => None,
        }
    }

    /// Value of the wire record this event maps onto: the banner id.
    pub fn value(&self) -> Option<&str> {
        self.banner.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::CheckStarted);
        let b = Event::new(EventKind::CheckPassed);
        let c = Event::new(EventKind::RunCompleted);
        assert!(a.seq < b.seq, "seq {} should precede {}", a.seq, b.seq);
        assert!(b.seq < c.seq, "seq {} should precede {}", b.seq, c.seq);
    }

    #[test]
    fn test_component_mapping_matches_record_contract() {
        let winner = Event::new(EventKind::WinnerChosen).with_banner("epic");
        assert_eq!(winner.component(), Some("banner-picker"));
        assert_eq!(winner.value(), Some("epic"));

        let timeout = Event::new(EventKind::CheckTimedOut).with_banner("epic");
        assert_eq!(timeout.component(), Some("banner-picker-timeout"));
        assert_eq!(timeout.value(), Some("epic"));
    }

    #[test]
    fn test_internal_kinds_have_no_component() {
        for kind in [
            EventKind::CheckStarted,
            EventKind::CheckPassed,
            EventKind::CheckDeclined,
            EventKind::CheckErrored,
            EventKind::BannerAcknowledged,
            EventKind::RunCompleted,
            EventKind::TelemetryOverflow,
            EventKind::TelemetryPanicked,
        ] {
            assert_eq!(
                Event::new(kind).component(),
                None,
                "{kind:?} should not map onto a record"
            );
        }
    }

    #[test]
    fn test_timeout_is_stored_as_millis() {
        let ev = Event::new(EventKind::CheckTimedOut).with_timeout(Duration::from_secs(2));
        assert_eq!(ev.timeout_ms, Some(2000));
    }
}
