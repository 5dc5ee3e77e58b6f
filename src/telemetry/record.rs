//! # Core telemetry trait
//!
//! `Telemetry` is the extension point for plugging record sinks into the
//! picker. Each sink is driven by a dedicated worker loop fed by a bounded
//! queue that is owned by the [`TelemetrySet`](crate::TelemetrySet).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching, retries) — they do **not**
//!   block the picker nor other sinks.
//! - Each sink **declares** its preferred queue capacity via
//!   [`Telemetry::queue_capacity`]. If a queue overflows, events for that
//!   sink are **dropped**.
//! - Delivery is best-effort by design: a sink that loses events can never
//!   change which banner wins.
//!
//! ## Example
//! ```
//! use async_trait::async_trait;
//! use bannervisor::{Event, Telemetry};
//!
//! struct Analytics;
//!
//! #[async_trait]
//! impl Telemetry for Analytics {
//!     async fn record(&self, ev: &Event) {
//!         // forward only the contracted wire records
//!         if let (Some(component), Some(value)) = (ev.component(), ev.value()) {
//!             let _ = (component, value); // ship to the analytics backend
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "analytics" }
//!     fn queue_capacity(&self) -> usize { 512 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for telemetry sinks.
///
/// Called from a sink-dedicated worker task. Implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Telemetry: Send + Sync + 'static {
    /// Handle a single event for this sink.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    async fn record(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this sink's queue.
    ///
    /// On overflow, events for this sink are **dropped**.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
