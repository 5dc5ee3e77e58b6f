//! # Telemetry sinks for banner-resolution runs.
//!
//! This module provides the [`Telemetry`] trait and the fan-out machinery
//! for handling run events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   check task / picker ── publish(Event) ──► Bus ──► listener ──► TelemetrySet::emit_arc
//!                                                                        │
//!                                                              ┌─────────┼─────────┐
//!                                                              ▼         ▼         ▼
//!                                                         [queue 1] [queue 2] [queue N]
//!                                                              ▼         ▼         ▼
//!                                                          worker 1  worker 2  worker N
//!                                                              ▼         ▼         ▼
//!                                                            sink.record(&Event)
//! ```
//!
//! ## Sink types
//! - **Record forwarders** - push the contracted `(component, value)` records
//!   to an analytics backend ([`Event::component`](crate::Event::component) /
//!   [`Event::value`](crate::Event::value) expose the pair)
//! - **Observers** - logging, metrics, debugging ([`LogWriter`] behind the
//!   `logging` feature)
//!
//! ## Implementing custom sinks
//! ```no_run
//! use bannervisor::{Event, Telemetry};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Telemetry for FailureCounter {
//!     async fn record(&self, event: &Event) {
//!         if event.kind == bannervisor::EventKind::CheckErrored {
//!             // increment a failure counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod record;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use record::Telemetry;
pub use set::TelemetrySet;
