//! # Non-blocking event fan-out to multiple telemetry sinks.
//!
//! Provides [`TelemetrySet`] — distributes run events to every registered
//! sink concurrently without ever blocking the resolution run.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► sink1.record()
//!     │    (bounded)         └──────► panic → TelemetryPanicked
//!     ├──► [queue 2] ──► worker 2 ──► sink2.record()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► sinkN.record()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-sink ordering**: sink A may process event N while B processes N+5
//! - **Overflow**: event dropped for that sink only, `TelemetryOverflow` published
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow or panicking sink doesn't affect others
//! - **Per-sink FIFO**: each sink sees events in order
//!
//! ## Panic handling
//! Worker tasks use `catch_unwind` to isolate panics:
//! - Panic is caught and converted to a `TelemetryPanicked` event
//! - Worker continues processing the next event
//! - Other sinks unaffected
//!
//! Failure reports (`TelemetryOverflow`, `TelemetryPanicked`) are never
//! re-reported when their own delivery fails, so a sink that drops or
//! panics on every event cannot feed itself.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a sink uses `Arc<Mutex<T>>` and panics while holding the
//! lock.
//!
//! ## Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use bannervisor::{Config, Event, Picker, Telemetry};
//!
//! struct Beacon;
//!
//! #[async_trait]
//! impl Telemetry for Beacon {
//!     async fn record(&self, ev: &Event) {
//!         if let (Some(component), Some(value)) = (ev.component(), ev.value()) {
//!             // POST { component, value } to the analytics endpoint
//!         }
//!     }
//!     fn name(&self) -> &'static str { "beacon" }
//! }
//!
//! let sinks: Vec<Arc<dyn Telemetry>> = vec![Arc::new(Beacon)];
//! let picker = Picker::builder(Config::default())
//!     .with_telemetry(sinks)
//!     .build();
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};
use crate::telemetry::Telemetry;

/// Per-sink channel metadata.
struct TelemetryChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple telemetry sinks.
///
/// Manages per-sink queues and worker tasks, providing:
/// - **Concurrent delivery**: events sent to all sinks simultaneously
/// - **Isolation**: each sink has a dedicated queue and worker
/// - **Panic safety**: panics caught and reported, don't crash the runtime
/// - **Overflow handling**: dropped events reported via `TelemetryOverflow`
pub struct TelemetrySet {
    channels: Vec<TelemetryChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl TelemetrySet {
    /// Creates a new set and spawns one worker task per sink.
    ///
    /// ### Per-sink setup
    /// - Bounded mpsc queue (capacity from [`Telemetry::queue_capacity`])
    /// - Dedicated worker task (runs until the queue is closed)
    /// - Panic isolation via `catch_unwind`
    ///
    /// ### Notes
    /// - Workers start immediately and process events until shutdown
    /// - Minimum queue capacity is 1 (enforced)
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Telemetry>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(sinks.len());
        let mut workers = Vec::with_capacity(sinks.len());

        for sink in sinks {
            let cap = sink.queue_capacity().max(1);
            let name = sink.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let s = Arc::clone(&sink);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.record(ev.as_ref());

                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        // A panic while recording a failure report stays
                        // unreported; reporting it would loop.
                        if ev.is_telemetry_report() {
                            continue;
                        }
                        let info = {
                            let any = &*panic_err;
                            if let Some(msg) = any.downcast_ref::<&'static str>() {
                                (*msg).to_string()
                            } else if let Some(msg) = any.downcast_ref::<String>() {
                                msg.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        bus_for_worker.publish(Event::telemetry_panicked(s.name(), info));
                    }
                }
            });
            channels.push(TelemetryChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all sinks (clones the event).
    ///
    /// - Clones the event, wraps it in `Arc`, calls [`emit_arc`](Self::emit_arc)
    /// - Returns immediately (non-blocking)
    ///
    /// ### Notes
    /// For hot paths, use [`emit_arc`](Self::emit_arc) to avoid cloning.
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<Event>` to all sinks.
    ///
    /// - Uses `try_send` (non-blocking)
    /// - On queue full: drops the event, publishes `TelemetryOverflow`
    /// - On queue closed: publishes `TelemetryOverflow` with reason "closed"
    ///
    /// ### Overflow prevention
    /// Failure reports that themselves fail to deliver are dropped silently;
    /// re-publishing them would loop.
    ///
    /// ### Rules
    /// Preferred over [`emit`](Self::emit) in hot paths (no clone).
    pub fn emit_arc(&self, event: Arc<Event>) {
        let is_failure_report = event.is_telemetry_report();

        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    if !is_failure_report {
                        self.bus
                            .publish(Event::telemetry_overflow(channel.name, "full"));
                    }
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    if !is_failure_report {
                        self.bus
                            .publish(Event::telemetry_overflow(channel.name, "closed"));
                    }
                }
            }
        }
    }

    /// Gracefully shuts down all sink workers.
    ///
    /// 1. Drops all channel senders (workers see the channel closed)
    /// 2. Awaits all worker tasks; events already queued are still recorded
    pub async fn shutdown(self) {
        drop(self.channels);

        for h in self.workers {
            let _ = h.await;
        }
    }
}
