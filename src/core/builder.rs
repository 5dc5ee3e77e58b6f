use std::sync::Arc;

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use super::picker::Picker;
use crate::{
    config::Config,
    events::Bus,
    prefs::PreferenceStore,
    telemetry::{Telemetry, TelemetrySet},
};

/// Builder for constructing a Picker with optional features.
pub struct PickerBuilder {
    cfg: Config,
    sinks: Vec<Arc<dyn Telemetry>>,
    prefs: Option<Arc<dyn PreferenceStore>>,
}

impl PickerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            sinks: Vec::new(),
            prefs: None,
        }
    }

    /// Sets telemetry sinks for observability.
    ///
    /// Sinks receive run events (check lifecycle, winner records, timeouts)
    /// through dedicated workers with bounded queues; a slow sink never
    /// slows a run down.
    pub fn with_telemetry(mut self, sinks: Vec<Arc<dyn Telemetry>>) -> Self {
        self.sinks = sinks;
        self
    }

    /// Sets the store of previously dismissed banner ids.
    ///
    /// Banners found in the store are recorded ineligible without their
    /// checks ever running. Without a store, nothing is filtered out.
    pub fn with_prefs(mut self, prefs: Arc<dyn PreferenceStore>) -> Self {
        self.prefs = Some(prefs);
        self
    }

    /// Builds and returns the Picker instance.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Event bus for broadcasting
    /// - Telemetry sink workers
    /// - The bus listener feeding them
    ///
    /// Must be called from within a tokio runtime (it spawns tasks).
    pub fn build(self) -> Picker {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let set = Arc::new(TelemetrySet::new(self.sinks, bus.clone()));
        let halt = CancellationToken::new();

        let listener = spawn_listener(&bus, &set, halt.clone());

        Picker::new_internal(self.cfg, bus, set, listener, halt.drop_guard(), self.prefs)
    }
}

/// Subscribes to the bus and forwards events to the sink queues.
///
/// The listener prefers draining over halting: the halt branch is only taken
/// once the bus has no buffered events left, so telemetry published before a
/// shutdown still reaches the sinks. Lagging (the listener fell behind the
/// bus ring buffer) skips the lost events and keeps going.
fn spawn_listener(bus: &Bus, set: &Arc<TelemetrySet>, halt: CancellationToken) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    let set = Arc::clone(set);
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                res = rx.recv() => match res {
                    Ok(ev) => set.emit_arc(Arc::new(ev)),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = halt.cancelled() => break,
            }
        }
    })
}
