//! # Example: custom_telemetry
//!
//! Demonstrates how to build and attach a custom telemetry sink.
//!
//! Shows how to:
//! - Implement the [`Telemetry`] trait.
//! - Forward the contracted `(component, value)` records, the shape an
//!   analytics backend ingests.
//! - Inspect [`Event`] / [`EventKind`] for the rest of the run lifecycle.
//!
//! ## Flow
//! ```text
//! Vec<BannerRef> ──► Picker::run()
//!     ├─► check tasks publish(CheckStarted / CheckPassed / CheckTimedOut / ...)
//!     ├─► drain loop publish(WinnerChosen / RunCompleted)
//!     └─► bus listener (in PickerBuilder)
//!           └─► TelemetrySet.emit_arc() ──► ConsoleSink.record()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_telemetry
//! ```

use std::{sync::Arc, time::Duration};

use bannervisor::{BannerFn, BannerRef, CheckError, Config, Event, EventKind, Picker, Telemetry};
use tokio_util::sync::CancellationToken;

/// A simple console sink that prints selected events.
/// In real life, you could POST the records to an analytics endpoint.
struct ConsoleSink;

#[async_trait::async_trait]
impl Telemetry for ConsoleSink {
    async fn record(&self, ev: &Event) {
        // The two contracted records an analytics backend would ingest.
        if let (Some(component), Some(value)) = (ev.component(), ev.value()) {
            println!("[sink] record:    {{ component: {component}, value: {value} }}");
            return;
        }

        match ev.kind {
            // === Check lifecycle ===
            EventKind::CheckStarted => {
                println!(
                    "[sink] started:   banner={}",
                    ev.banner.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::CheckPassed => {
                println!(
                    "[sink] passed:    banner={}",
                    ev.banner.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::CheckDeclined => {
                println!(
                    "[sink] declined:  banner={}",
                    ev.banner.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::CheckErrored => {
                println!(
                    "[sink] errored:   banner={} reason={}",
                    ev.banner.as_deref().unwrap_or("<unknown>"),
                    ev.reason.as_deref().unwrap_or("<none>")
                );
            }

            // === Run ===
            EventKind::BannerAcknowledged => {
                println!(
                    "[sink] dismissed: banner={}",
                    ev.banner.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::RunCompleted => {
                println!(
                    "[sink] completed: winner={}",
                    ev.banner.as_deref().unwrap_or("<none>")
                );
            }

            // === Covered by the record branch above ===
            EventKind::CheckTimedOut | EventKind::WinnerChosen => {}

            // === Ignored ===
            EventKind::TelemetryOverflow | EventKind::TelemetryPanicked => {}
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }

    fn queue_capacity(&self) -> usize {
        1024
    }
}

/// Banner whose check hangs until the deadline forces a verdict.
fn slow_forever(id: &'static str) -> BannerRef {
    BannerFn::arc(
        id,
        |_gate: CancellationToken| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, CheckError>(true)
        },
        || {},
    )
}

/// Banner whose check declines immediately.
fn decliner(id: &'static str) -> BannerRef {
    BannerFn::arc(
        id,
        |_gate: CancellationToken| async { Ok::<_, CheckError>(false) },
        || {},
    )
}

/// Banner whose check passes after `delay`.
fn passer(id: &'static str, delay: Duration) -> BannerRef {
    BannerFn::arc(
        id,
        move |_gate: CancellationToken| async move {
            tokio::time::sleep(delay).await;
            Ok::<_, CheckError>(true)
        },
        move || println!("[{id}] >>> rendered into the slot"),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("custom_telemetry demo\n");

    let mut cfg = Config::default();
    cfg.check_timeout = Duration::from_millis(300);

    let sinks: Vec<Arc<dyn Telemetry>> = vec![Arc::new(ConsoleSink)];
    let picker = Picker::builder(cfg).with_telemetry(sinks).build();

    // "epic" outranks everything but hangs; its forced timeout is what lets
    // "welcome" take the slot.
    let banners: Vec<BannerRef> = vec![
        slow_forever("epic"),
        decliner("subscribe"),
        passer("welcome", Duration::from_millis(100)),
    ];

    let report = picker.run(banners).await;
    println!("\nwinner: {:?}", report.winner);

    picker.shutdown().await;
    println!("finished");
}
