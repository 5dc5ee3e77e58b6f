//! # Simple logging sink for debugging and demos.
//!
//! [`LogWriter`] prints run events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [check-started] banner=subscribe
//! [check-passed] banner=welcome
//! [check-declined] banner=survey
//! [check-errored] banner=epic reason="storage offline"
//! [check-timed-out] banner=subscribe timeout_ms=2000
//! [acknowledged] banner=breaking-news
//! [winner] banner=subscribe
//! [run-completed] winner=Some("subscribe")
//! ```
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use bannervisor::{Config, LogWriter, Picker, Telemetry};
//! let picker = Picker::builder(Config::default())
//!     .with_telemetry(vec![Arc::new(LogWriter) as Arc<dyn Telemetry>])
//!     .build();
//! // LogWriter will print all run events to stdout
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::telemetry::Telemetry;

/// Simple stdout logging sink.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Telemetry`] sink
/// for structured logging or a real analytics backend.
pub struct LogWriter;

#[async_trait]
impl Telemetry for LogWriter {
    async fn record(&self, e: &Event) {
        match e.kind {
            EventKind::CheckStarted => {
                if let Some(banner) = &e.banner {
                    println!("[check-started] banner={banner}");
                }
            }
            EventKind::CheckPassed => {
                println!("[check-passed] banner={:?}", e.banner);
            }
            EventKind::CheckDeclined => {
                println!("[check-declined] banner={:?}", e.banner);
            }
            EventKind::CheckErrored => {
                println!("[check-errored] banner={:?} reason={:?}", e.banner, e.reason);
            }
            EventKind::CheckTimedOut => {
                println!(
                    "[check-timed-out] banner={:?} timeout_ms={:?}",
                    e.banner, e.timeout_ms
                );
            }
            EventKind::BannerAcknowledged => {
                println!("[acknowledged] banner={:?}", e.banner);
            }
            EventKind::WinnerChosen => {
                println!("[winner] banner={:?}", e.banner);
            }
            EventKind::RunCompleted => {
                println!("[run-completed] winner={:?}", e.banner);
            }
            EventKind::TelemetryOverflow => {
                println!(
                    "[telemetry-overflow] sink={:?} reason={:?}",
                    e.banner, e.reason
                );
            }
            EventKind::TelemetryPanicked => {
                println!(
                    "[telemetry-panicked] sink={:?} reason={:?}",
                    e.banner, e.reason
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
