//! # Example: pick
//!
//! Resolves one slot among four competing banners.
//!
//! Shows how to:
//! - Define banners with [`BannerFn`] (async check + sync show).
//! - Filter previously dismissed banners with [`MemoryPrefs`].
//! - Watch the run through the built-in [`LogWriter`] sink.
//!
//! ## Flow
//! ```text
//! Vec<BannerRef> ──► Picker::run()
//!     ├─► "breaking-news" found in MemoryPrefs ──► BannerAcknowledged
//!     ├─► "survey" check declines              ──► CheckDeclined
//!     ├─► "subscribe" check passes after 400ms ──► CheckPassed ──► winner
//!     └─► "welcome" check passes instantly     ──► CheckPassed (outranked)
//! ```
//!
//! ## Run
//! Requires the `logging` feature to export [`LogWriter`].
//! ```bash
//! cargo run --example pick --features logging
//! ```

use std::{sync::Arc, time::Duration};

use bannervisor::{
    BannerFn, BannerRef, CheckError, Config, LogWriter, MemoryPrefs, Picker, Telemetry,
};
use tokio_util::sync::CancellationToken;

/// Banner whose check settles `verdict` after `delay`.
fn candidate(id: &'static str, verdict: bool, delay: Duration) -> BannerRef {
    BannerFn::arc(
        id,
        move |_gate: CancellationToken| async move {
            tokio::time::sleep(delay).await;
            Ok::<_, CheckError>(verdict)
        },
        move || println!("[{id}] >>> rendered into the slot"),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut cfg = Config::default();
    cfg.check_timeout = Duration::from_secs(2);

    // "breaking-news" was closed by the user in a previous session.
    let prefs = Arc::new(MemoryPrefs::new());
    prefs.dismiss("breaking-news");

    let sinks: Vec<Arc<dyn Telemetry>> = vec![Arc::new(LogWriter)];
    let picker = Picker::builder(cfg)
        .with_telemetry(sinks)
        .with_prefs(prefs)
        .build();

    // Priority order: index 0 outranks everything below it.
    let banners: Vec<BannerRef> = vec![
        candidate("breaking-news", true, Duration::ZERO), // dismissed, never checked
        candidate("survey", false, Duration::from_millis(50)), // declines
        candidate("subscribe", true, Duration::from_millis(400)), // wins, slowly
        candidate("welcome", true, Duration::ZERO),       // outranked
    ];

    let report = picker.run(banners).await;
    match report.winner {
        Some(index) => println!("slot went to banner #{index}"),
        None => println!("slot stays empty"),
    }
    println!("outcomes: {:?}", report.outcomes);

    picker.shutdown().await;
}
