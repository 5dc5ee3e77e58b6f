//! # bannervisor
//!
//! **Bannervisor** resolves which one of several competing UI banners gets
//! shown.
//!
//! Candidate banners are an ordered list (index = priority) where each
//! banner guards itself with an async eligibility check. One resolution run
//! executes every check concurrently under a deadline and activates exactly
//! the highest-priority banner whose check passes. The crate is designed as
//! a building block for page shells and app frames that have one slot and
//! many teams competing for it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   BannerRef  │   │   BannerRef  │   │   BannerRef  │
//!     │ (priority 0) │   │ (priority 1) │   │ (priority 2) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Picker (resolution engine)                                       │
//! │  - Bus (broadcast events)                                         │
//! │  - PreferenceStore (filters previously dismissed banners)         │
//! │  - Scoreboard (write-once outcome per banner)                     │
//! │  - TelemetrySet (fans out to user sinks)                          │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │  check task  │   │  check task  │   │  check task  │   │
//!     │ (deadlined)  │   │ (deadlined)  │   │ (deadlined)  │   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │                  │                  │                 │
//!      │ Publishes        │ Publishes        │ Publishes       │
//!      │ Events:          │ Events:          │ Events:         │
//!      │ - CheckStarted   │ - CheckStarted   │ - CheckStarted  │
//!      │ - CheckPassed    │ - CheckDeclined  │ - CheckTimedOut │
//!      │                  │                  │                 │
//!      ▼                  ▼                  ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                   (capacity: Config::bus_capacity)                │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │      bus listener      │
//!                       │   (in PickerBuilder)   │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             TelemetrySet
//!                           (per-sink queues)
//!                         ┌─────────┼─────────┐
//!                         ▼         ▼         ▼
//!                      worker1   worker2   workerN
//!                         ▼         ▼         ▼
//!                      sink1     sink2     sinkN
//!                     .record() .record() .record()
//! ```
//!
//! ### Lifecycle
//! ```text
//! Vec<BannerRef> ──► Picker::run()
//!
//! dispatch (per banner, highest priority first):
//!   ├─ dismissed in PreferenceStore ─► BannerAcknowledged,
//!   │                                  outcome = Ineligible(Acknowledged)
//!   └─ otherwise ─► publish CheckStarted{ banner }
//!                   spawn check task: can_show() vs deadline
//!                       ├─ Ok(true)  ─► CheckPassed   ─► Eligible
//!                       ├─ Ok(false) ─► CheckDeclined ─► Ineligible(Declined)
//!                       ├─ Err(e)    ─► CheckErrored  ─► Ineligible(CheckFailed)
//!                       └─ deadline  ─► CheckTimedOut ─► Ineligible(TimedOut)
//!
//! drain (single writer, any completion order):
//!   loop while any outcome is pending {
//!     ├─► receive one (index, outcome) report
//!     ├─► record it (write-once; late reports are no-ops)
//!     └─► winner rule: first Eligible with nothing pending above it
//!            └─ first hit only ─► banner.show() + publish WinnerChosen
//!   }
//!
//! completion:
//!   publish RunCompleted{ winner? } ──► return RunReport (runs never fail)
//! ```
//!
//! ## Features
//! | Area              | Description                                                             | Key types / traits                     |
//! |-------------------|-------------------------------------------------------------------------|----------------------------------------|
//! | **Banners**       | Define candidates as trait objects or closures, easy to compose.        | [`Banner`], [`BannerFn`], [`BannerRef`]|
//! | **Resolution**    | Run concurrent deadlined checks, activate exactly one winner.           | [`Picker`], [`RunReport`]              |
//! | **Outcomes**      | Definitive per-banner accounting, tolerant of out-of-order completion.  | [`Outcome`], [`IneligibleReason`]      |
//! | **Preferences**   | Skip banners the user has already dismissed.                            | [`PreferenceStore`], [`MemoryPrefs`]   |
//! | **Telemetry API** | Hook into run events (analytics records, logging, custom sinks).        | [`Telemetry`], [`Event`]               |
//! | **Errors**        | Typed check failures that degrade instead of propagating.               | [`CheckError`]                         |
//! | **Configuration** | Centralize the per-check deadline and bus sizing.                       | [`Config`]                             |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use bannervisor::{BannerFn, BannerRef, CheckError, Config, MemoryPrefs, Picker};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.check_timeout = Duration::from_secs(2);
//!
//!     // Remember banners the user already closed (optional)
//!     let prefs = Arc::new(MemoryPrefs::new());
//!     prefs.dismiss("signup");
//!
//!     let picker = Picker::builder(cfg).with_prefs(prefs).build();
//!
//!     // Candidates in priority order: "signup" outranks "welcome"
//!     let banners: Vec<BannerRef> = vec![
//!         BannerFn::arc(
//!             "signup",
//!             |_gate: CancellationToken| async { Ok::<_, CheckError>(true) },
//!             || println!("signup shown"),
//!         ),
//!         BannerFn::arc(
//!             "welcome",
//!             |_gate: CancellationToken| async { Ok::<_, CheckError>(true) },
//!             || println!("welcome shown"),
//!         ),
//!     ];
//!
//!     // "signup" was dismissed, so "welcome" takes the slot
//!     let report = picker.run(banners).await;
//!     assert_eq!(report.winner, Some(1));
//!
//!     picker.shutdown().await; // flush telemetry
//! }
//! ```
mod banners;
mod config;
mod core;
mod error;
mod events;
mod prefs;
mod telemetry;

// ---- Public re-exports ----

pub use banners::{Banner, BannerFn, BannerRef};
pub use config::Config;
pub use core::{IneligibleReason, Outcome, Picker, PickerBuilder, RunReport};
pub use error::CheckError;
pub use events::{Bus, Event, EventKind, PICKER_COMPONENT, PICKER_TIMEOUT_COMPONENT};
pub use prefs::{MemoryPrefs, PreferenceStore, is_acknowledged};
pub use telemetry::{Telemetry, TelemetrySet};

// Optional: expose a simple built-in logging sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use telemetry::LogWriter;
