//! # Picker: resolves which one of several competing banners gets shown.
//!
//! The [`Picker`] owns the event bus, a [`TelemetrySet`], and the run
//! configuration. One call to [`Picker::run`] resolves one ordered banner
//! list to at most one winner.
//!
//! ## Key responsibilities
//! - snapshot the preference store once and short-circuit acknowledged
//!   banners (their checks never run)
//! - dispatch every remaining check concurrently, each bounded by the
//!   configured deadline — no waterfall
//! - fold every report into the scoreboard through a **single-writer loop**
//!   and re-run the winner rule after each write
//! - invoke `show()` and publish the winner record **at most once** per run
//! - complete exactly when every banner has a definitive outcome
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   Vec<BannerRef>  (index = priority, 0 is highest)
//!
//! Dispatch (run start):
//!   acknowledged?  ──► outcome Ineligible(Acknowledged), no check task
//!   otherwise      ──► publish CheckStarted, spawn check task into JoinSet
//!                          └──► check_once(banner, limit, bus)
//!                                  └──► (index, Outcome) ──► mpsc ──┐
//!                                                                   │
//! Drain loop (the only writer):                                     ▼
//!   while any slot pending:                              recv one report
//!     ├─► Scoreboard::record(index, outcome)   (write-once; late = no-op)
//!     ├─► winner_index(outcomes)               (pure rule over the vector)
//!     └─► first winner only: banner.show() + publish WinnerChosen
//!
//! Completion:
//!   publish RunCompleted (winner id, if any) ──► return RunReport
//!
//! Event flow (as wired by PickerBuilder::build):
//!   check tasks / drain loop ── publish(Event) ──► Bus ──► telemetry listener
//!                                                              │
//!                                                        TelemetrySet::emit
//!                                                     ┌─────────┼─────────┐
//!                                                     ▼         ▼         ▼
//!                                              [queue S1] [queue S2] [queue SN]
//!                                                     ▼         ▼         ▼
//!                                               worker S1  worker S2  worker SN
//!                                                     ▼         ▼         ▼
//!                                                    sink.record(&Event)
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use bannervisor::{BannerFn, BannerRef, CheckError, Config, Picker};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.check_timeout = Duration::from_millis(500);
//!
//!     let picker = Picker::builder(cfg).build();
//!
//!     let banners: Vec<BannerRef> = vec![
//!         BannerFn::arc(
//!             "survey",
//!             |_gate: CancellationToken| async { Ok::<_, CheckError>(false) },
//!             || println!("survey shown"),
//!         ),
//!         BannerFn::arc(
//!             "welcome",
//!             |_gate: CancellationToken| async { Ok::<_, CheckError>(true) },
//!             || println!("welcome shown"),
//!         ),
//!     ];
//!
//!     let report = picker.run(banners).await;
//!     assert_eq!(report.winner, Some(1));
//!     picker.shutdown().await;
//! }
//! ```

use std::sync::Arc;

use tokio::{
    sync::{broadcast, mpsc},
    task::{JoinHandle, JoinSet},
};
use tokio_util::sync::DropGuard;

use crate::{
    banners::BannerRef,
    config::Config,
    core::{
        builder::PickerBuilder,
        checker::check_once,
        resolver::winner_index,
        scoreboard::{IneligibleReason, Outcome, Scoreboard},
    },
    events::{Bus, Event, EventKind},
    prefs::{PreferenceStore, is_acknowledged},
    telemetry::TelemetrySet,
};

/// Final account of one resolution run.
///
/// Informational only: [`Picker::run`] cannot fail, and a report with no
/// winner is a normal end state (every banner declined, timed out, errored,
/// or was acknowledged).
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Index of the winning banner in the input list, if one was declared.
    pub winner: Option<usize>,
    /// Definitive outcome per banner, in priority order.
    pub outcomes: Vec<Outcome>,
}

/// Coordinates bounded eligibility checks, winner declaration, and telemetry
/// delivery for banner-resolution runs.
///
/// Build one with [`Picker::builder`]; resolve a list with [`Picker::run`].
/// A picker can be reused for sequential runs — no state crosses runs — and
/// torn down with [`Picker::shutdown`] to flush telemetry.
pub struct Picker {
    /// Run configuration (per-check deadline, bus capacity).
    pub cfg: Config,
    /// Event bus shared with check tasks and the telemetry listener.
    bus: Bus,
    /// Fan-out set for telemetry sinks; consumed by [`Picker::shutdown`].
    set: Arc<TelemetrySet>,
    /// Listener forwarding bus events to the sinks.
    listener: JoinHandle<()>,
    /// Stops the listener when the picker is dropped without `shutdown`.
    halt: DropGuard,
    /// Store of previously dismissed banner ids, if configured.
    prefs: Option<Arc<dyn PreferenceStore>>,
}

impl Picker {
    /// Starts building a picker with the given configuration.
    pub fn builder(cfg: Config) -> PickerBuilder {
        PickerBuilder::new(cfg)
    }

    /// Wires a picker from parts prepared by [`PickerBuilder::build`].
    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        set: Arc<TelemetrySet>,
        listener: JoinHandle<()>,
        halt: DropGuard,
        prefs: Option<Arc<dyn PreferenceStore>>,
    ) -> Self {
        Self {
            cfg,
            bus,
            set,
            listener,
            halt,
            prefs,
        }
    }

    /// Subscribes to this picker's event stream.
    ///
    /// The receiver observes everything published after this call: check
    /// lifecycle, acknowledgments, winner declaration, run completion, and
    /// telemetry sink misbehavior. Slow receivers lag and skip the oldest
    /// events; they never slow a run down.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Resolves `banners` to at most one winner.
    ///
    /// Banners are an ordered list; earlier entries are higher priority. The
    /// run completes once **every** banner has a definitive outcome — pass,
    /// decline, timeout, acknowledgment, or check failure — and it cannot
    /// fail: every internal failure degrades to an ineligible banner.
    ///
    /// ### Flow
    /// 1. Snapshot the preference store (once per run).
    /// 2. Dispatch: acknowledged banners settle `Ineligible(Acknowledged)`
    ///    without a check; every other banner gets a `CheckStarted` event
    ///    and a check task. All checks and their deadlines start together —
    ///    there is no sequential waterfall.
    /// 3. Drain: receive one `(index, outcome)` report at a time, record it
    ///    (write-once), and re-run the winner rule over the updated vector.
    ///    The first update that makes a winner certain triggers `show()` and
    ///    `WinnerChosen` exactly once; every later update is bookkeeping.
    /// 4. Publish `RunCompleted` (with the winner id, if any) and return the
    ///    report.
    ///
    /// ### Ordering
    /// Reports may arrive in any order — a lower-priority check settling
    /// first stays provisional until everything above it has settled.
    /// Recording an outcome and deciding the winner happen inside one loop
    /// iteration of the single writer, so no two reports interleave their
    /// winner decision.
    ///
    /// ### Cancellation
    /// Dropping the returned future aborts the in-flight check tasks; the
    /// run holds no state outside this call.
    pub async fn run(&self, banners: Vec<BannerRef>) -> RunReport {
        let mut board = Scoreboard::new(banners.len());
        let mut winner: Option<usize> = None;

        // Capacity n with exactly one send per check task: reports never block.
        let (tx, mut rx) = mpsc::channel::<(usize, Outcome)>(banners.len().max(1));
        let mut checks = JoinSet::new();
        let dismissed = self.prefs.as_ref().and_then(|prefs| prefs.snapshot());

        for (index, banner) in banners.iter().enumerate() {
            if is_acknowledged(banner.id(), dismissed.as_ref()) {
                self.bus
                    .publish(Event::new(EventKind::BannerAcknowledged).with_banner(banner.id()));
                self.apply(
                    &mut board,
                    &mut winner,
                    &banners,
                    index,
                    Outcome::Ineligible(IneligibleReason::Acknowledged),
                );
                continue;
            }

            self.bus
                .publish(Event::new(EventKind::CheckStarted).with_banner(banner.id()));

            let banner = Arc::clone(banner);
            let bus = self.bus.clone();
            let limit = self.cfg.check_limit();
            let tx = tx.clone();
            checks.spawn(async move {
                let outcome = check_once(banner.as_ref(), limit, &bus).await;
                let _ = tx.send((index, outcome)).await;
            });
        }
        drop(tx);

        while board.has_pending() {
            match rx.recv().await {
                Some((index, outcome)) => {
                    self.apply(&mut board, &mut winner, &banners, index, outcome);
                }
                // Every sender is gone but slots are still open: a check
                // task died before reporting. Degrade those slots so the run
                // completes anyway.
                None => {
                    for index in board.pending_indexes() {
                        self.bus.publish(
                            Event::new(EventKind::CheckErrored)
                                .with_banner(banners[index].id())
                                .with_reason("check task died before reporting"),
                        );
                        self.apply(
                            &mut board,
                            &mut winner,
                            &banners,
                            index,
                            Outcome::Ineligible(IneligibleReason::CheckFailed),
                        );
                    }
                }
            }
        }

        let report = RunReport {
            winner,
            outcomes: board.into_outcomes(),
        };
        self.publish_completed(&report, &banners);
        report
    }

    /// Applies one definitive outcome: write-once record, winner re-check,
    /// one-shot activation.
    ///
    /// Runs to completion before the next report is received, which is what
    /// makes the outcome write and the winner decision one atomic step.
    fn apply(
        &self,
        board: &mut Scoreboard,
        winner: &mut Option<usize>,
        banners: &[BannerRef],
        index: usize,
        outcome: Outcome,
    ) {
        if !board.record(index, outcome) {
            return; // late or duplicate report for a settled slot
        }
        if winner.is_some() {
            return; // bookkeeping only; the winner never changes
        }
        if let Some(chosen) = winner_index(board.outcomes()) {
            *winner = Some(chosen);
            banners[chosen].show();
            self.bus
                .publish(Event::new(EventKind::WinnerChosen).with_banner(banners[chosen].id()));
        }
    }

    /// Publishes `RunCompleted`, carrying the winner id if one was declared.
    fn publish_completed(&self, report: &RunReport, banners: &[BannerRef]) {
        let mut ev = Event::new(EventKind::RunCompleted);
        if let Some(index) = report.winner {
            ev = ev.with_banner(banners[index].id());
        }
        self.bus.publish(ev);
    }

    /// Flushes telemetry and tears the picker down.
    ///
    /// 1. Drops this picker's bus handle — nothing new gets published.
    /// 2. Stops the listener; events already on the bus are forwarded to the
    ///    sink queues first.
    /// 3. Closes the sink queues and waits for the workers to drain them.
    ///
    /// Optional: dropping a picker without calling this also stops the
    /// listener and the workers, but queued telemetry may be lost.
    pub async fn shutdown(self) {
        let Picker {
            bus,
            set,
            listener,
            halt,
            ..
        } = self;

        drop(bus);
        drop(halt);
        let _ = listener.await;

        if let Some(set) = Arc::into_inner(set) {
            set.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banners::BannerFn;
    use crate::error::CheckError;
    use crate::prefs::MemoryPrefs;
    use crate::telemetry::Telemetry;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time;
    use tokio_util::sync::CancellationToken;

    /// Banner that settles `verdict` after `delay`, counting `show()` calls.
    fn timed(
        id: &'static str,
        verdict: bool,
        delay: Duration,
        shows: &Arc<AtomicUsize>,
    ) -> BannerRef {
        let shows = Arc::clone(shows);
        BannerFn::arc(
            id,
            move |_gate: CancellationToken| async move {
                if !delay.is_zero() {
                    time::sleep(delay).await;
                }
                Ok::<_, CheckError>(verdict)
            },
            move || {
                shows.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    /// Banner whose check never settles on its own.
    fn stuck(id: &'static str, shows: &Arc<AtomicUsize>) -> BannerRef {
        let shows = Arc::clone(shows);
        BannerFn::arc(
            id,
            |_gate: CancellationToken| async {
                time::sleep(Duration::from_secs(600)).await;
                Ok::<_, CheckError>(true)
            },
            move || {
                shows.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    async fn exploding_check(_gate: CancellationToken) -> Result<bool, CheckError> {
        panic!("check blew up")
    }

    /// Sink that collects the contracted `(component, value)` wire records.
    #[derive(Default)]
    struct RecordSink {
        records: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Telemetry for RecordSink {
        async fn record(&self, ev: &Event) {
            if let (Some(component), Some(value)) = (ev.component(), ev.value()) {
                self.records
                    .lock()
                    .unwrap()
                    .push((component.to_string(), value.to_string()));
            }
        }

        fn name(&self) -> &'static str {
            "records"
        }
    }

    fn cfg(check_timeout: Duration) -> Config {
        Config {
            check_timeout,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_lower_priority_wins_when_higher_declines() {
        let shows_x = Arc::new(AtomicUsize::new(0));
        let shows_y = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default()).build();
        let mut rx = picker.events();

        let report = picker
            .run(vec![
                timed("first", false, Duration::ZERO, &shows_x),
                timed("second", true, Duration::ZERO, &shows_y),
            ])
            .await;

        assert_eq!(report.winner, Some(1));
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Ineligible(IneligibleReason::Declined),
                Outcome::Eligible
            ]
        );
        assert_eq!(shows_x.load(Ordering::SeqCst), 0);
        assert_eq!(shows_y.load(Ordering::SeqCst), 1);

        picker.shutdown().await;
        let mut winner_banner = None;
        while let Ok(ev) = rx.recv().await {
            if ev.kind == EventKind::WinnerChosen {
                winner_banner = ev.banner.clone();
            }
        }
        assert_eq!(winner_banner.as_deref(), Some("second"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_priority_beats_wall_clock_order() {
        // The lower-priority check settles well before the higher-priority
        // one; the winner must still be the higher-priority banner.
        let shows_x = Arc::new(AtomicUsize::new(0));
        let shows_y = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default()).build();
        let mut rx = picker.events();

        let report = picker
            .run(vec![
                timed("deliberate", true, Duration::from_millis(120), &shows_x),
                timed("eager", true, Duration::from_millis(5), &shows_y),
            ])
            .await;

        assert_eq!(report.winner, Some(0));
        assert_eq!(shows_x.load(Ordering::SeqCst), 1);
        assert_eq!(shows_y.load(Ordering::SeqCst), 0, "only the winner shows");

        // The declaration must come after the higher-priority check settled,
        // even though the lower-priority one had already passed.
        picker.shutdown().await;
        let mut evs = Vec::new();
        while let Ok(ev) = rx.recv().await {
            evs.push(ev);
        }
        let passed_first = evs
            .iter()
            .position(|e| {
                e.kind == EventKind::CheckPassed && e.banner.as_deref() == Some("deliberate")
            })
            .expect("the slow check still passed");
        let declared = evs
            .iter()
            .position(|e| e.kind == EventKind::WinnerChosen)
            .expect("a winner was declared");
        assert!(
            passed_first < declared,
            "winner declared at {declared} before the higher-priority check settled at {passed_first}"
        );
    }

    #[tokio::test]
    async fn test_acknowledged_banner_skips_its_check() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let invoked_in_check = Arc::clone(&invoked);
        let shows = Arc::new(AtomicUsize::new(0));
        let shows_in_banner = Arc::clone(&shows);

        let banner: BannerRef = BannerFn::arc(
            "survey",
            move |_gate: CancellationToken| {
                let invoked = Arc::clone(&invoked_in_check);
                async move {
                    invoked.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CheckError>(true)
                }
            },
            move || {
                shows_in_banner.fetch_add(1, Ordering::SeqCst);
            },
        );

        let prefs = Arc::new(MemoryPrefs::new());
        prefs.dismiss("survey");
        let picker = Picker::builder(Config::default()).with_prefs(prefs).build();

        let report = picker.run(vec![banner]).await;

        assert_eq!(report.winner, None);
        assert_eq!(
            report.outcomes,
            vec![Outcome::Ineligible(IneligibleReason::Acknowledged)]
        );
        assert_eq!(
            invoked.load(Ordering::SeqCst),
            0,
            "an acknowledged banner's check must not run"
        );
        assert_eq!(shows.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_timeout_unblocks_lower_priority() {
        let shows_x = Arc::new(AtomicUsize::new(0));
        let shows_y = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(cfg(Duration::from_millis(80))).build();
        let mut rx = picker.events();

        let report = picker
            .run(vec![
                stuck("frozen", &shows_x),
                timed("ready", true, Duration::from_millis(5), &shows_y),
            ])
            .await;

        assert_eq!(report.winner, Some(1));
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Ineligible(IneligibleReason::TimedOut),
                Outcome::Eligible
            ]
        );
        assert_eq!(shows_y.load(Ordering::SeqCst), 1);

        // "ready" passed long before the deadline, but it may only win once
        // the frozen check above it has been forced to a verdict.
        picker.shutdown().await;
        let mut evs = Vec::new();
        while let Ok(ev) = rx.recv().await {
            evs.push(ev);
        }
        let timed_out = evs
            .iter()
            .position(|e| e.kind == EventKind::CheckTimedOut)
            .expect("the frozen check was forced");
        let declared = evs
            .iter()
            .position(|e| e.kind == EventKind::WinnerChosen)
            .expect("a winner was declared");
        assert!(
            timed_out < declared,
            "the winner may only be declared after the forced timeout"
        );
        assert_eq!(evs[timed_out].timeout_ms, Some(80));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_at_most_one_show_with_many_eligible() {
        let shows = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default()).build();

        let report = picker
            .run(vec![
                timed("a", true, Duration::from_millis(30), &shows),
                timed("b", true, Duration::from_millis(10), &shows),
                timed("c", true, Duration::ZERO, &shows),
            ])
            .await;

        assert_eq!(report.winner, Some(0));
        assert_eq!(
            shows.load(Ordering::SeqCst),
            1,
            "exactly one banner may activate per run"
        );
    }

    #[tokio::test]
    async fn test_no_winner_when_everything_declines() {
        let shows = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default()).build();
        let mut rx = picker.events();

        let report = picker
            .run(vec![
                timed("a", false, Duration::ZERO, &shows),
                timed("b", false, Duration::from_millis(10), &shows),
            ])
            .await;

        assert_eq!(report.winner, None);
        assert_eq!(shows.load(Ordering::SeqCst), 0);

        picker.shutdown().await;
        let mut completed = Vec::new();
        while let Ok(ev) = rx.recv().await {
            if ev.kind == EventKind::RunCompleted {
                completed.push(ev);
            }
        }
        assert_eq!(
            completed.len(),
            1,
            "completion fires exactly once, winner or not"
        );
        assert_eq!(completed[0].banner, None);
    }

    #[tokio::test]
    async fn test_empty_list_completes_immediately() {
        let picker = Picker::builder(Config::default()).build();
        let mut rx = picker.events();

        let report = picker.run(Vec::new()).await;
        assert_eq!(report.winner, None);
        assert!(report.outcomes.is_empty());

        picker.shutdown().await;
        let mut saw_completed = false;
        while let Ok(ev) = rx.recv().await {
            saw_completed |= ev.kind == EventKind::RunCompleted;
        }
        assert!(saw_completed);
    }

    #[tokio::test]
    async fn test_failing_check_is_just_ineligible() {
        let shows = Arc::new(AtomicUsize::new(0));
        let failing: BannerRef = BannerFn::arc(
            "broken",
            |_gate: CancellationToken| async {
                Err::<bool, _>(CheckError::failed("storage offline"))
            },
            || {},
        );
        let picker = Picker::builder(Config::default()).build();

        let report = picker
            .run(vec![failing, timed("fallback", true, Duration::ZERO, &shows)])
            .await;

        assert_eq!(report.winner, Some(1));
        assert_eq!(
            report.outcomes[0],
            Outcome::Ineligible(IneligibleReason::CheckFailed)
        );
        assert_eq!(shows.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_panicking_check_degrades_and_run_completes() {
        let shows = Arc::new(AtomicUsize::new(0));
        let dies: BannerRef = BannerFn::arc("dies", exploding_check, || {});
        let picker = Picker::builder(Config::default()).build();

        let report = picker
            .run(vec![
                dies,
                timed("survivor", true, Duration::from_millis(20), &shows),
            ])
            .await;

        assert_eq!(report.winner, Some(1));
        assert_eq!(
            report.outcomes[0],
            Outcome::Ineligible(IneligibleReason::CheckFailed)
        );
        assert_eq!(shows.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_early_winner_still_drains_stragglers() {
        let shows_x = Arc::new(AtomicUsize::new(0));
        let shows_y = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default()).build();
        let mut rx = picker.events();

        let report = picker
            .run(vec![
                timed("instant", true, Duration::ZERO, &shows_x),
                timed("straggler", true, Duration::from_millis(100), &shows_y),
            ])
            .await;

        // The straggler's outcome is in the report: the run waited for it.
        assert_eq!(report.winner, Some(0));
        assert_eq!(report.outcomes[1], Outcome::Eligible);
        assert_eq!(shows_y.load(Ordering::SeqCst), 0);

        // And the winner was declared before the straggler settled.
        picker.shutdown().await;
        let mut evs = Vec::new();
        while let Ok(ev) = rx.recv().await {
            evs.push(ev);
        }
        let declared = evs
            .iter()
            .position(|e| e.kind == EventKind::WinnerChosen)
            .expect("winner declared");
        let straggler_passed = evs
            .iter()
            .position(|e| {
                e.kind == EventKind::CheckPassed && e.banner.as_deref() == Some("straggler")
            })
            .expect("straggler settled");
        assert!(declared < straggler_passed);
    }

    #[tokio::test]
    async fn test_sequential_runs_share_no_state() {
        let shows = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default()).build();

        let first = picker
            .run(vec![timed("one", true, Duration::ZERO, &shows)])
            .await;
        let second = picker
            .run(vec![
                timed("one", false, Duration::ZERO, &shows),
                timed("two", true, Duration::ZERO, &shows),
            ])
            .await;

        assert_eq!(first.winner, Some(0));
        assert_eq!(second.winner, Some(1));
        assert_eq!(shows.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_winner_record_reaches_telemetry() {
        let shows = Arc::new(AtomicUsize::new(0));
        let sink = Arc::new(RecordSink::default());
        let picker = Picker::builder(Config::default())
            .with_telemetry(vec![Arc::clone(&sink) as Arc<dyn Telemetry>])
            .build();

        picker
            .run(vec![
                timed("first", false, Duration::ZERO, &shows),
                timed("second", true, Duration::ZERO, &shows),
            ])
            .await;
        picker.shutdown().await;

        let records = sink.records.lock().unwrap();
        assert_eq!(
            records.as_slice(),
            [("banner-picker".to_string(), "second".to_string())]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_timeout_record_reaches_telemetry() {
        let shows = Arc::new(AtomicUsize::new(0));
        let sink = Arc::new(RecordSink::default());
        let picker = Picker::builder(cfg(Duration::from_millis(50)))
            .with_telemetry(vec![Arc::clone(&sink) as Arc<dyn Telemetry>])
            .build();

        let report = picker.run(vec![stuck("frozen", &shows)]).await;
        assert_eq!(report.winner, None);
        picker.shutdown().await;

        let records = sink.records.lock().unwrap();
        assert_eq!(
            records.as_slice(),
            [("banner-picker-timeout".to_string(), "frozen".to_string())]
        );
    }

    #[tokio::test]
    async fn test_broken_telemetry_cannot_fail_the_run() {
        struct Grenade;

        #[async_trait]
        impl Telemetry for Grenade {
            async fn record(&self, _ev: &Event) {
                panic!("sink blew up");
            }

            fn name(&self) -> &'static str {
                "grenade"
            }
        }

        let shows = Arc::new(AtomicUsize::new(0));
        let picker = Picker::builder(Config::default())
            .with_telemetry(vec![Arc::new(Grenade) as Arc<dyn Telemetry>])
            .build();
        let mut rx = picker.events();

        let report = picker
            .run(vec![timed("only", true, Duration::ZERO, &shows)])
            .await;
        assert_eq!(report.winner, Some(0));
        assert_eq!(shows.load(Ordering::SeqCst), 1);

        picker.shutdown().await;
        let mut saw_panic_report = false;
        while let Ok(ev) = rx.recv().await {
            saw_panic_report |= ev.kind == EventKind::TelemetryPanicked;
        }
        assert!(saw_panic_report, "sink panics are reported, not propagated");
    }
}
