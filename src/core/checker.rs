//! # Run one banner's bounded eligibility check.
//!
//! Executes a single [`Banner::can_show`] race against its deadline and maps
//! whatever settles first into exactly one definitive [`Outcome`],
//! publishing the matching event to the [`Bus`].
//!
//! ## Event flow
//!
//! ```text
//! Pass:     can_show() → Ok(true)  → publish CheckPassed   → Eligible
//! Decline:  can_show() → Ok(false) → publish CheckDeclined → Ineligible(Declined)
//! Error:    can_show() → Err(e)    → publish CheckErrored  → Ineligible(CheckFailed)
//!
//! Timeout:  deadline elapses first → drop check future
//!                                  → cancel gate token
//!                                  → publish CheckTimedOut
//!                                  → Ineligible(TimedOut)
//! ```
//!
//! ## Rules
//! - Publishes **exactly one** terminal event per check
//! - On timeout the check future is **dropped**: its eventual verdict no
//!   longer exists and cannot overwrite the forced result
//! - The gate token is cancelled on timeout so work the check handed off
//!   (spawned lookups, shared fetches) stops promptly
//! - An error is a verdict: equivalent to settling `false`, never propagated

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    banners::Banner,
    core::scoreboard::{IneligibleReason, Outcome},
    error::CheckError,
    events::{Bus, Event, EventKind},
};

/// Runs one banner's eligibility check under a deadline and returns its
/// definitive outcome.
///
/// ### Flow
/// 1. Mint a fresh gate token for this check
/// 2. Race `can_show(gate)` against `limit` via `tokio::time::timeout`
/// 3. Publish the matching terminal event, return the outcome
///
/// ### Timeout behavior
/// If `limit` is `Some(dur)` and `dur > 0`:
/// - the check future is dropped the moment the deadline elapses,
/// - the gate is cancelled (cooperative work the check spawned can bail),
/// - `CheckTimedOut` is published, and the outcome is forced to
///   [`IneligibleReason::TimedOut`].
///
/// `None` (or a zero duration) means no deadline: the check runs until it
/// settles.
///
/// ### Error behavior
/// A check that returns `Err` gets [`IneligibleReason::CheckFailed`] — the
/// run treats it exactly like a `false` verdict and the error goes no
/// further than the `CheckErrored` event.
pub async fn check_once<B: Banner + ?Sized>(
    banner: &B,
    limit: Option<Duration>,
    bus: &Bus,
) -> Outcome {
    let gate = CancellationToken::new();

    let verdict = if let Some(dur) = limit.filter(|d| *d > Duration::ZERO) {
        match time::timeout(dur, banner.can_show(gate.clone())).await {
            Ok(v) => v,
            Err(_elapsed) => {
                gate.cancel();
                publish_timed_out(bus, banner.id(), dur);
                return Outcome::Ineligible(IneligibleReason::TimedOut);
            }
        }
    } else {
        banner.can_show(gate.clone()).await
    };

    match verdict {
        Ok(true) => {
            publish_passed(bus, banner.id());
            Outcome::Eligible
        }
        Ok(false) => {
            publish_declined(bus, banner.id());
            Outcome::Ineligible(IneligibleReason::Declined)
        }
        Err(e) => {
            publish_errored(bus, banner.id(), &e);
            Outcome::Ineligible(IneligibleReason::CheckFailed)
        }
    }
}

/// Publishes `CheckPassed` (the check settled `true`).
fn publish_passed(bus: &Bus, id: &str) {
    bus.publish(Event::new(EventKind::CheckPassed).with_banner(id));
}

/// Publishes `CheckDeclined` (the check settled `false`).
fn publish_declined(bus: &Bus, id: &str) {
    bus.publish(Event::new(EventKind::CheckDeclined).with_banner(id));
}

/// Publishes `CheckErrored` with the error text.
fn publish_errored(bus: &Bus, id: &str, err: &CheckError) {
    bus.publish(
        Event::new(EventKind::CheckErrored)
            .with_banner(id)
            .with_reason(err.to_string()),
    );
}

/// Publishes `CheckTimedOut` (the deadline forced the verdict).
fn publish_timed_out(bus: &Bus, id: &str, dur: Duration) {
    bus.publish(
        Event::new(EventKind::CheckTimedOut)
            .with_banner(id)
            .with_timeout(dur),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banners::BannerFn;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn bus() -> Bus {
        Bus::new(64)
    }

    #[tokio::test]
    async fn test_true_verdict_is_eligible() {
        let banner = BannerFn::new(
            "pass",
            |_gate: CancellationToken| async { Ok::<_, CheckError>(true) },
            || {},
        );
        let bus = bus();
        let mut rx = bus.subscribe();

        let outcome = check_once(&banner, Some(Duration::from_secs(1)), &bus).await;
        assert_eq!(outcome, Outcome::Eligible);

        let ev = rx.recv().await.expect("terminal event published");
        assert_eq!(ev.kind, EventKind::CheckPassed);
        assert_eq!(ev.banner.as_deref(), Some("pass"));
    }

    #[tokio::test]
    async fn test_false_verdict_is_declined() {
        let banner = BannerFn::new(
            "decline",
            |_gate: CancellationToken| async { Ok::<_, CheckError>(false) },
            || {},
        );
        let bus = bus();
        let mut rx = bus.subscribe();

        let outcome = check_once(&banner, Some(Duration::from_secs(1)), &bus).await;
        assert_eq!(outcome, Outcome::Ineligible(IneligibleReason::Declined));
        assert_eq!(rx.recv().await.unwrap().kind, EventKind::CheckDeclined);
    }

    #[tokio::test]
    async fn test_error_is_treated_like_false() {
        let banner = BannerFn::new(
            "broken",
            |_gate: CancellationToken| async {
                Err::<bool, _>(CheckError::failed("backend unreachable"))
            },
            || {},
        );
        let bus = bus();
        let mut rx = bus.subscribe();

        let outcome = check_once(&banner, Some(Duration::from_secs(1)), &bus).await;
        assert_eq!(outcome, Outcome::Ineligible(IneligibleReason::CheckFailed));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::CheckErrored);
        assert!(
            ev.reason.as_deref().unwrap_or("").contains("backend unreachable"),
            "event should carry the error text, got {:?}",
            ev.reason
        );
    }

    #[tokio::test]
    async fn test_deadline_forces_the_verdict() {
        let banner = BannerFn::new(
            "slow",
            |_gate: CancellationToken| async {
                time::sleep(Duration::from_secs(30)).await;
                Ok::<_, CheckError>(true)
            },
            || {},
        );
        let bus = bus();
        let mut rx = bus.subscribe();

        let outcome = check_once(&banner, Some(Duration::from_millis(50)), &bus).await;
        assert_eq!(outcome, Outcome::Ineligible(IneligibleReason::TimedOut));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::CheckTimedOut);
        assert_eq!(ev.banner.as_deref(), Some("slow"));
        assert_eq!(ev.timeout_ms, Some(50));
    }

    #[tokio::test]
    async fn test_timeout_cancels_the_gate() {
        // The check hands its gate to a side task; the deadline firing must
        // reach that task even though the check future itself is dropped.
        let observed = Arc::new(AtomicBool::new(false));
        let observed_by_task = Arc::clone(&observed);

        let banner = BannerFn::new(
            "handoff",
            move |gate: CancellationToken| {
                let observed = Arc::clone(&observed_by_task);
                async move {
                    tokio::spawn(async move {
                        gate.cancelled().await;
                        observed.store(true, Ordering::SeqCst);
                    });
                    time::sleep(Duration::from_secs(30)).await;
                    Ok::<_, CheckError>(true)
                }
            },
            || {},
        );
        let bus = bus();

        let outcome = check_once(&banner, Some(Duration::from_millis(50)), &bus).await;
        assert_eq!(outcome, Outcome::Ineligible(IneligibleReason::TimedOut));

        time::sleep(Duration::from_millis(50)).await;
        assert!(
            observed.load(Ordering::SeqCst),
            "the handed-off task should observe the cancelled gate"
        );
    }

    #[tokio::test]
    async fn test_no_limit_lets_a_slow_check_settle() {
        let banner = BannerFn::new(
            "slowish",
            |_gate: CancellationToken| async {
                time::sleep(Duration::from_millis(50)).await;
                Ok::<_, CheckError>(true)
            },
            || {},
        );
        let bus = bus();

        let outcome = check_once(&banner, None, &bus).await;
        assert_eq!(outcome, Outcome::Eligible);
    }

    #[tokio::test]
    async fn test_zero_limit_means_no_deadline() {
        let banner = BannerFn::new(
            "sentinel",
            |_gate: CancellationToken| async {
                time::sleep(Duration::from_millis(50)).await;
                Ok::<_, CheckError>(true)
            },
            || {},
        );
        let bus = bus();

        let outcome = check_once(&banner, Some(Duration::ZERO), &bus).await;
        assert_eq!(outcome, Outcome::Eligible);
    }
}
