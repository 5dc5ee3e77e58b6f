//! # Scoreboard: the write-once outcome vector of one run.
//!
//! One run owns one [`Scoreboard`]: a slot per banner, every slot starting
//! [`Outcome::Pending`] and settling exactly once. The picker loop is the
//! only writer; check tasks report through a channel and never touch the
//! board directly.
//!
//! ## Rules
//! - **Write-once**: the first [`record`](Scoreboard::record) per slot wins;
//!   later writes are discarded. The losing side of a check/deadline race
//!   that still manages to report hits a settled slot and becomes a no-op.
//! - **Never reverted**: a settled slot keeps its outcome for the rest of
//!   the run.
//! - **Completion**: the run is over exactly when no slot is pending.

/// Definitive eligibility result for one banner slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The banner's check has not settled yet.
    Pending,
    /// The check settled `true`: the banner may be shown.
    Eligible,
    /// The banner is out of the race; the reason records why.
    Ineligible(IneligibleReason),
}

impl Outcome {
    /// Returns `true` while the slot has no definitive result.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    /// Returns `true` when the check settled `true`.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        matches!(self, Outcome::Eligible)
    }
}

/// Why a banner became [`Outcome::Ineligible`].
///
/// The winner rule ignores the reason — any ineligible predecessor is
/// equally non-blocking — but reports and telemetry keep it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IneligibleReason {
    /// The check settled `false`.
    Declined,
    /// The deadline fired before the check settled; the verdict was forced.
    TimedOut,
    /// The user dismissed this banner earlier; its check never ran.
    Acknowledged,
    /// The check errored (or its task died) instead of settling to a bool.
    CheckFailed,
}

/// Write-once outcome vector plus a pending count.
///
/// Owned exclusively by the run loop of one [`Picker::run`] call; nothing is
/// shared across runs.
///
/// [`Picker::run`]: crate::Picker::run
pub struct Scoreboard {
    outcomes: Vec<Outcome>,
    pending: usize,
}

impl Scoreboard {
    /// Creates a board of `n` pending slots.
    pub fn new(n: usize) -> Self {
        Self {
            outcomes: vec![Outcome::Pending; n],
            pending: n,
        }
    }

    /// Records a definitive outcome for slot `index`.
    ///
    /// Returns `true` if the write was applied. Returns `false` and leaves
    /// the board untouched when the slot has already settled (late or
    /// duplicate report) or when `outcome` is itself [`Outcome::Pending`]
    /// (not a definitive result).
    pub fn record(&mut self, index: usize, outcome: Outcome) -> bool {
        if outcome.is_pending() || !self.outcomes[index].is_pending() {
            return false;
        }
        self.outcomes[index] = outcome;
        self.pending -= 1;
        true
    }

    /// Returns `true` while any slot is pending.
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// Current outcome vector, in priority order.
    #[inline]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Indexes still pending, in priority order.
    pub fn pending_indexes(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| outcome.is_pending())
            .map(|(index, _)| index)
            .collect()
    }

    /// Consumes the board, returning the final outcome vector.
    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_all_pending() {
        let board = Scoreboard::new(3);
        assert!(board.has_pending());
        assert_eq!(board.pending_indexes(), vec![0, 1, 2]);
        assert!(board.outcomes().iter().all(Outcome::is_pending));
    }

    #[test]
    fn test_first_write_wins() {
        let mut board = Scoreboard::new(2);

        assert!(board.record(0, Outcome::Eligible));
        assert!(
            !board.record(0, Outcome::Ineligible(IneligibleReason::TimedOut)),
            "a settled slot must discard later writes"
        );
        assert_eq!(board.outcomes()[0], Outcome::Eligible);
    }

    #[test]
    fn test_recording_pending_is_a_noop() {
        let mut board = Scoreboard::new(1);
        assert!(!board.record(0, Outcome::Pending));
        assert!(board.has_pending());
    }

    #[test]
    fn test_completion_when_every_slot_settles() {
        let mut board = Scoreboard::new(2);
        board.record(1, Outcome::Ineligible(IneligibleReason::Declined));
        assert!(board.has_pending());

        board.record(0, Outcome::Eligible);
        assert!(!board.has_pending());
        assert_eq!(board.pending_indexes(), Vec::<usize>::new());
        assert_eq!(
            board.into_outcomes(),
            vec![
                Outcome::Eligible,
                Outcome::Ineligible(IneligibleReason::Declined)
            ]
        );
    }

    #[test]
    fn test_zero_slots_has_nothing_pending() {
        let board = Scoreboard::new(0);
        assert!(!board.has_pending());
        assert!(board.into_outcomes().is_empty());
    }
}
