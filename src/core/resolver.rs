//! # Priority resolver: the winner rule.
//!
//! [`winner_index`] is a pure function of the outcome vector. The picker
//! loop evaluates it immediately after every single outcome write, so a
//! winner is declared at the earliest update that makes one certain — not
//! at run completion.
//!
//! ## Rule
//! The winner is the lowest-index eligible banner, and only once nothing
//! above it can still pass:
//! 1. find the lowest index `i` with [`Outcome::Eligible`]; if none exists
//!    there is no winner (yet);
//! 2. if any slot in `[0, i)` is still [`Outcome::Pending`], there is no
//!    winner yet — that banner may still pass and would outrank `i`;
//! 3. otherwise `i` wins. An ineligible predecessor never blocks.
//!
//! A lower-priority check settling `true` first therefore cannot steal the
//! win: its slot stays provisional until every slot above it has settled.

use crate::core::scoreboard::Outcome;

/// Returns the winning index for the current outcome vector, if one is
/// already certain.
///
/// Pure: the same vector always yields the same answer. Because settled
/// slots are never reverted, re-evaluating after further updates can only
/// move the answer from `None` to `Some(i)` — never change a declared
/// winner.
pub fn winner_index(outcomes: &[Outcome]) -> Option<usize> {
    let first_eligible = outcomes.iter().position(Outcome::is_eligible)?;
    let blocked = outcomes[..first_eligible].iter().any(Outcome::is_pending);
    if blocked { None } else { Some(first_eligible) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoreboard::IneligibleReason;

    const DECLINED: Outcome = Outcome::Ineligible(IneligibleReason::Declined);
    const TIMED_OUT: Outcome = Outcome::Ineligible(IneligibleReason::TimedOut);

    #[test]
    fn test_no_eligible_slot_means_no_winner() {
        assert_eq!(winner_index(&[]), None);
        assert_eq!(winner_index(&[Outcome::Pending, Outcome::Pending]), None);
        assert_eq!(winner_index(&[DECLINED, TIMED_OUT]), None);
    }

    #[test]
    fn test_slot_zero_wins_immediately() {
        // Nothing outranks index 0; later slots may still be pending.
        assert_eq!(
            winner_index(&[Outcome::Eligible, Outcome::Pending, Outcome::Pending]),
            Some(0)
        );
    }

    #[test]
    fn test_pending_predecessor_blocks() {
        assert_eq!(winner_index(&[Outcome::Pending, Outcome::Eligible]), None);
        assert_eq!(
            winner_index(&[DECLINED, Outcome::Pending, Outcome::Eligible]),
            None
        );
    }

    #[test]
    fn test_ineligible_predecessor_does_not_block() {
        assert_eq!(winner_index(&[DECLINED, Outcome::Eligible]), Some(1));
        assert_eq!(
            winner_index(&[TIMED_OUT, DECLINED, Outcome::Eligible, Outcome::Pending]),
            Some(2)
        );
    }

    #[test]
    fn test_lowest_eligible_index_wins() {
        assert_eq!(
            winner_index(&[DECLINED, Outcome::Eligible, Outcome::Eligible]),
            Some(1)
        );
    }

    #[test]
    fn test_pure_over_an_unchanged_vector() {
        let outcomes = [DECLINED, Outcome::Eligible, Outcome::Pending];
        let first = winner_index(&outcomes);
        let second = winner_index(&outcomes);
        assert_eq!(first, second);
        assert_eq!(first, Some(1));
    }
}
