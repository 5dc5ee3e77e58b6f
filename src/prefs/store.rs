//! # Preference store: read-only lookup of dismissed banners.
//!
//! [`PreferenceStore`] is the seam to wherever user preferences actually live
//! (browser storage, a settings service, a config file). The picker only ever
//! reads it: one [`snapshot`](PreferenceStore::snapshot) at the start of a
//! run, evaluated against every banner by [`is_acknowledged`].
//!
//! ## Rules
//! - **One snapshot per run**: a dismissal recorded while a run is in flight
//!   only affects the next run.
//! - **Fail open**: `None` (nothing recorded, store unavailable) and an empty
//!   set both mean "no banner was acknowledged" — absent preference data must
//!   never keep a run from dispatching its checks.

use std::collections::HashSet;

/// Read-only source of the banner ids the user has previously dismissed.
///
/// The picker calls [`snapshot`](PreferenceStore::snapshot) exactly once per
/// run, before any check is dispatched. The contract is synchronous by
/// design: a store backed by slow I/O should cache and refresh out of band
/// rather than stall run startup.
pub trait PreferenceStore: Send + Sync + 'static {
    /// Returns the set of dismissed banner ids, or `None` when nothing is
    /// recorded or the store cannot be reached.
    fn snapshot(&self) -> Option<HashSet<String>>;
}

/// Returns `true` when the user has previously dismissed the banner `id`.
///
/// Pure and fail-open: an absent or empty snapshot acknowledges nothing, so
/// the banner's eligibility check still runs.
///
/// # Example
/// ```
/// use std::collections::HashSet;
/// use bannervisor::is_acknowledged;
///
/// let dismissed: HashSet<String> = ["survey".to_string()].into();
/// assert!(is_acknowledged("survey", Some(&dismissed)));
/// assert!(!is_acknowledged("welcome", Some(&dismissed)));
/// assert!(!is_acknowledged("survey", None));
/// ```
pub fn is_acknowledged(id: &str, snapshot: Option<&HashSet<String>>) -> bool {
    snapshot.map(|ids| ids.contains(id)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_snapshot_fails_open() {
        assert!(!is_acknowledged("any", None));
    }

    #[test]
    fn test_empty_snapshot_fails_open() {
        let empty = HashSet::new();
        assert!(!is_acknowledged("any", Some(&empty)));
    }

    #[test]
    fn test_only_listed_ids_are_acknowledged() {
        let dismissed: HashSet<String> = ["survey".to_string(), "promo".to_string()].into();
        assert!(is_acknowledged("survey", Some(&dismissed)));
        assert!(is_acknowledged("promo", Some(&dismissed)));
        assert!(!is_acknowledged("welcome", Some(&dismissed)));
    }
}
