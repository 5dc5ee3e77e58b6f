//! # In-memory preference store.
//!
//! [`MemoryPrefs`] keeps dismissed ids in an `RwLock<HashSet>` — enough for
//! demos and tests, and a reference for wiring a real store behind
//! [`PreferenceStore`].

use std::collections::HashSet;
use std::sync::RwLock;

use crate::prefs::store::PreferenceStore;

/// In-memory [`PreferenceStore`] for demos and tests.
///
/// # Example
/// ```
/// use bannervisor::{MemoryPrefs, PreferenceStore};
///
/// let prefs = MemoryPrefs::new();
/// assert!(prefs.snapshot().is_none());
///
/// prefs.dismiss("survey");
/// let ids = prefs.snapshot().unwrap();
/// assert!(ids.contains("survey"));
/// ```
#[derive(Default)]
pub struct MemoryPrefs {
    dismissed: RwLock<HashSet<String>>,
}

impl MemoryPrefs {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dismissal for the banner `id`.
    ///
    /// Takes effect from the next [`snapshot`](PreferenceStore::snapshot) —
    /// a run already in flight keeps evaluating against its own snapshot.
    pub fn dismiss(&self, id: impl Into<String>) {
        self.dismissed
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id.into());
    }
}

impl PreferenceStore for MemoryPrefs {
    fn snapshot(&self) -> Option<HashSet<String>> {
        let ids = self
            .dismissed
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if ids.is_empty() { None } else { Some(ids.clone()) }
    }
}
