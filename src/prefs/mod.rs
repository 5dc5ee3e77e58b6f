//! # Dismissed-banner preferences.
//!
//! A banner the user has already seen and dismissed should not compete
//! again, and should not even spend its eligibility check. This module
//! provides the pieces the picker uses to enforce that:
//! - [`PreferenceStore`] - trait over wherever dismissals are recorded
//! - [`is_acknowledged`] - pure filter of one banner id against a snapshot
//! - [`MemoryPrefs`] - in-memory store for demos and tests
//!
//! The picker takes one snapshot per run and routes acknowledged banners
//! straight to an ineligible outcome, through the same accounting path as
//! every settled check — so completion and winner logic stay uniform.

mod memory;
mod store;

pub use memory::MemoryPrefs;
pub use store::{PreferenceStore, is_acknowledged};
