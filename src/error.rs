//! Error type for banner eligibility checks.
//!
//! A failing check never fails the run: the picker records the banner as
//! ineligible and moves on. [`CheckError`] exists so check implementations
//! have a typed way to report *why* they could not produce a verdict, and so
//! telemetry sinks can label those failures.

use thiserror::Error;

/// # Errors produced by a banner's eligibility check.
///
/// Returned from [`Banner::can_show`](crate::Banner::can_show) when the check
/// cannot settle to a boolean. The picker treats any error exactly like a
/// `false` verdict: the banner becomes ineligible and the error never
/// propagates out of the run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CheckError {
    /// The check ran but failed (network error, storage error, ...).
    #[error("eligibility check failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The check observed its gate token and stopped cooperatively.
    #[error("eligibility check cancelled")]
    Canceled,
}

impl CheckError {
    /// Wraps an arbitrary error message.
    pub fn failed(error: impl Into<String>) -> Self {
        CheckError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use bannervisor::CheckError;
    ///
    /// let err = CheckError::failed("prefs backend unreachable");
    /// assert_eq!(err.as_label(), "check_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CheckError::Failed { .. } => "check_failed",
            CheckError::Canceled => "check_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CheckError::Failed { error } => format!("error: {error}"),
            CheckError::Canceled => "cancelled".to_string(),
        }
    }
}
