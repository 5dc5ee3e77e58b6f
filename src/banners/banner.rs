//! # Banner trait: the competing UI element.
//!
//! A [`Banner`] has a stable id, an async eligibility check, and an
//! activation action. The check receives a [`CancellationToken`] that is
//! cancelled when the check's deadline fires, so cooperative implementations
//! can stop expensive work early instead of racing a dropped future.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::CheckError;

/// Shared handle to a banner (`Arc<dyn Banner>`), the form the picker
/// consumes.
pub type BannerRef = Arc<dyn Banner>;

/// # A UI element competing to be shown.
///
/// Banners are handed to [`Picker::run`](crate::Picker::run) as an ordered
/// list; earlier entries are higher priority. The picker calls
/// [`can_show`](Banner::can_show) once per run, and [`show`](Banner::show)
/// at most once across the whole list — only on the winner.
///
/// # Contract
/// - `id` must be stable: it keys the dismissed-banner lookup and telemetry.
/// - `can_show` should settle promptly and honor `gate` — after the deadline
///   the verdict is discarded anyway.
/// - `show` is a fire-and-forget side effect (render, animate, ...); it must
///   tolerate being called at most once with no result inspected.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use bannervisor::{Banner, CheckError};
///
/// struct SubscribeBanner;
///
/// #[async_trait]
/// impl Banner for SubscribeBanner {
///     fn id(&self) -> &str { "subscribe" }
///
///     async fn can_show(&self, gate: CancellationToken) -> Result<bool, CheckError> {
///         if gate.is_cancelled() {
///             return Err(CheckError::Canceled);
///         }
///         // consult targeting rules...
///         Ok(true)
///     }
///
///     fn show(&self) {
///         // render the banner
///     }
/// }
/// ```
#[async_trait]
pub trait Banner: Send + Sync + 'static {
    /// Returns the stable, unique banner id.
    fn id(&self) -> &str;

    /// Decides whether this banner may be shown right now.
    ///
    /// `gate` is cancelled when the check's deadline fires; implementations
    /// doing slow work should check it and bail out with
    /// [`CheckError::Canceled`]. Errors are treated like a `false` verdict.
    async fn can_show(&self, gate: CancellationToken) -> Result<bool, CheckError>;

    /// Activates the banner. Called at most once per run, only on the winner.
    fn show(&self);
}
