//! # Closure-backed banner (`BannerFn`)
//!
//! [`BannerFn`] wraps a check closure `C: Fn(CancellationToken) -> Fut` and a
//! show closure, producing a fresh check future per run. No shared mutable
//! state is required; if the closures need common state, capture an
//! `Arc<...>` explicitly.
//!
//! ## Example
//! ```
//! use tokio_util::sync::CancellationToken;
//! use bannervisor::{BannerFn, BannerRef, CheckError};
//!
//! let b: BannerRef = BannerFn::arc(
//!     "welcome",
//!     |_gate: CancellationToken| async { Ok::<_, CheckError>(true) },
//!     || println!("welcome shown"),
//! );
//!
//! assert_eq!(b.id(), "welcome");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::banners::banner::Banner;
use crate::error::CheckError;

/// Closure-backed banner implementation.
///
/// The check closure *creates* a new future per invocation; the show closure
/// performs the activation side effect.
pub struct BannerFn<C, S> {
    id: Cow<'static, str>,
    check: C,
    show: S,
}

impl<C, S> BannerFn<C, S> {
    /// Creates a new closure-backed banner.
    ///
    /// Prefer [`BannerFn::arc`] when you immediately need a [`BannerRef`].
    ///
    /// [`BannerRef`]: crate::BannerRef
    pub fn new(id: impl Into<Cow<'static, str>>, check: C, show: S) -> Self {
        Self {
            id: id.into(),
            check,
            show,
        }
    }

    /// Creates the banner and returns it as a shared handle.
    pub fn arc(id: impl Into<Cow<'static, str>>, check: C, show: S) -> Arc<Self> {
        Arc::new(Self::new(id, check, show))
    }
}

#[async_trait]
impl<C, Fut, S> Banner for BannerFn<C, S>
where
    C: Fn(CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<bool, CheckError>> + Send + 'static,
    S: Fn() + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn can_show(&self, gate: CancellationToken) -> Result<bool, CheckError> {
        (self.check)(gate).await
    }

    fn show(&self) {
        (self.show)()
    }
}
