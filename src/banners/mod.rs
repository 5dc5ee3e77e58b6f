//! # Banner abstractions.
//!
//! This module provides the core banner-related types:
//! - [`Banner`] - trait for a UI element competing to be shown
//! - [`BannerFn`] - closure-based banner implementation
//! - [`BannerRef`] - shared reference to a banner (`Arc<dyn Banner>`)

mod banner;
mod banner_fn;

pub use banner::{Banner, BannerRef};
pub use banner_fn::BannerFn;
