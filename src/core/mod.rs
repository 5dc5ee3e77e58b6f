//! Resolution core: orchestration and lifecycle.
//!
//! This module contains the embedded implementation of the bannervisor
//! engine. The public API from this module is [`Picker`] (built via
//! [`PickerBuilder`]) plus the outcome model its reports are made of.
//!
//! Internal modules:
//! - [`checker`]: runs one eligibility check with deadline/cancellation and event publishing;
//! - [`picker`]: dispatches checks, folds reports, declares the winner;
//! - [`scoreboard`]: write-once outcome accounting for one run;
//! - [`resolver`]: the pure highest-priority-eligible winner rule;
//! - [`builder`]: wires the bus, telemetry workers, and the bus listener.

mod builder;
mod checker;
mod picker;
mod resolver;
mod scoreboard;

pub use builder::PickerBuilder;
pub use picker::{Picker, RunReport};
pub use scoreboard::{IneligibleReason, Outcome};
