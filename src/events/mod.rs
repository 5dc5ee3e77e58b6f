//! Run events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the picker loop, check tasks and
//! telemetry workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//! - [`PICKER_COMPONENT`], [`PICKER_TIMEOUT_COMPONENT`] the component tags of
//!   the two wire records a run emits
//!
//! ## Quick reference
//! - **Publishers**: `Picker::run`, `checker::check_once`, `TelemetrySet`
//!   workers (overflow/panic).
//! - **Consumers**: the telemetry listener spawned by `PickerBuilder::build`
//!   (fans out to `TelemetrySet`), plus any receiver from `Picker::events`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, PICKER_COMPONENT, PICKER_TIMEOUT_COMPONENT};
