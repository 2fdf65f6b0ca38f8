//! Separation-date relative transition timeline.
//!
//! The `layout` module holds the pure engines (bar geometry, row
//! assignment, drag gestures); `model` the plan data; `io` persistence and
//! import/export; `ui` and `app` the egui desktop shell around them.

pub mod app;
pub mod error;
pub mod io;
pub mod layout;
pub mod logging;
pub mod model;
pub mod settings;
pub mod ui;

pub use error::{Result, TimelineError};
