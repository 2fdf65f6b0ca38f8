//! Timeline layout: bar geometry, lane rows, and drag gestures.

pub mod drag;
pub mod geometry;
pub mod rows;

pub use drag::{DragController, DragHandle, DragState};
pub use geometry::{compute_bar_layout, compute_layout, BarLayout, TrackBounds};
pub use rows::{assign_rows, overlaps, resolve_row, RowCache};
