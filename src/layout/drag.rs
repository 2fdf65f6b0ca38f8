//! Pointer-drag state machine for timeline bars.
//!
//! At most one bar is in a dragging state. Every pointer move produces a
//! complete candidate bar that the host applies through its update path;
//! the controller never touches the bar collection itself.

use uuid::Uuid;

use super::geometry::{self, TrackBounds};
use crate::model::{TimelineBar, TimelineConfig};

/// Part of the bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHandle {
    /// Far (left) edge, edits `start_days`.
    Start,
    /// Near (right) edge, edits `end_days`.
    End,
    /// Bar body, shifts both bounds.
    Body,
}

/// Range and pointer captured when the drag began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSnapshot {
    pub bar_id: Uuid,
    pub start_days: u32,
    pub end_days: u32,
    pub pointer_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingStart(DragSnapshot),
    DraggingEnd(DragSnapshot),
    DraggingMove(DragSnapshot),
}

impl DragState {
    fn snapshot(&self) -> Option<&DragSnapshot> {
        match self {
            DragState::Idle => None,
            DragState::DraggingStart(s) | DragState::DraggingEnd(s) | DragState::DraggingMove(s) => {
                Some(s)
            }
        }
    }
}

/// Owns the drag state for one timeline view.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Id of the bar being dragged, if any.
    pub fn active_bar(&self) -> Option<Uuid> {
        self.state.snapshot().map(|s| s.bar_id)
    }

    /// Begin a drag. Refused for locked or hidden bars, outside edit mode,
    /// and while another drag is in progress.
    pub fn pointer_down(
        &mut self,
        bar: &TimelineBar,
        handle: DragHandle,
        pointer_x: f32,
        edit_mode: bool,
    ) -> bool {
        if !edit_mode || !bar.editable || bar.hidden {
            return false;
        }
        if let Some(active) = self.active_bar() {
            log::debug!(
                "event=drag_start status=refused active={} requested={}",
                active,
                bar.id
            );
            return false;
        }
        let snapshot = DragSnapshot {
            bar_id: bar.id,
            start_days: bar.start_days,
            end_days: bar.end_days,
            pointer_x,
        };
        self.state = match handle {
            DragHandle::Start => DragState::DraggingStart(snapshot),
            DragHandle::End => DragState::DraggingEnd(snapshot),
            DragHandle::Body => DragState::DraggingMove(snapshot),
        };
        log::debug!("event=drag_start status=ok bar={} handle={:?}", bar.id, handle);
        true
    }

    /// Candidate bar for the current pointer position, or `None` when idle,
    /// when `bar` is not the dragged bar, or when nothing changed.
    pub fn pointer_move(
        &self,
        bar: &TimelineBar,
        pointer_x: f32,
        track: TrackBounds,
        config: &TimelineConfig,
    ) -> Option<TimelineBar> {
        let snap = self.state.snapshot()?;
        if snap.bar_id != bar.id {
            return None;
        }
        let mut origin = bar.clone();
        origin.start_days = snap.start_days;
        origin.end_days = snap.end_days;

        let (start, end) = match self.state {
            DragState::Idle => return None,
            DragState::DraggingStart(_) => {
                let days = geometry::days_at_pointer(pointer_x, track, config);
                (geometry::clamp_start(days, &origin, config), origin.end_days)
            }
            DragState::DraggingEnd(_) => {
                let days = geometry::days_at_pointer(pointer_x, track, config);
                (origin.start_days, geometry::clamp_end(days, &origin))
            }
            DragState::DraggingMove(_) => {
                // moving right means closer to separation: fewer days
                let delta = geometry::days_for_delta(snap.pointer_x - pointer_x, track, config);
                geometry::shift_range(&origin, delta, config)
            }
        };

        if start == bar.start_days && end == bar.end_days {
            return None;
        }
        let mut updated = bar.clone();
        updated.start_days = start;
        updated.end_days = end;
        Some(updated)
    }

    /// End the drag, wherever the pointer was released.
    pub fn pointer_up(&mut self) {
        if let Some(id) = self.active_bar() {
            log::debug!("event=drag_end bar={id}");
        }
        self.state = DragState::Idle;
    }

    /// Abandon the drag. Updates already applied stay applied.
    pub fn cancel(&mut self) {
        self.pointer_up();
    }
}
