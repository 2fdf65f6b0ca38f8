//! Pointer gestures driven through the plan the way the chart drives them.

use veteran_timeline::layout::{compute_bar_layout, DragController, DragHandle, TrackBounds};
use veteran_timeline::model::{TimelineBar, TimelineConfig, TimelinePlan};

const TRACK: TrackBounds = TrackBounds {
    left_px: 0.0,
    width_px: 600.0,
};

fn x_for(days: f32) -> f32 {
    600.0 - days / 180.0 * 600.0
}

fn plan_with(bars: Vec<TimelineBar>) -> TimelinePlan {
    let mut plan = TimelinePlan::default();
    plan.bars = bars;
    plan.relayout(None);
    plan
}

/// Feed a sequence of pointer positions for one drag, applying every update.
fn drag(plan: &mut TimelinePlan, id: uuid::Uuid, handle: DragHandle, from: f32, path: &[f32]) {
    let config = TimelineConfig::default();
    let mut controller = DragController::new();
    let bar = plan.bar(id).unwrap().clone();
    assert!(controller.pointer_down(&bar, handle, from, true));
    for &x in path {
        let current = plan.bar(id).unwrap().clone();
        if let Some(updated) = controller.pointer_move(&current, x, TRACK, &config) {
            assert!(plan.update_bar(updated));
        }
    }
    controller.pointer_up();
    assert!(!controller.is_dragging());
}

#[test]
fn end_handle_dragged_past_start_collapses_bar() {
    let bar = TimelineBar::new("Terminal Leave", 60, 0);
    let id = bar.id;
    let mut plan = plan_with(vec![bar]);

    drag(&mut plan, id, DragHandle::End, x_for(0.0), &[x_for(30.0), x_for(200.0)]);

    let bar = plan.bar(id).unwrap();
    assert_eq!((bar.start_days, bar.end_days), (60, 60));
    let layout = compute_bar_layout(bar, &TimelineConfig::default());
    assert_eq!(layout.width_percent, 0.0);
}

#[test]
fn dragged_bar_yields_row_to_neighbours() {
    let a = TimelineBar::new("SkillBridge", 180, 120);
    let b = TimelineBar::new("Job Search", 100, 40);
    let c = TimelineBar::new("Terminal Leave", 30, 0);
    let (a_id, b_id, c_id) = (a.id, b.id, c.id);
    let mut plan = plan_with(vec![a, b, c]);
    for bar in &plan.bars {
        assert_eq!(bar.row, Some(0), "{} starts on the first row", bar.name);
    }

    // Stretch Job Search's end toward separation until it overlaps Terminal Leave.
    drag(&mut plan, b_id, DragHandle::End, x_for(40.0), &[x_for(20.0), x_for(10.0)]);

    assert_eq!(plan.bar(a_id).unwrap().row, Some(0));
    assert_eq!(plan.bar(c_id).unwrap().row, Some(0));
    assert_eq!(plan.bar(b_id).unwrap().row, Some(1));
    assert_eq!((plan.bar(b_id).unwrap().start_days, plan.bar(b_id).unwrap().end_days), (100, 10));
}

#[test]
fn body_drag_keeps_length_until_track_edge() {
    let bar = TimelineBar::new("SkillBridge", 150, 90);
    let id = bar.id;
    let mut plan = plan_with(vec![bar]);

    // 100 px left = 30 days further out, then far past the left edge.
    drag(&mut plan, id, DragHandle::Body, 300.0, &[200.0, -1000.0]);

    let bar = plan.bar(id).unwrap();
    assert_eq!((bar.start_days, bar.end_days), (180, 120));
}

#[test]
fn locked_bars_never_move() {
    let bar = TimelineBar::locked("BDD Filing Window", 180, 90);
    let mut controller = DragController::new();
    assert!(!controller.pointer_down(&bar, DragHandle::Start, x_for(180.0), true));
    assert!(controller
        .pointer_move(&bar, x_for(100.0), TRACK, &TimelineConfig::default())
        .is_none());
}

#[test]
fn zoomed_track_maps_pointer_back_to_same_days() {
    let mut config = TimelineConfig::default();
    config.scale_factor = 2.0;
    let bar = TimelineBar::new("Job Search", 60, 0);
    let mut controller = DragController::new();
    controller.pointer_down(&bar, DragHandle::Start, 0.0, true);

    // At 2x, 60 days sit 400 px from the right edge of a 600 px track.
    let updated = controller.pointer_move(&bar, 200.0, TRACK, &config);
    assert!(updated.is_none(), "pointer over the current start changes nothing");
    let updated = controller.pointer_move(&bar, 300.0, TRACK, &config).unwrap();
    assert_eq!(updated.start_days, 45);
}
