//! Day-offset to track-position transforms and edit clamping.
//!
//! The track's right edge (at `total_track_width_percent`) is the
//! separation date; days grow leftward. Rendering never clamps, so bars
//! reaching past `total_days` hang off the left edge. Edits always clamp.

use crate::model::{TimelineBar, TimelineConfig};

/// Horizontal placement of a bar in percent of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub left_percent: f32,
    pub width_percent: f32,
}

impl BarLayout {
    pub fn right_percent(&self) -> f32 {
        self.left_percent + self.width_percent
    }
}

/// Pixel extent of the pre-separation track on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left_px: f32,
    pub width_px: f32,
}

impl TrackBounds {
    pub fn new(left_px: f32, width_px: f32) -> Self {
        Self { left_px, width_px }
    }

    pub fn right_px(&self) -> f32 {
        self.left_px + self.width_px
    }

    /// Pixel x for a percentage of the track width.
    pub fn percent_to_x(&self, percent: f32, config: &TimelineConfig) -> f32 {
        self.left_px + percent / config.total_track_width_percent * self.width_px
    }
}

fn total_days_f(config: &TimelineConfig) -> f32 {
    let total = config.total_days();
    assert!(total > 0, "timeline config must span at least one day");
    total as f32
}

/// Position and width of a day-range. The range is normalized first.
pub fn compute_layout(start_days: i64, end_days: i64, config: &TimelineConfig) -> BarLayout {
    let (start, end) = crate::model::bar::normalize_range(start_days, end_days);
    let total = total_days_f(config);
    let track = config.total_track_width_percent;
    let scale = config.scale_factor;

    let width_percent = ((start - end) as f32 / total) * track * scale;
    let left_percent = track - (start as f32 / total) * track * scale;
    BarLayout {
        left_percent,
        width_percent,
    }
}

pub fn compute_bar_layout(bar: &TimelineBar, config: &TimelineConfig) -> BarLayout {
    compute_layout(i64::from(bar.start_days), i64::from(bar.end_days), config)
}

/// Layout of calendar month `month` (months before separation).
pub fn month_column_layout(month: u32, config: &TimelineConfig) -> BarLayout {
    let dpm = i64::from(config.days_per_month);
    let month = i64::from(month);
    compute_layout((month + 1) * dpm, month * dpm, config)
}

/// Day offset under the pointer. Positions right of the track give
/// negative values; callers clamp.
pub fn days_at_pointer(pointer_x: f32, track: TrackBounds, config: &TimelineConfig) -> i64 {
    days_for_delta(track.right_px() - pointer_x, track, config)
}

/// Days spanned by `px` pixels measured leftward from the separation edge.
pub fn days_for_delta(px: f32, track: TrackBounds, config: &TimelineConfig) -> i64 {
    assert!(config.total_days() > 0, "timeline config must span at least one day");
    if track.width_px <= 0.0 {
        return 0;
    }
    let months_from_edge = (px / track.width_px) * config.total_months as f32 / config.scale_factor;
    (months_from_edge * config.days_per_month as f32).round() as i64
}

/// New `start_days` for a start-handle drag: within `[end_days, max]`.
pub fn clamp_start(candidate: i64, bar: &TimelineBar, config: &TimelineConfig) -> u32 {
    let max = i64::from(config.max_days()).max(i64::from(bar.end_days));
    candidate.clamp(i64::from(bar.end_days), max) as u32
}

/// New `end_days` for an end-handle drag: within `[0, start_days]`.
pub fn clamp_end(candidate: i64, bar: &TimelineBar) -> u32 {
    candidate.clamp(0, i64::from(bar.start_days)) as u32
}

/// Shift both bounds by `delta` days, keeping the length where the track
/// allows. Returns `(start_days, end_days)`.
pub fn shift_range(bar: &TimelineBar, delta: i64, config: &TimelineConfig) -> (u32, u32) {
    let start = i64::from(bar.start_days);
    let end = i64::from(bar.end_days);
    let max = i64::from(config.max_days());

    let lowest = -end;
    let highest = (max - start).max(lowest);
    let delta = delta.clamp(lowest, highest);

    let new_start = (start + delta).min(max);
    let new_end = (end + delta).max(0);
    crate::model::bar::normalize_range(new_start, new_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn config() -> TimelineConfig {
        TimelineConfig::default()
    }

    #[test]
    fn full_range_fills_track() {
        let layout = compute_layout(180, 0, &config());
        assert!((layout.left_percent - 0.0).abs() < EPS);
        assert!((layout.width_percent - 100.0).abs() < EPS);
    }

    #[test]
    fn half_range_sits_on_separation_edge() {
        let layout = compute_layout(90, 0, &config());
        assert!((layout.left_percent - 50.0).abs() < EPS);
        assert!((layout.right_percent() - 100.0).abs() < EPS);
    }

    #[test]
    fn bars_past_track_hang_off_left() {
        let layout = compute_layout(270, 180, &config());
        assert!(layout.left_percent < 0.0);
        assert!((layout.right_percent() - 0.0).abs() < EPS);
    }

    #[test]
    fn reversed_and_negative_ranges_are_normalized() {
        assert_eq!(compute_layout(0, 90, &config()), compute_layout(90, 0, &config()));
        assert_eq!(compute_layout(-10, -40, &config()), compute_layout(0, 0, &config()));
    }

    #[test]
    #[should_panic(expected = "at least one day")]
    fn zero_length_track_fails_fast() {
        let mut cfg = config();
        cfg.total_months = 0;
        compute_layout(10, 0, &cfg);
    }

    #[test]
    fn month_columns_tile_the_track() {
        let cfg = config();
        let first = month_column_layout(0, &cfg);
        let second = month_column_layout(1, &cfg);
        assert!((first.right_percent() - 100.0).abs() < EPS);
        assert!((second.right_percent() - first.left_percent).abs() < EPS);
    }

    #[test]
    fn pointer_mapping_counts_from_right_edge() {
        let track = TrackBounds::new(100.0, 600.0);
        let cfg = config();
        assert_eq!(days_at_pointer(700.0, track, &cfg), 0);
        assert_eq!(days_at_pointer(100.0, track, &cfg), 180);
        assert_eq!(days_at_pointer(400.0, track, &cfg), 90);
        assert_eq!(days_at_pointer(760.0, track, &cfg), -18);
    }

    #[test]
    fn pointer_mapping_inverts_layout_under_zoom() {
        let track = TrackBounds::new(0.0, 1000.0);
        let mut cfg = config();
        cfg.scale_factor = 2.0;
        let layout = compute_layout(60, 0, &cfg);
        let x = track.percent_to_x(layout.left_percent, &cfg);
        assert_eq!(days_at_pointer(x, track, &cfg), 60);
    }

    #[test]
    fn end_handle_clamps_to_start() {
        let bar = TimelineBar::new("leave", 60, 0);
        assert_eq!(clamp_end(200, &bar), 60);
        assert_eq!(clamp_end(-3, &bar), 0);
    }

    #[test]
    fn start_handle_clamps_to_end_and_max() {
        let bar = TimelineBar::new("window", 120, 40);
        assert_eq!(clamp_start(10, &bar, &config()), 40);
        assert_eq!(clamp_start(500, &bar, &config()), 180);
    }

    #[test]
    fn shift_preserves_length_inside_track() {
        let bar = TimelineBar::new("window", 100, 40);
        assert_eq!(shift_range(&bar, 30, &config()), (130, 70));
        assert_eq!(shift_range(&bar, 500, &config()), (180, 120));
        assert_eq!(shift_range(&bar, -500, &config()), (60, 0));
    }

    #[test]
    fn shift_of_oversized_bar_stays_in_bounds() {
        let bar = TimelineBar::new("long", 240, 10);
        let (start, end) = shift_range(&bar, 5, &config());
        assert!(start <= 180);
        assert!(start >= end);
    }

    proptest! {
        #[test]
        fn width_is_never_negative(start in 0i64..2000, end in 0i64..2000) {
            let layout = compute_layout(start.max(end), start.min(end), &config());
            prop_assert!(layout.width_percent >= 0.0);
            prop_assert!(layout.width_percent.is_finite() && layout.left_percent.is_finite());
        }

        #[test]
        fn right_edge_is_affine_in_end_days(
            start in 0i64..720,
            end in 0i64..720,
            scale in 0.25f32..4.0,
        ) {
            let (start, end) = (start.max(end), start.min(end));
            let mut cfg = config();
            cfg.scale_factor = scale;
            let layout = compute_layout(start, end, &cfg);
            let expected = cfg.total_track_width_percent
                - (end as f32 / cfg.total_days() as f32) * cfg.total_track_width_percent * scale;
            prop_assert!((layout.right_percent() - expected).abs() < 1e-2);
        }

        #[test]
        fn start_drag_never_crosses_end(start in 0i64..180, end in 0i64..180, candidate in -5000i64..5000) {
            let bar = TimelineBar::new("p", start, end);
            let new_start = clamp_start(candidate, &bar, &config());
            prop_assert!(new_start >= bar.end_days);
            prop_assert!(new_start <= 180);
        }

        #[test]
        fn shift_keeps_bounds_valid(start in 0i64..400, end in 0i64..400, delta in -1000i64..1000) {
            let bar = TimelineBar::new("p", start, end);
            let (s, e) = shift_range(&bar, delta, &config());
            prop_assert!(s >= e);
            prop_assert!(s <= 180);
        }
    }
}
