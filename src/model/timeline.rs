use serde::{Deserialize, Serialize};

/// Fixed scale of the timeline track.
///
/// The track spans `total_months` before the separation date and ends at
/// `total_track_width_percent`; `post_separation_width_percent` is extra
/// room drawn to the right of the separation marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub total_track_width_percent: f32,
    pub post_separation_width_percent: f32,
    pub days_per_month: u32,
    pub total_months: u32,
    pub scale_factor: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            total_track_width_percent: 100.0,
            post_separation_width_percent: 20.0,
            days_per_month: 30,
            total_months: 6,
            scale_factor: 1.0,
        }
    }
}

impl TimelineConfig {
    /// Number of days represented by the track, or `None` if the product
    /// does not fit a `u32`.
    pub fn checked_total_days(&self) -> Option<u32> {
        self.total_months.checked_mul(self.days_per_month)
    }

    /// Number of days represented by the track. Saturates on overflow.
    pub fn total_days(&self) -> u32 {
        self.total_months.saturating_mul(self.days_per_month)
    }

    /// Largest day offset an edit may produce.
    pub fn max_days(&self) -> u32 {
        self.total_days()
    }

    /// Width of the whole canvas (track plus post-separation area) in percent.
    pub fn canvas_width_percent(&self) -> f32 {
        self.total_track_width_percent + self.post_separation_width_percent
    }

    /// Scale up (wider bars). Mirrors the zoom steps of the chart view.
    pub fn zoom_in(&mut self) {
        self.scale_factor = (self.scale_factor * 1.2).min(4.0);
    }

    pub fn zoom_out(&mut self) {
        self.scale_factor = (self.scale_factor / 1.2).max(0.25);
    }

    pub fn reset_zoom(&mut self) {
        self.scale_factor = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_track_covers_six_months() {
        let config = TimelineConfig::default();
        assert_eq!(config.total_days(), 180);
        assert_eq!(config.max_days(), 180);
        assert_eq!(config.canvas_width_percent(), 120.0);
    }

    #[test]
    fn oversized_track_saturates() {
        let config = TimelineConfig {
            total_months: 100_000,
            days_per_month: 100_000,
            ..TimelineConfig::default()
        };
        assert_eq!(config.checked_total_days(), None);
        assert_eq!(config.total_days(), u32::MAX);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut config = TimelineConfig::default();
        for _ in 0..50 {
            config.zoom_in();
        }
        assert_eq!(config.scale_factor, 4.0);
        for _ in 0..100 {
            config.zoom_out();
        }
        assert_eq!(config.scale_factor, 0.25);
        config.reset_zoom();
        assert_eq!(config.scale_factor, 1.0);
    }
}
