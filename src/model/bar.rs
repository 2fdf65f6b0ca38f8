use chrono::{Days, NaiveDate};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lane used when a bar does not name one.
pub const DEFAULT_LANE: &str = "milestones";

/// A labeled day-range counted backward from the separation date.
///
/// `start_days` is the far edge (earlier date), `end_days` the near edge;
/// `start_days >= end_days` always holds once a bar has been built through
/// [`TimelineBar::new`] or [`TimelineBar::set_range`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBar {
    pub id: Uuid,
    pub name: String,
    pub start_days: u32,
    pub end_days: u32,
    /// Display color for the bar (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
    /// Locked bars render but cannot be dragged or deleted.
    pub editable: bool,
    /// Row within the lane, cached by the row assignment pass.
    #[serde(default)]
    pub row: Option<u32>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_lane")]
    pub lane: String,
}

fn default_lane() -> String {
    DEFAULT_LANE.to_string()
}

impl TimelineBar {
    /// Create an editable bar in the default lane. The range is normalized.
    pub fn new(name: impl Into<String>, start_days: i64, end_days: i64) -> Self {
        let (start_days, end_days) = normalize_range(start_days, end_days);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_days,
            end_days,
            color: Color32::from_rgb(70, 130, 180), // Steel blue
            editable: true,
            row: None,
            hidden: false,
            lane: default_lane(),
        }
    }

    /// Create a bar the user cannot drag or delete.
    pub fn locked(name: impl Into<String>, start_days: i64, end_days: i64) -> Self {
        Self {
            editable: false,
            ..Self::new(name, start_days, end_days)
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_lane(mut self, lane: impl Into<String>) -> Self {
        self.lane = lane.into();
        self
    }

    /// Replace both bounds, normalizing the pair.
    pub fn set_range(&mut self, start_days: i64, end_days: i64) {
        let (start, end) = normalize_range(start_days, end_days);
        self.start_days = start;
        self.end_days = end;
    }

    /// Repair a bar whose bounds were set directly (e.g. by deserialization).
    pub fn normalize(&mut self) {
        if self.start_days < self.end_days {
            std::mem::swap(&mut self.start_days, &mut self.end_days);
        }
    }

    pub fn duration_days(&self) -> u32 {
        self.start_days.saturating_sub(self.end_days)
    }

    pub fn is_zero_length(&self) -> bool {
        self.start_days == self.end_days
    }

    /// Calendar dates covered by the bar for the given separation date.
    /// Offsets beyond the calendar saturate at `NaiveDate::MIN`.
    pub fn date_range(&self, separation: NaiveDate) -> (NaiveDate, NaiveDate) {
        let back = |days: u32| {
            separation
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN)
        };
        (back(self.start_days), back(self.end_days))
    }
}

/// Normalize a raw day-range: negatives clamp to 0, reversed bounds swap.
pub fn normalize_range(start_days: i64, end_days: i64) -> (u32, u32) {
    let clamp = |d: i64| d.clamp(0, i64::from(u32::MAX)) as u32;
    let (a, b) = (clamp(start_days), clamp(end_days));
    if a >= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Seed set of bars created when a new plan is mounted.
pub fn default_bars() -> Vec<TimelineBar> {
    vec![
        TimelineBar::locked("Transition Assistance Program", 180, 150)
            .with_color(Color32::from_rgb(96, 125, 139)),
        TimelineBar::new("SkillBridge", 180, 0).with_color(Color32::from_rgb(52, 168, 83)),
        TimelineBar::locked("BDD Filing Window", 180, 90)
            .with_color(Color32::from_rgb(171, 71, 188)),
        TimelineBar::new("Job Search", 120, 0).with_color(Color32::from_rgb(66, 133, 244)),
        TimelineBar::new("Terminal Leave", 60, 0).with_color(Color32::from_rgb(251, 140, 0)),
    ]
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_swaps_reversed_bounds() {
        let bar = TimelineBar::new("x", 10, 40);
        assert_eq!((bar.start_days, bar.end_days), (40, 10));
    }

    #[test]
    fn negative_days_clamp_to_zero() {
        assert_eq!(normalize_range(-5, -20), (0, 0));
        assert_eq!(normalize_range(30, -20), (30, 0));
    }

    #[test]
    fn duration_and_zero_length() {
        let bar = TimelineBar::new("window", 150, 90);
        assert_eq!(bar.duration_days(), 60);
        assert!(!bar.is_zero_length());
        let point = TimelineBar::new("out-processing", 45, 45);
        assert_eq!(point.duration_days(), 0);
        assert!(point.is_zero_length());
    }

    #[test]
    fn date_range_saturates_past_calendar() {
        let separation = NaiveDate::from_ymd_opt(2027, 6, 30).unwrap();
        let bar = TimelineBar::new("far", i64::from(u32::MAX), 0);
        assert_eq!(bar.date_range(separation), (NaiveDate::MIN, separation));
    }

    #[test]
    fn date_range_counts_back_from_separation() {
        let separation = NaiveDate::from_ymd_opt(2027, 6, 30).unwrap();
        let bar = TimelineBar::new("Terminal Leave", 60, 0);
        let (from, to) = bar.date_range(separation);
        assert_eq!(from, NaiveDate::from_ymd_opt(2027, 5, 1).unwrap());
        assert_eq!(to, separation);
    }

    #[test]
    fn seed_bars_are_valid() {
        for bar in default_bars() {
            assert!(bar.start_days >= bar.end_days, "{}", bar.name);
            assert!(bar.start_days <= 180, "{}", bar.name);
        }
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let json = r#"{"id":"6f1c8f7e-2a55-4d2b-9c3c-1f2b3a4c5d6e","name":"Leave",
            "start_days":30,"end_days":0,"color":[1,2,3,255],"editable":true}"#;
        let bar: TimelineBar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.row, None);
        assert!(!bar.hidden);
        assert_eq!(bar.lane, DEFAULT_LANE);
    }
}
