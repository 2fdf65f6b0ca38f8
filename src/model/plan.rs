use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bar::{default_bars, TimelineBar};
use super::profile::Profile;
use super::task::{default_catalog, Task};
use crate::layout::rows::{self, RowCache};

/// A member's transition plan: profile, milestone bars, and task catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePlan {
    pub name: String,
    pub profile: Profile,
    pub bars: Vec<TimelineBar>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(skip)]
    row_cache: RowCache,
}

impl Default for TimelinePlan {
    fn default() -> Self {
        let mut plan = Self {
            name: "My Transition".to_string(),
            profile: Profile::default(),
            bars: default_bars(),
            tasks: default_catalog(),
            created: Utc::now(),
            modified: Utc::now(),
            row_cache: RowCache::new(),
        };
        plan.relayout(None);
        plan
    }
}

impl TimelinePlan {
    pub fn new(name: impl Into<String>, profile: Profile) -> Self {
        Self {
            name: name.into(),
            profile,
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn bar(&self, id: Uuid) -> Option<&TimelineBar> {
        self.bars.iter().find(|b| b.id == id)
    }

    /// Lane names in first-appearance order.
    pub fn lanes(&self) -> Vec<String> {
        let mut lanes: Vec<String> = Vec::new();
        for bar in &self.bars {
            if !lanes.contains(&bar.lane) {
                lanes.push(bar.lane.clone());
            }
        }
        lanes
    }

    pub fn add_bar(&mut self, mut bar: TimelineBar) {
        bar.normalize();
        bar.row = None;
        let id = bar.id;
        self.bars.push(bar);
        self.relayout(Some(id));
        self.touch();
    }

    /// Replace the stored bar with the same id. Returns false if it is unknown.
    pub fn update_bar(&mut self, mut bar: TimelineBar) -> bool {
        let Some(slot) = self.bars.iter_mut().find(|b| b.id == bar.id) else {
            log::warn!("event=bar_update status=unknown_id id={}", bar.id);
            return false;
        };
        bar.normalize();
        let id = bar.id;
        *slot = bar;
        self.relayout(Some(id));
        self.touch();
        true
    }

    /// Remove an editable bar. Locked or unknown bars are left alone.
    pub fn delete_bar(&mut self, id: Uuid) -> bool {
        match self.bar(id) {
            Some(bar) if bar.editable => {}
            Some(_) => {
                log::info!("event=bar_delete status=refused_locked id={id}");
                return false;
            }
            None => return false,
        }
        self.bars.retain(|b| b.id != id);
        self.relayout(None);
        self.touch();
        true
    }

    /// Recompute rows for lanes whose boundaries changed. `edited` gives
    /// way to every other bar in its lane.
    pub fn relayout(&mut self, edited: Option<Uuid>) {
        for lane in self.lanes() {
            let mut members: Vec<TimelineBar> =
                self.bars.iter().filter(|b| b.lane == lane).cloned().collect();
            let edited = edited.filter(|id| members.iter().any(|b| b.id == *id));
            if !self.row_cache.relayout_lane(&lane, &mut members, edited) {
                continue;
            }
            log::debug!("event=relayout lane={} bars={}", lane, members.len());
            for resolved in members {
                if let Some(slot) = self.bars.iter_mut().find(|b| b.id == resolved.id) {
                    slot.row = resolved.row;
                }
            }
        }
    }

    /// Number of rows each lane needs, in lane order.
    pub fn lane_row_counts(&self) -> Vec<(String, u32)> {
        self.lanes()
            .into_iter()
            .map(|lane| {
                let count = rows::row_count(self.bars.iter().filter(|b| b.lane == lane));
                (lane, count)
            })
            .collect()
    }
}
