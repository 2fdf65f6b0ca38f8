//! Vertical row assignment for bars sharing a lane.
//!
//! Two visible bars overlap when their day intervals intersect with
//! positive length; bars that only touch at a shared day do not. A
//! zero-length bar overlaps nothing but another zero-length bar on the
//! same day. The same rule drives assignment and rendering.

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::model::TimelineBar;

/// Strict interval intersection on `(start_days, end_days)` pairs.
pub fn intervals_overlap(a: (u32, u32), b: (u32, u32)) -> bool {
    let a_point = a.0 == a.1;
    let b_point = b.0 == b.1;
    if a_point || b_point {
        return a_point && b_point && a == b;
    }
    a.0 > b.1 && a.1 < b.0
}

pub fn overlaps(a: &TimelineBar, b: &TimelineBar) -> bool {
    intervals_overlap((a.start_days, a.end_days), (b.start_days, b.end_days))
}

fn first_free(used: &BTreeSet<u32>) -> u32 {
    let mut row = 0;
    while used.contains(&row) {
        row += 1;
    }
    row
}

/// Assign rows to every visible bar, keeping valid preset rows.
///
/// Preset rows are honored in input order; a bar whose preset row is
/// already taken by an overlapping bar, or which has none, gets the
/// smallest row free of its overlapping neighbours. Hidden bars are
/// left untouched.
pub fn assign_rows(bars: &mut [TimelineBar]) {
    assign(bars, None);
}

/// Like [`assign_rows`], but the edited bar gives way to every other bar,
/// so a drag never bumps an uninvolved bar out of its row.
pub fn assign_rows_after_edit(bars: &mut [TimelineBar], edited: Uuid) {
    assign(bars, Some(edited));
}

fn assign(bars: &mut [TimelineBar], deferred: Option<Uuid>) {
    let visible: Vec<usize> = (0..bars.len()).filter(|&i| !bars[i].hidden).collect();
    let is_deferred = |bar: &TimelineBar| Some(bar.id) == deferred;

    let mut order: Vec<usize> = visible.iter().copied().filter(|&i| !is_deferred(&bars[i])).collect();
    order.extend(visible.iter().copied().filter(|&i| is_deferred(&bars[i])));

    let mut resolved: Vec<Option<u32>> = vec![None; bars.len()];

    for &i in &order {
        if let Some(row) = bars[i].row {
            let taken = order
                .iter()
                .any(|&j| resolved[j] == Some(row) && overlaps(&bars[i], &bars[j]));
            if !taken {
                resolved[i] = Some(row);
            }
        }
    }

    for &i in &order {
        if resolved[i].is_some() {
            continue;
        }
        let used: BTreeSet<u32> = order
            .iter()
            .filter(|&&j| j != i && overlaps(&bars[i], &bars[j]))
            .filter_map(|&j| resolved[j])
            .collect();
        resolved[i] = Some(first_free(&used));
    }

    for i in visible {
        bars[i].row = resolved[i];
    }
}

/// First-fit row for `bar` against the rows already held in `lane`.
pub fn resolve_row(bar: &TimelineBar, lane: &[TimelineBar]) -> u32 {
    let used: BTreeSet<u32> = lane
        .iter()
        .filter(|other| other.id != bar.id && !other.hidden && overlaps(bar, other))
        .filter_map(|other| other.row)
        .collect();
    first_free(&used)
}

/// Rows needed to draw the visible bars.
pub fn row_count<'a>(bars: impl IntoIterator<Item = &'a TimelineBar>) -> u32 {
    bars.into_iter()
        .filter(|b| !b.hidden)
        .filter_map(|b| b.row)
        .max()
        .map_or(0, |max| max + 1)
}

type IntervalKey = (Uuid, u32, u32, bool);

fn signature(bars: &[TimelineBar]) -> Vec<IntervalKey> {
    bars.iter()
        .map(|b| (b.id, b.start_days, b.end_days, b.hidden))
        .collect()
}

/// Skips row assignment for lanes whose interval boundaries are unchanged.
#[derive(Debug, Clone, Default)]
pub struct RowCache {
    lanes: HashMap<String, Vec<IntervalKey>>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute rows for one lane if its boundaries changed.
    /// Returns true when the assignment actually ran.
    pub fn relayout_lane(
        &mut self,
        lane: &str,
        bars: &mut [TimelineBar],
        edited: Option<Uuid>,
    ) -> bool {
        let sig = signature(bars);
        let rows_present = bars.iter().all(|b| b.hidden || b.row.is_some());
        if rows_present && self.lanes.get(lane) == Some(&sig) {
            return false;
        }
        match edited {
            Some(id) => assign_rows_after_edit(bars, id),
            None => assign_rows(bars),
        }
        self.lanes.insert(lane.to_string(), sig);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bar(name: &str, start: i64, end: i64) -> TimelineBar {
        TimelineBar::new(name, start, end)
    }

    fn rows(bars: &[TimelineBar]) -> Vec<Option<u32>> {
        bars.iter().map(|b| b.row).collect()
    }

    #[test]
    fn touching_bars_share_a_row() {
        let mut bars = vec![bar("a", 180, 90), bar("b", 90, 0)];
        assign_rows(&mut bars);
        assert_eq!(rows(&bars), vec![Some(0), Some(0)]);
    }

    #[test]
    fn nested_bars_get_different_rows() {
        let mut bars = vec![bar("a", 180, 0), bar("b", 120, 60)];
        assign_rows(&mut bars);
        assert_eq!(rows(&bars), vec![Some(0), Some(1)]);
    }

    #[test]
    fn first_fit_reuses_lowest_free_row() {
        let mut bars = vec![
            bar("a", 180, 100),
            bar("b", 150, 50),
            bar("c", 90, 0),
        ];
        assign_rows(&mut bars);
        assert_eq!(rows(&bars), vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn zero_length_bars_only_collide_with_identical_points() {
        assert!(!intervals_overlap((90, 90), (180, 0)));
        assert!(intervals_overlap((90, 90), (90, 90)));
        assert!(!intervals_overlap((90, 90), (60, 60)));
    }

    #[test]
    fn hidden_bars_are_ignored() {
        let mut hidden = bar("h", 180, 0);
        hidden.hidden = true;
        let mut bars = vec![hidden, bar("v", 100, 20)];
        assign_rows(&mut bars);
        assert_eq!(rows(&bars), vec![None, Some(0)]);
    }

    #[test]
    fn valid_preset_rows_are_kept() {
        let mut a = bar("a", 180, 100);
        a.row = Some(3);
        let mut bars = vec![a, bar("b", 150, 50)];
        assign_rows(&mut bars);
        assert_eq!(rows(&bars), vec![Some(3), Some(0)]);
    }

    #[test]
    fn conflicting_preset_rows_are_repaired() {
        let mut a = bar("a", 180, 0);
        a.row = Some(0);
        let mut b = bar("b", 120, 60);
        b.row = Some(0);
        let mut bars = vec![a, b];
        assign_rows(&mut bars);
        assert_eq!(rows(&bars), vec![Some(0), Some(1)]);
    }

    #[test]
    fn edited_bar_yields_to_uninvolved_bars() {
        let mut dragged = bar("dragged", 60, 0);
        dragged.row = Some(0);
        let mut still = bar("still", 180, 100);
        still.row = Some(0);
        let mut bars = vec![dragged, still];
        // the drag pushes the first bar into the second one's interval
        bars[0].set_range(150, 0);
        let dragged_id = bars[0].id;
        assign_rows_after_edit(&mut bars, dragged_id);
        assert_eq!(bars[1].row, Some(0));
        assert_eq!(bars[0].row, Some(1));
    }

    #[test]
    fn resolve_row_skips_overlapping_rows() {
        let mut lane = vec![bar("a", 180, 0), bar("b", 100, 50)];
        assign_rows(&mut lane);
        let probe = bar("c", 80, 60);
        assert_eq!(resolve_row(&probe, &lane), 2);
        let clear = bar("d", 40, 0);
        assert_eq!(resolve_row(&clear, &lane), 1);
        assert_eq!(row_count(&lane), 2);
    }

    #[test]
    fn cache_skips_unchanged_lane() {
        let mut cache = RowCache::new();
        let mut bars = vec![bar("a", 180, 0), bar("b", 120, 60)];
        assert!(cache.relayout_lane("l", &mut bars, None));
        assert!(!cache.relayout_lane("l", &mut bars, None));
        bars[1].name = "renamed".into();
        assert!(!cache.relayout_lane("l", &mut bars, None));
        bars[1].set_range(60, 0);
        assert!(cache.relayout_lane("l", &mut bars, None));
        bars[0].row = None;
        assert!(cache.relayout_lane("l", &mut bars, None));
    }

    fn arb_bars() -> impl Strategy<Value = Vec<TimelineBar>> {
        prop::collection::vec((0i64..200, 0i64..200, any::<bool>()), 0..24).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (s, e, hidden))| {
                    let mut b = TimelineBar::new(format!("bar{i}"), s, e);
                    b.hidden = hidden && i % 3 == 0;
                    b
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in (0u32..200, 0u32..200), b in (0u32..200, 0u32..200)) {
            let a = (a.0.max(a.1), a.0.min(a.1));
            let b = (b.0.max(b.1), b.0.min(b.1));
            prop_assert_eq!(intervals_overlap(a, b), intervals_overlap(b, a));
        }

        #[test]
        fn overlapping_bars_never_share_rows(mut bars in arb_bars()) {
            assign_rows(&mut bars);
            for (i, a) in bars.iter().enumerate() {
                if a.hidden { continue; }
                prop_assert!(a.row.is_some());
                for b in bars.iter().skip(i + 1) {
                    if !b.hidden && overlaps(a, b) {
                        prop_assert_ne!(a.row, b.row);
                    }
                }
            }
        }

        #[test]
        fn assignment_is_idempotent(mut bars in arb_bars()) {
            assign_rows(&mut bars);
            let first = rows(&bars);
            assign_rows(&mut bars);
            prop_assert_eq!(first, rows(&bars));
        }

        #[test]
        fn assignment_is_deterministic(bars in arb_bars()) {
            let mut a = bars.clone();
            let mut b = bars;
            assign_rows(&mut a);
            assign_rows(&mut b);
            prop_assert_eq!(rows(&a), rows(&b));
        }
    }
}
