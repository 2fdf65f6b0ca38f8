use std::path::Path;

use crate::error::{Result, TimelineError};
use crate::model::TimelinePlan;

/// Save a plan to a JSON file.
pub fn save_plan(plan: &TimelinePlan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json).map_err(|e| TimelineError::io(path, e))?;
    log::info!("event=plan_save status=ok bars={}", plan.bars.len());
    Ok(())
}

/// Load a plan from a JSON file. Bar ranges are repaired and rows
/// recomputed, since the file may have been edited by hand.
pub fn load_plan(path: &Path) -> Result<TimelinePlan> {
    let json = std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;
    let mut plan: TimelinePlan = serde_json::from_str(&json)?;
    for bar in &mut plan.bars {
        bar.normalize();
    }
    plan.relayout(None);
    log::info!(
        "event=plan_load status=ok bars={} tasks={}",
        plan.bars.len(),
        plan.tasks.len()
    );
    Ok(plan)
}
