use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::TimelineBar;

/// Export bars to a semicolon-delimited CSV file.
///
/// Columns: Name ; Start Days ; End Days ; Start Date ; End Date
/// Dates are formatted as YYYY-MM-DD relative to `separation`.
/// Hidden bars are skipped. Returns the number of bars written.
pub fn export_bars(bars: &[TimelineBar], separation: NaiveDate, path: &Path) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(["Name", "Start Days", "End Days", "Start Date", "End Date"])?;

    let mut written = 0;
    for bar in bars.iter().filter(|b| !b.hidden) {
        let (from, to) = bar.date_range(separation);
        let fields: [String; 5] = [
            bar.name.clone(),
            bar.start_days.to_string(),
            bar.end_days.to_string(),
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string(),
        ];
        wtr.write_record(&fields)?;
        written += 1;
    }

    wtr.flush().map_err(|e| crate::error::TimelineError::io(path, e))?;
    Ok(written)
}
