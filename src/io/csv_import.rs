use std::path::Path;

use crate::error::{Result, TimelineError};
use crate::model::{Branch, CareerTrack, Task};

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Month,
    Track,
    Branch,
    Location,
    Description,
    Link,
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "title" | "task" | "name" | "taskname" | "label" => Some(Column::Title),
        "month" | "monthsbefore" | "monthsout" | "monthsbeforeseparation" => Some(Column::Month),
        "track" | "careertrack" | "goal" | "path" => Some(Column::Track),
        "branch" | "service" => Some(Column::Branch),
        "location" | "state" | "installation" => Some(Column::Location),
        "description" | "notes" | "details" => Some(Column::Description),
        "link" | "url" | "resource" => Some(Column::Link),
        _ => None,
    }
}

/// Parse a month cell: "6", "6 months", "M-6" all mean six months out.
/// Fractions, signs and other trailing text are rejected.
fn parse_month(s: &str) -> Option<u32> {
    let s = s.trim();
    let s = s
        .strip_prefix("M-")
        .or_else(|| s.strip_prefix("m-"))
        .unwrap_or(s);
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    match unit.trim().to_ascii_lowercase().as_str() {
        "" | "mo" | "month" | "months" => number.parse().ok(),
        _ => None,
    }
}

/// Import a task catalog from a CSV file.
///
/// Returns `(tasks, skipped_count)` on success.
pub fn import_tasks(path: &Path) -> Result<(Vec<Task>, usize)> {
    let content = std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;
    let result = parse_tasks(&content)?;
    log::info!(
        "event=catalog_import status=ok tasks={} skipped={}",
        result.0.len(),
        result.1
    );
    Ok(result)
}

/// Parse CSV text into tasks. Delimiter and headers are matched loosely;
/// rows without a title or month are skipped and counted. An empty or
/// "any"/"all" cell leaves the restriction off.
pub fn parse_tasks(content: &str) -> Result<(Vec<Task>, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |col: Column| col_map.iter().any(|c| *c == Some(col));
    if !has(Column::Title) || !has(Column::Month) {
        return Err(TimelineError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut tasks = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("event=catalog_import row={} status=skipped error={}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut title = None;
        let mut month = None;
        let mut unknown = None;
        let mut task = Task::new(String::new(), 0);

        for (field, column) in record.iter().zip(col_map.iter()) {
            let Some(column) = column else { continue };
            let value = field.trim();
            let unrestricted =
                value.is_empty() || value.eq_ignore_ascii_case("any") || value.eq_ignore_ascii_case("all");
            match column {
                Column::Title => title = Some(value.to_string()).filter(|t| !t.is_empty()),
                Column::Month => month = parse_month(value),
                Column::Track if !unrestricted => match CareerTrack::parse(value) {
                    Some(track) => task.track = Some(track),
                    None => unknown = Some(("track", value.to_string())),
                },
                Column::Branch if !unrestricted => match Branch::parse(value) {
                    Some(branch) => task.branch = Some(branch),
                    None => unknown = Some(("branch", value.to_string())),
                },
                Column::Location if !unrestricted => task.location = Some(value.to_string()),
                Column::Description => task.description = value.to_string(),
                Column::Link if !value.is_empty() => task.link = Some(value.to_string()),
                _ => {}
            }
        }

        // An unreadable restriction must not widen the task to every profile.
        if let Some((column, value)) = unknown {
            log::warn!(
                "event=catalog_import row={} status=skipped reason=unknown_{} value={:?}",
                i + 2,
                column,
                value
            );
            skipped += 1;
            continue;
        }

        match (title, month) {
            (Some(title), Some(month)) => {
                task.title = title;
                task.month = month;
                tasks.push(task);
            }
            _ => {
                log::warn!("event=catalog_import row={} status=skipped reason=missing_title_or_month", i + 2);
                skipped += 1;
            }
        }
    }

    if tasks.is_empty() {
        return Err(TimelineError::EmptyCatalog { skipped });
    }
    Ok((tasks, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_catalog_with_loose_headers() {
        let csv = "Task Name;Months Before;Career-Track;Branch;Link\n\
                   Apply to SkillBridge;6;employment;any;https://skillbridge.osd.mil\n\
                   File BDD claim;5 months;;;\n\
                   Navy transition brief;M-4;all;Navy;\n";
        let (tasks, skipped) = parse_tasks(csv).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].track, Some(CareerTrack::Employment));
        assert_eq!(tasks[0].branch, None);
        assert_eq!(tasks[0].link.as_deref(), Some("https://skillbridge.osd.mil"));
        assert_eq!(tasks[1].month, 5);
        assert_eq!(tasks[1].link, None);
        assert_eq!(tasks[2].branch, Some(Branch::Navy));
        assert_eq!(tasks[2].month, 4);
    }

    #[test]
    fn rows_without_month_are_skipped() {
        let csv = "title,month\nKeep,2\nDrop,soon\n,3\n";
        let (tasks, skipped) = parse_tasks(csv).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn unknown_branch_or_track_skips_the_row() {
        let csv = "title,month,branch,track\n\
                   Army brief,3,Army,\n\
                   Typo branch,3,Air Farce,\n\
                   Typo track,2,,Nursing\n";
        let (tasks, skipped) = parse_tasks(csv).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Army brief");
        assert_eq!(tasks[0].branch, Some(Branch::Army));
    }

    #[test]
    fn month_cells_must_be_whole_numbers() {
        assert_eq!(parse_month("6"), Some(6));
        assert_eq!(parse_month(" 5 months "), Some(5));
        assert_eq!(parse_month("M-4"), Some(4));
        assert_eq!(parse_month("1 mo"), Some(1));
        assert_eq!(parse_month("6.5"), None);
        assert_eq!(parse_month("-1"), None);
        assert_eq!(parse_month("soon"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = parse_tasks("title,when\nA,2\n").unwrap_err();
        assert!(matches!(err, TimelineError::MissingColumns { .. }));
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let err = parse_tasks("title\tmonth\nA\tx\n").unwrap_err();
        assert!(matches!(err, TimelineError::EmptyCatalog { skipped: 1 }));
    }

    #[test]
    fn delimiter_detection() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb"), b'\t');
    }
}
