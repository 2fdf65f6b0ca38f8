//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::model::TimelineConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub timeline: TimelineConfig,
    pub log_level: String,
    /// Plan reopened on startup.
    pub last_plan: Option<PathBuf>,
    /// Whether bars start out draggable.
    pub edit_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            timeline: TimelineConfig::default(),
            log_level: crate::logging::default_log_level().to_string(),
            last_plan: None,
            edit_mode: true,
        }
    }
}

/// Where settings and logs go on this machine.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings_file: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("", "", "VeteranTimeline") {
            Self {
                settings_file: dirs.config_dir().join("settings.json"),
                log_dir: dirs.data_local_dir().join("logs"),
            }
        } else {
            // Fallback
            let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self {
                settings_file: dir.join("settings.json"),
                log_dir: dir.join("logs"),
            }
        }
    }
}

impl AppSettings {
    /// Load settings; a missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppSettings>(&json) {
                Ok(settings) => settings.sanitized(),
                Err(err) => {
                    log::warn!("event=settings_load status=invalid error={err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TimelineError::io(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| TimelineError::io(path, e))
    }

    /// A zero-length or overflowing track would trip the geometry; fall
    /// back to the default scale instead.
    fn sanitized(mut self) -> Self {
        let t = &self.timeline;
        let days_ok = t.checked_total_days().is_some_and(|days| days > 0);
        if !days_ok || t.total_track_width_percent <= 0.0 || t.scale_factor <= 0.0 {
            log::warn!("event=settings_load status=degenerate_timeline action=reset");
            self.timeline = TimelineConfig::default();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = AppSettings::default();
        settings.timeline.total_months = 12;
        settings.edit_mode = false;
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path), settings);
    }

    #[test]
    fn degenerate_timeline_is_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"timeline":{"total_months":0}}"#).unwrap();
        let settings = AppSettings::load(&path);
        assert_eq!(settings.timeline, TimelineConfig::default());
    }

    #[test]
    fn overflowing_timeline_is_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"timeline":{"total_months":100000,"days_per_month":100000}}"#,
        )
        .unwrap();
        let settings = AppSettings::load(&path);
        assert_eq!(settings.timeline, TimelineConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"edit_mode":false}"#).unwrap();
        let settings = AppSettings::load(&path);
        assert!(!settings.edit_mode);
        assert_eq!(settings.timeline.total_days(), 180);
    }
}
