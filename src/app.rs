use std::path::PathBuf;
use uuid::Uuid;

use crate::layout::DragController;
use crate::model::bar::DEFAULT_LANE;
use crate::model::{TimelineBar, TimelinePlan};
use crate::settings::{AppPaths, AppSettings};
use crate::ui;
use crate::ui::bar_editor::EditorAction;
use crate::ui::task_board::TaskBoardAction;

/// Main application state.
pub struct TimelineApp {
    pub plan: TimelinePlan,
    pub settings: AppSettings,
    pub paths: AppPaths,
    pub settings_dirty: bool,
    pub file_path: Option<PathBuf>,
    pub selected_bar: Option<Uuid>,
    pub drag: DragController,
    /// Working copy shown in the bar editor window.
    pub editing: Option<TimelineBar>,

    // Dialog state
    pub show_add_bar: bool,
    pub show_profile: bool,
    pub show_unlock: bool,
    pub show_about: bool,
    pub new_bar_name: String,
    pub new_bar_start: u32,
    pub new_bar_end: u32,
    pub new_bar_lane: String,

    pub status_message: String,
    pub search_query: String,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, paths: AppPaths) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let mut app = Self::with_settings(settings, paths);
        if let Some(path) = app.settings.last_plan.clone() {
            match crate::io::load_plan(&path) {
                Ok(plan) => {
                    app.plan = plan;
                    app.file_path = Some(path);
                    app.status_message = "Plan restored".to_string();
                }
                Err(e) => {
                    log::warn!("event=restore_plan_failed path={} error={e}", path.display());
                    app.settings.last_plan = None;
                    app.settings_dirty = true;
                }
            }
        }
        app
    }

    /// App state without an egui context. Used by `new` and by tests.
    pub fn with_settings(settings: AppSettings, paths: AppPaths) -> Self {
        Self {
            plan: TimelinePlan::default(),
            settings,
            paths,
            settings_dirty: false,
            file_path: None,
            selected_bar: None,
            drag: DragController::new(),
            editing: None,
            show_add_bar: false,
            show_profile: false,
            show_unlock: false,
            show_about: false,
            new_bar_name: String::new(),
            new_bar_start: 90,
            new_bar_end: 30,
            new_bar_lane: DEFAULT_LANE.to_string(),
            status_message: "Ready".to_string(),
            search_query: String::new(),
        }
    }

    // --- File operations ---

    pub fn new_plan(&mut self) {
        let profile = self.plan.profile.clone();
        self.plan = TimelinePlan::new("My Transition Plan", profile);
        self.file_path = None;
        self.selected_bar = None;
        self.editing = None;
        self.drag.cancel();
        self.status_message = "New plan created".to_string();
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Plan", &["timeline.json", "json"])
            .pick_file()
        {
            match crate::io::load_plan(&path) {
                Ok(plan) => {
                    self.plan = plan;
                    self.remember_plan_path(path);
                    self.selected_bar = None;
                    self.editing = None;
                    self.drag.cancel();
                    self.status_message = "Plan loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_plan(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_plan(path);
        } else {
            self.save_plan_as();
        }
    }

    pub fn save_plan_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Plan", &["timeline.json", "json"])
            .set_file_name(format!("{}.timeline.json", self.plan.name))
            .save_file()
        {
            self.write_plan(path);
        }
    }

    fn write_plan(&mut self, path: PathBuf) {
        self.plan.touch();
        match crate::io::save_plan(&self.plan, &path) {
            Ok(()) => {
                self.remember_plan_path(path);
                self.status_message = "Plan saved".to_string();
            }
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    fn remember_plan_path(&mut self, path: PathBuf) {
        if self.settings.last_plan.as_ref() != Some(&path) {
            self.settings.last_plan = Some(path.clone());
            self.settings_dirty = true;
        }
        self.file_path = Some(path);
    }

    pub fn import_tasks(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_tasks(&path) {
                Ok((tasks, skipped)) => {
                    let count = tasks.len();
                    self.plan.tasks = tasks;
                    self.plan.touch();
                    self.status_message = if skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_bars(&mut self) {
        if self.plan.bars.iter().all(|b| b.hidden) {
            self.status_message = "Nothing to export: the plan has no visible bars".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.plan.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        {
            match crate::io::csv_export::export_bars(
                &self.plan.bars,
                self.plan.profile.separation_date,
                &path,
            ) {
                Ok(count) => {
                    self.status_message = format!("Exported {} bars to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Bar operations ---

    /// Push an edited copy of a bar through the plan and refresh the editor
    /// copy with the normalized result.
    pub fn apply_bar_update(&mut self, bar: TimelineBar) {
        let id = bar.id;
        if !self.plan.update_bar(bar) {
            self.status_message = "Bar no longer exists".to_string();
            self.editing = None;
            return;
        }
        if let Some(stored) = self.plan.bar(id) {
            self.status_message = format!(
                "Updated '{}' ({} → {} days out)",
                stored.name, stored.start_days, stored.end_days
            );
            if let Some(draft) = self.editing.as_mut().filter(|d| d.id == id) {
                *draft = stored.clone();
            }
        }
    }

    pub fn delete_bar(&mut self, id: Uuid) {
        if self.plan.delete_bar(id) {
            if self.selected_bar == Some(id) {
                self.selected_bar = None;
            }
            if self.editing.as_ref().map(|b| b.id) == Some(id) {
                self.editing = None;
            }
            self.status_message = "Bar deleted".to_string();
        } else {
            self.status_message = "Locked bars cannot be deleted".to_string();
        }
    }

    pub fn create_bar_from_dialog(&mut self) {
        let name = if self.new_bar_name.trim().is_empty() {
            "New Milestone".to_string()
        } else {
            self.new_bar_name.trim().to_string()
        };
        let lane = if self.new_bar_lane.trim().is_empty() {
            DEFAULT_LANE.to_string()
        } else {
            self.new_bar_lane.trim().to_string()
        };
        let bar = TimelineBar::new(name, self.new_bar_start.into(), self.new_bar_end.into())
            .with_color(ui::theme::bar_color(self.plan.bars.len()))
            .with_lane(lane);
        let id = bar.id;
        self.plan.add_bar(bar);
        self.selected_bar = Some(id);
        self.new_bar_name.clear();
        self.status_message = "Bar added".to_string();
    }

    pub fn open_editor(&mut self, id: Uuid) {
        if let Some(bar) = self.plan.bar(id) {
            self.selected_bar = Some(id);
            self.editing = Some(bar.clone());
        }
    }

    pub fn open_link(&mut self, link: &str) {
        match open::that(link) {
            Ok(()) => log::info!("event=open_link url={link}"),
            Err(e) => {
                log::warn!("event=open_link_failed url={link} error={e}");
                self.status_message = format!("Could not open link: {}", e);
            }
        }
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        if self.settings.edit_mode != enabled {
            self.settings.edit_mode = enabled;
            self.settings_dirty = true;
        }
        if !enabled {
            self.drag.cancel();
        }
    }

    /// Write settings to disk if anything changed since the last save.
    pub fn flush_settings(&mut self) {
        if !self.settings_dirty {
            return;
        }
        if let Err(e) = self.settings.save(&self.paths.settings_file) {
            log::warn!("event=settings_save_failed error={e}");
        }
        self.settings_dirty = false;
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        let toggle_edit = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::E));
        if should_save {
            self.save_plan();
        }
        if toggle_edit {
            self.set_edit_mode(!self.settings.edit_mode);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Bars: {}", self.plan.bars.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.settings.timeline.scale_factor * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut board_action = TaskBoardAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                board_action = ui::task_board::show_task_board(
                    &self.plan.tasks,
                    &self.plan.profile,
                    &mut self.search_query,
                    ui,
                );
            });
        match board_action {
            TaskBoardAction::OpenLink(link) => self.open_link(&link),
            TaskBoardAction::ShowUnlock => self.show_unlock = true,
            TaskBoardAction::None => {}
        }

        let scale_before = self.settings.timeline.scale_factor;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::timeline_chart::show_timeline_chart(
                    ui::timeline_chart::ChartView {
                        plan: &self.plan,
                        config: &mut self.settings.timeline,
                        drag: &mut self.drag,
                        selected_bar: &mut self.selected_bar,
                        edit_mode: self.settings.edit_mode,
                    },
                    ui,
                )
            })
            .inner;
        if self.settings.timeline.scale_factor != scale_before {
            self.settings_dirty = true;
        }
        if let Some(bar) = interaction.updated {
            self.apply_bar_update(bar);
        }
        if interaction.drag_finished {
            self.plan.touch();
        }
        if let Some(id) = interaction.edit_bar {
            self.open_editor(id);
        }

        if let Some(mut draft) = self.editing.take() {
            match ui::bar_editor::show_bar_editor(&mut draft, &self.settings.timeline, ctx) {
                EditorAction::Changed => {
                    self.editing = Some(draft.clone());
                    self.apply_bar_update(draft);
                }
                EditorAction::Delete => self.delete_bar(draft.id),
                EditorAction::Close => {}
                EditorAction::None => self.editing = Some(draft),
            }
        }

        if self.show_add_bar {
            ui::dialogs::show_add_bar_dialog(self, ctx);
        }
        if self.show_profile {
            ui::dialogs::show_profile_dialog(self, ctx);
        }
        if self.show_unlock {
            ui::dialogs::show_unlock_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }

        self.flush_settings();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings_dirty = true;
        self.flush_settings();
        log::info!("event=app_exit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(dir: &std::path::Path) -> TimelineApp {
        let paths = AppPaths {
            settings_file: dir.join("settings.json"),
            log_dir: dir.join("logs"),
        };
        TimelineApp::with_settings(AppSettings::default(), paths)
    }

    #[test]
    fn create_bar_from_dialog_uses_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let before = app.plan.bars.len();
        app.new_bar_name = "   ".into();
        app.new_bar_lane = String::new();
        app.new_bar_start = 10;
        app.new_bar_end = 40;
        app.create_bar_from_dialog();

        assert_eq!(app.plan.bars.len(), before + 1);
        let id = app.selected_bar.unwrap();
        let bar = app.plan.bar(id).unwrap();
        assert_eq!(bar.name, "New Milestone");
        assert_eq!(bar.lane, DEFAULT_LANE);
        assert_eq!((bar.start_days, bar.end_days), (40, 10));
        assert!(bar.row.is_some());
    }

    #[test]
    fn locked_bar_survives_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let locked = app.plan.bars.iter().find(|b| !b.editable).unwrap().id;
        app.delete_bar(locked);
        assert!(app.plan.bar(locked).is_some());
        assert_eq!(app.status_message, "Locked bars cannot be deleted");
    }

    #[test]
    fn editor_copy_tracks_normalized_update() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let id = app.plan.bars.iter().find(|b| b.editable).unwrap().id;
        app.open_editor(id);

        let mut draft = app.editing.clone().unwrap();
        draft.start_days = 5;
        draft.end_days = 50;
        app.apply_bar_update(draft);

        let stored = app.plan.bar(id).unwrap();
        assert_eq!((stored.start_days, stored.end_days), (50, 5));
        assert_eq!(app.editing.as_ref().unwrap().start_days, 50);
    }

    #[test]
    fn edit_mode_off_cancels_drag() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.settings.edit_mode = true;
        let bar = app.plan.bars.iter().find(|b| b.editable).unwrap().clone();
        assert!(app.drag.pointer_down(&bar, crate::layout::DragHandle::Body, 100.0, true));

        app.set_edit_mode(false);
        assert!(!app.drag.is_dragging());
        assert!(app.settings_dirty);
    }

    #[test]
    fn flush_settings_writes_once_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.flush_settings();
        assert!(!app.paths.settings_file.exists());

        app.settings.timeline.zoom_in();
        app.settings_dirty = true;
        app.flush_settings();
        let loaded = AppSettings::load(&app.paths.settings_file);
        assert_eq!(loaded.timeline.scale_factor, app.settings.timeline.scale_factor);
    }
}
