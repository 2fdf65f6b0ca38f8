use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font(theme::SIZE_MENU)), |ui| {
            if ui.button("  New Plan").clicked() {
                app.new_plan();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_plan();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_plan();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_plan_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import Tasks CSV...").clicked() {
                app.import_tasks();
                ui.close_menu();
            }
            if ui.button("  Export Bars CSV...").clicked() {
                app.export_bars();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font(theme::SIZE_MENU)), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.settings.timeline.zoom_in();
                app.settings_dirty = true;
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.settings.timeline.zoom_out();
                app.settings_dirty = true;
                ui.close_menu();
            }
            if ui.button("  Reset Zoom").clicked() {
                app.settings.timeline.reset_zoom();
                app.settings_dirty = true;
                ui.close_menu();
            }
            ui.separator();
            let mut edit_mode = app.settings.edit_mode;
            if ui.checkbox(&mut edit_mode, "Edit mode     Ctrl+E").changed() {
                app.set_edit_mode(edit_mode);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Log Folder").clicked() {
                if let Err(e) = open::that(&app.paths.log_dir) {
                    log::warn!("event=open_log_dir_failed error={e}");
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Plan  ").font(theme::font(theme::SIZE_MENU)), |ui| {
            if ui.button("  Add Bar...").clicked() {
                app.show_add_bar = true;
                ui.close_menu();
            }
            if ui.button("  Edit Profile...").clicked() {
                app.show_profile = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font(theme::SIZE_MENU)), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan.name, modified))
                    .size(11.0)
                    .weak(),
            );
            if app.settings.edit_mode {
                ui.label(RichText::new("EDIT").size(10.0).strong().color(theme::ACCENT));
            }
        });
    });
}
