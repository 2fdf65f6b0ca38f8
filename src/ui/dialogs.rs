use crate::app::TimelineApp;
use crate::model::{Branch, CareerTrack};
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Bar" dialog.
pub fn show_add_bar_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    let max_days = app.settings.timeline.max_days();
    Window::new(RichText::new("Add Bar").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("add_bar_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_bar_name)
                            .hint_text("Milestone name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Starts (days out)").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui::DragValue::new(&mut app.new_bar_start)
                            .range(0..=max_days)
                            .suffix(" d"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Ends (days out)").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui::DragValue::new(&mut app.new_bar_end)
                            .range(0..=max_days)
                            .suffix(" d"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Lane").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_bar_lane),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_bar_from_dialog();
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_bar = false;
    }
}

/// Render the profile dialog (onboarding answers).
pub fn show_profile_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    let mut changed = false;
    Window::new(RichText::new("Your Profile").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            let profile = &mut app.plan.profile;

            egui::Grid::new("profile_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Branch").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("branch_combo")
                        .selected_text(profile.branch.label())
                        .show_ui(ui, |ui| {
                            for branch in Branch::all() {
                                changed |= ui
                                    .selectable_value(&mut profile.branch, *branch, branch.label())
                                    .changed();
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Rank").color(theme::TEXT_SECONDARY));
                    changed |= ui
                        .add_sized([200.0, 24.0], egui::TextEdit::singleline(&mut profile.rank))
                        .changed();
                    ui.end_row();

                    ui.label(RichText::new("Separation date").color(theme::TEXT_SECONDARY));
                    changed |= ui
                        .add(
                            egui_extras::DatePickerButton::new(&mut profile.separation_date)
                                .id_salt("dp_separation"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label(RichText::new("Location").color(theme::TEXT_SECONDARY));
                    changed |= ui
                        .add_sized(
                            [200.0, 24.0],
                            egui::TextEdit::singleline(&mut profile.location)
                                .hint_text("State or installation"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label(RichText::new("Career goal").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("track_combo")
                        .selected_text(profile.career_track.label())
                        .show_ui(ui, |ui| {
                            for track in CareerTrack::all() {
                                changed |= ui
                                    .selectable_value(&mut profile.career_track, *track, track.label())
                                    .changed();
                            }
                        });
                    ui.end_row();

                    ui.label("");
                    changed |= ui
                        .checkbox(&mut profile.unlocked, "Resource links unlocked")
                        .changed();
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            if ui.add_sized([80.0, 28.0], egui::Button::new("Done")).clicked() {
                should_close = true;
            }
        });

    if changed {
        app.plan.touch();
        app.status_message = "Profile updated".to_string();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_profile = false;
    }
}

/// Render the "Unlock resources" notice shown when a locked link is clicked.
pub fn show_unlock_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("Resources locked")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.label("Resource links are part of the full plan.");
            ui.label(
                RichText::new("Mark your profile as unlocked once you have subscribed.")
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Open profile").clicked() {
                    app.show_profile = true;
                    should_close = true;
                }
                if ui.button("Close").clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_unlock = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Veteran Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Plan your transition to civilian life,");
                ui.label("counted back from your separation date.");
                ui.add_space(8.0);
                let logs = match crate::logging::logging_status() {
                    Some((level, dir)) => format!("Logging at {level} to {}", dir.display()),
                    None => "Logging is off".to_string(),
                };
                ui.label(RichText::new(logs).size(10.5).color(theme::TEXT_DIM));
                ui.add_space(10.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
