use crate::model::{TimelineBar, TimelineConfig};
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Changed,
    Delete,
    Close,
}

/// Render the bar editor window for a working copy of a bar.
///
/// Fields edit `draft` in place; the caller pushes `draft` through the
/// plan's update path when `Changed` comes back.
pub fn show_bar_editor(
    draft: &mut TimelineBar,
    config: &TimelineConfig,
    ctx: &Context,
) -> EditorAction {
    let mut action = EditorAction::None;
    let max_days = config.max_days().max(draft.start_days);

    Window::new(RichText::new("Edit Bar").strong().size(14.0))
        .id(egui::Id::new(("bar-editor", draft.id)))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 64.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("bar_editor_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    if ui
                        .add_sized(
                            [200.0, 24.0],
                            egui::TextEdit::singleline(&mut draft.name)
                                .text_color(theme::TEXT_PRIMARY),
                        )
                        .changed()
                    {
                        action = EditorAction::Changed;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Starts (days out)").color(theme::TEXT_SECONDARY));
                    let end = draft.end_days;
                    if ui
                        .add(
                            egui::DragValue::new(&mut draft.start_days)
                                .range(end..=max_days)
                                .suffix(" d"),
                        )
                        .changed()
                    {
                        action = EditorAction::Changed;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Ends (days out)").color(theme::TEXT_SECONDARY));
                    let start = draft.start_days;
                    if ui
                        .add(
                            egui::DragValue::new(&mut draft.end_days)
                                .range(0..=start)
                                .suffix(" d"),
                        )
                        .changed()
                    {
                        action = EditorAction::Changed;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Lane").color(theme::TEXT_SECONDARY));
                    if ui
                        .add_sized([200.0, 24.0], egui::TextEdit::singleline(&mut draft.lane))
                        .lost_focus()
                    {
                        if draft.lane.trim().is_empty() {
                            draft.lane = crate::model::bar::DEFAULT_LANE.to_string();
                        }
                        action = EditorAction::Changed;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Color").color(theme::TEXT_SECONDARY));
                    if ui.color_edit_button_srgba(&mut draft.color).changed() {
                        action = EditorAction::Changed;
                    }
                    ui.end_row();

                    ui.label("");
                    if ui.checkbox(&mut draft.hidden, "Hidden").changed() {
                        action = EditorAction::Changed;
                    }
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let delete_btn = egui::Button::new(
                    RichText::new(format!("{} Delete", egui_phosphor::regular::TRASH))
                        .color(Color32::WHITE),
                )
                .fill(theme::TODAY_LINE)
                .rounding(egui::Rounding::same(4.0));
                if ui
                    .add_enabled(draft.editable, delete_btn)
                    .on_disabled_hover_text("Locked bars cannot be deleted")
                    .clicked()
                {
                    action = EditorAction::Delete;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                    action = EditorAction::Close;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = EditorAction::Close;
    }
    action
}
