use crate::model::task::{group_by_month, personalized};
use crate::model::{Profile, Task};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions that the task board can request.
pub enum TaskBoardAction {
    None,
    OpenLink(String),
    ShowUnlock,
}

/// Render the left-side checklist: personalized tasks grouped by month,
/// furthest month first.
pub fn show_task_board(
    tasks: &[Task],
    profile: &Profile,
    search_query: &mut String,
    ui: &mut Ui,
) -> TaskBoardAction {
    let mut action = TaskBoardAction::None;
    let relevant = personalized(tasks, profile);
    let query = search_query.trim().to_lowercase();
    let visible: Vec<&Task> = relevant
        .into_iter()
        .filter(|t| {
            query.is_empty()
                || t.title.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
        })
        .collect();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Checklist")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", visible.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.add(
        egui::TextEdit::singleline(search_query)
            .hint_text(format!("{} Search tasks...", egui_phosphor::regular::MAGNIFYING_GLASS))
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
    ui.separator();

    let nothing_to_show = visible.is_empty();
    let today = chrono::Local::now().date_naive();
    let current_month = profile.months_until_separation(today);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (month, month_tasks) in group_by_month(visible).into_iter().rev() {
                let heading = match month {
                    0 => "Separation month".to_string(),
                    1 => "1 month out".to_string(),
                    m => format!("{m} months out"),
                };
                let color = if month == current_month {
                    theme::ACCENT
                } else {
                    theme::TEXT_SECONDARY
                };
                ui.add_space(4.0);
                ui.label(RichText::new(heading).size(11.0).strong().color(color));

                for task in month_tasks {
                    let frame = egui::Frame {
                        fill: theme::BG_DARK,
                        rounding: egui::Rounding::same(4.0),
                        inner_margin: egui::Margin::symmetric(6.0, 4.0),
                        outer_margin: egui::Margin::ZERO,
                        stroke: egui::Stroke::NONE,
                        shadow: egui::epaint::Shadow::NONE,
                    };
                    frame.show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::Label::new(
                                    RichText::new(&task.title)
                                        .size(12.0)
                                        .color(theme::TEXT_PRIMARY),
                                )
                                .truncate(),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if let Some(link) = task.resource_link(profile) {
                                        let btn = ui.add(
                                            egui::Button::new(
                                                RichText::new(egui_phosphor::regular::ARROW_SQUARE_OUT)
                                                    .color(theme::ACCENT),
                                            )
                                            .frame(false),
                                        );
                                        if btn.on_hover_text(link).clicked() {
                                            action = TaskBoardAction::OpenLink(link.to_string());
                                        }
                                    } else if task.is_link_locked(profile) {
                                        let btn = ui.add(
                                            egui::Button::new(
                                                RichText::new(egui_phosphor::regular::LOCK)
                                                    .color(theme::TEXT_DIM),
                                            )
                                            .frame(false),
                                        );
                                        if btn.on_hover_text("Unlock resources to open this link").clicked() {
                                            action = TaskBoardAction::ShowUnlock;
                                        }
                                    }
                                },
                            );
                        });
                        if !task.description.is_empty() {
                            ui.label(
                                RichText::new(&task.description)
                                    .size(10.5)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        }
                    });
                    ui.add_space(1.0);
                }
            }

            if nothing_to_show {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("No tasks match your profile or search.")
                        .color(Color32::from_gray(140)),
                );
            }
        });

    action
}
