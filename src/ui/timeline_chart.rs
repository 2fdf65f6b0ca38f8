use chrono::{Days, NaiveDate};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::layout::drag::{DragController, DragHandle};
use crate::layout::geometry::{self, TrackBounds};
use crate::model::task::{group_by_month, personalized};
use crate::model::{TimelineBar, TimelineConfig, TimelinePlan};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LANE_HEADER_HEIGHT: f32 = theme::LANE_HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// What the user did in the chart this frame. The host applies it.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Candidate bar produced by an in-progress drag.
    pub updated: Option<TimelineBar>,
    /// Bar whose editor should open (double-click).
    pub edit_bar: Option<Uuid>,
    pub drag_finished: bool,
}

/// Everything the chart needs that it does not own.
pub struct ChartView<'a> {
    pub plan: &'a TimelinePlan,
    pub config: &'a mut TimelineConfig,
    pub drag: &'a mut DragController,
    pub selected_bar: &'a mut Option<Uuid>,
    pub edit_mode: bool,
}

/// Render the timeline (central panel): month grid, separation marker,
/// and the bars of every lane.
pub fn show_timeline_chart(view: ChartView<'_>, ui: &mut Ui) -> ChartInteraction {
    let ChartView {
        plan,
        config,
        drag,
        selected_bar,
        edit_mode,
    } = view;
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let chart_width = available.x.max(480.0);

    let lane_rows = plan.lane_row_counts();
    let bars_height: f32 = lane_rows
        .iter()
        .map(|(_, rows)| LANE_HEADER_HEIGHT + (*rows).max(1) as f32 * (ROW_HEIGHT + ROW_PADDING))
        .sum();
    let chart_height = HEADER_HEIGHT + bars_height + 40.0;

    // Ctrl+scroll changes the scale factor
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            config.zoom_in();
        } else if scroll_delta.y < 0.0 {
            config.zoom_out();
        }
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let height = response.rect.height();
            let painter = painter.with_clip_rect(response.rect);
            let mut consumed_click = false;

            let track_width = chart_width * config.total_track_width_percent
                / config.canvas_width_percent();
            let track = TrackBounds::new(origin.x, track_width);
            let separation = plan.profile.separation_date;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            painter.rect_filled(
                Rect::from_min_max(
                    Pos2::new(track.right_px(), origin.y),
                    response.rect.max,
                ),
                0.0,
                theme::BG_POST_SEPARATION,
            );

            draw_month_header(&painter, origin, track, config, plan, chart_width, height);
            draw_separation_line(&painter, origin, track, separation, height);
            draw_today_line(&painter, origin, track, config, separation, height);

            let pointer = ui.input(|i| i.pointer.interact_pos());
            let mut lane_top = origin.y + HEADER_HEIGHT;

            for (lane, row_count) in &lane_rows {
                painter.text(
                    Pos2::new(origin.x + 6.0, lane_top + LANE_HEADER_HEIGHT / 2.0),
                    egui::Align2::LEFT_CENTER,
                    lane.to_uppercase(),
                    theme::font(theme::SIZE_BADGE),
                    theme::TEXT_DIM,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, lane_top + LANE_HEADER_HEIGHT),
                        Pos2::new(origin.x + chart_width, lane_top + LANE_HEADER_HEIGHT),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
                let rows_top = lane_top + LANE_HEADER_HEIGHT;

                let lane_bars = plan.bars.iter().filter(|b| &b.lane == lane && !b.hidden);
                let mut markers: Vec<(&TimelineBar, Rect, bool)> = Vec::new();
                for bar in interaction_order(lane_bars) {
                    let row = bar.row.unwrap_or(0);
                    let y = rows_top + row as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
                    let is_selected = *selected_bar == Some(bar.id);
                    let is_marker = bar.is_zero_length();
                    let bar_rect = if is_marker {
                        let rect = marker_rect(track, config, bar, y);
                        markers.push((bar, rect, is_selected));
                        rect
                    } else {
                        draw_bar(&painter, track, config, bar, y, is_selected, edit_mode)
                    };

                    let bar_response = ui.interact(
                        bar_rect,
                        ui.make_persistent_id(("timeline-bar", bar.id)),
                        Sense::click_and_drag(),
                    );
                    // Single-day markers only move as a whole; the editor widens them.
                    let handles = (!is_marker).then(|| {
                        let start_handle = Rect::from_min_max(
                            Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                            Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                        );
                        let end_handle = Rect::from_min_max(
                            Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                            Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                        );
                        (
                            ui.interact(
                                start_handle.expand(3.0),
                                ui.make_persistent_id(("bar-start-handle", bar.id)),
                                Sense::drag(),
                            ),
                            ui.interact(
                                end_handle.expand(3.0),
                                ui.make_persistent_id(("bar-end-handle", bar.id)),
                                Sense::drag(),
                            ),
                        )
                    });
                    let handle_hovered = handles
                        .as_ref()
                        .is_some_and(|(start, end)| start.hovered() || end.hovered());

                    if bar_response.clicked() {
                        *selected_bar = Some(bar.id);
                        consumed_click = true;
                    }
                    if bar_response.double_clicked() && edit_mode && bar.editable {
                        interaction.edit_bar = Some(bar.id);
                        consumed_click = true;
                    }

                    let grabbed = match &handles {
                        Some((start, _)) if start.drag_started() => Some((DragHandle::Start, start)),
                        Some((_, end)) if end.drag_started() => Some((DragHandle::End, end)),
                        _ if bar_response.drag_started() => Some((DragHandle::Body, &bar_response)),
                        _ => None,
                    };
                    if let Some((handle, response)) = grabbed {
                        let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        if drag.pointer_down(bar, handle, ptr_x, edit_mode) {
                            *selected_bar = Some(bar.id);
                            consumed_click = true;
                        }
                    }

                    if drag.active_bar() == Some(bar.id) {
                        if let Some(ptr) = pointer {
                            if let Some(updated) = drag.pointer_move(bar, ptr.x, track, config) {
                                interaction.updated = Some(updated);
                            }
                        }
                        let cursor = match drag.state() {
                            crate::layout::DragState::DraggingMove(_) => egui::CursorIcon::Grabbing,
                            _ => egui::CursorIcon::ResizeHorizontal,
                        };
                        ui.ctx().set_cursor_icon(cursor);
                    } else if edit_mode && bar.editable && !drag.is_dragging() {
                        if handle_hovered {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                        } else if bar_response.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                        }
                    }

                    if !is_marker && edit_mode && bar.editable && (is_selected || bar_response.hovered()) {
                        draw_handles(&painter, bar_rect);
                    }

                    if !drag.is_dragging() && (bar_response.hovered() || handle_hovered) {
                        egui::show_tooltip_at_pointer(
                            ui.ctx(),
                            ui.layer_id(),
                            egui::Id::new(("bar-tip", bar.id)),
                            |ui| {
                                let (from, to) = bar.date_range(separation);
                                ui.strong(&bar.name);
                                ui.label(format!(
                                    "{} → {}",
                                    from.format("%d %b %Y"),
                                    to.format("%d %b %Y"),
                                ));
                                let span = match bar.duration_days() {
                                    0 => "single day".to_string(),
                                    1 => "1 day".to_string(),
                                    n => format!("{n} days"),
                                };
                                ui.label(format!(
                                    "{}–{} days before separation ({span})",
                                    bar.start_days, bar.end_days
                                ));
                                if !bar.editable {
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} Locked",
                                            egui_phosphor::regular::LOCK
                                        ))
                                        .color(theme::TEXT_DIM),
                                    );
                                }
                            },
                        );
                    }
                }

                // Markers paint over the lane but were hit-tested first.
                for (bar, rect, is_selected) in markers {
                    draw_marker(&painter, bar, rect, is_selected, edit_mode);
                }

                lane_top = rows_top + (*row_count).max(1) as f32 * (ROW_HEIGHT + ROW_PADDING);
            }

            // Release anywhere ends the drag
            if drag.is_dragging() && ui.input(|i| i.pointer.any_released() || !i.pointer.any_down()) {
                drag.pointer_up();
                interaction.drag_finished = true;
            }

            if response.clicked() && !consumed_click {
                *selected_bar = None;
            }
        });

    interaction
}

fn percent_width_to_px(width_percent: f32, track: TrackBounds, config: &TimelineConfig) -> f32 {
    width_percent / config.total_track_width_percent * track.width_px
}

fn draw_month_header(
    painter: &egui::Painter,
    origin: Pos2,
    track: TrackBounds,
    config: &TimelineConfig,
    plan: &TimelinePlan,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let tasks = personalized(&plan.tasks, &plan.profile);
    let by_month = group_by_month(tasks);
    let separation = plan.profile.separation_date;

    for month in 0..config.total_months {
        let column = geometry::month_column_layout(month, config);
        let x = track.percent_to_x(column.left_percent, config);
        if x < origin.x - percent_width_to_px(column.width_percent, track, config) {
            continue;
        }

        painter.line_segment(
            [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let days_out = (month + 1).saturating_mul(config.days_per_month);
        let column_start = separation
            .checked_sub_days(Days::new(u64::from(days_out)))
            .unwrap_or(NaiveDate::MIN);
        painter.text(
            Pos2::new(x + 5.0, origin.y + 13.0),
            egui::Align2::LEFT_CENTER,
            column_start.format("%b %Y").to_string(),
            theme::font(theme::SIZE_MONTH),
            theme::TEXT_PRIMARY,
        );

        let task_count = by_month.get(&month).map_or(0, Vec::len);
        let sub = if task_count > 0 {
            format!("{} mo out · {} tasks", month + 1, task_count)
        } else {
            format!("{} mo out", month + 1)
        };
        painter.text(
            Pos2::new(x + 5.0, origin.y + 30.0),
            egui::Align2::LEFT_CENTER,
            sub,
            theme::font(theme::SIZE_CAPTION),
            theme::TEXT_SECONDARY,
        );
    }
}

fn draw_separation_line(
    painter: &egui::Painter,
    origin: Pos2,
    track: TrackBounds,
    separation: NaiveDate,
    height: f32,
) {
    let x = track.right_px();
    painter.line_segment(
        [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
        Stroke::new(2.0, theme::SEPARATION_LINE),
    );
    painter.text(
        Pos2::new(x + 6.0, origin.y + 13.0),
        egui::Align2::LEFT_CENTER,
        "Separation",
        theme::font(theme::SIZE_MONTH),
        theme::SEPARATION_LINE,
    );
    painter.text(
        Pos2::new(x + 6.0, origin.y + 30.0),
        egui::Align2::LEFT_CENTER,
        separation.format("%d %b %Y").to_string(),
        theme::font(theme::SIZE_CAPTION),
        theme::TEXT_SECONDARY,
    );
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    track: TrackBounds,
    config: &TimelineConfig,
    separation: NaiveDate,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    let days_before = (separation - today).num_days();
    if days_before < 0 {
        return;
    }
    let layout = geometry::compute_layout(days_before, days_before, config);
    let x = track.percent_to_x(layout.left_percent, config);
    if x < origin.x {
        return;
    }

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font(theme::SIZE_BADGE),
        Color32::WHITE,
    );
}

fn draw_bar(
    painter: &egui::Painter,
    track: TrackBounds,
    config: &TimelineConfig,
    bar: &TimelineBar,
    y: f32,
    is_selected: bool,
    edit_mode: bool,
) -> Rect {
    let layout = geometry::compute_bar_layout(bar, config);
    let x_start = track.percent_to_x(layout.left_percent, config);
    let bar_width = percent_width_to_px(layout.width_percent, track, config).max(theme::MIN_BAR_WIDTH);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, bar.color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if !bar.editable && edit_mode {
        painter.rect_filled(bar_rect, rounding, theme::LOCKED_OVERLAY);
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Name on bar (single line, clipped to bar bounds)
    if bar_width > 30.0 {
        let label = if bar.editable {
            bar.name.clone()
        } else {
            format!("{} {}", egui_phosphor::regular::LOCK, bar.name)
        };
        let galley = painter.layout_no_wrap(label, theme::font(theme::SIZE_BAR), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect.intersect(painter.clip_rect()));
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left().max(track.left_px) + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

/// Bars in the order their widgets are registered. Single-day markers go
/// first so a longer bar drawn under them keeps the pointer where they meet.
fn interaction_order<'a>(bars: impl Iterator<Item = &'a TimelineBar>) -> Vec<&'a TimelineBar> {
    let mut ordered: Vec<&TimelineBar> = bars.collect();
    ordered.sort_by_key(|bar| !bar.is_zero_length());
    ordered
}

/// Square around the day of a zero-length bar, vertically centred in its row.
fn marker_rect(track: TrackBounds, config: &TimelineConfig, bar: &TimelineBar, y: f32) -> Rect {
    let layout = geometry::compute_bar_layout(bar, config);
    let x = track.percent_to_x(layout.left_percent, config);
    Rect::from_center_size(
        Pos2::new(x, y + ROW_HEIGHT / 2.0),
        Vec2::splat(theme::MARKER_SIZE),
    )
}

fn draw_marker(
    painter: &egui::Painter,
    bar: &TimelineBar,
    rect: Rect,
    is_selected: bool,
    edit_mode: bool,
) {
    let c = rect.center();
    let r = rect.width() / 2.0;
    let diamond = vec![
        Pos2::new(c.x, c.y - r),
        Pos2::new(c.x + r, c.y),
        Pos2::new(c.x, c.y + r),
        Pos2::new(c.x - r, c.y),
    ];
    let fill = if !bar.editable && edit_mode {
        bar.color.gamma_multiply(0.6)
    } else {
        bar.color
    };
    let stroke = if is_selected {
        Stroke::new(2.0, theme::BORDER_ACCENT)
    } else {
        Stroke::new(1.0, theme::BG_DARK)
    };
    painter.add(egui::Shape::convex_polygon(diamond, fill, stroke));
    painter.text(
        Pos2::new(rect.right() + 4.0, c.y),
        egui::Align2::LEFT_CENTER,
        &bar.name,
        theme::font(theme::SIZE_CAPTION),
        theme::TEXT_SECONDARY,
    );
}

fn draw_handles(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    let left = Rect::from_min_size(
        Pos2::new(bar_rect.left() - 1.5, handle_y),
        Vec2::new(4.0, handle_h),
    );
    let right = Rect::from_min_size(
        Pos2::new(bar_rect.right() - 2.5, handle_y),
        Vec2::new(4.0, handle_h),
    );
    painter.rect_filled(left, Rounding::same(2.0), theme::HANDLE_COLOR);
    painter.rect_filled(right, Rounding::same(2.0), theme::HANDLE_COLOR);
}
