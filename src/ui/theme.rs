//! Colours and metrics for the timeline window.

use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Surfaces ────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(17, 21, 27);
pub const BG_PANEL: Color32 = Color32::from_rgb(25, 30, 37);
pub const BG_HEADER: Color32 = Color32::from_rgb(32, 39, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(13, 16, 21);
/// Area right of the separation marker (civilian side).
pub const BG_POST_SEPARATION: Color32 = Color32::from_rgb(22, 32, 27);
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(46, 54, 66);

const CONTROL_IDLE: Color32 = Color32::from_rgb(38, 46, 57);
const CONTROL_HOVER: Color32 = Color32::from_rgb(48, 58, 72);
const CONTROL_PRESSED: Color32 = Color32::from_rgb(58, 70, 86);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 230, 236);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 160, 174);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 108, 122);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

// ── Markers ─────────────────────────────────────────────────────────────────

pub const ACCENT: Color32 = Color32::from_rgb(74, 134, 200);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(140, 186, 240);
pub const SEPARATION_LINE: Color32 = Color32::from_rgb(212, 175, 55);
pub const TODAY_LINE: Color32 = Color32::from_rgb(205, 70, 62);
pub const GRID_LINE: Color32 = Color32::from_rgb(38, 45, 55);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(240, 244, 248);
/// Dims locked bars while edit mode is on.
pub const LOCKED_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 80);

// ── Metrics ─────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const LANE_HEADER_HEIGHT: f32 = 20.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0;
pub const MIN_BAR_WIDTH: f32 = 6.0;
/// Side of the diamond drawn for single-day bars.
pub const MARKER_SIZE: f32 = 12.0;
pub const SIDE_PANEL_WIDTH: f32 = 320.0;
pub const DIALOG_WIDTH: f32 = 340.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

pub const SIZE_MENU: f32 = 13.0;
pub const SIZE_MONTH: f32 = 12.0;
pub const SIZE_BAR: f32 = 11.5;
pub const SIZE_CAPTION: f32 = 10.5;
pub const SIZE_BADGE: f32 = 9.5;

pub fn font(size: f32) -> FontId {
    FontId::proportional(size)
}

// ── Bar palette ─────────────────────────────────────────────────────────────

/// Service colours, cycled for new bars.
pub const BAR_COLORS: &[Color32] = &[
    Color32::from_rgb(75, 110, 60),   // field green
    Color32::from_rgb(40, 80, 150),   // navy
    Color32::from_rgb(0, 120, 190),   // air blue
    Color32::from_rgb(165, 40, 45),   // scarlet
    Color32::from_rgb(215, 110, 30),  // guard orange
    Color32::from_rgb(110, 120, 135), // space grey
];

pub fn bar_color(index: usize) -> Color32 {
    BAR_COLORS[index % BAR_COLORS.len()]
}

fn tint(widget: &mut WidgetVisuals, fill: Color32, border: Color32, text: Color32) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = Stroke::new(1.0, border);
    widget.fg_stroke = Stroke::new(1.0, text);
    widget.rounding = Rounding::same(4.0);
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = BG_HEADER;
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    let widgets = &mut visuals.widgets;
    tint(&mut widgets.noninteractive, BG_PANEL, BORDER_SUBTLE, TEXT_SECONDARY);
    tint(&mut widgets.inactive, CONTROL_IDLE, BORDER_SUBTLE, TEXT_PRIMARY);
    tint(&mut widgets.hovered, CONTROL_HOVER, ACCENT, TEXT_PRIMARY);
    tint(&mut widgets.active, CONTROL_PRESSED, ACCENT, Color32::WHITE);
    widgets.open = widgets.active;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_colors_cycle() {
        assert_eq!(bar_color(0), BAR_COLORS[0]);
        assert_eq!(bar_color(BAR_COLORS.len() + 1), BAR_COLORS[1]);
    }
}
