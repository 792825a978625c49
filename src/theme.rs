//! Light Fluent-like theme matching the branded page shell

use egui::Color32;

/// Neutral Fluent palette plus the brand accent
pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PAGE: Color32 = Color32::from_rgb(243, 242, 241); // #F3F2F1 - page
    pub const BG_SURFACE: Color32 = Color32::from_rgb(255, 255, 255); // #FFFFFF - header, bubbles
    pub const BG_SUBTLE: Color32 = Color32::from_rgb(250, 249, 248); // #FAF9F8 - avatar fill

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(50, 49, 48); // #323130
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(96, 94, 92); // #605E5C

    // === Lines & Borders ===
    pub const BORDER: Color32 = Color32::from_rgb(225, 223, 221); // #E1DFDD

    // === Status & Accent ===
    pub const ACCENT: Color32 = Color32::from_rgb(0, 120, 212); // #0078D4 - brand blue
    pub const ONLINE: Color32 = Color32::from_rgb(16, 124, 16); // #107C10 - online dot
    pub const STATUS_MUTED: Color32 = Color32::from_rgb(200, 198, 196); // #C8C6C4 - other states
}

/// Create the light page Visuals
pub fn fluent_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = BG_PAGE;
    visuals.window_fill = BG_SURFACE;
    visuals.extreme_bg_color = BG_SURFACE;
    visuals.faint_bg_color = BG_SUBTLE;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PAGE;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_SURFACE;
    visuals.widgets.inactive.weak_bg_fill = BG_SURFACE;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, STATUS_MUTED);

    visuals.widgets.hovered.bg_fill = BG_SUBTLE;
    visuals.widgets.hovered.weak_bg_fill = BG_SUBTLE;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    visuals.widgets.active.bg_fill = BG_PAGE;
    visuals.widgets.active.weak_bg_fill = BG_PAGE;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.25);
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.hyperlink_color = ACCENT;

    // Flat design, no shadows
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
