//! Header bar: avatar, agent title, status, New chat / Reconnect

use eframe::egui;

use crate::config;
use crate::flow::ChatStatus;
use crate::theme::colors;
use super::ChatApp;

impl ChatApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let mut restart = false;

        ui.horizontal(|ui| {
            // LEFT: avatar disc + title + status line
            draw_avatar(ui, 32.0);

            ui.add_space(4.0);

            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(config::AGENT_TITLE)
                        .color(colors::TEXT_PRIMARY)
                        .strong()
                        .size(14.0),
                );

                ui.horizontal(|ui| {
                    let dot_color = if self.flow.status == ChatStatus::Online {
                        colors::ONLINE
                    } else {
                        colors::STATUS_MUTED
                    };
                    let (dot_rect, _) =
                        ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                    ui.painter().circle_filled(dot_rect.center(), 4.0, dot_color);

                    ui.label(
                        egui::RichText::new(self.flow.status_label())
                            .color(colors::TEXT_SECONDARY)
                            .size(12.0),
                    );
                });
            });

            // RIGHT: reconnect controls (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let reconnect = egui::Button::new(
                    egui::RichText::new("Reconnect")
                        .color(egui::Color32::WHITE)
                        .strong(),
                )
                .fill(colors::ACCENT);
                if ui.add(reconnect).clicked() {
                    restart = true;
                }

                ui.add_space(8.0);

                if ui
                    .button(egui::RichText::new("New chat").strong())
                    .clicked()
                {
                    restart = true;
                }
            });
        });

        if restart {
            self.start();
        }
    }
}

/// Round avatar placeholder with the agent initials
fn draw_avatar(ui: &mut egui::Ui, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), size / 2.0, colors::BG_SUBTLE);
    painter.circle_stroke(
        rect.center(),
        size / 2.0,
        egui::Stroke::new(1.0, colors::BORDER),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        config::AGENT_INITIALS,
        egui::FontId::proportional(12.0),
        colors::TEXT_SECONDARY,
    );
}
