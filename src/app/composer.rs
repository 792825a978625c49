//! Composer: single-line input + Send

use eframe::egui;

use crate::theme::colors;
use super::ChatApp;

impl ChatApp {
    pub(crate) fn render_composer(&mut self, ui: &mut egui::Ui) {
        let mut send = false;

        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("Type your message")
                    .desired_width(ui.available_width() - 70.0),
            );

            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send = true;
                input.request_focus();
            }

            let button = egui::Button::new(
                egui::RichText::new("Send")
                    .color(egui::Color32::WHITE)
                    .strong(),
            )
            .fill(colors::ACCENT);
            if ui.add(button).clicked() {
                send = true;
            }
        });

        if send {
            self.send_input();
        }
    }
}
