//! Transcript view: message activities as chat bubbles

use eframe::egui;

use crate::config::BUBBLE_MAX_WIDTH;
use crate::theme::colors;
use super::{ChatApp, ChatEntry};

impl ChatApp {
    pub(crate) fn render_transcript(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in &self.transcript {
                    render_bubble(ui, entry);
                    ui.add_space(8.0);
                }
            });
    }
}

fn render_bubble(ui: &mut egui::Ui, entry: &ChatEntry) {
    let layout = if entry.from_user {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };

    ui.with_layout(layout, |ui| {
        let (fill, text_color, stroke) = if entry.from_user {
            (colors::ACCENT, egui::Color32::WHITE, egui::Stroke::NONE)
        } else {
            (
                colors::BG_SURFACE,
                colors::TEXT_PRIMARY,
                egui::Stroke::new(1.0, colors::BORDER),
            )
        };

        egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_max_width(BUBBLE_MAX_WIDTH.min(ui.available_width() * 0.8));
                ui.vertical(|ui| {
                    if !entry.from_user {
                        ui.label(
                            egui::RichText::new(&entry.sender)
                                .color(colors::TEXT_SECONDARY)
                                .size(11.0),
                        );
                    }
                    ui.label(egui::RichText::new(&entry.text).color(text_color));
                });
            });
    });
}
