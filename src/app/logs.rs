//! Logs section: read-only server log text

use super::App;
use crate::theme;
use crate::ui::components;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    pub(crate) fn render_logs(&mut self, ui: &mut egui::Ui) {
        components::section_header(ui, "Logs", |ui| {
            if ui.add(theme::button(format!("{} Refresh", icons::ARROW_CLOCKWISE))).clicked() {
                self.refresh_logs();
            }
        });

        theme::section_frame().show(ui, |ui| {
            egui::ScrollArea::both()
                .id_salt("logs_scroll")
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| match self.state.logs.as_deref() {
                    Some(text) => {
                        // Immutable &str keeps the text selectable but not editable
                        let mut text = text;
                        ui.add(
                            egui::TextEdit::multiline(&mut text)
                                .font(egui::TextStyle::Monospace)
                                .text_color(theme::TEXT_SECONDARY)
                                .frame(false)
                                .desired_width(f32::INFINITY),
                        );
                    }
                    None => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(egui::RichText::new("Loading logs...").color(theme::TEXT_MUTED));
                        });
                    }
                });
        });
    }
}
