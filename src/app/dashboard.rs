//! Dashboard section: stat cards, recent activity and the uploads chart

use super::state::ActivityFeed;
use super::App;
use crate::theme;
use crate::ui::components;
use crate::ui::view_models::{stat_cards, ActivityItem};
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    pub(crate) fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        components::section_header(ui, "Dashboard", |ui| {
            if ui.add(theme::button(format!("{} Refresh", icons::ARROW_CLOCKWISE))).clicked() {
                self.load_section(crate::types::Section::Dashboard);
            }
        });

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Cards keep their last values until a new stats load succeeds
                let stats = self.state.stats.clone().unwrap_or_default();
                let cards = stat_cards(&stats);
                let spacing = ui.spacing().item_spacing.x;
                let card_w = ((ui.available_width() - spacing * 3.0) / 4.0 - 2.0 * theme::SPACING_LG).max(80.0);
                ui.horizontal(|ui| {
                    for card in &cards {
                        components::stat_card(ui, card, card_w);
                    }
                });
                ui.add_space(theme::SPACING_XL);

                theme::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let title = self
                        .state
                        .chart
                        .as_ref()
                        .map(|c| c.title.as_str())
                        .unwrap_or("Uploads per day");
                    ui.label(
                        egui::RichText::new(title)
                            .size(theme::FONT_HEADING)
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.add_space(theme::SPACING_MD);
                    match &self.state.chart {
                        Some(series) => components::line_chart(ui, series),
                        None => components::empty_state(ui, icons::CHART_LINE, "No chart data"),
                    }
                });
                ui.add_space(theme::SPACING_XL);

                theme::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new("Recent activity")
                            .size(theme::FONT_HEADING)
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.add_space(theme::SPACING_MD);
                    match &self.state.activities {
                        ActivityFeed::NotLoaded => {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(egui::RichText::new("Loading...").color(theme::TEXT_MUTED));
                            });
                        }
                        ActivityFeed::Failed => {
                            ui.label(
                                egui::RichText::new("Failed to load activities")
                                    .color(theme::STATUS_ERROR),
                            );
                        }
                        ActivityFeed::Loaded(items) if items.is_empty() => {
                            components::empty_state(ui, icons::CLOCK_COUNTER_CLOCKWISE, "No recent activity");
                        }
                        ActivityFeed::Loaded(items) => {
                            for (i, activity) in items.iter().enumerate() {
                                if i > 0 {
                                    ui.separator();
                                }
                                activity_row(ui, &ActivityItem::from(activity));
                            }
                        }
                    }
                });
            });
    }
}

fn activity_row(ui: &mut egui::Ui, item: &ActivityItem) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(&item.kind)
                .size(theme::FONT_LABEL)
                .color(theme::ACCENT)
                .strong(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(&item.when)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        });
    });
    ui.add(
        egui::Label::new(
            egui::RichText::new(&item.description)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_SECONDARY),
        )
        .wrap(),
    );
}
