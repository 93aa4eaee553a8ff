//! Categories section: card grid with add and delete

use super::App;
use crate::theme;
use crate::types::Resource;
use crate::ui::components;
use crate::ui::view_models::CategoryCard;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    pub(crate) fn render_categories(&mut self, ui: &mut egui::Ui) {
        components::section_header(ui, "Categories", |ui| {
            if ui.add(theme::button_accent(format!("{} Add category", icons::PLUS))).clicked() {
                self.state.show_add_category = true;
            }
            if ui.add(theme::button(format!("{} Refresh", icons::ARROW_CLOCKWISE))).clicked() {
                self.refresh(Resource::Categories);
            }
        });

        let Some(categories) = self.state.categories.as_ref() else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Loading categories...").color(theme::TEXT_MUTED));
            });
            return;
        };
        if categories.is_empty() {
            components::empty_state(ui, icons::FOLDERS, "No categories yet");
            return;
        }

        let cards: Vec<CategoryCard> = categories.iter().map(|c| CategoryCard::new(c, categories)).collect();
        let mut delete = None;

        egui::ScrollArea::vertical()
            .id_salt("categories_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_LG, theme::SPACING_LG);
                    for card in &cards {
                        theme::card_frame().show(ui, |ui| {
                            ui.set_width(theme::CATEGORY_CARD_WIDTH);
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new(icons::FOLDER).size(20.0).color(theme::ACCENT));
                                    ui.add(
                                        egui::Label::new(
                                            egui::RichText::new(&card.name)
                                                .size(theme::FONT_HEADING)
                                                .color(theme::TEXT_PRIMARY)
                                                .strong(),
                                        )
                                        .truncate(),
                                    );
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        if ui
                                            .add(theme::button_danger(icons::TRASH))
                                            .on_hover_text("Delete category")
                                            .clicked()
                                        {
                                            delete = Some((card.id.clone(), card.name.clone()));
                                        }
                                    });
                                });
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(&card.description).color(theme::TEXT_MUTED),
                                    )
                                    .wrap(),
                                );
                                ui.add_space(theme::SPACING_SM);
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(format!("Created {}", card.created))
                                            .size(theme::FONT_SMALL)
                                            .color(theme::TEXT_DIM),
                                    );
                                    if let Some(parent) = &card.parent {
                                        components::badge(ui, &format!("in {}", parent), theme::STATUS_INFO);
                                    }
                                });
                            });
                        });
                    }
                });
            });

        if let Some((id, name)) = delete {
            self.state.request_delete(Resource::Categories, id, name);
        }
    }
}
