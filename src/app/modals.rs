//! Modal dialogs (delete confirmation, add category, settings)

use super::App;
use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;
use tracing::warn;

/// Title row with a close X. Returns true when the X was clicked.
fn modal_title(ui: &mut egui::Ui, title: &str) -> bool {
    let mut close = false;
    ui.horizontal(|ui| {
        ui.add(egui::Label::new(egui::RichText::new(title).size(theme::FONT_HEADING).strong()).selectable(false));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
            let color = if response.hovered() {
                ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                theme::STATUS_ERROR
            } else {
                theme::TEXT_DIM
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                icons::X,
                egui::FontId::proportional(16.0),
                color,
            );
            close = response.clicked();
        });
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(theme::SPACING_SM);
    close
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(egui::RichText::new(text).size(theme::FONT_LABEL).color(theme::ACCENT))
            .selectable(false),
    );
    ui.add_space(2.0);
}

impl App {
    pub(crate) fn render_modals(&mut self, ctx: &egui::Context) {
        self.render_delete_modal(ctx);
        self.render_add_category_modal(ctx);
        self.render_settings_modal(ctx);
    }

    fn render_delete_modal(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.state.pending_delete.clone() else {
            return;
        };
        let mut confirm = false;
        let mut cancel = false;
        let response = egui::Modal::new(egui::Id::new("confirm_delete_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(340.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(icons::WARNING).size(32.0).color(theme::STATUS_WARNING));
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(format!("Delete this {}?", pending.resource.label()))
                            .size(theme::FONT_HEADING)
                            .strong(),
                    );
                    ui.add_space(2.0);
                    ui.label(egui::RichText::new(&pending.label).color(theme::TEXT_MUTED));
                    ui.add_space(theme::SPACING_XL);
                });
                ui.horizontal(|ui| {
                    cancel = ui.add(theme::button("Cancel")).clicked();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        confirm = ui
                            .add(theme::button_danger(format!("{} Delete", icons::TRASH)))
                            .clicked();
                    });
                });
            });

        if confirm {
            self.confirm_delete();
        } else if cancel || response.should_close() {
            self.state.pending_delete = None;
        }
    }

    fn render_add_category_modal(&mut self, ctx: &egui::Context) {
        if !self.state.show_add_category {
            return;
        }
        let mut submit = false;
        let mut close = false;
        let submitting = self.state.category_submitting;
        let categories = self.state.categories.as_deref().unwrap_or(&[]);
        let form = &mut self.state.category_form;
        let response = egui::Modal::new(egui::Id::new("add_category_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(360.0);
                close = modal_title(ui, "Add category");

                field_label(ui, "Name");
                let name = ui.add(
                    egui::TextEdit::singleline(&mut form.name)
                        .hint_text("Category name")
                        .desired_width(f32::INFINITY),
                );
                if !submitting && name.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.add_space(theme::SPACING_MD);

                field_label(ui, "Description");
                ui.add(
                    egui::TextEdit::multiline(&mut form.description)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(theme::SPACING_MD);

                field_label(ui, "Parent");
                crate::ui::components::category_picker(
                    ui,
                    "parent_category",
                    categories,
                    &mut form.parent_id,
                    "None (top level)",
                );
                ui.add_space(theme::SPACING_XL);

                ui.horizontal(|ui| {
                    if ui.add(theme::button("Cancel")).clicked() {
                        close = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = if submitting { "Adding..." } else { "Add" };
                        if ui
                            .add_enabled(!submitting, theme::button_accent(format!("{} {}", icons::PLUS, label)))
                            .clicked()
                        {
                            submit = true;
                        }
                    });
                });
            });

        if submit {
            // The dialog closes once the create succeeds
            self.submit_category();
        } else if close || response.should_close() {
            self.state.show_add_category = false;
        }
    }

    fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut save = false;
        let mut close = false;
        let response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(380.0);
                close = modal_title(ui, "Settings");

                field_label(ui, "Admin API base URL");
                ui.add(
                    egui::TextEdit::singleline(&mut self.api_base_input)
                        .hint_text(crate::constants::DEFAULT_API_BASE)
                        .desired_width(f32::INFINITY),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "Leave empty for the default. {} overrides this at startup.",
                        crate::constants::API_BASE_ENV
                    ))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                field_label(ui, "Diagnostics");
                if ui
                    .add(theme::button(format!("{} Open log folder", icons::FOLDER_OPEN)))
                    .clicked()
                {
                    let dir = self.data_dir.join("logs");
                    if let Err(e) = open::that(&dir) {
                        warn!("Failed to open log folder {}: {}", dir.display(), e);
                    }
                }
                ui.add_space(theme::SPACING_XL);

                ui.horizontal(|ui| {
                    if ui.add(theme::button("Cancel")).clicked() {
                        close = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(theme::button_accent(format!("{} Save", icons::CHECK))).clicked() {
                            save = true;
                        }
                    });
                });
            });

        if save {
            // A rejected URL keeps the dialog open with the typed text
            let input = self.api_base_input.clone();
            if self.apply_api_base(&input) {
                self.show_settings = false;
            }
        } else if close || response.should_close() {
            self.show_settings = false;
            self.api_base_input = self.settings.api_base_or_default().to_string();
        }
    }
}
