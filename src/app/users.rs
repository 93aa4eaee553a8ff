//! Users section

use super::App;
use crate::theme;
use crate::types::Resource;
use crate::ui::components;
use crate::ui::view_models::UserRow;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    pub(crate) fn render_users(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        components::section_header(ui, "Users", |ui| {
            if ui.add(theme::button(format!("{} Refresh", icons::ARROW_CLOCKWISE))).clicked() {
                self.refresh(Resource::Users);
            }
        });

        let Some(users) = self.state.users.as_ref() else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Loading users...").color(theme::TEXT_MUTED));
            });
            return;
        };
        if users.is_empty() {
            components::empty_state(ui, icons::USERS, "No users yet");
            return;
        }

        let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
        let mut delete = None;

        theme::section_frame().show(ui, |ui| {
            TableBuilder::new(ui)
                .id_salt("users_table")
                .striped(false)
                .resizable(false)
                .auto_shrink([false, true])
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::remainder().at_least(160.0))
                .column(Column::exact(120.0))
                .column(Column::exact(110.0))
                .column(Column::exact(60.0))
                .header(theme::ROW_HEIGHT, |mut header| {
                    for title in ["User ID", "Status", "Joined", ""] {
                        header.col(|ui| {
                            ui.label(
                                egui::RichText::new(title)
                                    .size(theme::FONT_LABEL)
                                    .strong()
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                    }
                })
                .body(|body| {
                    body.rows(theme::ROW_HEIGHT, rows.len(), |mut row| {
                        let user = &rows[row.index()];
                        row.col(|ui| {
                            ui.label(egui::RichText::new(user.id.as_str()).monospace());
                        });
                        row.col(|ui| {
                            let color = if user.verified {
                                theme::STATUS_SUCCESS
                            } else {
                                theme::STATUS_WARNING
                            };
                            components::badge(ui, user.badge, color);
                        });
                        row.col(|ui| {
                            ui.label(egui::RichText::new(&user.joined).color(theme::TEXT_MUTED));
                        });
                        row.col(|ui| {
                            if ui
                                .add(theme::button_danger(icons::TRASH))
                                .on_hover_text("Delete user")
                                .clicked()
                            {
                                delete = Some(user.id.clone());
                            }
                        });
                    });
                });
        });

        if let Some(id) = delete {
            let label = format!("user {}", id);
            self.state.request_delete(Resource::Users, id, label);
        }
    }
}
