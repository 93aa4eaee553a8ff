//! Files section: upload form, URL ingestion and the file table

use super::App;
use crate::theme;
use crate::types::{Id, Resource};
use crate::ui::components;
use crate::ui::view_models::FileRow;
use crate::utils::format_file_size;
use eframe::egui;
use egui_phosphor::regular as icons;

enum RowAction {
    Links(Id),
    Delete(Id, String),
}

impl App {
    pub(crate) fn render_files(&mut self, ui: &mut egui::Ui) {
        components::section_header(ui, "Files", |ui| {
            if ui.add(theme::button(format!("{} Refresh", icons::ARROW_CLOCKWISE))).clicked() {
                self.refresh(Resource::Files);
            }
        });

        egui::ScrollArea::vertical()
            .id_salt("files_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.columns(2, |cols| {
                    self.render_upload_card(&mut cols[0]);
                    self.render_url_card(&mut cols[1]);
                });
                ui.add_space(theme::SPACING_XL);
                self.render_file_table(ui);
            });
    }

    fn render_upload_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{} Upload file", icons::UPLOAD_SIMPLE))
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(theme::SPACING_MD);

            let uploading = self.state.is_uploading();
            if ui
                .add_enabled(!uploading, theme::button(format!("{} Choose file...", icons::FOLDER_OPEN)))
                .clicked()
            {
                self.pick_upload_file();
            }

            let mut submit = false;
            let mut cancel = false;
            let categories = self.state.categories.as_deref().unwrap_or(&[]);
            if let Some(session) = self.state.upload.as_mut() {
                ui.add_space(theme::SPACING_MD);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(icons::FILE).color(theme::ACCENT));
                    ui.label(egui::RichText::new(&session.file_name).color(theme::TEXT_PRIMARY));
                    if let Some(size) = session.size {
                        ui.label(egui::RichText::new(format_file_size(size)).color(theme::TEXT_MUTED));
                    }
                });
                ui.add_space(theme::SPACING_SM);
                ui.add_enabled_ui(!uploading, |ui| {
                    ui.label(egui::RichText::new("Category").size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
                    components::category_picker(
                        ui,
                        "upload_category",
                        categories,
                        &mut session.category_id,
                        "No category",
                    );
                    ui.label(egui::RichText::new("Description").size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
                    ui.add(
                        egui::TextEdit::multiline(&mut session.description)
                            .desired_rows(2)
                            .desired_width(f32::INFINITY)
                            .hint_text("Optional"),
                    );
                });
                ui.add_space(theme::SPACING_SM);
                ui.horizontal(|ui| {
                    submit = ui
                        .add_enabled(!uploading, theme::button_accent(format!("{} Upload", icons::UPLOAD_SIMPLE)))
                        .clicked();
                    cancel = ui.add_enabled(!uploading, theme::button("Cancel")).clicked();
                });
            }

            if let Some(percent) = self.state.upload_progress {
                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::ProgressBar::new(percent / 100.0)
                        .text(format!("{:.0}%", percent))
                        .fill(theme::ACCENT_DIM),
                );
            }

            if submit {
                self.start_upload();
            }
            if cancel {
                self.state.cancel_upload();
            }
        });
    }

    fn render_url_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{} Upload from URL", icons::LINK))
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(theme::SPACING_MD);

            let categories = self.state.categories.as_deref().unwrap_or(&[]);
            let form = &mut self.state.url_form;
            ui.add(
                egui::TextEdit::singleline(&mut form.url)
                    .hint_text("https://example.com/file.zip")
                    .desired_width(f32::INFINITY),
            );
            ui.label(egui::RichText::new("Category").size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
            components::category_picker(ui, "url_category", categories, &mut form.category_id, "No category");
            ui.label(egui::RichText::new("Description").size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
            ui.add(
                egui::TextEdit::singleline(&mut form.description)
                    .hint_text("Optional")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(theme::SPACING_SM);
            if ui.add(theme::button_accent(format!("{} Fetch", icons::CLOUD_ARROW_DOWN))).clicked() {
                self.submit_url_upload();
            }
        });
    }

    fn render_file_table(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let Some(files) = self.state.files.as_ref() else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new("Loading files...").color(theme::TEXT_MUTED));
            });
            return;
        };
        if files.is_empty() {
            components::empty_state(ui, icons::FILES, "No files uploaded yet");
            return;
        }

        let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
        let mut action = None;

        theme::section_frame().show(ui, |ui| {
            TableBuilder::new(ui)
                .id_salt("files_table")
                .striped(false)
                .resizable(false)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::remainder().at_least(180.0).clip(true))
                .column(Column::exact(90.0))
                .column(Column::exact(130.0).clip(true))
                .column(Column::exact(100.0))
                .column(Column::exact(80.0))
                .column(Column::exact(110.0))
                .header(theme::ROW_HEIGHT, |mut header| {
                    for title in ["Name", "Size", "Category", "Uploaded", "Downloads", ""] {
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
                        let file = &rows[row.index()];
                        row.col(|ui| {
                            ui.label(egui::RichText::new(file.icon.glyph).color(file.icon.color));
                            ui.add(egui::Label::new(&file.name).truncate());
                        });
                        row.col(|ui| {
                            ui.label(egui::RichText::new(&file.size).color(theme::TEXT_MUTED));
                        });
                        row.col(|ui| {
                            ui.label(egui::RichText::new(&file.category).color(theme::TEXT_MUTED));
                        });
                        row.col(|ui| {
                            ui.label(egui::RichText::new(&file.uploaded).color(theme::TEXT_MUTED));
                        });
                        row.col(|ui| {
                            ui.label(&file.downloads);
                        });
                        row.col(|ui| {
                            if ui
                                .add(theme::button(icons::LINK))
                                .on_hover_text("Generate download links")
                                .clicked()
                            {
                                action = Some(RowAction::Links(file.id.clone()));
                            }
                            if ui
                                .add(theme::button_danger(icons::TRASH))
                                .on_hover_text("Delete file")
                                .clicked()
                            {
                                action = Some(RowAction::Delete(file.id.clone(), file.name.clone()));
                            }
                        });
                    });
                });
        });

        match action {
            Some(RowAction::Links(id)) => self.generate_links(id),
            Some(RowAction::Delete(id, name)) => self.state.request_delete(Resource::Files, id, name),
            None => {}
        }
    }
}
