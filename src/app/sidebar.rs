//! Left navigation panel

use super::App;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::theme;
use crate::types::Section;
use crate::utils;
use eframe::egui;

impl App {
    pub(crate) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| {
                let avail_w = ui.available_width();
                ui.add_space(21.0);
                ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                    if self.logo_texture.is_none() {
                        self.logo_texture = utils::rasterize_logo(avail_w as u32 * 2).map(|(pixels, w, h)| {
                            ctx.load_texture(
                                "logo",
                                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                                egui::TextureOptions::LINEAR,
                            )
                        });
                    }
                    if let Some(texture) = &self.logo_texture {
                        let aspect = texture.size()[1] as f32 / texture.size()[0] as f32;
                        let logo_w = avail_w * 0.35;
                        ui.image(egui::load::SizedTexture::new(
                            texture.id(),
                            egui::vec2(logo_w, logo_w * aspect),
                        ));
                    }
                    ui.add_space(4.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(APP_NAME.to_uppercase())
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
                ui.add_space(theme::SPACING_XL);

                let mut clicked = None;
                for section in Section::ALL {
                    let active = self.state.section == section;
                    if theme::nav_item(ui, section.icon(), section.title(), active) {
                        clicked = Some(section);
                    }
                    ui.add_space(2.0);
                }
                if let Some(section) = clicked {
                    self.navigate(section.id());
                }

                // Bottom block: backend in use, settings, version
                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(theme::SPACING_MD);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("v{}", APP_VERSION))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(self.settings.api_base_or_default())
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_MUTED),
                        )
                        .truncate(),
                    )
                    .on_hover_text("Admin API base URL");
                    ui.add_space(theme::SPACING_SM);
                    if theme::nav_item(ui, egui_phosphor::regular::GEAR_SIX, "Settings", self.show_settings) {
                        self.api_base_input = self.settings.api_base_or_default().to_string();
                        self.show_settings = true;
                    }
                });
            });
    }
}
