//! Reusable UI components
//!
//! Standalone widgets shared by the section panels.

use super::view_models::{category_label, ChartSeries, StatCard};
use crate::notifications::Notifications;
use crate::theme;
use crate::types::{Category, Id};
use eframe::egui;
use std::time::Instant;

/// Section title with right-aligned actions
pub fn section_header(ui: &mut egui::Ui, title: &str, actions: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(title)
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_PRIMARY)
                .strong(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), actions);
    });
    ui.add_space(theme::SPACING_MD);
}

pub fn stat_card(ui: &mut egui::Ui, card: &StatCard, width: f32) {
    theme::card_frame().show(ui, |ui| {
        ui.set_width(width);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(card.icon)
                    .size(28.0)
                    .color(theme::ACCENT),
            );
            ui.add_space(theme::SPACING_MD);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(&card.value)
                        .size(22.0)
                        .color(theme::TEXT_PRIMARY)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new(card.label)
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
            });
        });
    });
}

/// Centered placeholder for empty or failed lists
pub fn empty_state(ui: &mut egui::Ui, icon: &str, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(theme::SPACING_XL);
        ui.label(egui::RichText::new(icon).size(32.0).color(theme::TEXT_DIM));
        ui.add_space(theme::SPACING_SM);
        ui.label(
            egui::RichText::new(message)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        );
        ui.add_space(theme::SPACING_XL);
    });
}

/// Pill-shaped status label
pub fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) -> egui::Response {
    let galley = ui.painter().layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(theme::FONT_SMALL),
        color,
    );
    let size = egui::vec2(galley.size().x + 16.0, theme::BADGE_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, theme::BADGE_HEIGHT / 2.0, color.gamma_multiply(0.15));
        painter.rect_stroke(
            rect,
            theme::BADGE_HEIGHT / 2.0,
            egui::Stroke::new(theme::STROKE_DEFAULT, color.gamma_multiply(0.5)),
            egui::StrokeKind::Inside,
        );
        painter.galley(rect.center() - galley.size() / 2.0, galley, color);
    }
    response
}

/// Category dropdown. `None` is offered first under `none_label`.
pub fn category_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    categories: &[Category],
    selected: &mut Option<Id>,
    none_label: &str,
) {
    let text = match selected {
        None => none_label.to_string(),
        Some(_) => category_label(categories, selected.as_ref()),
    };
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(text)
        .width(ui.available_width().min(260.0))
        .show_ui(ui, |ui| {
            ui.selectable_value(selected, None, none_label);
            for c in categories {
                ui.selectable_value(selected, Some(c.id.clone()), &c.name);
            }
        });
}

/// Value-axis ceiling for a chart: at least 1 so a flat zero series still draws
pub fn chart_ceiling(series: &ChartSeries) -> u64 {
    series.max().max(1)
}

/// Points of a series inside `rect`, left to right
pub fn chart_points(series: &ChartSeries, rect: egui::Rect) -> Vec<egui::Pos2> {
    let n = series.values.len();
    if n == 0 {
        return Vec::new();
    }
    let ceiling = chart_ceiling(series) as f32;
    let step = if n > 1 { rect.width() / (n - 1) as f32 } else { 0.0 };
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n > 1 { rect.left() + step * i as f32 } else { rect.center().x };
            let y = rect.bottom() - (*v as f32 / ceiling) * rect.height();
            egui::pos2(x, y)
        })
        .collect()
}

/// Line chart painted directly, with value gridlines and day labels
pub fn line_chart(ui: &mut egui::Ui, series: &ChartSeries) {
    let width = ui.available_width();
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::CHART_HEIGHT), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }
    let painter = ui.painter_at(rect);
    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(32.0, 8.0),
        rect.max - egui::vec2(12.0, 24.0),
    );
    let ceiling = chart_ceiling(series);
    let label_font = egui::FontId::proportional(theme::FONT_SMALL);

    // Horizontal gridlines at 0, 1/2 and full scale
    for (frac, value) in [(0.0, 0), (0.5, ceiling / 2), (1.0, ceiling)] {
        let y = plot.bottom() - frac * plot.height();
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
        );
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            value.to_string(),
            label_font.clone(),
            theme::TEXT_DIM,
        );
    }

    let points = chart_points(series, plot);
    for (point, label) in points.iter().zip(&series.labels) {
        painter.text(
            egui::pos2(point.x, plot.bottom() + 12.0),
            egui::Align2::CENTER_CENTER,
            label,
            label_font.clone(),
            theme::TEXT_MUTED,
        );
    }

    if points.len() > 1 {
        let mut fill = points.clone();
        fill.push(egui::pos2(plot.right(), plot.bottom()));
        fill.push(egui::pos2(plot.left(), plot.bottom()));
        painter.add(egui::Shape::convex_polygon(
            fill,
            theme::ACCENT.gamma_multiply(0.08),
            egui::Stroke::NONE,
        ));
        painter.add(egui::Shape::line(
            points.clone(),
            egui::Stroke::new(theme::STROKE_THICK, theme::ACCENT),
        ));
    }

    let hover = response.hover_pos();
    for (i, point) in points.iter().enumerate() {
        painter.circle_filled(*point, 3.5, theme::ACCENT);
        if hover.is_some_and(|h| (h.x - point.x).abs() < 12.0) {
            painter.circle_stroke(*point, 6.0, egui::Stroke::new(theme::STROKE_MEDIUM, theme::ACCENT));
            painter.text(
                *point - egui::vec2(0.0, 14.0),
                egui::Align2::CENTER_BOTTOM,
                series.values[i].to_string(),
                egui::FontId::proportional(theme::FONT_LABEL),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

/// Stacked notification banners in the top-right corner.
/// Expired banners are pruned every frame; clicking the X dismisses early.
pub fn notification_stack(ctx: &egui::Context, notifications: &mut Notifications) {
    let now = Instant::now();
    notifications.prune(now);
    if notifications.is_empty() {
        return;
    }

    let mut dismissed = Vec::new();
    egui::Area::new(egui::Id::new("notification_stack"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .order(egui::Order::Foreground)
        .interactable(true)
        .show(ctx, |ui| {
            ui.set_width(theme::NOTIFICATION_WIDTH);
            for n in notifications.iter() {
                let (fill, accent) = theme::notification_colors(n.kind);
                egui::Frame::new()
                    .fill(fill)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, accent.gamma_multiply(0.6)))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.set_width(theme::NOTIFICATION_WIDTH - 24.0);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(theme::notification_icon(n.kind))
                                    .size(theme::FONT_HEADING)
                                    .color(accent),
                            );
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(&n.message)
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_PRIMARY),
                                )
                                .wrap(),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let close = ui.add(
                                    egui::Button::new(
                                        egui::RichText::new(egui_phosphor::regular::X)
                                            .color(theme::TEXT_MUTED),
                                    )
                                    .frame(false),
                                );
                                if close.clicked() {
                                    dismissed.push(n.id);
                                }
                            });
                        });
                    });
                ui.add_space(theme::SPACING_SM);
            }
        });

    for id in dismissed {
        notifications.dismiss(id);
    }
    if let Some(wait) = notifications.next_expiry(now) {
        ctx.request_repaint_after(wait);
    }
}
