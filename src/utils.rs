//! Utility functions

use crate::constants::APP_NAME;
use crate::theme;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use egui::Color32;
use std::path::PathBuf;

// Folder with an upward arrow, for the sidebar logo
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 96 80"><path fill="#fff" stroke="#09090b" stroke-width="1" d="M6 10c0-3.3 2.7-6 6-6h22l8 9h42c3.3 0 6 2.7 6 6v49c0 3.3-2.7 6-6 6H12c-3.3 0-6-2.7-6-6z"/><path fill="#2dd4bf" stroke="#09090b" stroke-width="1" d="M48 24 30 44h12v18h12V44h12z"/></svg>"##;

// Same mark on a square canvas, for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 96 96"><g transform="translate(0,8)"><path fill="#fff" d="M6 10c0-3.3 2.7-6 6-6h22l8 9h42c3.3 0 6 2.7 6 6v49c0 3.3-2.7 6-6 6H12c-3.3 0-6-2.7-6-6z"/><path fill="#2dd4bf" d="M48 24 30 44h12v18h12V44h12z"/></g></svg>"##;

/// Rasterize the logo SVG at the given width, preserving aspect ratio.
pub fn rasterize_logo(width: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).ok()?;
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), width, height))
}

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_logo_square(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Format bytes with 1024-based units, up to two decimals, trailing zeros dropped
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Parse an API timestamp into a local calendar date
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = input.parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    input.parse::<NaiveDate>().ok()
}

/// Render an API timestamp as `YYYY-MM-DD`, or "Invalid Date" when unparseable
pub fn format_date(input: &str) -> String {
    parse_date(input)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Broad file class derived from a MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Archive,
    Text,
    /// Type is known but not one of the above
    Other,
    /// No type reported
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileIcon {
    pub kind: FileKind,
    pub glyph: &'static str,
    pub color: Color32,
}

pub fn file_kind(mime_type: Option<&str>) -> FileKind {
    let Some(mime) = mime_type.filter(|m| !m.is_empty()) else {
        return FileKind::Generic;
    };
    if mime.starts_with("image/") {
        FileKind::Image
    } else if mime.starts_with("video/") {
        FileKind::Video
    } else if mime.starts_with("audio/") {
        FileKind::Audio
    } else if mime == "application/pdf" {
        FileKind::Pdf
    } else if mime.contains("zip") || mime.contains("rar") {
        FileKind::Archive
    } else if mime.starts_with("text/") {
        FileKind::Text
    } else {
        FileKind::Other
    }
}

pub fn file_icon(mime_type: Option<&str>) -> FileIcon {
    use egui_phosphor::regular as icons;

    let kind = file_kind(mime_type);
    let (glyph, color) = match kind {
        FileKind::Image => (icons::IMAGE, theme::ACCENT),
        FileKind::Video => (icons::VIDEO, theme::STATUS_ERROR),
        FileKind::Audio => (icons::MUSIC_NOTES, theme::STATUS_SUCCESS),
        FileKind::Pdf => (icons::FILE_PDF, theme::STATUS_ERROR),
        FileKind::Archive => (icons::FILE_ZIP, theme::STATUS_WARNING),
        FileKind::Text => (icons::FILE_TEXT, theme::STATUS_INFO),
        FileKind::Other => (icons::FILE, theme::TEXT_MUTED),
        FileKind::Generic => (icons::FILE, theme::TEXT_SECONDARY),
    };
    FileIcon { kind, glyph, color }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_size_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1), "1 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
    }

    #[test]
    fn file_size_stays_in_terabytes() {
        let pb = 1024_u64.pow(5);
        assert_eq!(format_file_size(pb), "1024 TB");
    }

    #[test]
    fn date_formats() {
        assert_eq!(format_date("2024-03-09T14:22:05.123456"), "2024-03-09");
        assert_eq!(format_date("2024-03-09T14:22:05"), "2024-03-09");
        assert_eq!(format_date("2024-03-09"), "2024-03-09");
        assert_eq!(format_date("yesterday"), "Invalid Date");
        assert_eq!(format_date(""), "Invalid Date");

        let with_zone = format_date("2024-03-09T12:00:00+00:00");
        assert_ne!(with_zone, "Invalid Date");
        assert_eq!(with_zone.len(), 10);
    }

    #[test]
    fn icon_classification() {
        assert_eq!(file_icon(Some("image/png")).kind, FileKind::Image);
        assert_eq!(file_icon(Some("image/png")).glyph, egui_phosphor::regular::IMAGE);
        assert_eq!(file_icon(None).kind, FileKind::Generic);
        assert_eq!(file_icon(None).glyph, egui_phosphor::regular::FILE);
        assert_eq!(file_icon(Some("application/pdf")).kind, FileKind::Pdf);
        assert_eq!(file_icon(Some("application/pdf")).glyph, egui_phosphor::regular::FILE_PDF);
    }

    #[test]
    fn icon_classification_fallbacks() {
        assert_eq!(file_kind(Some("video/mp4")), FileKind::Video);
        assert_eq!(file_kind(Some("audio/ogg")), FileKind::Audio);
        assert_eq!(file_kind(Some("application/zip")), FileKind::Archive);
        assert_eq!(file_kind(Some("application/x-rar-compressed")), FileKind::Archive);
        assert_eq!(file_kind(Some("text/plain")), FileKind::Text);
        assert_eq!(file_kind(Some("application/octet-stream")), FileKind::Other);
        assert_eq!(file_kind(Some("")), FileKind::Generic);
    }

    #[test]
    fn svg_sources_are_complete_documents() {
        for svg in [LOGO_SVG, ICON_SVG] {
            assert!(svg.starts_with("<svg"));
            assert!(svg.ends_with("</svg>"));
            assert!(svg.contains("fill=\"#2dd4bf\""));
        }
    }

    #[test]
    fn logo_rasterizes() {
        let (pixels, w, h) = rasterize_logo(96).unwrap();
        assert_eq!(w, 96);
        assert_eq!(pixels.len(), (w * h * 4) as usize);
        let (_, sw, sh) = rasterize_logo_square(32).unwrap();
        assert_eq!((sw, sh), (32, 32));
    }
}
