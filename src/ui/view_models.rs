//! Typed view models: API records mapped to exactly what each widget shows.
//!
//! Rendering code only ever reads these, so server-provided text is always
//! displayed as plain label text and formatting can be tested without a UI.

use crate::types::*;
use crate::utils::{file_icon, format_date, format_file_size, parse_date, FileIcon};
use chrono::{Duration, NaiveDate};

pub struct StatCard {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

pub fn stat_cards(stats: &Stats) -> [StatCard; 4] {
    use egui_phosphor::regular as icons;
    [
        StatCard {
            icon: icons::FILES,
            label: "Total files",
            value: stats.total_files.to_string(),
        },
        StatCard {
            icon: icons::USERS,
            label: "Total users",
            value: stats.total_users.to_string(),
        },
        StatCard {
            icon: icons::DOWNLOAD_SIMPLE,
            label: "Total downloads",
            value: stats.total_downloads.to_string(),
        },
        StatCard {
            icon: icons::HARD_DRIVES,
            label: "Total size",
            value: format_file_size(stats.total_size),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    pub kind: String,
    pub when: String,
    pub description: String,
}

impl From<&Activity> for ActivityItem {
    fn from(a: &Activity) -> Self {
        Self {
            kind: a.kind.clone(),
            when: format_date(&a.timestamp),
            description: a.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub id: Id,
    pub icon: FileIcon,
    pub name: String,
    pub size: String,
    pub category: String,
    pub uploaded: String,
    pub downloads: String,
}

impl From<&FileRecord> for FileRow {
    fn from(f: &FileRecord) -> Self {
        Self {
            id: f.id.clone(),
            icon: file_icon(f.mime_type.as_deref()),
            name: f.original_name.clone(),
            size: format_file_size(f.file_size),
            category: f
                .category_name
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Uncategorized".to_string()),
            uploaded: format_date(&f.created_at),
            downloads: f.download_count.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCard {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub created: String,
    pub parent: Option<String>,
}

impl CategoryCard {
    /// `all` is the loaded category list, used to name the parent
    pub fn new(c: &Category, all: &[Category]) -> Self {
        let parent = c.parent_id.as_ref().map(|pid| {
            all.iter()
                .find(|other| &other.id == pid)
                .map(|other| other.name.clone())
                .unwrap_or_else(|| pid.to_string())
        });
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            description: c
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            created: format_date(&c.created_at),
            parent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: Id,
    pub verified: bool,
    pub badge: &'static str,
    pub joined: String,
}

impl From<&UserRecord> for UserRow {
    fn from(u: &UserRecord) -> Self {
        Self {
            id: u.id.clone(),
            verified: u.is_verified,
            badge: if u.is_verified { "Verified" } else { "Unverified" },
            joined: format_date(&u.created_at),
        }
    }
}

/// Label shown in a category picker for the current selection
pub fn category_label(categories: &[Category], selected: Option<&Id>) -> String {
    match selected {
        None => "No category".to_string(),
        Some(id) => categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string()),
    }
}

/// One line series for the dashboard chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    pub fn max(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Files uploaded per day over the `days` days ending at `today`, oldest first
pub fn daily_upload_series(files: &[FileRecord], today: NaiveDate, days: usize) -> ChartSeries {
    let dates: Vec<NaiveDate> = (0..days)
        .rev()
        .map(|offset| today - Duration::days(offset as i64))
        .collect();
    let mut values = vec![0u64; dates.len()];
    for date in files.iter().filter_map(|f| parse_date(&f.created_at)) {
        if let Some(slot) = dates.iter().position(|d| *d == date) {
            values[slot] += 1;
        }
    }
    ChartSeries {
        title: "Uploads per day".to_string(),
        labels: dates.iter().map(|d| d.format("%a").to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FileKind;

    fn file(id: &str, created_at: &str) -> FileRecord {
        FileRecord {
            id: Id::new(id),
            original_name: format!("{}.bin", id),
            file_size: 1536,
            mime_type: None,
            category_name: None,
            created_at: created_at.to_string(),
            download_count: 3,
            description: None,
        }
    }

    fn category(id: &str, name: &str, parent: Option<&str>) -> Category {
        Category {
            id: Id::new(id),
            name: name.to_string(),
            description: None,
            parent_id: parent.map(Id::new),
            created_at: "2024-01-02T00:00:00".to_string(),
        }
    }

    #[test]
    fn file_row_formats_fields() {
        let mut record = file("f1", "2024-05-01T10:00:00");
        record.mime_type = Some("application/pdf".into());
        let row = FileRow::from(&record);
        assert_eq!(row.size, "1.5 KB");
        assert_eq!(row.category, "Uncategorized");
        assert_eq!(row.uploaded, "2024-05-01");
        assert_eq!(row.downloads, "3");
        assert_eq!(row.icon.kind, FileKind::Pdf);

        record.category_name = Some("Books".into());
        assert_eq!(FileRow::from(&record).category, "Books");
    }

    #[test]
    fn category_card_names_parent() {
        let all = vec![
            category("1", "Media", None),
            category("2", "Movies", Some("1")),
            category("3", "Orphan", Some("99")),
        ];
        let movies = CategoryCard::new(&all[1], &all);
        assert_eq!(movies.parent.as_deref(), Some("Media"));
        assert_eq!(movies.description, "No description");
        assert_eq!(movies.created, "2024-01-02");

        let orphan = CategoryCard::new(&all[2], &all);
        assert_eq!(orphan.parent.as_deref(), Some("99"));
        assert!(CategoryCard::new(&all[0], &all).parent.is_none());
    }

    #[test]
    fn user_row_badge() {
        let user = UserRecord {
            id: Id::new("5"),
            is_verified: false,
            created_at: "2024-02-29".into(),
        };
        let row = UserRow::from(&user);
        assert_eq!(row.badge, "Unverified");
        assert!(!row.verified);
        assert_eq!(row.joined, "2024-02-29");
    }

    #[test]
    fn stat_cards_format_total_size() {
        let stats = Stats {
            total_files: 12,
            total_users: 3,
            total_downloads: 40,
            total_size: 1024,
        };
        let cards = stat_cards(&stats);
        assert_eq!(cards[0].value, "12");
        assert_eq!(cards[3].value, "1 KB");
    }

    #[test]
    fn picker_label_falls_back_to_id() {
        let all = vec![category("1", "Media", None)];
        assert_eq!(category_label(&all, None), "No category");
        assert_eq!(category_label(&all, Some(&Id::new("1"))), "Media");
        assert_eq!(category_label(&all, Some(&Id::new("8"))), "8");
    }

    #[test]
    fn uploads_are_bucketed_by_day() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(); // Sunday
        let files = vec![
            file("a", "2024-06-09T08:00:00"),
            file("b", "2024-06-09T20:00:00"),
            file("c", "2024-06-03T12:00:00"),
            file("d", "2024-06-02T12:00:00"), // outside the window
            file("e", "garbage"),
        ];
        let series = daily_upload_series(&files, today, 7);
        assert_eq!(series.values, vec![1, 0, 0, 0, 0, 0, 2]);
        assert_eq!(series.labels.first().map(String::as_str), Some("Mon"));
        assert_eq!(series.labels.last().map(String::as_str), Some("Sun"));
        assert_eq!(series.max(), 2);
    }
}
