//! Common types and data structures mirrored from the admin API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as sent by the backend. Files and categories use text ids,
/// users use Telegram's numeric ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Id(s),
            RawId::Int(n) => Id(n.to_string()),
        }
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dashboard aggregate counters
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_files: u64,
    pub total_users: u64,
    pub total_downloads: u64,
    pub total_size: u64,
}

/// Entry in the recent activity feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileRecord {
    pub id: Id,
    pub original_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Id>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecord {
    pub id: Id,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /admin/categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub parent_id: Option<Id>,
}

/// Body of `POST /admin/upload-url`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UrlUpload {
    pub url: String,
    pub category_id: Option<Id>,
    pub description: String,
}

/// Response of `POST /admin/files/{id}/links`. Parsed, never displayed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratedLinks {
    pub stream_link: Option<String>,
    pub download_link: Option<String>,
}

/// Top-level admin panel view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Files,
    Categories,
    Users,
    Logs,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Files,
        Section::Categories,
        Section::Users,
        Section::Logs,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Files => "files",
            Section::Categories => "categories",
            Section::Users => "users",
            Section::Logs => "logs",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Files => "Files",
            Section::Categories => "Categories",
            Section::Users => "Users",
            Section::Logs => "Logs",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Dashboard => egui_phosphor::regular::SQUARES_FOUR,
            Section::Files => egui_phosphor::regular::FILES,
            Section::Categories => egui_phosphor::regular::FOLDERS,
            Section::Users => egui_phosphor::regular::USERS,
            Section::Logs => egui_phosphor::regular::SCROLL,
        }
    }
}

/// Collections that are reloaded wholesale after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Files,
    Categories,
    Users,
}

impl Resource {
    pub fn label(self) -> &'static str {
        match self {
            Resource::Files => "file",
            Resource::Categories => "category",
            Resource::Users => "user",
        }
    }
}
