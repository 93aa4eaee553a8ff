//! View state of the admin panel and the reducer that applies request results

use super::events::Event;
use crate::constants::RECENT_ACTIVITY_LIMIT;
use crate::notifications::{NotificationKind, Notifications};
use crate::types::*;
use crate::ui::view_models::ChartSeries;
use crate::upload::UploadSession;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityFeed {
    NotLoaded,
    Loaded(Vec<Activity>),
    Failed,
}

/// Delete awaiting confirmation in the confirm dialog
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub resource: Resource,
    pub id: Id,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub parent_id: Option<Id>,
}

impl CategoryForm {
    pub fn to_request(&self) -> NewCategory {
        NewCategory {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            parent_id: self.parent_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlForm {
    pub url: String,
    pub category_id: Option<Id>,
    pub description: String,
}

impl UrlForm {
    pub fn to_request(&self) -> UrlUpload {
        UrlUpload {
            url: self.url.trim().to_string(),
            category_id: self.category_id.clone(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Everything the panels render. Lists are `None` until their first load;
/// a failed reload keeps whatever was loaded before.
pub struct AdminState {
    pub section: Section,
    pub stats: Option<Stats>,
    pub activities: ActivityFeed,
    pub chart: Option<ChartSeries>,
    pub files: Option<Vec<FileRecord>>,
    pub categories: Option<Vec<Category>>,
    pub users: Option<Vec<UserRecord>>,
    pub logs: Option<String>,
    pub notifications: Notifications,
    // Upload session: at most one selected file, `Some` progress while sending
    pub upload: Option<UploadSession>,
    pub upload_progress: Option<f32>,
    pub url_form: UrlForm,
    pub category_form: CategoryForm,
    pub show_add_category: bool,
    /// A create request is in flight; the form will not submit again
    pub category_submitting: bool,
    pub pending_delete: Option<PendingDelete>,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            section: Section::Dashboard,
            stats: None,
            activities: ActivityFeed::NotLoaded,
            chart: None,
            files: None,
            categories: None,
            users: None,
            logs: None,
            notifications: Notifications::default(),
            upload: None,
            upload_progress: None,
            url_form: UrlForm::default(),
            category_form: CategoryForm::default(),
            show_add_category: false,
            category_submitting: false,
            pending_delete: None,
        }
    }
}

impl AdminState {
    /// Switch to the section with the given id. Unknown ids change nothing.
    pub fn navigate(&mut self, id: &str) -> Option<Section> {
        let section = Section::from_id(id)?;
        self.section = section;
        Some(section)
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_deref().unwrap_or(&[])
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_progress.is_some()
    }

    pub fn upload_form_visible(&self) -> bool {
        self.upload.is_some()
    }

    /// Replace the selected file. Refused while an upload is in flight.
    pub fn select_file(&mut self, session: UploadSession) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.notifications
            .push(NotificationKind::Info, format!("Selected {}", session.file_name));
        self.upload = Some(session);
        true
    }

    /// Drop the selected file and hide the upload form
    pub fn cancel_upload(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.upload = None;
        true
    }

    /// Mark an upload as started and hand out the session to send
    pub fn begin_upload(&mut self) -> Option<UploadSession> {
        if self.is_uploading() {
            return None;
        }
        let Some(session) = self.upload.clone() else {
            self.notifications
                .push(NotificationKind::Error, "Please select a file first");
            return None;
        };
        self.upload_progress = Some(0.0);
        Some(session)
    }

    /// Hand out the category to create, once per in-flight request
    pub fn begin_category_submit(&mut self) -> Option<NewCategory> {
        if self.category_submitting {
            return None;
        }
        self.category_submitting = true;
        Some(self.category_form.to_request())
    }

    pub fn request_delete(&mut self, resource: Resource, id: Id, label: impl Into<String>) {
        self.pending_delete = Some(PendingDelete {
            resource,
            id,
            label: label.into(),
        });
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::StatsLoaded(stats) => self.stats = Some(stats),
            Event::ActivitiesLoaded(mut activities) => {
                activities.truncate(RECENT_ACTIVITY_LIMIT);
                self.activities = ActivityFeed::Loaded(activities);
            }
            Event::ActivitiesFailed => self.activities = ActivityFeed::Failed,
            Event::ChartLoaded(series) => self.chart = Some(series),
            Event::FilesLoaded(files) => {
                debug!(count = files.len(), "Files loaded");
                self.files = Some(files);
            }
            Event::CategoriesLoaded(categories) => {
                debug!(count = categories.len(), "Categories loaded");
                self.categories = Some(categories);
            }
            Event::UsersLoaded(users) => {
                debug!(count = users.len(), "Users loaded");
                self.users = Some(users);
            }
            Event::LogsLoaded(text) => self.logs = Some(text),
            Event::LogsFailed => self.logs = Some("Failed to load logs".to_string()),
            Event::UploadProgress(percent) => {
                if self.upload_progress.is_some() {
                    self.upload_progress = Some(percent);
                }
            }
            Event::UploadFinished => {
                self.upload = None;
                self.upload_progress = None;
            }
            Event::UploadFailed => self.upload_progress = None,
            Event::UrlUploadFinished => {
                self.url_form.url.clear();
                self.url_form.description.clear();
            }
            Event::CategoryCreated => {
                self.category_form = CategoryForm::default();
                self.show_add_category = false;
                self.category_submitting = false;
            }
            Event::CategoryCreateFailed => self.category_submitting = false,
            Event::Notify(kind, message) => {
                self.notifications.push(kind, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn session(name: &str) -> UploadSession {
        UploadSession::with_size(PathBuf::from(format!("/data/{}", name)), Some(10))
    }

    fn activity(n: usize) -> Activity {
        Activity {
            kind: "upload".into(),
            description: format!("activity {}", n),
            timestamp: "2024-01-01T00:00:00".into(),
        }
    }

    #[test]
    fn navigate_ignores_unknown_sections() {
        let mut state = AdminState::default();
        assert_eq!(state.navigate("users"), Some(Section::Users));
        assert_eq!(state.section, Section::Users);
        assert_eq!(state.navigate("reports"), None);
        assert_eq!(state.section, Section::Users);
    }

    #[test]
    fn selecting_a_file_populates_the_session() {
        let mut state = AdminState::default();
        assert!(!state.upload_form_visible());

        assert!(state.select_file(session("a.zip")));
        assert_eq!(state.upload, Some(session("a.zip")));
        assert!(state.upload_form_visible());
        assert_eq!(state.notifications.len(), 1);

        // a second pick replaces rather than queues
        assert!(state.select_file(session("b.zip")));
        assert_eq!(state.upload.as_ref().map(|s| s.file_name.as_str()), Some("b.zip"));
    }

    #[test]
    fn cancel_clears_session_and_hides_form() {
        let mut state = AdminState::default();
        state.select_file(session("a.zip"));
        assert!(state.cancel_upload());
        assert!(state.upload.is_none());
        assert!(!state.upload_form_visible());
    }

    #[test]
    fn upload_without_selection_is_refused() {
        let mut state = AdminState::default();
        assert!(state.begin_upload().is_none());
        assert!(!state.is_uploading());
        let messages: Vec<_> = state.notifications.iter().map(|n| n.kind).collect();
        assert_eq!(messages, vec![NotificationKind::Error]);
    }

    #[test]
    fn one_upload_at_a_time() {
        let mut state = AdminState::default();
        state.select_file(session("a.zip"));
        assert!(state.begin_upload().is_some());
        assert!(state.is_uploading());
        assert!(state.begin_upload().is_none());
        assert!(!state.select_file(session("b.zip")));
        assert!(!state.cancel_upload());

        state.apply(Event::UploadProgress(40.0));
        assert_eq!(state.upload_progress, Some(40.0));

        state.apply(Event::UploadFinished);
        assert!(state.upload.is_none());
        assert!(!state.is_uploading());
    }

    #[test]
    fn failed_upload_keeps_selection() {
        let mut state = AdminState::default();
        state.select_file(session("a.zip"));
        state.begin_upload();
        state.apply(Event::UploadFailed);
        assert!(!state.is_uploading());
        assert!(state.upload.is_some());
        // late progress from the failed request is ignored
        state.apply(Event::UploadProgress(90.0));
        assert!(state.upload_progress.is_none());
    }

    #[test]
    fn activities_are_capped() {
        let mut state = AdminState::default();
        state.apply(Event::ActivitiesLoaded((0..25).map(activity).collect()));
        match &state.activities {
            ActivityFeed::Loaded(items) => {
                assert_eq!(items.len(), RECENT_ACTIVITY_LIMIT);
                assert_eq!(items[0].description, "activity 0");
            }
            other => panic!("unexpected feed {:?}", other),
        }
    }

    #[test]
    fn logs_failure_replaces_content() {
        let mut state = AdminState::default();
        state.apply(Event::LogsLoaded("boot ok".into()));
        state.apply(Event::LogsFailed);
        assert_eq!(state.logs.as_deref(), Some("Failed to load logs"));
    }

    #[test]
    fn forms_reset_after_success() {
        let mut state = AdminState::default();
        state.show_add_category = true;
        state.category_form.name = "Music".into();
        state.apply(Event::CategoryCreated);
        assert!(!state.show_add_category);
        assert_eq!(state.category_form, CategoryForm::default());

        state.url_form = UrlForm {
            url: "https://example.com/a.iso".into(),
            category_id: Some(Id::new("2")),
            description: "iso".into(),
        };
        state.apply(Event::UrlUploadFinished);
        assert!(state.url_form.url.is_empty());
        assert!(state.url_form.description.is_empty());
        assert_eq!(state.url_form.category_id, Some(Id::new("2")));
    }

    #[test]
    fn category_form_submits_once_until_settled() {
        let mut state = AdminState::default();
        state.show_add_category = true;
        state.category_form.name = "Docs".into();

        assert_eq!(state.begin_category_submit().map(|c| c.name), Some("Docs".to_string()));
        assert!(state.begin_category_submit().is_none());

        state.apply(Event::CategoryCreateFailed);
        assert!(!state.category_submitting);
        assert!(state.show_add_category);
        assert!(state.begin_category_submit().is_some());

        state.apply(Event::CategoryCreated);
        assert!(!state.category_submitting);
        assert!(!state.show_add_category);
    }

    #[test]
    fn form_requests_are_trimmed() {
        let form = CategoryForm {
            name: "  Docs ".into(),
            description: " text ".into(),
            parent_id: None,
        };
        let request = form.to_request();
        assert_eq!(request.name, "Docs");
        assert_eq!(request.description, "text");
    }
}
