//! Request flows behind every user action.
//!
//! Each function is its own failure boundary: errors are logged and turned
//! into a notification, never propagated. Results reach the UI as events.

use super::events::{Event, EventSink};
use crate::api::{AdminApi, ProgressFn};
use crate::constants::CHART_DAYS;
use crate::types::*;
use crate::ui::view_models::daily_upload_series;
use crate::upload::{ProgressThrottle, UploadSession};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// ============================================================================
// DASHBOARD
// ============================================================================

pub async fn load_dashboard(api: &dyn AdminApi, sink: &EventSink) {
    match api.stats().await {
        Ok(stats) => sink.send(Event::StatsLoaded(stats)),
        Err(e) => {
            error!(error = %e, "Failed to load dashboard");
            sink.error("Failed to load dashboard");
            return;
        }
    }
    load_recent_activities(api, sink).await;
    load_daily_chart(api, sink).await;
}

async fn load_recent_activities(api: &dyn AdminApi, sink: &EventSink) {
    match api.recent_activities().await {
        Ok(activities) => sink.send(Event::ActivitiesLoaded(activities)),
        Err(e) => {
            error!(error = %e, "Failed to load recent activities");
            sink.send(Event::ActivitiesFailed);
        }
    }
}

async fn load_daily_chart(api: &dyn AdminApi, sink: &EventSink) {
    match api.files().await {
        Ok(files) => {
            let today = chrono::Local::now().date_naive();
            sink.send(Event::ChartLoaded(daily_upload_series(&files, today, CHART_DAYS)));
        }
        Err(e) => warn!(error = %e, "Failed to load chart data"),
    }
}

// ============================================================================
// RESOURCE LISTS
// ============================================================================

/// Re-fetch a whole collection and replace it in the view. On failure the
/// previously loaded list stays visible.
pub async fn invalidate_and_reload(api: &dyn AdminApi, resource: Resource, sink: &EventSink) {
    let result = match resource {
        Resource::Files => api.files().await.map(Event::FilesLoaded),
        Resource::Categories => api.categories().await.map(Event::CategoriesLoaded),
        Resource::Users => api.users().await.map(Event::UsersLoaded),
    };
    match result {
        Ok(event) => sink.send(event),
        Err(e) => {
            error!(resource = resource.label(), error = %e, "Failed to load list");
            sink.error(format!("Failed to load {}s", resource.label()));
        }
    }
}

/// Manual refresh; the notice is shown right away, not after the reload
pub async fn refresh(api: &dyn AdminApi, resource: Resource, sink: &EventSink) {
    sink.success(format!("{}s refreshed", capitalize(resource.label())));
    invalidate_and_reload(api, resource, sink).await;
}

pub async fn delete(api: &dyn AdminApi, resource: Resource, id: &Id, sink: &EventSink) {
    let result = match resource {
        Resource::Files => api.delete_file(id).await,
        Resource::Categories => api.delete_category(id).await,
        Resource::Users => api.delete_user(id).await,
    };
    match result {
        Ok(()) => {
            info!(resource = resource.label(), id = %id, "Deleted");
            sink.success(format!("{} deleted", capitalize(resource.label())));
            invalidate_and_reload(api, resource, sink).await;
        }
        Err(e) => {
            error!(resource = resource.label(), id = %id, error = %e, "Delete failed");
            sink.error(format!("Failed to delete {}", resource.label()));
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// FILES
// ============================================================================

/// Ask the backend for fresh stream/download links. The links themselves are
/// not shown anywhere yet.
pub async fn generate_links(api: &dyn AdminApi, id: &Id, sink: &EventSink) {
    match api.generate_links(id).await {
        Ok(links) => {
            debug!(
                id = %id,
                stream = links.stream_link.is_some(),
                download = links.download_link.is_some(),
                "Links generated"
            );
            sink.success("Download links generated");
        }
        Err(e) => {
            error!(id = %id, error = %e, "Failed to generate links");
            sink.error("Failed to generate links");
        }
    }
}

pub async fn upload_file(api: &dyn AdminApi, session: UploadSession, sink: &EventSink) {
    info!(file = %session.file_name, size = ?session.size, "Starting upload");

    let progress_sink = sink.clone();
    let throttle = ProgressThrottle::new();
    let progress: ProgressFn = Arc::new(move |sent, total| {
        if let Some(percent) = throttle.step(sent, total) {
            progress_sink.send(Event::UploadProgress(percent));
        }
    });

    match api.upload_file(&session, progress).await {
        Ok(()) => {
            info!(file = %session.file_name, "Upload complete");
            sink.success(format!("{} uploaded", session.file_name));
            sink.send(Event::UploadFinished);
            invalidate_and_reload(api, Resource::Files, sink).await;
        }
        Err(e) => {
            error!(file = %session.file_name, error = %e, "Upload failed");
            sink.error("Failed to upload file");
            sink.send(Event::UploadFailed);
        }
    }
}

pub async fn upload_from_url(api: &dyn AdminApi, request: UrlUpload, sink: &EventSink) {
    if request.url.trim().is_empty() {
        sink.error("Please enter a file URL");
        return;
    }
    match api.upload_url(&request).await {
        Ok(()) => {
            info!(url = %request.url, "Remote upload complete");
            sink.success("File uploaded from URL");
            sink.send(Event::UrlUploadFinished);
            invalidate_and_reload(api, Resource::Files, sink).await;
        }
        Err(e) => {
            error!(url = %request.url, error = %e, "Remote upload failed");
            sink.error("Failed to upload from URL");
        }
    }
}

// ============================================================================
// CATEGORIES
// ============================================================================

pub async fn create_category(api: &dyn AdminApi, mut request: NewCategory, sink: &EventSink) {
    request.name = request.name.trim().to_string();
    if request.name.is_empty() {
        sink.error("Category name is required");
        sink.send(Event::CategoryCreateFailed);
        return;
    }
    match api.create_category(&request).await {
        Ok(()) => {
            info!(name = %request.name, "Category created");
            sink.success("Category added");
            sink.send(Event::CategoryCreated);
            invalidate_and_reload(api, Resource::Categories, sink).await;
        }
        Err(e) => {
            error!(name = %request.name, error = %e, "Failed to create category");
            sink.error("Failed to add category");
            sink.send(Event::CategoryCreateFailed);
        }
    }
}

// ============================================================================
// LOGS
// ============================================================================

pub async fn load_logs(api: &dyn AdminApi, sink: &EventSink) {
    match api.logs().await {
        Ok(text) => sink.send(Event::LogsLoaded(text)),
        Err(e) => {
            error!(error = %e, "Failed to load logs");
            sink.send(Event::LogsFailed);
        }
    }
}

pub async fn refresh_logs(api: &dyn AdminApi, sink: &EventSink) {
    sink.success("Logs refreshed");
    load_logs(api, sink).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::notifications::NotificationKind;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn notices(events: &[Event]) -> Vec<(NotificationKind, String)> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Notify(kind, msg) => Some((*kind, msg.clone())),
                _ => None,
            })
            .collect()
    }

    fn list_op(resource: Resource) -> &'static str {
        match resource {
            Resource::Files => "files",
            Resource::Categories => "categories",
            Resource::Users => "users",
        }
    }

    #[tokio::test]
    async fn successful_delete_reloads_list_once() {
        for resource in [Resource::Files, Resource::Categories, Resource::Users] {
            let api = FakeApi::new();
            let (sink, mut rx) = EventSink::detached();

            delete(&api, resource, &Id::new("7"), &sink).await;

            assert_eq!(api.count(list_op(resource)), 1, "{:?}", resource);
            assert_eq!(api.calls().len(), 2);
            let events = drain(&mut rx);
            let kinds: Vec<_> = notices(&events).into_iter().map(|(k, _)| k).collect();
            assert_eq!(kinds, vec![NotificationKind::Success]);
        }
    }

    #[tokio::test]
    async fn failed_delete_skips_reload() {
        let api = FakeApi::new().failing("delete_user");
        let (sink, mut rx) = EventSink::detached();

        delete(&api, Resource::Users, &Id::new("1"), &sink).await;

        assert_eq!(api.calls(), vec!["delete_user"]);
        let events = drain(&mut rx);
        assert_eq!(
            notices(&events),
            vec![(NotificationKind::Error, "Failed to delete user".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_category_name_never_hits_the_network() {
        let api = FakeApi::new();
        let (sink, mut rx) = EventSink::detached();

        let request = NewCategory {
            name: "   ".into(),
            ..NewCategory::default()
        };
        create_category(&api, request, &sink).await;

        assert!(api.calls().is_empty());
        let events = drain(&mut rx);
        assert_eq!(notices(&events)[0].0, NotificationKind::Error);
        assert!(!events.contains(&Event::CategoryCreated));
        assert!(events.contains(&Event::CategoryCreateFailed));
    }

    #[tokio::test]
    async fn failed_category_create_releases_the_form() {
        let api = FakeApi::new().failing("create_category");
        let (sink, mut rx) = EventSink::detached();

        let request = NewCategory {
            name: "Music".into(),
            ..NewCategory::default()
        };
        create_category(&api, request, &sink).await;

        assert_eq!(api.calls(), vec!["create_category"]);
        let events = drain(&mut rx);
        assert!(events.contains(&Event::CategoryCreateFailed));
        assert_eq!(notices(&events)[0].0, NotificationKind::Error);
    }

    #[tokio::test]
    async fn category_create_resets_form_and_reloads() {
        let api = FakeApi::new();
        let (sink, mut rx) = EventSink::detached();

        let request = NewCategory {
            name: " Music ".into(),
            description: "albums".into(),
            parent_id: Some(Id::new("3")),
        };
        create_category(&api, request, &sink).await;

        assert_eq!(api.calls(), vec!["create_category", "categories"]);
        let sent = api.created.lock().unwrap().clone();
        assert_eq!(sent[0].name, "Music");
        assert_eq!(sent[0].parent_id, Some(Id::new("3")));
        let events = drain(&mut rx);
        assert!(events.contains(&Event::CategoryCreated));
        assert!(events.iter().any(|e| matches!(e, Event::CategoriesLoaded(_))));
    }

    #[tokio::test]
    async fn upload_reports_progress_then_reloads_files() {
        let api = FakeApi::new();
        let (sink, mut rx) = EventSink::detached();
        let session = UploadSession::with_size("/tmp/a.iso".into(), Some(100));

        upload_file(&api, session.clone(), &sink).await;

        assert_eq!(api.calls(), vec!["upload_file", "files"]);
        assert_eq!(api.uploaded.lock().unwrap().clone(), vec![session]);
        let events = drain(&mut rx);
        let progress: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                Event::UploadProgress(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![50.0, 100.0]);
        let finished = events.iter().position(|e| *e == Event::UploadFinished).unwrap();
        let reloaded = events
            .iter()
            .position(|e| matches!(e, Event::FilesLoaded(_)))
            .unwrap();
        assert!(finished < reloaded);
    }

    #[tokio::test]
    async fn failed_upload_keeps_list_untouched() {
        let api = FakeApi::new().failing("upload_file");
        let (sink, mut rx) = EventSink::detached();

        upload_file(&api, UploadSession::with_size("/tmp/a.iso".into(), None), &sink).await;

        assert_eq!(api.count("files"), 0);
        let events = drain(&mut rx);
        assert!(events.contains(&Event::UploadFailed));
        assert!(!events.contains(&Event::UploadFinished));
    }

    #[tokio::test]
    async fn url_upload_requires_url() {
        let api = FakeApi::new();
        let (sink, mut rx) = EventSink::detached();

        upload_from_url(&api, UrlUpload::default(), &sink).await;
        assert!(api.calls().is_empty());
        assert_eq!(notices(&drain(&mut rx))[0].0, NotificationKind::Error);

        let request = UrlUpload {
            url: "https://example.com/a.pdf".into(),
            ..UrlUpload::default()
        };
        upload_from_url(&api, request, &sink).await;
        assert_eq!(api.calls(), vec!["upload_url", "files"]);
        assert!(drain(&mut rx).contains(&Event::UrlUploadFinished));
    }

    #[tokio::test]
    async fn dashboard_stops_after_stats_failure() {
        let api = FakeApi::new().failing("stats");
        let (sink, mut rx) = EventSink::detached();

        load_dashboard(&api, &sink).await;

        assert_eq!(api.calls(), vec!["stats"]);
        assert_eq!(notices(&drain(&mut rx))[0].0, NotificationKind::Error);
    }

    #[tokio::test]
    async fn dashboard_loads_activities_and_chart() {
        let api = FakeApi::new().failing("recent_activities");
        let (sink, mut rx) = EventSink::detached();

        load_dashboard(&api, &sink).await;

        assert_eq!(api.calls(), vec!["stats", "recent_activities", "files"]);
        let events = drain(&mut rx);
        assert!(events.contains(&Event::StatsLoaded(Stats::default())));
        assert!(events.contains(&Event::ActivitiesFailed));
        assert!(events.iter().any(|e| matches!(e, Event::ChartLoaded(s) if s.values.len() == CHART_DAYS)));
        assert!(notices(&events).is_empty());
    }

    #[tokio::test]
    async fn failed_reload_notifies_without_replacing_list() {
        let api = FakeApi::new().failing("files");
        let (sink, mut rx) = EventSink::detached();

        invalidate_and_reload(&api, Resource::Files, &sink).await;

        let events = drain(&mut rx);
        assert!(!events.iter().any(|e| matches!(e, Event::FilesLoaded(_))));
        assert_eq!(
            notices(&events),
            vec![(NotificationKind::Error, "Failed to load files".to_string())]
        );
    }

    #[tokio::test]
    async fn generate_links_only_notifies() {
        let api = FakeApi::new();
        let (sink, mut rx) = EventSink::detached();

        generate_links(&api, &Id::new("f1"), &sink).await;

        assert_eq!(api.calls(), vec!["generate_links"]);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(notices(&events)[0].0, NotificationKind::Success);
    }

    #[tokio::test]
    async fn logs_failure_is_inline() {
        let api = FakeApi::new().failing("logs");
        let (sink, mut rx) = EventSink::detached();

        load_logs(&api, &sink).await;

        assert_eq!(drain(&mut rx), vec![Event::LogsFailed]);
    }

    #[tokio::test]
    async fn refresh_notifies_then_reloads() {
        let api = FakeApi::new();
        let (sink, mut rx) = EventSink::detached();

        refresh(&api, Resource::Files, &sink).await;

        let events = drain(&mut rx);
        assert_eq!(
            events[0],
            Event::Notify(NotificationKind::Success, "Files refreshed".into())
        );
        assert!(matches!(events[1], Event::FilesLoaded(_)));
    }
}
