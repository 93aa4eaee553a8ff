//! Results sent from background request tasks back to the UI thread

use crate::notifications::NotificationKind;
use crate::types::*;
use crate::ui::view_models::ChartSeries;
use eframe::egui;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StatsLoaded(Stats),
    ActivitiesLoaded(Vec<Activity>),
    ActivitiesFailed,
    ChartLoaded(ChartSeries),
    FilesLoaded(Vec<FileRecord>),
    CategoriesLoaded(Vec<Category>),
    UsersLoaded(Vec<UserRecord>),
    LogsLoaded(String),
    LogsFailed,
    UploadProgress(f32),
    UploadFinished,
    UploadFailed,
    UrlUploadFinished,
    CategoryCreated,
    CategoryCreateFailed,
    Notify(NotificationKind, String),
}

/// Sending half of the event channel. Every send wakes the UI so the event
/// is applied on the next frame.
#[derive(Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<Event>,
    ctx: Option<egui::Context>,
}

impl EventSink {
    pub fn new(ctx: egui::Context) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, ctx: Some(ctx) }, rx)
    }

    /// Sink with no UI attached
    #[cfg(test)]
    pub fn detached() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, ctx: None }, rx)
    }

    pub fn send(&self, event: Event) {
        // Receiver only goes away when the app is closing
        let _ = self.tx.send(event);
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        self.send(Event::Notify(kind, message.into()));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }
}
