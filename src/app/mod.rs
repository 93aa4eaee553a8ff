//! App module - contains the main application state and logic

pub mod actions;
mod categories;
mod dashboard;
pub mod events;
mod files;
mod logs;
mod modals;
mod sidebar;
pub mod state;
mod users;

use crate::api::{AdminApi, HttpAdminApi};
use crate::notifications::NotificationKind;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::upload::UploadSession;
use eframe::egui;
use events::{Event, EventSink};
use state::AdminState;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) state: AdminState,
    pub(crate) api: Arc<dyn AdminApi>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) sink: EventSink,
    pub(crate) events: mpsc::UnboundedReceiver<Event>,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Settings modal
    pub(crate) show_settings: bool,
    pub(crate) api_base_input: String,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) started: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let (sink, events) = EventSink::new(cc.egui_ctx.clone());
        let api_base = settings.api_base_or_default().to_string();
        info!(api_base = %api_base, "Using admin API");

        Ok(Self {
            state: AdminState::default(),
            api: Arc::new(HttpAdminApi::new(&api_base)),
            runtime,
            sink,
            events,
            api_base_input: api_base,
            settings,
            data_dir,
            logo_texture: None,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            started: false,
        })
    }

    /// Run a request flow on the runtime. Nothing waits for it.
    pub(crate) fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<dyn AdminApi>, EventSink) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(task(self.api.clone(), self.sink.clone()));
    }

    /// Initial loads: dashboard plus the category list that feeds every picker
    pub(crate) fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.load_section(Section::Dashboard);
        self.reload(Resource::Categories);
    }

    /// Apply every event that arrived since the last frame
    pub(crate) fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.state.apply(event);
        }
    }

    pub(crate) fn navigate(&mut self, section_id: &str) {
        match self.state.navigate(section_id) {
            Some(section) => {
                debug!(section = section.id(), "Navigate");
                self.load_section(section);
            }
            None => debug!(section = section_id, "Unknown section"),
        }
    }

    pub(crate) fn load_section(&self, section: Section) {
        match section {
            Section::Dashboard => {
                self.spawn(|api, sink| async move { actions::load_dashboard(api.as_ref(), &sink).await })
            }
            Section::Files => self.reload(Resource::Files),
            Section::Categories => self.reload(Resource::Categories),
            Section::Users => self.reload(Resource::Users),
            Section::Logs => {
                self.spawn(|api, sink| async move { actions::load_logs(api.as_ref(), &sink).await })
            }
        }
    }

    pub(crate) fn reload(&self, resource: Resource) {
        self.spawn(move |api, sink| async move {
            actions::invalidate_and_reload(api.as_ref(), resource, &sink).await
        });
    }

    pub(crate) fn refresh(&self, resource: Resource) {
        self.spawn(move |api, sink| async move { actions::refresh(api.as_ref(), resource, &sink).await });
    }

    pub(crate) fn refresh_logs(&self) {
        self.spawn(|api, sink| async move { actions::refresh_logs(api.as_ref(), &sink).await });
    }

    pub(crate) fn generate_links(&self, id: Id) {
        self.spawn(move |api, sink| async move { actions::generate_links(api.as_ref(), &id, &sink).await });
    }

    /// Run the delete the admin confirmed in the dialog
    pub(crate) fn confirm_delete(&mut self) {
        if let Some(pending) = self.state.pending_delete.take() {
            let state::PendingDelete { resource, id, .. } = pending;
            self.spawn(move |api, sink| async move {
                actions::delete(api.as_ref(), resource, &id, &sink).await
            });
        }
    }

    pub(crate) fn pick_upload_file(&mut self) {
        if self.state.is_uploading() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new().set_title("Select a file to upload").pick_file() {
            let session = UploadSession::new(path);
            debug!(file = %session.file_name, size = ?session.size, "File selected");
            self.state.select_file(session);
        }
    }

    pub(crate) fn start_upload(&mut self) {
        if let Some(session) = self.state.begin_upload() {
            self.spawn(move |api, sink| async move { actions::upload_file(api.as_ref(), session, &sink).await });
        }
    }

    pub(crate) fn submit_url_upload(&self) {
        let request = self.state.url_form.to_request();
        self.spawn(move |api, sink| async move {
            actions::upload_from_url(api.as_ref(), request, &sink).await
        });
    }

    pub(crate) fn submit_category(&mut self) {
        let Some(request) = self.state.begin_category_submit() else {
            return;
        };
        self.spawn(move |api, sink| async move {
            actions::create_category(api.as_ref(), request, &sink).await
        });
    }

    /// Point the client at a new backend and reload what is on screen.
    /// Returns false when the input is rejected; nothing changes then.
    pub(crate) fn apply_api_base(&mut self, input: &str) -> bool {
        if !self.settings.set_api_base(input) {
            warn!(api_base = %input.trim(), "Rejected API base");
            self.state
                .notifications
                .push(NotificationKind::Warning, format!("Not a valid URL: {}", input.trim()));
            return false;
        }
        info!(api_base = %self.settings.api_base_or_default(), "API base changed");
        self.api = Arc::new(HttpAdminApi::new(self.settings.api_base_or_default()));
        self.api_base_input = self.settings.api_base_or_default().to_string();
        self.save_settings();
        self.load_section(self.state.section);
        if self.state.section != Section::Categories {
            self.reload(Resource::Categories);
        }
        true
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }
}
