//! User settings stored as settings.json in the app data directory

use crate::constants::{API_BASE_ENV, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Backend
    pub api_base: String,

    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Base from the environment, this run only
    #[serde(skip)]
    pub env_override: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            env_override: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        Self::load_with_override(data_dir, std::env::var(API_BASE_ENV).ok())
    }

    fn load_with_override(data_dir: &Path, env_value: Option<String>) -> Self {
        let path = data_dir.join("settings.json");
        let mut settings = match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        };
        settings.apply_env_override(env_value);
        settings
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(base) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            info!(api_base = %base, "API base overridden from environment");
            self.env_override = Some(base);
        }
    }

    /// Replace the saved base with what the admin typed. Blank means the
    /// default. Returns false and changes nothing when it is not a URL.
    pub fn set_api_base(&mut self, input: &str) -> bool {
        let base = input.trim();
        if !base.is_empty() && reqwest::Url::parse(base).is_err() {
            return false;
        }
        self.api_base = base.to_string();
        self.env_override = None;
        true
    }

    /// Base in effect: environment override, then the saved value, then the default
    pub fn api_base_or_default(&self) -> &str {
        if let Some(base) = &self.env_override {
            return base;
        }
        let base = self.api_base.trim();
        if base.is_empty() {
            DEFAULT_API_BASE
        } else {
            base
        }
    }
}
