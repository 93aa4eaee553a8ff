//! Application constants and configuration

pub const APP_NAME: &str = "FileBot Admin";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend base address used when neither settings nor the environment name one
pub const DEFAULT_API_BASE: &str = "http://localhost:8001/api";
/// Environment variable that overrides the configured API base at startup
pub const API_BASE_ENV: &str = "FILEBOT_ADMIN_API";

/// Notification banners expire this long after they are shown
pub const NOTIFICATION_TTL: std::time::Duration = std::time::Duration::from_secs(5);

/// Recent activity feed is capped to this many entries
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Number of days plotted by the dashboard uploads chart
pub const CHART_DAYS: usize = 7;
