//! Core runtime configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::logging::default_log_level;
use crate::views::dashboard::DashboardLimits;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_UPLOAD_DELAY_MS: u64 = 1_500;
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_TIMELINE_VISIBLE_DAYS: u32 = 14;

/// Configuration consumed by `AppContext` and the logging bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// Local storage database file; `None` keeps local storage in memory.
    pub storage_path: Option<PathBuf>,
    /// Simulated upload latency.
    pub upload_delay_ms: u64,
    pub max_upload_bytes: u64,
    pub recent_projects_limit: usize,
    pub upcoming_deadlines_limit: usize,
    pub top_performers_limit: usize,
    pub recent_notifications_limit: usize,
    pub timeline_visible_days: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let limits = DashboardLimits::default();
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            storage_path: None,
            upload_delay_ms: DEFAULT_UPLOAD_DELAY_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            recent_projects_limit: limits.recent_projects,
            upcoming_deadlines_limit: limits.upcoming_deadlines,
            top_performers_limit: limits.top_performers,
            recent_notifications_limit: limits.recent_notifications,
            timeline_visible_days: DEFAULT_TIMELINE_VISIBLE_DAYS,
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config document; missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn dashboard_limits(&self) -> DashboardLimits {
        DashboardLimits {
            recent_projects: self.recent_projects_limit,
            upcoming_deadlines: self.upcoming_deadlines_limit,
            top_performers: self.top_performers_limit,
            recent_notifications: self.recent_notifications_limit,
        }
    }

    pub fn upload_delay(&self) -> Duration {
        let millis = i64::try_from(self.upload_delay_ms).unwrap_or(i64::MAX);
        Duration::try_milliseconds(millis).unwrap_or(Duration::MAX)
    }
}
