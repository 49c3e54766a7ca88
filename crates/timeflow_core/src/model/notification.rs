//! In-app notifications shown to the logged-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification category, serialized lowercase as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Deadline,
    Task,
    Update,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::Task => "task",
            Self::Update => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
}
