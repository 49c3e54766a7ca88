//! Logged-in user profile, the only record persisted across restarts.

use serde::{Deserialize, Serialize};

/// Profile of the logged-in user, stored verbatim as one JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_tasks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tasks: Option<u32>,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub completed_tasks: Option<u32>,
    pub total_tasks: Option<u32>,
}

impl UserProfilePatch {
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(avatar) = &self.avatar {
            profile.avatar = Some(avatar.clone());
        }
        if let Some(role) = &self.role {
            profile.role = Some(role.clone());
        }
        if let Some(department) = &self.department {
            profile.department = Some(department.clone());
        }
        if let Some(completed_tasks) = self.completed_tasks {
            profile.completed_tasks = Some(completed_tasks);
        }
        if let Some(total_tasks) = self.total_tasks {
            profile.total_tasks = Some(total_tasks);
        }
    }
}
