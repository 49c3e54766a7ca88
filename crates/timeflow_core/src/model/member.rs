//! Team member and department records.
//!
//! # Invariants
//! - `TeamMember::projects` should mirror the projects whose tasks list the
//!   member as assignee. Only `EntityStore::assign_task` maintains it.
//! - `performance` is a 0..=100 score.
//! - Departments are keyed by `name`.

use super::project::{MemberId, ProjectId};
use super::validation::{require_percentage, require_text};
use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Current availability shown in the team directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Busy")]
    Busy,
    #[serde(rename = "In a meeting")]
    InMeeting,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
            Self::InMeeting => "In a meeting",
        }
    }
}

/// Person record with workload counters and project associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    pub department: String,
    /// Avatar image reference.
    pub avatar: String,
    pub email: String,
    /// Number of task assignments.
    pub tasks: u32,
    pub completed_tasks: u32,
    pub performance: u8,
    pub availability: Availability,
    pub projects: Vec<ProjectId>,
}

/// Creation input for a team member.
///
/// Id, counters and project associations are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub department: String,
    pub avatar: String,
    pub email: String,
    pub performance: u8,
    pub availability: Availability,
}

impl NewTeamMember {
    /// Required-field checks performed by the add-member form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("role", &self.role)?;
        require_text("department", &self.department)?;
        require_text("email", &self.email)?;
        require_percentage(self.performance)
    }

    pub(crate) fn into_member(self, id: MemberId) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            role: self.role,
            department: self.department,
            avatar: self.avatar,
            email: self.email,
            tasks: 0,
            completed_tasks: 0,
            performance: self.performance,
            availability: self.availability,
            projects: Vec::new(),
        }
    }
}

/// Named grouping used for filtering and display coloring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub performance: u8,
    /// Hex display color, e.g. `#FFCF00`.
    pub color: String,
    /// Cached member list; populated only by `EntityStore::department_with_members`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<TeamMember>>,
}

impl Department {
    pub fn new(name: impl Into<String>, performance: u8, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            performance,
            color: color.into(),
            members: None,
        }
    }
}
