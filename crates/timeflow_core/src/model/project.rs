//! Project, task and attached-file records.
//!
//! # Responsibility
//! - Define the project aggregate (project + owned tasks + attached files).
//! - Define creation inputs (`NewProject`, `NewTask`) and merge patches
//!   (`ProjectPatch`, `TaskPatch`).
//!
//! # Invariants
//! - `Project::team` holds no duplicate member ids.
//! - `Task::start_date <= Task::end_date` is expected by timeline views but is
//!   only checked by `NewTask::validate`.
//! - `progress` is a manually recorded 0..=100 value; it is never derived from
//!   dates.

use super::validation::{require_date_order, require_percentage, require_text};
use super::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Stable project identifier.
pub type ProjectId = String;
/// Task identifier, unique across all projects.
pub type TaskId = String;
/// Stable team-member identifier.
pub type MemberId = String;
/// Attached-file identifier.
pub type FileId = String;

/// Lifecycle status shared by projects and tasks.
///
/// Any status may move to any other; no transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStatus {
    #[serde(rename = "Planned")]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Completed")]
    Completed,
}

impl WorkStatus {
    /// Display label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }

    /// Parses a display label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planned" => Some(Self::Planned),
            "in progress" => Some(Self::InProgress),
            "on hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Progress assigned to bulk-created tasks that start in this status.
    pub fn default_progress(self) -> u8 {
        match self {
            Self::Completed => 100,
            Self::InProgress => 50,
            Self::Planned | Self::OnHold => 0,
        }
    }
}

impl Display for WorkStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// File attached to a project through the upload flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: FileId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type, serialized as `type`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    /// Retrievable URL; for local uploads an ephemeral object reference.
    pub url: String,
}

/// Unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WorkStatus,
    pub progress: u8,
    pub department: String,
    /// Assignee ids. Repeated assignment may leave duplicates.
    pub assigned_to: Vec<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

/// Top-level unit of work with its own timeframe and ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WorkStatus,
    pub progress: u8,
    /// Free-form department label.
    pub department: String,
    pub team: Vec<MemberId>,
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ProjectFile>>,
}

impl Project {
    /// Returns one owned task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Attached files, empty when none were ever uploaded.
    pub fn files(&self) -> &[ProjectFile] {
        self.files.as_deref().unwrap_or(&[])
    }
}

/// Creation input for a project. Id, tasks and team are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WorkStatus,
    pub progress: u8,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ProjectFile>>,
}

impl NewProject {
    /// Required-field checks performed by the project form.
    ///
    /// The store itself never calls this; it accepts whatever it is given.
    ///
    /// # Errors
    /// - `MissingField` for blank name, description or department.
    /// - `InvalidDateRange` when `end_date < start_date`.
    /// - `ProgressOutOfRange` when `progress > 100`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        require_text("department", &self.department)?;
        require_date_order(self.start_date, self.end_date)?;
        require_percentage(self.progress)
    }

    pub(crate) fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            progress: self.progress,
            department: self.department,
            team: Vec::new(),
            tasks: Vec::new(),
            files: self.files,
        }
    }
}

/// Creation input for a task. `assigned_to` is accepted but always discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WorkStatus,
    pub progress: u8,
    pub department: String,
    #[serde(default)]
    pub assigned_to: Vec<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl NewTask {
    /// Required-field checks performed by the task forms.
    ///
    /// # Errors
    /// - `MissingField` for blank title, description or department.
    /// - `InvalidDateRange` when `end_date < start_date`.
    /// - `ProgressOutOfRange` when `progress > 100`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("department", &self.department)?;
        require_date_order(self.start_date, self.end_date)?;
        require_percentage(self.progress)
    }

    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            progress: self.progress,
            department: self.department,
            assigned_to: Vec::new(),
            priority: self.priority,
        }
    }
}

/// Partial update for a project. `None` fields are left untouched.
///
/// The task sequence is not patchable here; it changes only through task
/// operations so task ownership stays with the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<WorkStatus>,
    pub progress: Option<u8>,
    pub department: Option<String>,
    pub team: Option<Vec<MemberId>>,
    /// `Some(None)` (JSON `null`) clears the file list.
    #[serde(
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub files: Option<Option<Vec<ProjectFile>>>,
}

impl ProjectPatch {
    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges every present field into `project`.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(progress) = self.progress {
            project.progress = progress;
        }
        if let Some(department) = &self.department {
            project.department = department.clone();
        }
        if let Some(team) = &self.team {
            let mut deduped: Vec<MemberId> = Vec::with_capacity(team.len());
            for member_id in team {
                if !deduped.contains(member_id) {
                    deduped.push(member_id.clone());
                }
            }
            project.team = deduped;
        }
        if let Some(files) = &self.files {
            project.files = files.clone();
        }
    }
}

/// Partial update for a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<WorkStatus>,
    pub progress: Option<u8>,
    pub department: Option<String>,
    pub assigned_to: Option<Vec<MemberId>>,
    /// `Some(None)` (JSON `null`) clears the priority.
    #[serde(
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Option<TaskPriority>>,
}

impl TaskPatch {
    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges every present field into `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(start_date) = self.start_date {
            task.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            task.end_date = end_date;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(progress) = self.progress {
            task.progress = progress;
        }
        if let Some(department) = &self.department {
            task.department = department.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            task.assigned_to = assigned_to.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

/// Maps a present field (including `null`) to `Some`, so patches can tell
/// "clear" apart from "leave unchanged".
fn nullable_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
