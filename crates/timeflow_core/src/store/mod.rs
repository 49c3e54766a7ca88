//! In-memory entity store for projects, tasks, team members and departments.
//!
//! # Responsibility
//! - Own the three top-level collections and be their sole mutation surface.
//! - Report unknown ids as semantic errors instead of silently ignoring them.
//!
//! # Invariants
//! - A mutation that returns `Err` leaves every collection unchanged.
//! - Lookups return `None` for unknown ids; they never error.
//! - The store performs no required-field validation on single-entity adds.

use crate::model::project::{MemberId, ProjectId, TaskId};
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod entity_store;
pub mod seed;

pub use entity_store::{Assignment, EntityStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity store error for mutations referencing unknown records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    ProjectNotFound(ProjectId),
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
    MemberNotFound(MemberId),
    /// Bulk input entry at `index` failed required-field validation.
    Validation {
        index: usize,
        source: ValidationError,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound {
                project_id,
                task_id,
            } => write!(f, "task not found: {task_id} in project {project_id}"),
            Self::MemberNotFound(id) => write!(f, "team member not found: {id}"),
            Self::Validation { index, source } => write!(f, "invalid entry #{index}: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StoreError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "project_not_found",
            Self::TaskNotFound { .. } => "task_not_found",
            Self::MemberNotFound(_) => "member_not_found",
            Self::Validation { .. } => "validation_failed",
        }
    }
}
