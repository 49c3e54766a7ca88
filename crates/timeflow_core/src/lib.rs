//! Core domain logic for TimeFlow.
//! This crate is the single source of truth for project, task and team invariants.

pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod session;
pub mod store;
pub mod upload;
pub mod views;

pub use config::CoreConfig;
pub use context::AppContext;
pub use db::{open_db, open_db_in_memory, DbError, DbResult, LocalStorage, SqliteLocalStorage};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::member::{Availability, Department, NewTeamMember, TeamMember};
pub use model::project::{
    FileId, MemberId, NewProject, NewTask, Project, ProjectFile, ProjectId, ProjectPatch, Task,
    TaskId, TaskPatch, TaskPriority, WorkStatus,
};
pub use model::notification::{Notification, NotificationKind};
pub use model::user::{UserProfile, UserProfilePatch};
pub use model::ValidationError;
pub use session::{SessionError, SessionResult, UserSession};
pub use store::{Assignment, EntityStore, StoreError, StoreResult};
pub use upload::{UploadError, UploadOutcome, UploadRequest, UploadScheduler, UploadTicket};
pub use views::dashboard::{DashboardLimits, DashboardSnapshot};
pub use views::timeline::{TaskBar, TimelineWindow};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
