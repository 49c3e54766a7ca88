//! Domain model for projects, tasks, team members, the session user and
//! their notifications.
//!
//! # Responsibility
//! - Define canonical records shared by the entity store and derived views.
//! - Define creation inputs and partial-update patches for every mutable record.
//! - Own required-field validation used by form-style callers.
//!
//! # Invariants
//! - Every project, task, member and file is identified by a stable string id.
//! - A task belongs to exactly one project.
//! - Nothing is hard-deleted; records live until the owning store is dropped.

pub mod member;
pub mod notification;
pub mod project;
pub mod user;
mod validation;

pub use validation::ValidationError;
