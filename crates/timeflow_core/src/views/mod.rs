//! Read-only projections over the entity store.
//!
//! # Responsibility
//! - Dashboard lists (recent projects, upcoming deadlines, top performers).
//! - Gantt-style timeline visibility and bar geometry.
//!
//! # Invariants
//! - Every projection is recomputed from current collections on each call;
//!   nothing is cached.
//! - Sorting is stable, so ties keep collection order.

pub mod dashboard;
pub mod timeline;
