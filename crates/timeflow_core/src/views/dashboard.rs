//! Dashboard projections.

use crate::metrics::{days_left, start_of_day_utc};
use crate::model::member::TeamMember;
use crate::model::notification::Notification;
use crate::model::project::Project;
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Projects sorted by start date, newest first, truncated to `limit`.
pub fn recent_projects(projects: &[Project], limit: usize) -> Vec<&Project> {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    sorted.truncate(limit);
    sorted
}

/// Projects ending strictly after `now`, soonest first, truncated to `limit`.
pub fn upcoming_deadlines(projects: &[Project], now: DateTime<Utc>, limit: usize) -> Vec<&Project> {
    let mut upcoming: Vec<&Project> = projects
        .iter()
        .filter(|project| start_of_day_utc(project.end_date) > now)
        .collect();
    upcoming.sort_by(|a, b| a.end_date.cmp(&b.end_date));
    upcoming.truncate(limit);
    upcoming
}

/// Members sorted by performance score, highest first, truncated to `limit`.
pub fn top_performers(members: &[TeamMember], limit: usize) -> Vec<&TeamMember> {
    let mut sorted: Vec<&TeamMember> = members.iter().collect();
    sorted.sort_by(|a, b| b.performance.cmp(&a.performance));
    sorted.truncate(limit);
    sorted
}

/// Leading `limit` notifications, in their stored order.
pub fn recent_notifications(notifications: &[Notification], limit: usize) -> &[Notification] {
    &notifications[..limit.min(notifications.len())]
}

/// Per-list limits for `DashboardSnapshot::build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLimits {
    pub recent_projects: usize,
    pub upcoming_deadlines: usize,
    pub top_performers: usize,
    pub recent_notifications: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            recent_projects: 3,
            upcoming_deadlines: 3,
            top_performers: 4,
            recent_notifications: 3,
        }
    }
}

/// Owned dashboard projection computed at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub project_count: usize,
    pub member_count: usize,
    /// Days until the nearest upcoming deadline, 0 when there is none.
    pub next_deadline_days_left: u32,
    pub recent_projects: Vec<Project>,
    pub upcoming_deadlines: Vec<Project>,
    pub top_performers: Vec<TeamMember>,
    pub recent_notifications: Vec<Notification>,
}

impl DashboardSnapshot {
    pub fn build(
        store: &EntityStore,
        notifications: &[Notification],
        now: DateTime<Utc>,
        limits: &DashboardLimits,
    ) -> Self {
        // Nearest deadline is independent of how many deadlines are listed.
        let next_deadline_days_left = upcoming_deadlines(store.projects(), now, 1)
            .first()
            .map_or(0, |project| days_left(project.end_date, now));
        let upcoming = upcoming_deadlines(store.projects(), now, limits.upcoming_deadlines);

        Self {
            project_count: store.projects().len(),
            member_count: store.team_members().len(),
            next_deadline_days_left,
            recent_projects: recent_projects(store.projects(), limits.recent_projects)
                .into_iter()
                .cloned()
                .collect(),
            upcoming_deadlines: upcoming.into_iter().cloned().collect(),
            top_performers: top_performers(store.team_members(), limits.top_performers)
                .into_iter()
                .cloned()
                .collect(),
            recent_notifications: recent_notifications(notifications, limits.recent_notifications)
                .to_vec(),
        }
    }
}
