//! Application context owning every piece of process state.
//!
//! # Responsibility
//! - Construct the seeded entity store, restored session and upload queue
//!   once at startup.
//! - Be the single handle passed to presentation-layer callers.

use crate::config::CoreConfig;
use crate::db::LocalStorage;
use crate::session::{SessionResult, UserSession};
use crate::store::EntityStore;
use crate::upload::{UploadOutcome, UploadScheduler};
use crate::views::dashboard::DashboardSnapshot;
use crate::views::timeline::TimelineWindow;
use chrono::{DateTime, Utc};
use log::info;

/// Owned application state for one process lifetime.
pub struct AppContext<S: LocalStorage> {
    pub config: CoreConfig,
    pub store: EntityStore,
    pub session: UserSession<S>,
    pub uploads: UploadScheduler,
}

impl<S: LocalStorage> AppContext<S> {
    /// Builds the context from seed data and the persisted session.
    ///
    /// # Errors
    /// - Session restore errors from local storage.
    pub fn new(config: CoreConfig, storage: S) -> SessionResult<Self> {
        let session = UserSession::restore(storage)?;
        let uploads = UploadScheduler::from_config(&config);
        let store = EntityStore::seeded();
        info!(
            "event=context_init module=core status=ok logged_in={}",
            session.is_logged_in()
        );
        Ok(Self {
            config,
            store,
            session,
            uploads,
        })
    }

    /// Dashboard projection at `now` using configured limits.
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot::build(
            &self.store,
            self.session.notifications(),
            now,
            &self.config.dashboard_limits(),
        )
    }

    /// Initial timeline window for `project_id` at the configured zoom.
    pub fn timeline(&self, project_id: &str) -> Option<TimelineWindow> {
        let project = self.store.get_project(project_id)?;
        Some(TimelineWindow::new(
            project.start_date,
            project.end_date,
            self.config.timeline_visible_days,
        ))
    }

    /// Completes due uploads against the owned store.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<UploadOutcome> {
        self.uploads.run_due(now, &mut self.store)
    }
}
