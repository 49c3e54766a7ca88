use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use timeflow_core::session::USER_STORAGE_KEY;
use timeflow_core::{
    open_db, open_db_in_memory, AppContext, CoreConfig, LocalStorage, NotificationKind,
    SessionError, SqliteLocalStorage, UserProfilePatch, UserSession,
};

#[test]
fn login_persists_and_restores_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timeflow.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut session = UserSession::restore(SqliteLocalStorage::new(&conn)).unwrap();
        assert!(!session.is_logged_in());

        let user = session.login("jane.doe@example.com", "secret").unwrap();
        assert_eq!(user.name, "Jane Doe");
    }

    let conn = open_db(&path).unwrap();
    let session = UserSession::restore(SqliteLocalStorage::new(&conn)).unwrap();
    let user = session.user().unwrap();
    assert_eq!(user.email, "jane.doe@example.com");
    assert_eq!(user.id, "user1");
}

#[test]
fn blank_credentials_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLocalStorage::new(&conn);
    let mut session = UserSession::restore(storage).unwrap();

    assert!(matches!(
        session.login("  ", "secret"),
        Err(SessionError::MissingCredentials)
    ));
    assert!(matches!(
        session.login("jane@example.com", " "),
        Err(SessionError::MissingCredentials)
    ));
    assert!(!session.is_logged_in());
    assert_eq!(storage.get_item(USER_STORAGE_KEY).unwrap(), None);
}

#[test]
fn logout_clears_memory_and_storage() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLocalStorage::new(&conn);
    let mut session = UserSession::restore(storage).unwrap();
    session.login("jane@example.com", "pw").unwrap();
    assert!(storage.get_item(USER_STORAGE_KEY).unwrap().is_some());

    session.logout().unwrap();

    assert!(session.user().is_none());
    assert_eq!(storage.get_item(USER_STORAGE_KEY).unwrap(), None);
}

#[test]
fn update_profile_merges_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLocalStorage::new(&conn);
    let mut session = UserSession::restore(storage).unwrap();
    session.login("sarah.mitchell@timeflow.com", "pw").unwrap();

    let patch = UserProfilePatch {
        role: Some("Design Lead".to_string()),
        ..UserProfilePatch::default()
    };
    let updated = session.update_profile(&patch).unwrap().clone();
    assert_eq!(updated.role.as_deref(), Some("Design Lead"));
    assert_eq!(updated.department.as_deref(), Some("Design"));

    let restored = UserSession::restore(storage).unwrap();
    assert_eq!(restored.user(), Some(&updated));
}

#[test]
fn update_profile_requires_login() {
    let conn = open_db_in_memory().unwrap();
    let mut session = UserSession::restore(SqliteLocalStorage::new(&conn)).unwrap();
    assert!(matches!(
        session.update_profile(&UserProfilePatch::default()),
        Err(SessionError::NotLoggedIn)
    ));
}

#[test]
fn invalid_stored_profile_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLocalStorage::new(&conn);
    storage.set_item(USER_STORAGE_KEY, "not json").unwrap();

    assert!(matches!(
        UserSession::restore(storage),
        Err(SessionError::InvalidStoredProfile(_))
    ));
}

#[test]
fn app_context_restores_session_and_seeds_store() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLocalStorage::new(&conn);
    UserSession::restore(storage)
        .unwrap()
        .login("jane@example.com", "pw")
        .unwrap();

    let context = AppContext::new(CoreConfig::default(), storage).unwrap();

    assert!(context.session.is_logged_in());
    assert_eq!(context.store.projects().len(), 3);
    assert_eq!(context.uploads.pending_count(), 0);
}

#[test]
fn app_context_opens_timeline_at_configured_zoom() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig {
        timeline_visible_days: 7,
        ..CoreConfig::default()
    };
    let context = AppContext::new(config, SqliteLocalStorage::new(&conn)).unwrap();

    let window = context.timeline("2").unwrap();
    assert_eq!(window.visible_days(), 7);
    assert_eq!(window.offset_days(), 0);
    assert!(context.timeline("missing").is_none());
}

#[test]
fn app_context_tick_attaches_due_uploads() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig {
        upload_delay_ms: 0,
        ..CoreConfig::default()
    };
    let mut context = AppContext::new(config, SqliteLocalStorage::new(&conn)).unwrap();
    let now = chrono::Utc::now();

    context
        .uploads
        .schedule(
            timeflow_core::UploadRequest {
                project_id: "1".to_string(),
                name: "notes.txt".to_string(),
                description: None,
                mime_type: Some("text/plain".to_string()),
                size: 12,
            },
            now,
        )
        .unwrap();

    assert_eq!(context.tick(now).len(), 1);
    assert_eq!(context.store.get_project("1").unwrap().files().len(), 1);
    assert_eq!(context.dashboard(now).project_count, 3);
}

#[test]
fn notifications_are_seeded_and_marked_read_in_memory() {
    let conn = open_db_in_memory().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let mut session = UserSession::restore_at(SqliteLocalStorage::new(&conn), now).unwrap();

    assert_eq!(session.notifications().len(), 3);
    assert!(session.notifications().iter().all(|item| item.date == now));
    assert_eq!(session.notifications()[0].kind, NotificationKind::Deadline);
    assert_eq!(session.unread_notification_count(), 2);

    assert!(session.mark_notification_read("1"));
    assert_eq!(session.unread_notification_count(), 1);
    assert!(session.mark_notification_read("1"));
    assert_eq!(session.unread_notification_count(), 1);
    assert!(!session.mark_notification_read("missing"));
}

#[test]
fn notifications_are_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLocalStorage::new(&conn);
    let mut session = UserSession::restore(storage).unwrap();
    session.login("jane@example.com", "pw").unwrap();
    session.mark_notification_read("1");

    let restored = UserSession::restore(storage).unwrap();
    assert_eq!(restored.unread_notification_count(), 2);
}

#[test]
fn app_context_dashboard_lists_recent_notifications() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig {
        recent_notifications_limit: 2,
        ..CoreConfig::default()
    };
    let context = AppContext::new(config, SqliteLocalStorage::new(&conn)).unwrap();

    let snapshot = context.dashboard(Utc::now());
    let ids: Vec<&str> = snapshot
        .recent_notifications
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}
