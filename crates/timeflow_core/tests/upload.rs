use chrono::{Duration, TimeZone, Utc};
use timeflow_core::{
    EntityStore, StoreError, UploadError, UploadOutcome, UploadRequest, UploadScheduler,
};

const MAX_BYTES: u64 = 10 * 1024 * 1024;

fn request(project_id: &str, name: &str) -> UploadRequest {
    UploadRequest {
        project_id: project_id.to_string(),
        name: name.to_string(),
        description: Some("Signed copy".to_string()),
        mime_type: None,
        size: 4096,
    }
}

fn scheduler() -> UploadScheduler {
    UploadScheduler::new(Duration::milliseconds(1_500), MAX_BYTES)
}

#[test]
fn upload_completes_only_after_delay() {
    let mut store = EntityStore::seeded();
    let mut uploads = scheduler();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    let ticket = uploads.schedule(request("1", "contract.pdf"), now).unwrap();
    assert_eq!(ticket.due_at, now + Duration::milliseconds(1_500));
    assert_eq!(uploads.next_due_at(), Some(ticket.due_at));

    assert!(uploads
        .run_due(now + Duration::milliseconds(1_499), &mut store)
        .is_empty());
    assert!(store.get_project("1").unwrap().files.is_none());

    let outcomes = uploads.run_due(ticket.due_at, &mut store);
    assert_eq!(outcomes.len(), 1);
    let UploadOutcome::Attached { file, project_id, .. } = &outcomes[0] else {
        panic!("expected attached outcome, got {:?}", outcomes[0]);
    };
    assert_eq!(project_id, "1");
    assert_eq!(file.mime_type, "document");
    assert_eq!(file.upload_date, ticket.due_at);
    assert!(file.url.starts_with("blob:timeflow/"));
    assert_eq!(store.get_project("1").unwrap().files(), &[file.clone()]);
    assert_eq!(uploads.pending_count(), 0);
}

#[test]
fn invalid_request_is_not_queued() {
    let mut uploads = scheduler();
    let now = Utc::now();

    let mut oversized = request("1", "video.mov");
    oversized.size = MAX_BYTES + 1;
    assert!(matches!(
        uploads.schedule(oversized, now),
        Err(UploadError::FileTooLarge { .. })
    ));
    assert_eq!(
        uploads.schedule(request("1", ""), now).unwrap_err(),
        UploadError::MissingFileName
    );
    assert_eq!(uploads.pending_count(), 0);
}

#[test]
fn uploads_complete_in_scheduling_order_with_unique_ids() {
    let mut store = EntityStore::seeded();
    let mut uploads = scheduler();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    uploads.schedule(request("2", "a.png"), now).unwrap();
    uploads.schedule(request("2", "b.png"), now).unwrap();
    uploads
        .schedule(request("2", "c.png"), now + Duration::seconds(10))
        .unwrap();

    let outcomes = uploads.run_due(now + Duration::seconds(2), &mut store);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(uploads.pending_count(), 1);

    let names: Vec<&str> = store
        .get_project("2")
        .unwrap()
        .files()
        .iter()
        .map(|file| file.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
    let files = store.get_project("2").unwrap().files();
    assert_ne!(files[0].id, files[1].id);
}

#[test]
fn upload_still_attaches_after_dialog_is_dismissed() {
    let mut store = EntityStore::seeded();
    let mut uploads = scheduler();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    let ticket = uploads.schedule(request("3", "brief.docx"), now).unwrap();
    // No cancellation exists; whatever the caller does, the queued upload runs.
    let outcomes = uploads.run_due(ticket.due_at + Duration::minutes(5), &mut store);

    assert!(matches!(outcomes[0], UploadOutcome::Attached { .. }));
    assert_eq!(store.get_project("3").unwrap().files().len(), 1);
}

#[test]
fn upload_for_unknown_project_reports_missing() {
    let mut store = EntityStore::seeded();
    let snapshot = store.clone();
    let mut uploads = scheduler();
    let now = Utc::now();

    let ticket = uploads.schedule(request("404", "lost.txt"), now).unwrap();
    let outcomes = uploads.run_due(ticket.due_at, &mut store);

    assert_eq!(
        outcomes,
        vec![UploadOutcome::ProjectMissing {
            ticket,
            error: StoreError::ProjectNotFound("404".to_string()),
        }]
    );
    assert_eq!(store, snapshot);
}
