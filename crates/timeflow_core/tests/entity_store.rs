use chrono::NaiveDate;
use std::collections::HashSet;
use timeflow_core::{
    Availability, EntityStore, NewProject, NewTask, NewTeamMember, ProjectFile, ProjectPatch,
    StoreError, TaskPatch, TaskPriority, ValidationError, WorkStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_project(name: &str, department: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: "Quarterly planning".to_string(),
        start_date: date(2024, 10, 1),
        end_date: date(2024, 12, 31),
        status: WorkStatus::Planned,
        progress: 0,
        department: department.to_string(),
        files: None,
    }
}

fn new_task(title: &str, status: WorkStatus) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: "Do the work".to_string(),
        start_date: date(2024, 3, 2),
        end_date: date(2024, 3, 9),
        status,
        progress: 42,
        department: "Design".to_string(),
        assigned_to: vec!["1".to_string(), "2".to_string()],
        priority: Some(TaskPriority::Low),
    }
}

fn sample_file(id: &str) -> ProjectFile {
    ProjectFile {
        id: id.to_string(),
        name: "brief.pdf".to_string(),
        description: None,
        mime_type: "application/pdf".to_string(),
        size: 2048,
        upload_date: chrono::Utc::now(),
        url: "blob:timeflow/brief".to_string(),
    }
}

#[test]
fn seeded_store_exposes_fixed_data() {
    let store = EntityStore::seeded();
    assert_eq!(store.projects().len(), 3);
    assert_eq!(store.team_members().len(), 9);
    assert_eq!(store.departments().len(), 3);
    assert_eq!(
        store.get_task("1", "101").map(|task| task.title.as_str()),
        Some("Create Wireframes")
    );
    assert!(store.get_task("2", "101").is_none());
    assert!(store.get_project("missing").is_none());
}

#[test]
fn add_project_assigns_fresh_id_and_empty_collections() {
    let mut store = EntityStore::seeded();
    let before: HashSet<String> = store
        .projects()
        .iter()
        .map(|project| project.id.clone())
        .collect();

    let mut input = new_project("Rebrand", "Design");
    input.status = WorkStatus::InProgress;
    input.progress = 15;
    input.files = Some(vec![sample_file("f0")]);
    let created = store.add_project(input.clone()).clone();

    assert!(!before.contains(&created.id));
    assert!(created.tasks.is_empty());
    assert!(created.team.is_empty());
    assert_eq!(created.name, input.name);
    assert_eq!(created.description, input.description);
    assert_eq!(created.start_date, input.start_date);
    assert_eq!(created.end_date, input.end_date);
    assert_eq!(created.status, input.status);
    assert_eq!(created.progress, input.progress);
    assert_eq!(created.department, input.department);
    assert_eq!(created.files, input.files);
    assert_eq!(store.projects().len(), 4);
    assert_eq!(store.projects().last(), Some(&created));
}

#[test]
fn update_project_changes_only_given_fields() {
    let mut store = EntityStore::seeded();
    let original = store.get_project("1").unwrap().clone();

    let patch = ProjectPatch {
        progress: Some(80),
        ..ProjectPatch::default()
    };
    let updated = store.update_project("1", &patch).unwrap().clone();

    assert_eq!(updated.progress, 80);
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.tasks, original.tasks);
    assert_eq!(updated.team, original.team);
}

#[test]
fn update_project_deduplicates_team() {
    let mut store = EntityStore::seeded();
    let patch = ProjectPatch {
        team: Some(vec!["1".to_string(), "4".to_string(), "1".to_string()]),
        ..ProjectPatch::default()
    };
    let updated = store.update_project("1", &patch).unwrap();
    assert_eq!(updated.team, vec!["1".to_string(), "4".to_string()]);
}

#[test]
fn unknown_ids_leave_store_unchanged() {
    let mut store = EntityStore::seeded();
    let snapshot = store.clone();

    let patch = ProjectPatch {
        name: Some("ghost".to_string()),
        ..ProjectPatch::default()
    };
    assert_eq!(
        store.update_project("999", &patch).unwrap_err(),
        StoreError::ProjectNotFound("999".to_string())
    );
    assert!(matches!(
        store.update_task("1", "999", &TaskPatch::default()),
        Err(StoreError::TaskNotFound { .. })
    ));
    assert!(store
        .add_task("999", new_task("orphan", WorkStatus::Planned))
        .is_err());
    assert!(store.add_file_to_project("999", sample_file("f1")).is_err());

    assert_eq!(store, snapshot);
}

#[test]
fn add_task_discards_requested_assignees() {
    let mut store = EntityStore::seeded();
    let task = store
        .add_task("1", new_task("Audit", WorkStatus::InProgress))
        .unwrap()
        .clone();

    assert!(task.assigned_to.is_empty());
    assert_eq!(task.progress, 42);
    assert_eq!(store.get_project("1").unwrap().tasks.len(), 4);
    assert_eq!(store.get_project("1").unwrap().tasks.last(), Some(&task));
}

#[test]
fn update_task_merges_patch() {
    let mut store = EntityStore::seeded();
    let patch = TaskPatch {
        status: Some(WorkStatus::Completed),
        progress: Some(100),
        ..TaskPatch::default()
    };
    let task = store.update_task("1", "103", &patch).unwrap();
    assert_eq!(task.status, WorkStatus::Completed);
    assert_eq!(task.progress, 100);
    assert_eq!(task.title, "Prototype Development");
}

#[test]
fn bulk_add_derives_progress_from_status() {
    let mut store = EntityStore::seeded();
    let ids = store
        .add_tasks(
            "2",
            vec![
                new_task("Alpha", WorkStatus::Completed),
                new_task("Beta", WorkStatus::InProgress),
                new_task("Gamma", WorkStatus::Planned),
            ],
        )
        .unwrap();

    assert_eq!(ids.len(), 3);
    let progress: Vec<u8> = ids
        .iter()
        .map(|id| store.get_task("2", id).unwrap().progress)
        .collect();
    assert_eq!(progress, vec![100, 50, 0]);
}

#[test]
fn bulk_add_is_all_or_nothing() {
    let mut store = EntityStore::seeded();
    let mut invalid = new_task("", WorkStatus::Planned);
    invalid.title = "  ".to_string();

    let err = store
        .add_tasks("2", vec![new_task("ok", WorkStatus::Planned), invalid])
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::Validation {
            index: 1,
            source: ValidationError::MissingField("title"),
        }
    );
    assert_eq!(store.get_project("2").unwrap().tasks.len(), 3);
}

#[test]
fn assign_task_updates_task_and_member() {
    let mut store = EntityStore::seeded();

    let assignment = store.assign_task("4", "1", "101").unwrap();

    assert_eq!(assignment.member_task_count, 15);
    assert!(assignment.joined_project);
    let task = store.get_task("1", "101").unwrap();
    assert_eq!(
        task.assigned_to,
        vec!["1".to_string(), "2".to_string(), "4".to_string()]
    );
    let member = store.get_team_member("4").unwrap();
    assert_eq!(member.tasks, 15);
    assert_eq!(member.projects, vec!["2".to_string(), "1".to_string()]);
}

#[test]
fn repeated_assignment_appends_again() {
    let mut store = EntityStore::seeded();
    store.assign_task("4", "1", "101").unwrap();
    let second = store.assign_task("4", "1", "101").unwrap();

    assert!(!second.joined_project);
    assert_eq!(second.member_task_count, 16);
    let assignees = &store.get_task("1", "101").unwrap().assigned_to;
    assert_eq!(assignees.iter().filter(|id| *id == "4").count(), 2);
    assert_eq!(
        store.get_team_member("4").unwrap().projects,
        vec!["2".to_string(), "1".to_string()]
    );
}

#[test]
fn assign_task_with_unknown_member_changes_nothing() {
    let mut store = EntityStore::seeded();
    let snapshot = store.clone();

    assert_eq!(
        store.assign_task("99", "1", "101").unwrap_err(),
        StoreError::MemberNotFound("99".to_string())
    );
    assert_eq!(store, snapshot);
}

#[test]
fn filter_projects_by_department() {
    let store = EntityStore::seeded();
    let marketing: Vec<&str> = store
        .filter_projects("Marketing")
        .into_iter()
        .map(|project| project.id.as_str())
        .collect();
    assert_eq!(marketing, vec!["3"]);
    assert!(store.filter_projects("Finance").is_empty());
}

#[test]
fn add_team_member_starts_with_zero_counters() {
    let mut store = EntityStore::seeded();
    let member = store
        .add_team_member(NewTeamMember {
            name: "Ana Ruiz".to_string(),
            role: "QA Engineer".to_string(),
            department: "Development".to_string(),
            avatar: String::new(),
            email: "ana.ruiz@example.com".to_string(),
            performance: 80,
            availability: Availability::Available,
        })
        .clone();

    assert_eq!(member.tasks, 0);
    assert_eq!(member.completed_tasks, 0);
    assert!(member.projects.is_empty());
    assert_eq!(store.team_members().len(), 10);
    assert_eq!(
        store
            .department_with_members("Development")
            .and_then(|department| department.members)
            .map(|members| members.len()),
        Some(4)
    );
}

#[test]
fn add_file_creates_and_extends_file_list() {
    let mut store = EntityStore::seeded();
    assert!(store.get_project("3").unwrap().files.is_none());

    store.add_file_to_project("3", sample_file("f1")).unwrap();
    store.add_file_to_project("3", sample_file("f2")).unwrap();

    let ids: Vec<&str> = store
        .get_project("3")
        .unwrap()
        .files()
        .iter()
        .map(|file| file.id.as_str())
        .collect();
    assert_eq!(ids, vec!["f1", "f2"]);
}

#[test]
fn store_error_codes_are_stable() {
    assert_eq!(
        StoreError::ProjectNotFound("1".to_string()).code(),
        "project_not_found"
    );
    assert_eq!(
        StoreError::MemberNotFound("1".to_string()).code(),
        "member_not_found"
    );
}

#[test]
fn assignable_tasks_skip_completed_and_already_assigned() {
    let store = EntityStore::seeded();
    let ids = |tasks: Vec<&timeflow_core::Task>| -> Vec<String> {
        tasks.into_iter().map(|task| task.id.clone()).collect()
    };

    // 101 is completed; 102 is already assigned to member 1.
    assert_eq!(ids(store.assignable_tasks("1", None)), vec!["102", "103"]);
    assert_eq!(ids(store.assignable_tasks("1", Some("1"))), vec!["103"]);
    assert_eq!(ids(store.assignable_tasks("1", Some("4"))), vec!["102", "103"]);
    assert!(store.assignable_tasks("999", Some("1")).is_empty());
}

#[test]
fn assignable_tasks_follow_later_assignment() {
    let mut store = EntityStore::seeded();
    store.assign_task("4", "1", "103").unwrap();

    let ids: Vec<&str> = store
        .assignable_tasks("1", Some("4"))
        .into_iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, vec!["102"]);
}

#[test]
fn available_projects_exclude_joined_ones() {
    let mut store = EntityStore::seeded();
    let ids = |store: &EntityStore, member_id: &str| -> Vec<String> {
        store
            .available_projects(member_id)
            .into_iter()
            .map(|project| project.id.clone())
            .collect()
    };

    assert_eq!(ids(&store, "4"), vec!["1", "3"]);
    assert_eq!(ids(&store, "unknown"), vec!["1", "2", "3"]);

    store.assign_task("4", "3", "301").unwrap();
    assert_eq!(ids(&store, "4"), vec!["1"]);
}
