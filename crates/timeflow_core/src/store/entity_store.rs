//! Entity store implementation.
//!
//! # Responsibility
//! - CRUD over projects, owned tasks, team members and departments.
//! - Compound assignment (`assign_task`) touching tasks and members together.
//!
//! # Invariants
//! - Generated ids are UUID v4 strings checked against every existing id of
//!   the same kind (task ids across all projects).
//! - Updates are partial merges; omitted fields keep their prior values.
//! - `assign_task` resolves every id before mutating, so it applies fully or
//!   not at all.

use super::seed;
use super::{StoreError, StoreResult};
use crate::model::member::{Department, NewTeamMember, TeamMember};
use crate::model::project::{
    MemberId, NewProject, NewTask, Project, ProjectFile, ProjectId, ProjectPatch, Task, TaskId,
    TaskPatch, WorkStatus,
};
use log::{debug, info, warn};
use uuid::Uuid;

/// Outcome of one `assign_task` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub member_id: MemberId,
    pub project_id: ProjectId,
    pub task_id: TaskId,
    /// Member's assignment counter after the call.
    pub member_task_count: u32,
    /// Whether the project was newly added to the member's project set.
    pub joined_project: bool,
}

/// Owned in-memory registry of projects, team members and departments.
///
/// Constructed once per process (usually through `AppContext`) and passed by
/// reference to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    projects: Vec<Project>,
    team_members: Vec<TeamMember>,
    departments: Vec<Department>,
}

impl EntityStore {
    /// Creates a store over caller-provided collections.
    pub fn new(
        projects: Vec<Project>,
        team_members: Vec<TeamMember>,
        departments: Vec<Department>,
    ) -> Self {
        Self {
            projects,
            team_members,
            departments,
        }
    }

    /// Creates a store holding the fixed startup data set.
    pub fn seeded() -> Self {
        let store = Self::new(
            seed::initial_projects(),
            seed::initial_team_members(),
            seed::initial_departments(),
        );
        info!(
            "event=store_seed module=store status=ok projects={} members={} departments={}",
            store.projects.len(),
            store.team_members.len(),
            store.departments.len()
        );
        store
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn get_task(&self, project_id: &str, task_id: &str) -> Option<&Task> {
        self.get_project(project_id)?.task(task_id)
    }

    pub fn get_team_member(&self, id: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|member| member.id == id)
    }

    pub fn get_department(&self, name: &str) -> Option<&Department> {
        self.departments
            .iter()
            .find(|department| department.name == name)
    }

    /// Returns the department with its cached member list populated.
    pub fn department_with_members(&self, name: &str) -> Option<Department> {
        let mut department = self.get_department(name)?.clone();
        let members = self
            .team_members
            .iter()
            .filter(|member| member.department == name)
            .cloned()
            .collect();
        department.members = Some(members);
        Some(department)
    }

    /// Projects tagged with `department`, in collection order.
    pub fn filter_projects(&self, department: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.department == department)
            .collect()
    }

    /// Tasks of `project_id` open for assignment: not completed and, when
    /// `member_id` is given, not already assigned to that member.
    ///
    /// Unknown project ids yield an empty list.
    pub fn assignable_tasks(&self, project_id: &str, member_id: Option<&str>) -> Vec<&Task> {
        let Some(project) = self.get_project(project_id) else {
            return Vec::new();
        };
        project
            .tasks
            .iter()
            .filter(|task| task.status != WorkStatus::Completed)
            .filter(|task| match member_id {
                Some(id) => !task.assigned_to.iter().any(|assignee| assignee == id),
                None => true,
            })
            .collect()
    }

    /// Projects member `member_id` does not belong to yet.
    ///
    /// An unknown member belongs to nothing, so every project is returned.
    pub fn available_projects(&self, member_id: &str) -> Vec<&Project> {
        let joined: &[ProjectId] = self
            .get_team_member(member_id)
            .map(|member| member.projects.as_slice())
            .unwrap_or(&[]);
        self.projects
            .iter()
            .filter(|project| !joined.contains(&project.id))
            .collect()
    }

    /// Appends a new project with a fresh id, no tasks and no team.
    ///
    /// No validation is performed; see `NewProject::validate`.
    pub fn add_project(&mut self, input: NewProject) -> &Project {
        let id = fresh_id(|candidate| self.get_project(candidate).is_some());
        let project = input.into_project(id);
        info!(
            "event=project_add module=store status=ok project_id={}",
            project.id
        );

        let index = self.projects.len();
        self.projects.push(project);
        &self.projects[index]
    }

    /// Merges `patch` into the project `id`.
    ///
    /// # Errors
    /// - `ProjectNotFound` when `id` is unknown; nothing changes.
    pub fn update_project(&mut self, id: &str, patch: &ProjectPatch) -> StoreResult<&Project> {
        let index = self.project_index(id).inspect_err(log_failure("project_update"))?;
        let project = &mut self.projects[index];
        patch.apply_to(project);
        info!(
            "event=project_update module=store status=ok project_id={} empty_patch={}",
            project.id,
            patch.is_empty()
        );
        Ok(&self.projects[index])
    }

    /// Appends a task to project `project_id` with a fresh id.
    ///
    /// `input.assigned_to` is discarded; new tasks always start unassigned.
    ///
    /// # Errors
    /// - `ProjectNotFound` when `project_id` is unknown; nothing changes.
    pub fn add_task(&mut self, project_id: &str, input: NewTask) -> StoreResult<&Task> {
        let project_index = self
            .project_index(project_id)
            .inspect_err(log_failure("task_add"))?;
        let task = self.build_task(input);
        info!(
            "event=task_add module=store status=ok project_id={} task_id={}",
            project_id, task.id
        );

        let tasks = &mut self.projects[project_index].tasks;
        tasks.push(task);
        let task_index = tasks.len() - 1;
        Ok(&self.projects[project_index].tasks[task_index])
    }

    /// Appends several tasks at once, as the bulk task form does.
    ///
    /// Every entry is validated before any is added. Each added task takes
    /// its progress from its status (`WorkStatus::default_progress`).
    ///
    /// # Errors
    /// - `ProjectNotFound` when `project_id` is unknown.
    /// - `Validation` for the first invalid entry; nothing is added.
    pub fn add_tasks(&mut self, project_id: &str, inputs: Vec<NewTask>) -> StoreResult<Vec<TaskId>> {
        let project_index = self
            .project_index(project_id)
            .inspect_err(log_failure("task_bulk_add"))?;
        for (index, input) in inputs.iter().enumerate() {
            input
                .validate()
                .map_err(|source| StoreError::Validation { index, source })
                .inspect_err(log_failure("task_bulk_add"))?;
        }

        let mut created = Vec::with_capacity(inputs.len());
        for mut input in inputs {
            input.progress = input.status.default_progress();
            let task = self.build_task(input);
            created.push(task.id.clone());
            self.projects[project_index].tasks.push(task);
        }
        info!(
            "event=task_bulk_add module=store status=ok project_id={} count={}",
            project_id,
            created.len()
        );
        Ok(created)
    }

    /// Merges `patch` into task `task_id` of project `project_id`.
    ///
    /// # Errors
    /// - `ProjectNotFound` / `TaskNotFound`; nothing changes.
    pub fn update_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> StoreResult<&Task> {
        let (project_index, task_index) = self
            .task_index(project_id, task_id)
            .inspect_err(log_failure("task_update"))?;
        let task = &mut self.projects[project_index].tasks[task_index];
        patch.apply_to(task);
        info!(
            "event=task_update module=store status=ok project_id={} task_id={}",
            project_id, task_id
        );
        Ok(&self.projects[project_index].tasks[task_index])
    }

    /// Assigns member `member_id` to task `task_id` of project `project_id`.
    ///
    /// Appends the member to the task's assignees (repeat calls append again),
    /// increments the member's task counter and records the project on the
    /// member if it is not already there.
    ///
    /// # Errors
    /// - `ProjectNotFound`, `TaskNotFound` or `MemberNotFound`. All ids are
    ///   resolved first, so on error neither collection changes.
    pub fn assign_task(
        &mut self,
        member_id: &str,
        project_id: &str,
        task_id: &str,
    ) -> StoreResult<Assignment> {
        let (project_index, task_index) = self
            .task_index(project_id, task_id)
            .inspect_err(log_failure("task_assign"))?;
        let member_index = self
            .member_index(member_id)
            .inspect_err(log_failure("task_assign"))?;

        let task = &mut self.projects[project_index].tasks[task_index];
        if task.assigned_to.iter().any(|id| id == member_id) {
            debug!(
                "event=task_assign module=store status=duplicate project_id={} task_id={} member_id={}",
                project_id, task_id, member_id
            );
        }
        task.assigned_to.push(member_id.to_string());

        let member = &mut self.team_members[member_index];
        member.tasks += 1;
        let joined_project = !member.projects.iter().any(|id| id == project_id);
        if joined_project {
            member.projects.push(project_id.to_string());
        }

        info!(
            "event=task_assign module=store status=ok project_id={} task_id={} member_id={} joined_project={}",
            project_id, task_id, member_id, joined_project
        );
        Ok(Assignment {
            member_id: member_id.to_string(),
            project_id: project_id.to_string(),
            task_id: task_id.to_string(),
            member_task_count: member.tasks,
            joined_project,
        })
    }

    /// Appends a member with a fresh id, zero counters and no projects.
    pub fn add_team_member(&mut self, input: NewTeamMember) -> &TeamMember {
        let id = fresh_id(|candidate| self.get_team_member(candidate).is_some());
        let member = input.into_member(id);
        info!(
            "event=member_add module=store status=ok member_id={}",
            member.id
        );

        let index = self.team_members.len();
        self.team_members.push(member);
        &self.team_members[index]
    }

    /// Attaches `file` to project `project_id`, creating its file list if absent.
    ///
    /// # Errors
    /// - `ProjectNotFound` when `project_id` is unknown; nothing changes.
    pub fn add_file_to_project(&mut self, project_id: &str, file: ProjectFile) -> StoreResult<()> {
        let index = self
            .project_index(project_id)
            .inspect_err(log_failure("file_attach"))?;
        info!(
            "event=file_attach module=store status=ok project_id={} file_id={} size={}",
            project_id, file.id, file.size
        );
        self.projects[index].files.get_or_insert_with(Vec::new).push(file);
        Ok(())
    }

    fn build_task(&self, input: NewTask) -> Task {
        if !input.assigned_to.is_empty() {
            debug!(
                "event=task_add module=store status=ok discarded_assignees={}",
                input.assigned_to.len()
            );
        }
        let id = fresh_id(|candidate| self.task_id_taken(candidate));
        input.into_task(id)
    }

    fn task_id_taken(&self, task_id: &str) -> bool {
        self.projects
            .iter()
            .any(|project| project.task(task_id).is_some())
    }

    fn project_index(&self, project_id: &str) -> StoreResult<usize> {
        self.projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))
    }

    fn task_index(&self, project_id: &str, task_id: &str) -> StoreResult<(usize, usize)> {
        let project_index = self.project_index(project_id)?;
        let task_index = self.projects[project_index]
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| StoreError::TaskNotFound {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
            })?;
        Ok((project_index, task_index))
    }

    fn member_index(&self, member_id: &str) -> StoreResult<usize> {
        self.team_members
            .iter()
            .position(|member| member.id == member_id)
            .ok_or_else(|| StoreError::MemberNotFound(member_id.to_string()))
    }
}

fn fresh_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

fn log_failure(event: &'static str) -> impl Fn(&StoreError) {
    move |err: &StoreError| {
        warn!(
            "event={} module=store status=error error_code={} error={}",
            event,
            err.code(),
            err
        );
    }
}
