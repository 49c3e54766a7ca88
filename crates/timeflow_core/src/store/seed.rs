//! Fixed startup data set.
//!
//! Every process start resets projects, tasks and members to these values.

use crate::model::member::{Availability, Department, TeamMember};
use crate::model::notification::{Notification, NotificationKind};
use crate::model::project::{Project, Task, TaskPriority, WorkStatus};
use chrono::{DateTime, NaiveDate, Utc};

const DICEBEAR_PARAMS: &str = "size=64&backgroundColor=b6e3f4,c0aede,d1d4f9";
const SARAH_AVATAR: &str = "https://images.unsplash.com/photo-1494790108377-be9c29b29330?q=80&w=1974&auto=format&fit=crop&ixlib=rb-4.0.3";

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid calendar dates")
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

struct TaskSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    status: WorkStatus,
    progress: u8,
    department: &'static str,
    assigned_to: &'static [&'static str],
    priority: TaskPriority,
}

impl TaskSeed {
    fn build(&self) -> Task {
        Task {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            start_date: day(self.start.0, self.start.1, self.start.2),
            end_date: day(self.end.0, self.end.1, self.end.2),
            status: self.status,
            progress: self.progress,
            department: self.department.to_string(),
            assigned_to: ids(self.assigned_to),
            priority: Some(self.priority),
        }
    }
}

const WEBSITE_TASKS: &[TaskSeed] = &[
    TaskSeed {
        id: "101",
        title: "Create Wireframes",
        description: "Develop initial wireframes for key website pages.",
        start: (2024, 3, 1),
        end: (2024, 3, 15),
        status: WorkStatus::Completed,
        progress: 100,
        department: "Design",
        assigned_to: &["1", "2"],
        priority: TaskPriority::High,
    },
    TaskSeed {
        id: "102",
        title: "Design Mockups",
        description: "Design high-fidelity mockups based on the approved wireframes.",
        start: (2024, 3, 16),
        end: (2024, 4, 15),
        status: WorkStatus::InProgress,
        progress: 75,
        department: "Design",
        assigned_to: &["1", "3"],
        priority: TaskPriority::High,
    },
    TaskSeed {
        id: "103",
        title: "Prototype Development",
        description: "Create an interactive prototype to showcase the website's functionality.",
        start: (2024, 4, 16),
        end: (2024, 5, 15),
        status: WorkStatus::Planned,
        progress: 0,
        department: "Development",
        assigned_to: &[],
        priority: TaskPriority::Medium,
    },
];

const MOBILE_TASKS: &[TaskSeed] = &[
    TaskSeed {
        id: "201",
        title: "UI/UX Design",
        description: "Design the user interface and user experience for the mobile app.",
        start: (2024, 4, 1),
        end: (2024, 5, 1),
        status: WorkStatus::InProgress,
        progress: 50,
        department: "Design",
        assigned_to: &["4"],
        priority: TaskPriority::High,
    },
    TaskSeed {
        id: "202",
        title: "iOS App Development",
        description: "Code the mobile app for the iOS platform.",
        start: (2024, 5, 2),
        end: (2024, 7, 1),
        status: WorkStatus::Planned,
        progress: 0,
        department: "Development",
        assigned_to: &[],
        priority: TaskPriority::High,
    },
    TaskSeed {
        id: "203",
        title: "Android App Development",
        description: "Code the mobile app for the Android platform.",
        start: (2024, 7, 2),
        end: (2024, 9, 1),
        status: WorkStatus::Planned,
        progress: 0,
        department: "Development",
        assigned_to: &[],
        priority: TaskPriority::High,
    },
];

const MARKETING_TASKS: &[TaskSeed] = &[
    TaskSeed {
        id: "301",
        title: "Create Marketing Materials",
        description: "Design and produce marketing materials such as brochures and flyers.",
        start: (2024, 5, 1),
        end: (2024, 5, 31),
        status: WorkStatus::Planned,
        progress: 0,
        department: "Design",
        assigned_to: &[],
        priority: TaskPriority::Medium,
    },
    TaskSeed {
        id: "302",
        title: "Run Ads",
        description: "Run online ads to promote the new product.",
        start: (2024, 6, 1),
        end: (2024, 7, 31),
        status: WorkStatus::Planned,
        progress: 0,
        department: "Marketing",
        assigned_to: &[],
        priority: TaskPriority::High,
    },
    TaskSeed {
        id: "303",
        title: "Track Results",
        description: "Track the results of the marketing campaign and make adjustments as needed.",
        start: (2024, 8, 1),
        end: (2024, 8, 31),
        status: WorkStatus::Planned,
        progress: 0,
        department: "Marketing",
        assigned_to: &[],
        priority: TaskPriority::Medium,
    },
];

/// The three seeded projects: Design, Development and Marketing.
pub fn initial_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            name: "New Website Design".to_string(),
            description: "Design a modern and user-friendly website for a new client. This project involves creating wireframes, mockups, and prototypes.".to_string(),
            start_date: day(2024, 3, 1),
            end_date: day(2024, 6, 30),
            status: WorkStatus::InProgress,
            progress: 60,
            department: "Design".to_string(),
            team: ids(&["1", "2", "3"]),
            tasks: WEBSITE_TASKS.iter().map(TaskSeed::build).collect(),
            files: None,
        },
        Project {
            id: "2".to_string(),
            name: "Mobile App Development".to_string(),
            description: "Develop a mobile app for iOS and Android platforms. This project includes designing the UI/UX, coding the app, and testing.".to_string(),
            start_date: day(2024, 4, 1),
            end_date: day(2024, 9, 30),
            status: WorkStatus::Planned,
            progress: 20,
            department: "Development".to_string(),
            team: ids(&["4", "5", "6"]),
            tasks: MOBILE_TASKS.iter().map(TaskSeed::build).collect(),
            files: None,
        },
        Project {
            id: "3".to_string(),
            name: "Marketing Campaign".to_string(),
            description: "Launch a marketing campaign to promote a new product. This project involves creating marketing materials, running ads, and tracking results.".to_string(),
            start_date: day(2024, 5, 1),
            end_date: day(2024, 8, 31),
            status: WorkStatus::Planned,
            progress: 10,
            department: "Marketing".to_string(),
            team: ids(&["7", "8", "9"]),
            tasks: MARKETING_TASKS.iter().map(TaskSeed::build).collect(),
            files: None,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn member(
    id: &str,
    name: &str,
    role: &str,
    department: &str,
    tasks: u32,
    completed_tasks: u32,
    performance: u8,
    availability: Availability,
    project_id: &str,
) -> TeamMember {
    let first_name = name.split(' ').next().unwrap_or(name);
    let email_local = name.to_ascii_lowercase().replace(' ', ".");
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        department: department.to_string(),
        avatar: format!("https://api.dicebear.com/7.x/avatars/svg?seed={first_name}&{DICEBEAR_PARAMS}"),
        email: format!("{email_local}@example.com"),
        tasks,
        completed_tasks,
        performance,
        availability,
        projects: vec![project_id.to_string()],
    }
}

/// The nine seeded team members, three per project.
pub fn initial_team_members() -> Vec<TeamMember> {
    use Availability::{Available, Busy, InMeeting};

    let mut sarah = member("4", "Sarah Mitchell", "Mobile App Designer", "Design", 14, 11, 88, Available, "2");
    sarah.avatar = SARAH_AVATAR.to_string();

    vec![
        member("1", "John Smith", "UI Designer", "Design", 15, 12, 85, Available, "1"),
        member("2", "Emily Johnson", "UX Designer", "Design", 12, 10, 92, Busy, "1"),
        member("3", "Michael Brown", "Frontend Developer", "Development", 18, 15, 78, InMeeting, "1"),
        sarah,
        member("5", "David Lee", "iOS Developer", "Development", 20, 17, 95, Busy, "2"),
        member("6", "Linda Wilson", "Android Developer", "Development", 16, 13, 82, InMeeting, "2"),
        member("7", "Robert Taylor", "Marketing Manager", "Marketing", 13, 10, 90, Available, "3"),
        member("8", "Karen Garcia", "Content Creator", "Marketing", 11, 9, 87, Busy, "3"),
        member("9", "James Rodriguez", "SEO Specialist", "Marketing", 17, 14, 75, InMeeting, "3"),
    ]
}

/// The three seeded departments.
pub fn initial_departments() -> Vec<Department> {
    vec![
        Department::new("Design", 88, "#FFCF00"),
        Department::new("Development", 92, "#0E5BDE"),
        Department::new("Marketing", 85, "#00A389"),
    ]
}

/// The three startup notifications, all stamped with `created_at`.
pub fn initial_notifications(created_at: DateTime<Utc>) -> Vec<Notification> {
    let notification = |id: &str, title: &str, description: &str, kind: NotificationKind, read: bool| Notification {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: created_at,
        kind,
        read,
    };
    vec![
        notification(
            "1",
            "Project deadline approaching",
            "Marketing Campaign is due in 3 days",
            NotificationKind::Deadline,
            false,
        ),
        notification(
            "2",
            "New task assigned",
            "Sarah assigned you a new design task",
            NotificationKind::Task,
            false,
        ),
        notification(
            "3",
            "Team meeting scheduled",
            "Weekly standup tomorrow at 10 AM",
            NotificationKind::Update,
            true,
        ),
    ]
}
