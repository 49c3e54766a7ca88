//! Date and display-metric helpers consumed by views.
//!
//! # Responsibility
//! - Pure date arithmetic (days left, elapsed-time progress, formatting).
//! - Display derivations from free-form labels (status/department colors,
//!   initials, avatar URLs).
//!
//! # Invariants
//! - "Now" is always passed in; nothing here reads the wall clock.
//! - A calendar date compared against "now" is midnight UTC of that day.
//! - `days_left` never returns a negative count.

use crate::model::project::{Task, WorkStatus};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const PALETTE: &[&str] = &[
    "#0E5BDE", "#00A389", "#E5484D", "#8E4EC6", "#F5A524", "#42A5F5",
];

const FEATURED_AVATAR_NAME: &str = "Sarah Mitchell";
const FEATURED_AVATAR_PATH: &str = "/lovable-uploads/9722a6cd-6a30-4c2a-ac4a-5f45162c65a4.png";

/// Midnight UTC of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Formats a date as `Mar 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Elapsed-time progress of `[start, end]` at `now`, in whole percent.
///
/// Independent of the `progress` field recorded on projects and tasks.
/// Returns 0 at or before `start` and 100 at or after `end`.
pub fn elapsed_progress(start: NaiveDate, end: NaiveDate, now: DateTime<Utc>) -> u8 {
    let start = start_of_day_utc(start);
    let end = start_of_day_utc(end);
    if now <= start {
        return 0;
    }
    if now >= end {
        return 100;
    }

    let total = (end - start).num_milliseconds();
    let elapsed = (now - start).num_milliseconds();
    // 0 < elapsed < total here, so the quotient is in 0..100.
    ((elapsed * 100) / total) as u8
}

/// Whole days until `end`, rounded up, clamped at 0 for past dates.
pub fn days_left(end: NaiveDate, now: DateTime<Utc>) -> u32 {
    let remaining = (start_of_day_utc(end) - now).num_milliseconds();
    if remaining <= 0 {
        return 0;
    }
    let days = (remaining + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Share of completed tasks, in whole percent. Empty input yields 0.
pub fn task_completion(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks
        .iter()
        .filter(|task| task.status == WorkStatus::Completed)
        .count();
    ((completed * 100) / tasks.len()) as u8
}

/// Background color class for a status label.
pub fn status_color(status: &str) -> &'static str {
    match status.trim().to_ascii_lowercase().as_str() {
        "completed" => "bg-timeflow-green",
        "in progress" => "bg-timeflow-blue",
        "on hold" => "bg-yellow-500",
        "delayed" | "overdue" => "bg-timeflow-red",
        "planned" => "bg-timeflow-purple",
        _ => "bg-gray-500",
    }
}

/// Timeline bar color class for a task status. Planned bars use the
/// fallback purple.
pub fn gantt_bar_color(status: WorkStatus) -> &'static str {
    match status {
        WorkStatus::Completed => "bg-timeflow-green",
        WorkStatus::InProgress => "bg-timeflow-blue",
        WorkStatus::OnHold => "bg-yellow-500",
        WorkStatus::Planned => "bg-timeflow-purple",
    }
}

/// Background color class for a department label.
pub fn department_color(department: &str) -> &'static str {
    match department.trim().to_ascii_lowercase().as_str() {
        "management" => "bg-timeflow-blue",
        "design" => "bg-timeflow-purple",
        "development" => "bg-timeflow-green",
        "marketing" => "bg-yellow-500",
        _ => "bg-gray-500",
    }
}

/// Palette color for chart series `index`, cycling.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Uppercased first letter of every space-separated part of `name`.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Avatar URL for a team member, stable per member id.
pub fn avatar_url(name: &str, id: &str) -> String {
    if name == FEATURED_AVATAR_NAME {
        return FEATURED_AVATAR_PATH.to_string();
    }
    format!(
        "https://api.dicebear.com/7.x/avatars/svg?seed={id}&size=64&backgroundColor=b6e3f4,c0aede,d1d4f9"
    )
}
