//! Gantt-style timeline projection.
//!
//! # Responsibility
//! - Define the visible date window and its paging over a project's span.
//! - Decide which tasks intersect the window and where their bars sit.
//!
//! # Invariants
//! - Window bounds are inclusive: `[visible_start, visible_end]`.
//! - `visible_days >= 1`.
//! - A bar with non-positive visible duration is never produced.
//! - Correct results assume `task.start_date <= task.end_date`.

use crate::metrics::start_of_day_utc;
use crate::model::project::Task;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(to: NaiveDate, from: NaiveDate) -> i64 {
    (to - from).num_days()
}

fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(date)
}

/// Visible slice of a project's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    project_start: NaiveDate,
    project_end: NaiveDate,
    offset_days: i64,
    visible_days: u32,
}

impl TimelineWindow {
    /// Window at the project start showing `visible_days` days (at least 1).
    pub fn new(project_start: NaiveDate, project_end: NaiveDate, visible_days: u32) -> Self {
        Self {
            project_start,
            project_end,
            offset_days: 0,
            visible_days: visible_days.max(1),
        }
    }

    /// Same window moved to `offset_days` after the project start.
    pub fn at_offset(mut self, offset_days: i64) -> Self {
        self.offset_days = offset_days.max(0);
        self
    }

    /// Same offset with a different zoom level (7/14/30 day views).
    pub fn with_visible_days(mut self, visible_days: u32) -> Self {
        self.visible_days = visible_days.max(1);
        self
    }

    pub fn offset_days(&self) -> i64 {
        self.offset_days
    }

    pub fn visible_days(&self) -> u32 {
        self.visible_days
    }

    /// Inclusive day count of the project span.
    pub fn project_duration_days(&self) -> i64 {
        days_between(self.project_end, self.project_start) + 1
    }

    pub fn visible_start(&self) -> NaiveDate {
        shift(self.project_start, self.offset_days)
    }

    pub fn visible_end(&self) -> NaiveDate {
        shift(self.visible_start(), i64::from(self.visible_days) - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.visible_start() <= date && date <= self.visible_end()
    }

    /// Every date shown as a column header.
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        let start = self.visible_start();
        (0..i64::from(self.visible_days))
            .map(|offset| shift(start, offset))
            .collect()
    }

    /// Pages back one window width, stopping at the project start.
    pub fn previous(self) -> Self {
        let offset = (self.offset_days - i64::from(self.visible_days)).max(0);
        self.at_offset(offset)
    }

    /// Pages forward one window width, stopping where the window's last
    /// day meets the project end.
    pub fn next(self) -> Self {
        let last_offset = self.last_offset();
        let offset = (self.offset_days + i64::from(self.visible_days)).min(last_offset);
        self.at_offset(offset)
    }

    pub fn has_previous(&self) -> bool {
        self.offset_days > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset_days < self.last_offset()
    }

    fn last_offset(&self) -> i64 {
        (self.project_duration_days() - i64::from(self.visible_days)).max(0)
    }
}

/// Whether `task` intersects `window`.
///
/// True when the task starts inside the window, ends inside it, or spans it
/// entirely.
pub fn is_task_visible(task: &Task, window: &TimelineWindow) -> bool {
    let visible_start = window.visible_start();
    let visible_end = window.visible_end();
    window.contains(task.start_date)
        || window.contains(task.end_date)
        || (task.start_date <= visible_start && task.end_date >= visible_end)
}

/// Tasks sorted by start date, then filtered to those visible in `window`.
pub fn visible_tasks<'a>(tasks: &'a [Task], window: &TimelineWindow) -> Vec<&'a Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    sorted.retain(|task| is_task_visible(task, window));
    sorted
}

/// Horizontal placement of one task bar inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBar {
    pub offset_days: i64,
    pub visible_duration_days: i64,
    pub left_percent: f64,
    pub width_percent: f64,
}

/// Bar geometry for `task`, or `None` when its visible width is not positive.
pub fn task_bar(task: &Task, window: &TimelineWindow) -> Option<TaskBar> {
    let visible_start = window.visible_start();
    let visible_days = i64::from(window.visible_days());

    let offset_days = days_between(task.start_date, visible_start).max(0);
    let visible_duration_days = (days_between(task.end_date, visible_start) + 1 - offset_days)
        .min(visible_days - offset_days);
    if visible_duration_days <= 0 {
        return None;
    }

    let width = visible_days as f64;
    Some(TaskBar {
        offset_days,
        visible_duration_days,
        left_percent: offset_days as f64 / width * 100.0,
        width_percent: visible_duration_days as f64 / width * 100.0,
    })
}

/// Position of `now` as a percentage of the window, `None` outside it.
///
/// The window spans from midnight UTC of its first day to midnight UTC of its
/// last day, both inclusive, so only the first instant of the last visible day
/// still shows the marker. The offset counts whole elapsed days.
pub fn today_marker(window: &TimelineWindow, now: DateTime<Utc>) -> Option<f64> {
    let start = start_of_day_utc(window.visible_start());
    let end = start_of_day_utc(window.visible_end());
    if now < start || now > end {
        return None;
    }
    let offset = (now - start).num_days();
    Some(offset as f64 / f64::from(window.visible_days()) * 100.0)
}
