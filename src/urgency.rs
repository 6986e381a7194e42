//! Deadline urgency classification.
//!
//! A task's urgency is derived from the whole days between a reference date
//! (normally today) and its deadline. Completed tasks are never urgent.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::Task;

/// Default look-ahead window, in days, for the urgent task list.
pub const DEFAULT_URGENT_THRESHOLD_DAYS: i64 = 3;

/// Proximity of a task's deadline relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", rename_all = "kebab-case")]
pub enum Urgency {
    Overdue { days_late: u64 },
    DueToday,
    DueTomorrow,
    DueSoon { days_left: u64 },
    DueLater { days_left: u64 },
    Completed,
}

impl Urgency {
    /// Short human text, in the style of "in 3d" / "2d late".
    pub fn label(&self) -> String {
        match self {
            Urgency::Overdue { days_late } => format!("{days_late}d late"),
            Urgency::DueToday => "today".into(),
            Urgency::DueTomorrow => "tomorrow".into(),
            Urgency::DueSoon { days_left } | Urgency::DueLater { days_left } => {
                format!("in {days_left}d")
            }
            Urgency::Completed => "done".into(),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Signed whole days from `reference` to the task's deadline.
pub fn days_until(task: &Task, reference: NaiveDate) -> i64 {
    (task.deadline - reference).num_days()
}

pub fn classify(task: &Task, reference: NaiveDate) -> Urgency {
    if task.is_completed() {
        return Urgency::Completed;
    }
    let d = days_until(task, reference);
    match d {
        d if d < 0 => Urgency::Overdue { days_late: d.unsigned_abs() },
        0 => Urgency::DueToday,
        1 => Urgency::DueTomorrow,
        2..=3 => Urgency::DueSoon { days_left: d as u64 },
        _ => Urgency::DueLater { days_left: d as u64 },
    }
}

/// Open tasks due within `threshold_days` (overdue ones included), earliest
/// deadline first. Ties keep their original order.
pub fn urgent_tasks(tasks: &[Task], reference: NaiveDate, threshold_days: i64) -> Vec<&Task> {
    let mut urgent: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.is_completed() && days_until(t, reference) <= threshold_days)
        .collect();
    urgent.sort_by_key(|t| t.deadline);
    urgent
}
