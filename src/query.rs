//! Task filtering, ordering and deadline parsing.
//!
//! Filters borrow from the task slice and never reorder it; display order is
//! applied separately with [`sort_for_display`].

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Result, TrackerError};
use crate::fields::*;
use crate::task::Task;
use crate::urgency::days_until;

/// Conjunctive filter criteria. `Selector::All` imposes no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub category: Selector<String>,
    pub status: Selector<Status>,
    pub priority: Selector<Priority>,
}

impl Criteria {
    pub fn matches(&self, task: &Task) -> bool {
        self.category.matches(&task.category)
            && self.status.matches(&task.status)
            && self.priority.matches(&task.priority)
    }
}

/// Tasks matching every criterion, in their original relative order.
pub fn filter<'a>(tasks: &'a [Task], criteria: &Criteria) -> Vec<&'a Task> {
    tasks.iter().filter(|t| criteria.matches(t)).collect()
}

/// Open tasks first, then earliest deadline, then lowest id.
pub fn sort_for_display(tasks: &mut [&Task]) {
    tasks.sort_by_key(|t| (t.is_completed(), t.deadline, t.id));
}

/// Narrow an already filtered view to a deadline window around `today`.
pub fn filter_due(
    tasks: Vec<&Task>,
    due: DueFilter,
    today: NaiveDate,
    urgent_threshold_days: i64,
) -> Vec<&Task> {
    let (week_start, week_end) = start_end_of_this_week(today);
    tasks
        .into_iter()
        .filter(|t| match due {
            DueFilter::Overdue => !t.is_completed() && t.deadline < today,
            DueFilter::Today => t.deadline == today,
            DueFilter::ThisWeek => t.deadline >= week_start && t.deadline <= week_end,
            DueFilter::Urgent => {
                !t.is_completed() && days_until(t, today) <= urgent_threshold_days
            }
        })
        .collect()
}

/// Calculate the start and end dates of the ISO week (Monday to Sunday)
/// containing `today`.
pub fn start_end_of_this_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = offset_date(today, -weekday).unwrap_or(NaiveDate::MIN);
    (start, offset_date(start, 6).unwrap_or(NaiveDate::MAX))
}

/// `today` shifted by `days`, or `None` when the result is outside the
/// representable date range.
pub fn offset_date(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|d| today.checked_add_signed(d))
}

/// Parse human-readable deadline input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "in 3d", "in 2w"
/// - weekday names ("friday", "next mon")
/// - "YYYY-MM-DD" and "DD/MM/YYYY"
pub fn parse_deadline(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = input.trim().to_lowercase();
    let invalid = || TrackerError::InvalidDate { input: input.to_string() };

    match s.as_str() {
        "today" => return Ok(today),
        "tomorrow" => return offset_date(today, 1).ok_or_else(invalid),
        "yesterday" => return offset_date(today, -1).ok_or_else(invalid),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        if let Some(n) = rest.strip_suffix('d') {
            let days = n.trim().parse::<i64>().map_err(|_| invalid())?;
            return offset_date(today, days).ok_or_else(invalid);
        }
        if let Some(n) = rest.strip_suffix('w') {
            let weeks = n.trim().parse::<i64>().map_err(|_| invalid())?;
            return Duration::try_weeks(weeks)
                .and_then(|w| today.checked_add_signed(w))
                .ok_or_else(invalid);
        }
        return Err(invalid());
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    let (next_week, day) = match s.strip_prefix("next ") {
        Some(day) => (true, day),
        None => (false, s.as_str()),
    };
    if let Some(&(_, target)) = weekdays.iter().find(|(name, _)| *name == day) {
        let current = today.weekday().num_days_from_monday() as i64;
        let mut ahead = (target + 7 - current) % 7;
        if next_week {
            ahead += 7;
        }
        return offset_date(today, ahead).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&s, "%d/%m/%Y"))
        .map_err(|_| invalid())
}
