//! Aggregate counts and effort totals for the dashboard.
//!
//! Grouped outputs list their rows in first-seen order of the input tasks.

use serde::Serialize;

use crate::fields::{Priority, Status};
use crate::task::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Percentage of completed tasks, 0 when there are none at all.
    pub completion_pct: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EffortSummary {
    pub total_estimated_hours: f64,
    pub total_spent_hours: f64,
}

impl EffortSummary {
    /// Spent over estimated hours as a percentage; 0 when nothing is estimated.
    pub fn progress_pct(&self) -> f64 {
        if self.total_estimated_hours > 0.0 {
            self.total_spent_hours / self.total_estimated_hours * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub category: String,
    pub status: Status,
    pub count: usize,
    pub estimated_hours: f64,
    pub spent_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    pub count: usize,
}

pub fn summary(tasks: &[Task]) -> Summary {
    let mut s = Summary {
        total: tasks.len(),
        ..Summary::default()
    };
    for t in tasks {
        match t.status {
            Status::Pending => s.pending += 1,
            Status::InProgress => s.in_progress += 1,
            Status::Completed => s.completed += 1,
        }
    }
    if s.total > 0 {
        s.completion_pct = s.completed as f64 / s.total as f64 * 100.0;
    }
    s
}

pub fn effort_summary(tasks: &[Task]) -> EffortSummary {
    tasks.iter().fold(EffortSummary::default(), |mut acc, t| {
        acc.total_estimated_hours += t.estimated_hours();
        acc.total_spent_hours += t.spent_hours();
        acc
    })
}

/// One row per (category, status) pair present in `tasks`.
pub fn group_summary(tasks: &[Task]) -> Vec<GroupRow> {
    let mut rows: Vec<GroupRow> = Vec::new();
    for t in tasks {
        match rows
            .iter_mut()
            .find(|r| r.category == t.category && r.status == t.status)
        {
            Some(row) => {
                row.count += 1;
                row.estimated_hours += t.estimated_hours();
                row.spent_hours += t.spent_hours();
            }
            None => rows.push(GroupRow {
                category: t.category.clone(),
                status: t.status,
                count: 1,
                estimated_hours: t.estimated_hours(),
                spent_hours: t.spent_hours(),
            }),
        }
    }
    rows
}

/// Counts per (category, priority, status) path, the shape a treemap of the
/// task list is drawn from.
pub fn breakdown(tasks: &[Task]) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = Vec::new();
    for t in tasks {
        match rows.iter_mut().find(|r| {
            r.category == t.category && r.priority == t.priority && r.status == t.status
        }) {
            Some(row) => row.count += 1,
            None => rows.push(BreakdownRow {
                category: t.category.clone(),
                priority: t.priority,
                status: t.status,
                count: 1,
            }),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Effort;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn task(id: u64, category: &str, status: Status, effort: Option<(f64, f64)>) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            category: category.into(),
            priority: Priority::Medium,
            status,
            deadline: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap() + Duration::days(id as i64),
            description: None,
            effort: effort.map(|(estimated_hours, spent_hours)| Effort {
                estimated_hours,
                spent_hours,
            }),
            created_at_utc: 0,
            updated_at_utc: 0,
        }
    }

    #[test]
    fn test_summary_empty() {
        let s = summary(&[]);
        assert_eq!(s, Summary::default());
        assert_eq!(s.completion_pct, 0.0);
    }

    #[test]
    fn test_summary_scenario() {
        let tasks = vec![
            task(1, "Matemática", Status::Pending, None),
            task(2, "Matemática", Status::Completed, None),
            task(3, "Projeto IC", Status::InProgress, None),
        ];
        let s = summary(&tasks);
        assert_eq!((s.total, s.pending, s.in_progress, s.completed), (3, 1, 1, 1));
        assert!((s.completion_pct - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_summary_partitions_and_bounds() {
        let statuses = [Status::Pending, Status::InProgress, Status::Completed];
        for n in 0..12u64 {
            let tasks: Vec<Task> = (0..n)
                .map(|i| task(i, "Outros", statuses[(i * 7 % 3) as usize], None))
                .collect();
            let s = summary(&tasks);
            assert_eq!(s.pending + s.in_progress + s.completed, s.total);
            assert!((0.0..=100.0).contains(&s.completion_pct));
            if s.total > 0 {
                let expected = 100.0 * s.completed as f64 / s.total as f64;
                assert!((s.completion_pct - expected).abs() < 1e-9);
            }
        }
        let done = vec![task(1, "Outros", Status::Completed, None)];
        assert_eq!(summary(&done).completion_pct, 100.0);
    }

    #[test]
    fn test_effort_summary_skips_missing_effort() {
        let tasks = vec![
            task(1, "Matemática", Status::InProgress, Some((4.0, 1.5))),
            task(2, "Projeto IC", Status::Pending, None),
            task(3, "Projeto IC", Status::Completed, Some((4.0, 4.5))),
        ];
        let e = effort_summary(&tasks);
        assert_eq!(e.total_estimated_hours, 8.0);
        assert_eq!(e.total_spent_hours, 6.0);
        assert_eq!(e.progress_pct(), 75.0);
        assert_eq!(effort_summary(&[]).progress_pct(), 0.0);
    }

    #[test]
    fn test_group_summary_rows() {
        let tasks = vec![
            task(1, "Matemática", Status::InProgress, Some((4.0, 1.5))),
            task(2, "Projeto IC", Status::InProgress, Some((10.0, 3.0))),
            task(3, "Matemática", Status::Pending, Some((3.0, 0.0))),
            task(4, "Matemática", Status::InProgress, None),
            task(5, "Projeto IC", Status::InProgress, Some((2.0, 1.0))),
        ];
        let rows = group_summary(&tasks);
        assert_eq!(
            rows,
            vec![
                GroupRow {
                    category: "Matemática".into(),
                    status: Status::InProgress,
                    count: 2,
                    estimated_hours: 4.0,
                    spent_hours: 1.5,
                },
                GroupRow {
                    category: "Projeto IC".into(),
                    status: Status::InProgress,
                    count: 2,
                    estimated_hours: 12.0,
                    spent_hours: 4.0,
                },
                GroupRow {
                    category: "Matemática".into(),
                    status: Status::Pending,
                    count: 1,
                    estimated_hours: 3.0,
                    spent_hours: 0.0,
                },
            ]
        );
        let total: usize = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, tasks.len());
    }

    #[test]
    fn test_breakdown_has_no_empty_rows() {
        let mut tasks = vec![
            task(1, "Matemática", Status::Pending, None),
            task(2, "Matemática", Status::Pending, None),
            task(3, "Matemática", Status::Pending, None),
        ];
        tasks[2].priority = Priority::High;
        let rows = breakdown(&tasks);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].priority, Priority::High);
        assert!(rows.iter().all(|r| r.count > 0));
    }
}
