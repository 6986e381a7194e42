//! Task data structure and related functionality.
//!
//! This module defines the core `Task` record, its optional effort-tracking
//! sub-record, and the input shapes used to create (`TaskDraft`) and edit
//! (`TaskPatch`) tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// Planned versus spent time on a task, in hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Effort {
    pub estimated_hours: f64,
    pub spent_hours: f64,
}

/// A single trackable unit of study or project work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    pub deadline: NaiveDate,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<Effort>,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn estimated_hours(&self) -> f64 {
        self.effort.map_or(0.0, |e| e.estimated_hours)
    }

    pub fn spent_hours(&self) -> f64 {
        self.effort.map_or(0.0, |e| e.spent_hours)
    }
}

/// Everything needed to create a task. Status always starts as Pending.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub deadline: NaiveDate,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        deadline: NaiveDate,
    ) -> Self {
        TaskDraft {
            title: title.into(),
            category: category.into(),
            priority,
            deadline,
            description: None,
            estimated_hours: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn estimate(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }
}

/// A partial edit. `None` leaves the field untouched; an empty description
/// clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub deadline: Option<NaiveDate>,
    pub estimated_hours: Option<f64>,
    pub spent_hours: Option<f64>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

/// Normalise free text: trimmed, with blank collapsing to `None`.
pub(crate) fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
