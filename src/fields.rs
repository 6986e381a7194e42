//! Enumerations and field types for task tracking.
//!
//! This module defines the structured values a task is classified by
//! (priority and status), the `Selector` used by filters, and the due-date
//! windows offered by the list command.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How important a task is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

/// Where a task is in its lifecycle. Any status may be set from any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "InProgress")]
    InProgress,
    #[serde(alias = "Completed")]
    Completed,
}

impl Status {
    pub fn is_completed(self) -> bool {
        self == Status::Completed
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Pending => "Pending",
            Status::InProgress => "InProgress",
            Status::Completed => "Completed",
        })
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority '{s}' (expected high, medium or low)")),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in-progress" | "inprogress" | "in_progress" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            _ => Err(format!(
                "unknown status '{s}' (expected pending, in-progress or completed)"
            )),
        }
    }
}

/// A filter criterion: either the sentinel "all" or one exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Is(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Is(wanted) => wanted == value,
        }
    }
}

impl<T> From<Option<T>> for Selector<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selector::All, Selector::Is)
    }
}

impl<T> FromStr for Selector<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        s.parse::<T>().map(Selector::Is).map_err(|e| e.to_string())
    }
}

/// Filtering options for tasks based on their deadline.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DueFilter {
    Overdue,
    Today,
    ThisWeek,
    Urgent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_variants() {
        assert_eq!("pending".parse::<Status>(), Ok(Status::Pending));
        assert_eq!("In-Progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("done".parse::<Status>(), Ok(Status::Completed));
        assert!("blocked".parse::<Status>().is_err());
    }

    #[test]
    fn test_selector_sentinel() {
        assert_eq!("all".parse::<Selector<Priority>>(), Ok(Selector::All));
        assert_eq!("ALL".parse::<Selector<String>>(), Ok(Selector::All));
        assert_eq!("high".parse::<Selector<Priority>>(), Ok(Selector::Is(Priority::High)));
        assert_eq!(
            "Outros".parse::<Selector<String>>(),
            Ok(Selector::Is("Outros".to_string()))
        );
        assert!("urgent".parse::<Selector<Priority>>().is_err());
    }

    #[test]
    fn test_selector_matches() {
        assert!(Selector::<Status>::All.matches(&Status::Completed));
        assert!(Selector::Is(Status::Pending).matches(&Status::Pending));
        assert!(!Selector::Is(Status::Pending).matches(&Status::InProgress));
        assert_eq!(Selector::from(None::<Status>), Selector::All);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"in-progress\"");
        let p: Priority = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(p, Priority::High);
    }
}
