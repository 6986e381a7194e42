//! Error types for the tracker.
//!
//! Engine failures fall into three kinds (see [`ErrorKind`]); front-end
//! failures such as a bad config file or an unparsable date get their own
//! variants so the binary can report everything through one type.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of engine errors, for callers that only need to know
/// which kind of mistake the user made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Input,
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Task title cannot be empty")]
    BlankTitle,

    #[error("Category name cannot be empty")]
    BlankCategory,

    #[error("Category '{name}' already exists")]
    DuplicateCategory { name: String },

    #[error("Invalid {field}: {value} (hours must be a non-negative number)")]
    InvalidHours { field: &'static str, value: f64 },

    #[error("Task {id} not found")]
    TaskNotFound { id: u64 },

    #[error("Category '{name}' not found")]
    CategoryNotFound { name: String },

    #[error("Category '{name}' is still used by {count} task(s)")]
    CategoryInUse { name: String, count: usize },

    #[error("Could not understand date '{input}'")]
    InvalidDate { input: String },

    #[error("Failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankTitle
            | Self::BlankCategory
            | Self::DuplicateCategory { .. }
            | Self::InvalidHours { .. } => ErrorKind::Validation,
            Self::TaskNotFound { .. } | Self::CategoryNotFound { .. } => ErrorKind::NotFound,
            Self::CategoryInUse { .. } => ErrorKind::Conflict,
            Self::InvalidDate { .. }
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::Json(_)
            | Self::Io(_) => ErrorKind::Input,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Reject negative, NaN and infinite hour values.
pub(crate) fn check_hours(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TrackerError::InvalidHours { field, value })
    }
}
