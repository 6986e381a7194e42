//! Runtime configuration.
//!
//! Settings come from an optional JSON file; command-line flags override
//! individual values afterwards. Missing keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::DEFAULT_CATEGORIES;
use crate::error::{Result, TrackerError};
use crate::urgency::DEFAULT_URGENT_THRESHOLD_DAYS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Look-ahead window for the urgent task list.
    pub urgent_threshold_days: i64,
    /// Deadline given to new tasks when none is specified.
    pub default_deadline_days: i64,
    pub default_estimated_hours: Option<f64>,
    /// Category names a new session starts with.
    pub categories: Vec<String>,
    /// Whether a new session starts with the example tasks.
    pub seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            urgent_threshold_days: DEFAULT_URGENT_THRESHOLD_DAYS,
            default_deadline_days: 7,
            default_estimated_hours: None,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            seed: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let buf = fs::read_to_string(path).map_err(|source| TrackerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&buf).map_err(|source| TrackerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
