//! User-managed category labels.

use tracing::{debug, warn};

use crate::error::{Result, TrackerError};
use crate::task::Task;

pub const DEFAULT_CATEGORIES: [&str; 3] = ["Matemática", "Projeto IC", "Outros"];

/// Ordered set of unique category names. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::new(DEFAULT_CATEGORIES)
    }
}

impl CategorySet {
    /// Build a set from seed names, dropping blanks and repeats.
    pub fn new<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = CategorySet { names: Vec::new() };
        for name in seed {
            if let Err(e) = set.add(name.as_ref()) {
                warn!(category = name.as_ref(), error = %e, "skipping seed category");
            }
        }
        set
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::BlankCategory);
        }
        if self.contains(name) {
            return Err(TrackerError::DuplicateCategory { name: name.to_string() });
        }
        self.names.push(name.to_string());
        debug!(category = name, "added category");
        Ok(())
    }

    /// Remove a category that no task refers to.
    pub fn remove(&mut self, name: &str, tasks: &[Task]) -> Result<()> {
        let name = name.trim();
        let idx = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TrackerError::CategoryNotFound { name: name.to_string() })?;
        let count = tasks.iter().filter(|t| t.category == name).count();
        if count > 0 {
            return Err(TrackerError::CategoryInUse { name: name.to_string(), count });
        }
        self.names.remove(idx);
        debug!(category = name, "removed category");
        Ok(())
    }
}
