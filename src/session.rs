//! A tracking session: one task store plus one category set.
//!
//! The session is the guarded path the front end goes through. It checks
//! that categories exist before tasks are filed under them and that a
//! category is unused before it is removed.

use chrono::NaiveDate;
use tracing::info;

use crate::category::CategorySet;
use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::fields::{Priority, Status};
use crate::query::offset_date;
use crate::store::TaskStore;
use crate::task::{Effort, Task, TaskDraft, TaskPatch};
use crate::urgency;

#[derive(Debug, Clone)]
pub struct Session {
    pub store: TaskStore,
    pub categories: CategorySet,
    /// Reference date for urgency and relative deadlines.
    pub today: NaiveDate,
    pub urgent_threshold_days: i64,
}

impl Session {
    pub fn new(config: &Config, today: NaiveDate) -> Self {
        let categories = CategorySet::new(&config.categories);
        let store = if config.seed {
            TaskStore::from_tasks(seed_tasks(today))
        } else {
            TaskStore::new()
        };
        info!(
            tasks = store.len(),
            categories = categories.len(),
            %today,
            "session started"
        );
        Session {
            store,
            categories,
            today,
            urgent_threshold_days: config.urgent_threshold_days,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// The registered spelling of `name`, trimmed the same way `add` trims.
    fn require_category(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if self.categories.contains(name) {
            Ok(name.to_string())
        } else {
            Err(TrackerError::CategoryNotFound { name: name.to_string() })
        }
    }

    pub fn create_task(&mut self, mut draft: TaskDraft) -> Result<Task> {
        draft.category = self.require_category(&draft.category)?;
        self.store.create(draft)
    }

    pub fn update_task(&mut self, id: u64, mut patch: TaskPatch) -> Result<Task> {
        if let Some(category) = patch.category.as_deref() {
            patch.category = Some(self.require_category(category)?);
        }
        self.store.update(id, patch)
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        self.categories.add(name)
    }

    pub fn remove_category(&mut self, name: &str) -> Result<()> {
        self.categories.remove(name, self.store.tasks())
    }

    /// Open tasks due within the session's urgent threshold.
    pub fn urgent(&self) -> Vec<&Task> {
        urgency::urgent_tasks(self.store.tasks(), self.today, self.urgent_threshold_days)
    }
}

/// Example tasks a new session starts with, deadlines relative to `today`.
pub fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let rows: [(&str, &str, Priority, Status, i64, f64, f64); 6] = [
        ("Estudar Cálculo II - Integrais", "Matemática", Priority::High, Status::InProgress, 3, 4.0, 1.5),
        ("Projeto IC - Análise de Dados", "Projeto IC", Priority::High, Status::InProgress, 7, 10.0, 3.0),
        ("Revisar Álgebra Linear", "Matemática", Priority::Medium, Status::Pending, 5, 3.0, 0.0),
        ("Relatório de Pesquisa", "Projeto IC", Priority::High, Status::Pending, 10, 6.0, 0.0),
        ("Exercícios de Geometria Analítica", "Matemática", Priority::Low, Status::Pending, 15, 5.0, 0.0),
        ("Apresentação IC", "Projeto IC", Priority::Medium, Status::Completed, -2, 4.0, 4.0),
    ];
    rows.iter()
        .zip(1u64..)
        .map(|(&(title, category, priority, status, offset, estimated, spent), id)| Task {
            id,
            title: title.to_string(),
            category: category.to_string(),
            priority,
            status,
            deadline: offset_date(today, offset).unwrap_or(today),
            description: None,
            effort: Some(Effort {
                estimated_hours: estimated,
                spent_hours: spent,
            }),
            created_at_utc: 0,
            updated_at_utc: 0,
        })
        .collect()
}
