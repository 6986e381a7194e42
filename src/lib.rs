//! # study_tracker
//!
//! A single-user tracker for study and project tasks. The engine keeps task
//! records in memory for the lifetime of a session and answers the questions
//! a dashboard asks of them:
//!
//! - **Store** ([`store::TaskStore`]): create, edit, complete and delete tasks.
//!   Ids are assigned in increasing order and never reused.
//! - **Categories** ([`category::CategorySet`]): user-managed labels; one that
//!   is still in use cannot be removed.
//! - **Queries** ([`query`]): conjunctive filters by category, status and
//!   priority, plus the display order (open tasks first, earliest deadline).
//! - **Urgency** ([`urgency`]): classify a deadline relative to a reference
//!   date and list the tasks due within a threshold.
//! - **Metrics** ([`metrics`]): status counts, completion percentage, effort
//!   totals and per-category groupings.
//!
//! The `stm` binary is a thin command-line front end over a [`session::Session`].
//!
//! ```
//! use chrono::NaiveDate;
//! use study_tracker::{config::Config, fields::Priority, metrics, session::Session, task::TaskDraft};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let config = Config { seed: false, ..Config::default() };
//! let mut session = Session::new(&config, today);
//! session
//!     .create_task(TaskDraft::new("Integrais", "Matemática", Priority::High, today))
//!     .unwrap();
//! session.store.complete(1).unwrap();
//! assert_eq!(metrics::summary(session.tasks()).completion_pct, 100.0);
//! ```

pub mod category;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod metrics;
pub mod query;
pub mod render;
pub mod session;
pub mod store;
pub mod task;
pub mod urgency;

pub use error::{ErrorKind, Result, TrackerError};
