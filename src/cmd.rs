//! Command implementations for the CLI interface.
//!
//! Every handler runs against a `Session` and writes its result to the given
//! output, either as a plain-text table or as JSON.

use std::io::{BufRead, Write};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::{Cli, ShellLine};
use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::fields::*;
use crate::metrics::{self, EffortSummary, Summary};
use crate::query::{self, Criteria};
use crate::render::*;
use crate::session::Session;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::urgency::{self, Urgency};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Category name (defaults to the first category).
        #[arg(long)]
        category: Option<String>,
        /// Priority: high | medium | low.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Deadline: YYYY-MM-DD, DD/MM/YYYY, "today", "tomorrow", "in Nd", weekday.
        #[arg(long)]
        deadline: Option<String>,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Estimated effort in hours.
        #[arg(long)]
        estimate: Option<f64>,
    },

    /// List tasks, open ones first, by deadline.
    List {
        /// Category name or "all".
        #[arg(long, default_value = "all")]
        category: Selector<String>,
        /// pending | in-progress | completed | all.
        #[arg(long, default_value = "all")]
        status: Selector<Status>,
        /// high | medium | low | all.
        #[arg(long, default_value = "all")]
        priority: Selector<Priority>,
        /// Due filter: overdue | today | this-week | urgent.
        #[arg(long, value_enum)]
        due: Option<DueFilter>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// View a single task.
    View { id: u64 },

    /// Update fields on a task.
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        /// New description; an empty string clears it.
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long)]
        deadline: Option<String>,
        /// Estimated effort in hours.
        #[arg(long)]
        estimate: Option<f64>,
        /// Total hours spent so far.
        #[arg(long)]
        spent: Option<f64>,
    },

    /// Mark a task completed.
    Complete { id: u64 },

    /// Reopen a task (status pending).
    Reopen { id: u64 },

    /// Delete a task.
    Delete { id: u64 },

    /// Add hours spent on a task.
    LogTime { id: u64, hours: f64 },

    /// Manage categories.
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Task counts, completion and hours, plus the urgent list.
    Summary,

    /// Counts and hours per category and status.
    Groups,

    /// Counts per category, priority and status.
    Breakdown,

    /// Open tasks due soon, earliest first.
    Urgent {
        /// Days ahead that count as urgent.
        #[arg(long)]
        within: Option<i64>,
    },

    /// Keep one session open and read commands from stdin.
    Shell,

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// List categories with task counts.
    List,
    /// Add a category.
    Add { name: String },
    /// Remove a category that no task uses.
    Remove { name: String },
}

#[derive(Serialize)]
struct TaskView<'a> {
    #[serde(flatten)]
    task: &'a Task,
    urgency: Urgency,
}

#[derive(Serialize)]
struct Dashboard<'a> {
    summary: Summary,
    effort: EffortSummary,
    urgent_threshold_days: i64,
    urgent: Vec<&'a Task>,
}

#[derive(Serialize)]
struct CategoryCount<'a> {
    name: &'a str,
    tasks: usize,
}

fn emit_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Report a mutated task: its JSON, or a one-line message.
fn report(out: &mut dyn Write, json: bool, task: &Task, message: String) -> Result<()> {
    if json {
        emit_json(out, task)
    } else {
        writeln!(out, "{message}")?;
        Ok(())
    }
}

fn parse_date_arg(session: &Session, input: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    input
        .map(|s| query::parse_deadline(s, session.today))
        .transpose()
}

/// Execute one command against `session`.
pub fn run_command(
    session: &mut Session,
    config: &Config,
    command: Commands,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    debug!(?command, "running command");
    match command {
        Commands::Add { title, category, priority, deadline, desc, estimate } => {
            let category = category
                .or_else(|| session.categories.list().first().cloned())
                .ok_or(TrackerError::BlankCategory)?;
            let deadline = match parse_date_arg(session, deadline.as_deref())? {
                Some(deadline) => deadline,
                None => query::offset_date(session.today, config.default_deadline_days)
                    .ok_or_else(|| TrackerError::InvalidDate {
                        input: format!("today + {} days", config.default_deadline_days),
                    })?,
            };
            let draft = TaskDraft {
                title,
                category,
                priority,
                deadline,
                description: desc,
                estimated_hours: estimate.or(config.default_estimated_hours),
            };
            let task = session.create_task(draft)?;
            report(out, json, &task, format!("Added task {}", task.id))
        }

        Commands::List { category, status, priority, due, limit } => {
            let criteria = Criteria { category, status, priority };
            let mut view = query::filter(session.tasks(), &criteria);
            if let Some(due) = due {
                view = query::filter_due(view, due, session.today, session.urgent_threshold_days);
            }
            query::sort_for_display(&mut view);
            if let Some(n) = limit {
                view.truncate(n);
            }
            if json {
                emit_json(out, &view)
            } else {
                print_table(out, &view, session.today)?;
                Ok(())
            }
        }

        Commands::View { id } => {
            let task = session
                .store
                .get(id)
                .ok_or(TrackerError::TaskNotFound { id })?;
            if json {
                let urgency = urgency::classify(task, session.today);
                emit_json(out, &TaskView { task, urgency })
            } else {
                print_task(out, task, session.today)?;
                Ok(())
            }
        }

        Commands::Edit { id, title, desc, category, priority, status, deadline, estimate, spent } => {
            let patch = TaskPatch {
                title,
                description: desc,
                category,
                priority,
                status,
                deadline: parse_date_arg(session, deadline.as_deref())?,
                estimated_hours: estimate,
                spent_hours: spent,
            };
            if patch.is_empty() {
                warn!(id, "edit called without any field to change");
            }
            let task = session.update_task(id, patch)?;
            report(out, json, &task, format!("Updated task {}", task.id))
        }

        Commands::Complete { id } => {
            let task = session.store.complete(id)?;
            report(out, json, &task, format!("Completed task {}", task.id))
        }

        Commands::Reopen { id } => {
            let task = session.update_task(id, TaskPatch::status(Status::Pending))?;
            report(out, json, &task, format!("Reopened task {}", task.id))
        }

        Commands::Delete { id } => {
            let task = session.store.delete(id)?;
            report(out, json, &task, format!("Deleted task {}", task.id))
        }

        Commands::LogTime { id, hours } => {
            let task = session.store.log_time(id, hours)?;
            let message = format!(
                "Logged {hours:.1}h on task {} ({:.1}h total)",
                task.id,
                task.spent_hours()
            );
            report(out, json, &task, message)
        }

        Commands::Categories { action } => match action.unwrap_or(CategoryAction::List) {
            CategoryAction::List => {
                let counts: Vec<(&str, usize)> = session
                    .categories
                    .list()
                    .iter()
                    .map(|c| (c.as_str(), session.store.count_in_category(c)))
                    .collect();
                if json {
                    let rows: Vec<CategoryCount> = counts
                        .iter()
                        .map(|&(name, tasks)| CategoryCount { name, tasks })
                        .collect();
                    emit_json(out, &rows)
                } else {
                    print_categories(out, &counts)?;
                    Ok(())
                }
            }
            CategoryAction::Add { name } => {
                session.add_category(&name)?;
                writeln!(out, "Added category {}", name.trim())?;
                Ok(())
            }
            CategoryAction::Remove { name } => {
                session.remove_category(&name)?;
                writeln!(out, "Removed category {name}")?;
                Ok(())
            }
        },

        Commands::Summary => {
            let dashboard = Dashboard {
                summary: metrics::summary(session.tasks()),
                effort: metrics::effort_summary(session.tasks()),
                urgent_threshold_days: session.urgent_threshold_days,
                urgent: session.urgent(),
            };
            if json {
                return emit_json(out, &dashboard);
            }
            print_summary(out, &dashboard.summary, &dashboard.effort)?;
            writeln!(out, "\nUrgent (next {} days):", dashboard.urgent_threshold_days)?;
            if dashboard.urgent.is_empty() {
                writeln!(out, "No urgent tasks.")?;
            } else {
                print_table(out, &dashboard.urgent, session.today)?;
            }
            Ok(())
        }

        Commands::Groups => {
            let rows = metrics::group_summary(session.tasks());
            if json {
                emit_json(out, &rows)
            } else {
                print_groups(out, &rows)?;
                Ok(())
            }
        }

        Commands::Breakdown => {
            let rows = metrics::breakdown(session.tasks());
            if json {
                emit_json(out, &rows)
            } else {
                print_breakdown(out, &rows)?;
                Ok(())
            }
        }

        Commands::Urgent { within } => {
            let threshold = within.unwrap_or(session.urgent_threshold_days);
            let view = urgency::urgent_tasks(session.tasks(), session.today, threshold);
            if json {
                emit_json(out, &view)
            } else {
                print_table(out, &view, session.today)?;
                Ok(())
            }
        }

        Commands::Shell => {
            writeln!(out, "Already in a shell session.")?;
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "stm", out);
            Ok(())
        }
    }
}

/// Read commands line by line and run them against one session until EOF
/// or `exit`. Errors are printed and the session carries on.
pub fn run_shell(
    session: &mut Session,
    config: &Config,
    json: bool,
    mut input: impl BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "stm shell: {} tasks loaded, type `help` or `exit`.", session.store.len())?;
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let Ok(line) = std::str::from_utf8(&raw) else {
            warn!(bytes = raw.len(), "skipping non UTF-8 shell input");
            writeln!(out, "error: input line is not valid UTF-8")?;
            continue;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        let Some(words) = shlex::split(line) else {
            writeln!(out, "error: unbalanced quotes")?;
            continue;
        };
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Covers `help` and `--help` too; clap renders the text.
                write!(out, "{e}")?;
                continue;
            }
        };
        if let Err(e) = run_command(session, config, parsed.command, json || parsed.json, out) {
            writeln!(out, "error: {e}")?;
        }
    }
    Ok(())
}
