//! Plain-text rendering of tasks and aggregates.
//!
//! Everything writes to a caller-supplied `Write` so the same output can go
//! to stdout, the interactive shell or a test buffer.

use std::io::{self, Write};

use chrono::{NaiveDate, TimeZone, Utc};

use crate::metrics::{BreakdownRow, EffortSummary, GroupRow, Summary};
use crate::task::Task;
use crate::urgency::classify;

/// Print tasks in a formatted table.
pub fn print_table(out: &mut dyn Write, tasks: &[&Task], today: NaiveDate) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks match.");
    }
    writeln!(
        out,
        "{:<5} {:<11} {:<7} {:<10} {:<10} {:<14} {}",
        "ID", "Status", "Pri", "Deadline", "Due", "Category", "Title"
    )?;
    for t in tasks {
        writeln!(
            out,
            "{:<5} {:<11} {:<7} {:<10} {:<10} {:<14} {}",
            t.id,
            t.status.to_string(),
            t.priority.to_string(),
            t.deadline.format("%d/%m/%Y").to_string(),
            classify(t, today).label(),
            truncate(&t.category, 14),
            t.title
        )?;
    }
    Ok(())
}

/// Print every field of one task.
pub fn print_task(out: &mut dyn Write, task: &Task, today: NaiveDate) -> io::Result<()> {
    writeln!(out, "ID:           {}", task.id)?;
    writeln!(out, "Title:        {}", task.title)?;
    writeln!(out, "Category:     {}", task.category)?;
    writeln!(out, "Priority:     {}", task.priority)?;
    writeln!(out, "Status:       {}", task.status)?;
    writeln!(out, "Deadline:     {} ({})", task.deadline, classify(task, today))?;
    match task.effort {
        Some(e) => writeln!(
            out,
            "Effort:       {:.1}h spent of {:.1}h estimated",
            e.spent_hours, e.estimated_hours
        )?,
        None => writeln!(out, "Effort:       -")?,
    }
    writeln!(out, "Created UTC:  {}", format_timestamp(task.created_at_utc))?;
    writeln!(out, "Updated UTC:  {}", format_timestamp(task.updated_at_utc))?;
    writeln!(out, "Description:\n{}", task.description.as_deref().unwrap_or("-"))
}

pub fn print_summary(
    out: &mut dyn Write,
    summary: &Summary,
    effort: &EffortSummary,
) -> io::Result<()> {
    writeln!(out, "Total:        {}", summary.total)?;
    writeln!(out, "Pending:      {}", summary.pending)?;
    writeln!(out, "In progress:  {}", summary.in_progress)?;
    writeln!(out, "Completed:    {}", summary.completed)?;
    writeln!(out, "Completion:   {:.2}%", summary.completion_pct)?;
    writeln!(
        out,
        "Hours:        {:.1} spent / {:.1} estimated ({:.0}%)",
        effort.total_spent_hours,
        effort.total_estimated_hours,
        effort.progress_pct()
    )
}

pub fn print_groups(out: &mut dyn Write, rows: &[GroupRow]) -> io::Result<()> {
    writeln!(
        out,
        "{:<14} {:<11} {:>5} {:>9} {:>9}",
        "Category", "Status", "Count", "Est (h)", "Spent (h)"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:<14} {:<11} {:>5} {:>9.1} {:>9.1}",
            truncate(&r.category, 14),
            r.status.to_string(),
            r.count,
            r.estimated_hours,
            r.spent_hours
        )?;
    }
    Ok(())
}

pub fn print_breakdown(out: &mut dyn Write, rows: &[BreakdownRow]) -> io::Result<()> {
    writeln!(out, "{:<14} {:<7} {:<11} {:>5}", "Category", "Pri", "Status", "Count")?;
    for r in rows {
        writeln!(
            out,
            "{:<14} {:<7} {:<11} {:>5}",
            truncate(&r.category, 14),
            r.priority.to_string(),
            r.status.to_string(),
            r.count
        )?;
    }
    Ok(())
}

/// Print category names with the number of tasks filed under each.
pub fn print_categories(out: &mut dyn Write, rows: &[(&str, usize)]) -> io::Result<()> {
    for (name, count) in rows {
        writeln!(out, "{name} ({count})")?;
    }
    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".into())
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::seed_tasks;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Matemática", 14), "Matemática");
        assert_eq!(truncate("Exercícios de Geometria", 8), "Exercíc…");
    }

    #[test]
    fn test_print_table_rows() {
        let tasks = seed_tasks(today());
        let view: Vec<&Task> = tasks.iter().take(2).collect();
        let mut buf = Vec::new();
        print_table(&mut buf, &view, today()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Estudar Cálculo II - Integrais"));
        assert!(lines[1].contains("in 3d"));
        assert!(lines[1].contains("19/10/2026"));
    }

    #[test]
    fn test_print_table_empty() {
        let mut buf = Vec::new();
        print_table(&mut buf, &[], today()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No tasks match.\n");
    }
}
