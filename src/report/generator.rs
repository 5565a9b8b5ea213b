use crate::domain::{Task, TaskStatus, Week, WeekKey, DAYS_PER_WEEK};
use crate::report::stats::calculate_week_stats;
use crate::storage::atomic_write;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Markdown checkbox for a status
fn status_mark(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "[x]",
        TaskStatus::Abandoned => "[-]",
        TaskStatus::InProcess => "[~]",
        TaskStatus::Default => "[ ]",
    }
}

fn task_line(task: &Task) -> String {
    format!("- {} {} - {}\n", status_mark(task.status), task.text, task.status.label())
}

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Render a week as markdown: one section per day, then a summary
pub fn render_week_report(key: WeekKey, week: &Week) -> String {
    let mut report = String::new();
    report.push_str(&format!("# Week of {}\n\n", key));

    for day in 0..DAYS_PER_WEEK {
        report.push_str(&format!("## {}\n\n", key.day_label(day)));
        let tasks = week.day(day);
        if tasks.is_empty() {
            report.push_str("_No tasks_\n\n");
            continue;
        }
        for task in tasks {
            report.push_str(&task_line(task));
        }
        report.push('\n');
    }

    let stats = calculate_week_stats(week);
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Tasks:** {}\n", stats.total));
    report.push_str(&format!(
        "- **Completed:** {} ({})\n",
        stats.completed,
        format_percent(stats.completion_percent())
    ));
    report.push_str(&format!("- **In Process:** {}\n", stats.in_process));
    report.push_str(&format!("- **Abandoned:** {}\n", stats.abandoned));
    report.push_str(&format!("- **No Status:** {}\n", stats.no_status));
    if let Some(day) = stats.busiest_day() {
        report.push_str(&format!(
            "- **Busiest Day:** {} ({} tasks)\n",
            key.day_label(day),
            stats.per_day[day]
        ));
    }

    report
}

/// Write the week report to a file and return its path
pub fn write_week_report<P: AsRef<Path>>(key: WeekKey, week: &Week, path: P) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    atomic_write(&path, &render_week_report(key, week))?;
    Ok(path)
}
