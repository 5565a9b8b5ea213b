use crate::domain::{TaskStatus, Week, DAYS_PER_WEEK};

/// Task counts for one week
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WeekStats {
    pub total: usize,
    pub completed: usize,
    pub abandoned: usize,
    pub in_process: usize,
    pub no_status: usize,
    /// Tasks per day, Monday first
    pub per_day: [usize; DAYS_PER_WEEK],
}

impl WeekStats {
    /// Share of tasks marked completed, in percent
    pub fn completion_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }

    /// Busiest day index, None for an empty week
    pub fn busiest_day(&self) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        // max_by_key keeps the last maximum, so walk backwards to prefer the earliest day
        (0..DAYS_PER_WEEK).rev().max_by_key(|day| self.per_day[*day])
    }
}

/// Count tasks by status and by day
pub fn calculate_week_stats(week: &Week) -> WeekStats {
    let mut stats = WeekStats::default();
    for day in 0..DAYS_PER_WEEK {
        let tasks = week.day(day);
        stats.per_day[day] = tasks.len();
        for task in tasks {
            stats.total += 1;
            match task.status {
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Abandoned => stats.abandoned += 1,
                TaskStatus::InProcess => stats.in_process += 1,
                TaskStatus::Default => stats.no_status += 1,
            }
        }
    }
    stats
}
