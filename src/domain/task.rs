use super::enums::TaskStatus;
use super::week_key::{WeekKey, DAYS_PER_WEEK};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One task card's persisted data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn new(text: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}

/// How a save landed in its day bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Inserted(usize),
    Overwritten(usize),
}

impl SaveKind {
    pub fn index(&self) -> usize {
        match self {
            SaveKind::Inserted(i) | SaveKind::Overwritten(i) => *i,
        }
    }
}

/// Tasks for one week, keyed by day index (0 = Monday)
///
/// Serialized as a JSON object with string day keys: `{"0": [...], "4": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Week(BTreeMap<usize, Vec<Task>>);

impl<'de> Deserialize<'de> for Week {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<usize, Vec<Task>>::deserialize(deserializer)?;
        let days = raw
            .into_iter()
            .filter(|(day, _)| {
                let valid = *day < DAYS_PER_WEEK;
                if !valid {
                    tracing::debug!(day, "dropping out-of-range day bucket");
                }
                valid
            })
            .collect();
        Ok(Week(days))
    }
}

impl Week {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks for a day, empty if the bucket was never created
    pub fn day(&self, day: usize) -> &[Task] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Insert a task, or overwrite the one with the same text
    pub fn save_task(&mut self, day: usize, task: Task) -> SaveKind {
        let bucket = self.0.entry(day).or_default();
        match bucket.iter().position(|t| t.text == task.text) {
            Some(index) => {
                bucket[index] = task;
                SaveKind::Overwritten(index)
            }
            None => {
                bucket.push(task);
                SaveKind::Inserted(bucket.len() - 1)
            }
        }
    }

    /// Replace the task at a position; returns false if there is none
    pub fn update_task(&mut self, day: usize, index: usize, task: Task) -> bool {
        match self.0.get_mut(&day).and_then(|bucket| bucket.get_mut(index)) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Remove and return the task at a position
    pub fn remove_task(&mut self, day: usize, index: usize) -> Option<Task> {
        let bucket = self.0.get_mut(&day)?;
        if index < bucket.len() {
            Some(bucket.remove(index))
        } else {
            None
        }
    }

    /// Empty every day bucket
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Total number of tasks across all days
    pub fn task_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }
}

/// Every week the session knows about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStore(BTreeMap<WeekKey, Week>);

impl WeekStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &WeekKey) -> Option<&Week> {
        self.0.get(key)
    }

    /// The week for `key`, created empty on first access
    pub fn week_mut(&mut self, key: WeekKey) -> &mut Week {
        self.0.entry(key).or_default()
    }

    pub fn insert(&mut self, key: WeekKey, week: Week) {
        self.0.insert(key, week);
    }

    pub fn contains(&self, key: &WeekKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
