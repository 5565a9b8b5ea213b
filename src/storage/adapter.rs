use crate::domain::{Task, Week, WeekKey, WeekStore};
use crate::storage::api::{ApiResult, TaskApi};
use crate::storage::local::LocalStore;

/// Where a save ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The server accepted the week (the local mirror was written too)
    RemoteCommitted,
    /// Only the local copy holds the week
    LocalFallback,
}

/// Loads and saves weeks against the remote API, keeping a local mirror
///
/// With no remote configured (offline mode) every operation is served by the
/// local file alone.
pub struct StorageAdapter<A> {
    remote: Option<A>,
    local: LocalStore,
}

impl<A: TaskApi> StorageAdapter<A> {
    pub fn new(remote: A, local: LocalStore) -> Self {
        Self {
            remote: Some(remote),
            local,
        }
    }

    pub fn offline(local: LocalStore) -> Self {
        Self {
            remote: None,
            local,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }

    /// Fetch a week; every failure reads as an empty week
    pub fn load(&self, key: &WeekKey) -> Week {
        let Some(remote) = &self.remote else {
            return self
                .local
                .load_or_empty()
                .get(key)
                .cloned()
                .unwrap_or_default();
        };

        match remote.fetch_week(key) {
            Ok(week) => {
                tracing::debug!(week = %key, tasks = week.task_count(), "loaded week");
                week
            }
            Err(e) => {
                tracing::warn!(week = %key, error = %e, "load failed, showing an empty week");
                Week::new()
            }
        }
    }

    /// Persist the week for `key` from `store`, mirroring the whole store locally
    pub fn save(&self, key: &WeekKey, store: &WeekStore) -> SaveOutcome {
        self.local.mirror(store);

        let Some(remote) = &self.remote else {
            return SaveOutcome::LocalFallback;
        };

        let empty = Week::new();
        let week = store.get(key).unwrap_or(&empty);
        match remote.store_week(key, week) {
            Ok(()) => {
                tracing::info!(week = %key, tasks = week.task_count(), "week saved");
                SaveOutcome::RemoteCommitted
            }
            Err(e) => {
                tracing::warn!(week = %key, error = %e, "failed to save to server, falling back to local store");
                SaveOutcome::LocalFallback
            }
        }
    }

    /// Ask the server to drop a week; failures are only logged
    pub fn clear(&self, key: &WeekKey) {
        let Some(remote) = &self.remote else {
            return;
        };
        match remote.delete_week(key) {
            Ok(()) => tracing::info!(week = %key, "week cleared"),
            Err(e) => tracing::warn!(week = %key, error = %e, "failed to clear week on server"),
        }
    }

    /// Replace one task on the server
    pub fn update_task(
        &self,
        key: &WeekKey,
        day: usize,
        task_id: usize,
        task: &Task,
    ) -> ApiResult<serde_json::Value> {
        match &self.remote {
            Some(remote) => remote.update_task(key, day, task_id, task),
            None => Ok(serde_json::Value::Null),
        }
    }

    /// Remove one task on the server
    pub fn delete_task(&self, key: &WeekKey, day: usize, task_id: usize) -> ApiResult<serde_json::Value> {
        match &self.remote {
            Some(remote) => remote.delete_task(key, day, task_id),
            None => Ok(serde_json::Value::Null),
        }
    }
}
