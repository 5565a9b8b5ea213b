use crate::domain::{Task, Week, WeekKey, WeekStore};
use crate::storage::adapter::{SaveOutcome, StorageAdapter};
use crate::storage::api::{ApiError, TaskApi};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Work for the background sync thread
#[derive(Debug, Clone, PartialEq)]
pub enum SyncRequest {
    Load { seq: u64, key: WeekKey },
    Save { key: WeekKey, store: WeekStore },
    Clear { key: WeekKey },
    UpdateTask { key: WeekKey, day: usize, index: usize, task: Task },
    DeleteTask { key: WeekKey, day: usize, index: usize },
}

/// Completion reported back to the UI loop
#[derive(Debug)]
pub enum SyncEvent {
    Loaded { seq: u64, key: WeekKey, week: Week },
    Saved { key: WeekKey, outcome: SaveOutcome },
    Cleared { key: WeekKey },
    TaskUpdated { key: WeekKey, day: usize, index: usize, result: Result<(), ApiError> },
    TaskDeleted { key: WeekKey, day: usize, index: usize, result: Result<(), ApiError> },
}

/// Runs storage requests on a background thread so the UI never waits on the network
pub struct SyncWorker {
    requests: Sender<SyncRequest>,
    events: Receiver<SyncEvent>,
    handle: JoinHandle<()>,
}

impl SyncWorker {
    pub fn spawn<A>(adapter: StorageAdapter<A>) -> Self
    where
        A: TaskApi + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<SyncRequest>();
        let (event_tx, event_rx) = mpsc::channel();

        tracing::debug!(offline = adapter.is_offline(), "starting sync worker");
        let handle = thread::spawn(move || {
            for request in request_rx {
                let event = execute(&adapter, request);
                // The UI may already be gone during shutdown; keep draining saves
                let _ = event_tx.send(event);
            }
            tracing::debug!("sync worker stopped");
        });

        Self {
            requests: request_tx,
            events: event_rx,
            handle,
        }
    }

    /// Queue a request; returns false if the worker has stopped
    pub fn send(&self, request: SyncRequest) -> bool {
        match self.requests.send(request) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(request = ?e.0, "sync worker is not running");
                false
            }
        }
    }

    /// All completions available right now, without blocking
    pub fn poll_events(&self) -> Vec<SyncEvent> {
        self.events.try_iter().collect()
    }

    /// Wait for the next completion
    #[cfg(test)]
    pub fn recv_event(&self) -> Option<SyncEvent> {
        self.events.recv().ok()
    }

    /// Stop accepting work and wait until every queued request has run
    pub fn shutdown(self) {
        let SyncWorker {
            requests,
            events,
            handle,
        } = self;
        drop(requests);
        if handle.join().is_err() {
            tracing::error!("sync worker panicked");
        }
        drop(events);
    }
}

fn execute<A: TaskApi>(adapter: &StorageAdapter<A>, request: SyncRequest) -> SyncEvent {
    match request {
        SyncRequest::Load { seq, key } => SyncEvent::Loaded {
            seq,
            key,
            week: adapter.load(&key),
        },
        SyncRequest::Save { key, store } => SyncEvent::Saved {
            key,
            outcome: adapter.save(&key, &store),
        },
        SyncRequest::Clear { key } => {
            adapter.clear(&key);
            SyncEvent::Cleared { key }
        }
        SyncRequest::UpdateTask {
            key,
            day,
            index,
            task,
        } => SyncEvent::TaskUpdated {
            key,
            day,
            index,
            result: adapter.update_task(&key, day, index, &task).map(|_| ()),
        },
        SyncRequest::DeleteTask { key, day, index } => SyncEvent::TaskDeleted {
            key,
            day,
            index,
            result: adapter.delete_task(&key, day, index).map(|_| ()),
        },
    }
}
