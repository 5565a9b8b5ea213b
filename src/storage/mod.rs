pub mod adapter;
pub mod api;
pub mod files;
pub mod local;
pub mod worker;

pub use adapter::{SaveOutcome, StorageAdapter};
pub use api::HttpTaskApi;
pub use files::{
    atomic_write, ensure_dir, get_planner_dir, init_local_planner, read_file, LOCAL_STORE_FILE,
};
pub use local::LocalStore;
pub use worker::{SyncEvent, SyncRequest, SyncWorker};
