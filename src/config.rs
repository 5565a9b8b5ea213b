use crate::storage::{atomic_write, read_file, LOCAL_STORE_FILE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the config file inside the planner directory
pub const CONFIG_FILE: &str = "config.json";

/// Name of the log file written while the TUI runs
pub const LOG_FILE: &str = "weekgrid.log";

fn default_api_base() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Planner settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Base URL of the tasks API (without the `/api/tasks` suffix)
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Skip the server entirely and keep tasks in the local file
    #[serde(default)]
    pub offline: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            offline: false,
        }
    }
}

impl PlannerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, api_base: Option<String>, offline: bool) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        if offline {
            self.offline = true;
        }
        self
    }
}

/// Load config.json; a missing file yields the defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(PlannerConfig::default());
    }
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Save config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &PlannerConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)
}

/// Files inside one planner directory
#[derive(Debug, Clone)]
pub struct PlannerPaths {
    pub dir: PathBuf,
}

impl PlannerPaths {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn local_store_file(&self) -> PathBuf {
        self.dir.join(LOCAL_STORE_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }
}
