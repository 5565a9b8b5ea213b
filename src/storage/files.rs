use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the planner directory, both local and in the home directory
pub const PLANNER_DIR_NAME: &str = ".weekgrid";

/// File holding the whole WeekStore as the local fallback copy
pub const LOCAL_STORE_FILE: &str = "tasksByWeek.json";

/// Get the planner directory - checks for local .weekgrid first, then falls back to ~/.weekgrid
pub fn get_planner_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_planner(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(PLANNER_DIR_NAME))
}

/// Find local .weekgrid directory by walking up the directory tree
fn find_local_planner(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let planner_dir = current.join(PLANNER_DIR_NAME);
        if planner_dir.is_dir() {
            return Some(planner_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure a directory exists, creating it if needed
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir.to_path_buf())
}

/// Initialize a local .weekgrid directory in the current directory
pub fn init_local_planner() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let planner_dir = current_dir.join(PLANNER_DIR_NAME);

    if planner_dir.exists() {
        anyhow::bail!("Planner directory already exists: {}", planner_dir.display());
    }

    fs::create_dir_all(&planner_dir)
        .with_context(|| format!("Failed to create directory: {}", planner_dir.display()))?;

    Ok(planner_dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Remove a file if present; returns whether something was removed
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("Failed to remove file: {}", path.display()))?;
    Ok(true)
}
