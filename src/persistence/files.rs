use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the nudge directory - checks for local .nudge first, then falls back to global ~/.nudge
pub fn get_nudge_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_nudge(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".nudge"))
}

/// Find local .nudge directory by walking up the directory tree
fn find_local_nudge(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let nudge_dir = current.join(".nudge");
        if nudge_dir.exists() && nudge_dir.is_dir() {
            return Some(nudge_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the nudge directory exists
pub fn ensure_nudge_dir() -> Result<PathBuf> {
    let dir = get_nudge_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .nudge directory in the current directory
pub fn init_local_nudge() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let nudge_dir = current_dir.join(".nudge");

    if nudge_dir.exists() {
        anyhow::bail!("Nudge directory already exists: {}", nudge_dir.display());
    }

    fs::create_dir_all(&nudge_dir)
        .with_context(|| format!("Failed to create directory: {}", nudge_dir.display()))?;

    Ok(nudge_dir)
}

/// Get path to the task snapshot file
pub fn tasks_file() -> Result<PathBuf> {
    Ok(ensure_nudge_dir()?.join("tasks.json"))
}

/// Get path to meta.json (stores the notification permission state)
pub fn meta_file() -> Result<PathBuf> {
    Ok(ensure_nudge_dir()?.join("meta.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

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
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
