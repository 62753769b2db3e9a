use crate::domain::Task;
use crate::persistence::{atomic_write, read_file};
use anyhow::Result;
use std::path::PathBuf;

/// Storage port for the task snapshot
///
/// The snapshot is always a complete copy of the in-memory list: `save`
/// rewrites the whole array, `load` returns it in stored order.
pub trait Store {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// Snapshot stored as a JSON array in tasks.json
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Store for FileStore {
    /// A missing or unparseable snapshot silently yields the empty list
    fn load(&self) -> Result<Vec<Task>> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        atomic_write(&self.path, &json)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_yields_empty() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_garbage_yields_empty() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        atomic_write(&path, "not json {").unwrap();

        let store = FileStore::new(path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip_preserves_order() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("tasks.json"));

        let due = Local.with_ymd_and_hms(2026, 3, 14, 16, 45, 0).unwrap();
        let tasks = vec![
            Task::new("Buy milk".to_string()),
            Task::with_reminder("Standup".to_string(), due, 10),
            Task::new("Buy milk".to_string()),
        ];
        store.save(&tasks).unwrap();

        let loaded = store.load().unwrap();
        let texts: Vec<&str> = loaded.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Buy milk", "Standup", "Buy milk"]);
        assert_eq!(loaded[1].reminder_at, Some(due));
        assert_eq!(loaded[1].lead_minutes, Some(10));
        assert!(loaded[0].reminder_at.is_none());
    }

    #[test]
    fn test_save_rewrites_whole_snapshot() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("tasks.json"));

        store.save(&[Task::new("Buy milk".to_string())]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
