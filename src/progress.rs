//! Completed-lesson records.
//!
//! A small JSON file at `$LECTERN_DATA_DIR/progress.json`, or
//! `<data dir>/lectern/progress.json`, keyed by lesson id.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LECTERN_DATA_DIR";

/// One lesson's completion history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub title: String,
    pub slide_count: usize,
    pub first_completed: DateTime<Utc>,
    pub last_completed: DateTime<Utc>,
    pub times_completed: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProgressStore {
    #[serde(default)]
    lessons: BTreeMap<String, CompletionRecord>,
    #[serde(skip)]
    path: PathBuf,
}

impl ProgressStore {
    /// Location of the progress file.
    pub fn default_path() -> Result<PathBuf> {
        let dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .context("Could not determine data directory")?
                .join("lectern"),
        };
        Ok(dir.join("progress.json"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Load the store at `path`; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let mut store = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<Self>(&content)
                .with_context(|| format!("Corrupt progress file: {}", path.display()))?
        } else {
            Self::default()
        };
        store.path = path.to_path_buf();
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, lesson_id: &str) -> Option<&CompletionRecord> {
        self.lessons.get(lesson_id)
    }

    pub fn completed_count(&self) -> usize {
        self.lessons.len()
    }

    /// Record that a lesson was played to the end.
    pub fn record_completion(
        &mut self,
        lesson_id: &str,
        title: &str,
        slide_count: usize,
        at: DateTime<Utc>,
    ) -> &CompletionRecord {
        let record = self
            .lessons
            .entry(lesson_id.to_string())
            .or_insert_with(|| CompletionRecord {
                title: title.to_string(),
                slide_count,
                first_completed: at,
                last_completed: at,
                times_completed: 0,
            });
        record.title = title.to_string();
        record.slide_count = slide_count;
        record.last_completed = at;
        record.times_completed += 1;
        record
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::open(&dir.path().join("progress.json")).unwrap();
        assert_eq!(store.completed_count(), 0);
        assert!(store.get("lesson1").is_none());
    }

    #[test]
    fn repeat_completion_keeps_first_timestamp() {
        let dir = TempDir::new().unwrap();
        let mut store = ProgressStore::open(&dir.path().join("progress.json")).unwrap();

        store.record_completion("lesson1", "Intro", 3, at(9));
        let record = store.record_completion("lesson1", "Intro", 4, at(12)).clone();

        assert_eq!(record.times_completed, 2);
        assert_eq!(record.first_completed, at(9));
        assert_eq!(record.last_completed, at(12));
        assert_eq!(record.slide_count, 4);
    }

    #[test]
    fn save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("progress.json");

        let mut store = ProgressStore::open(&path).unwrap();
        store.record_completion("lesson2", "Variables", 5, at(10));
        store.save().unwrap();

        let reopened = ProgressStore::open(&path).unwrap();
        assert_eq!(reopened.completed_count(), 1);
        assert_eq!(reopened.get("lesson2").unwrap().title, "Variables");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();
        let err = ProgressStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Corrupt progress file"));
    }
}
