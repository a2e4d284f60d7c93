use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::app_dirs::AppDirs;
use crate::source::ExerciseKind;

/// cumulative progress for one source identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceProgress {
    pub paragraphs_completed: usize,
    pub last_practiced: DateTime<Local>,
}

/// practice progress across runs, keyed by [`source_key`]
///
/// `paragraphs_completed` is the resume point: file-backed sources skip that
/// many paragraphs when asked to resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PracticeHistory {
    #[serde(default)]
    sources: HashMap<String, SourceProgress>,
}

impl PracticeHistory {
    pub fn progress(&self, key: &str) -> Option<&SourceProgress> {
        self.sources.get(key)
    }

    pub fn resume_point(&self, key: &str) -> usize {
        self.progress(key)
            .map(|p| p.paragraphs_completed)
            .unwrap_or(0)
    }

    /// rolls a finished run into the per-source counters
    pub fn record_run(&mut self, key: &str, paragraphs: usize) {
        let entry = self
            .sources
            .entry(key.to_string())
            .or_insert_with(|| SourceProgress {
                paragraphs_completed: 0,
                last_practiced: Local::now(),
            });
        entry.paragraphs_completed += paragraphs;
        entry.last_practiced = Local::now();
    }
}

/// identity under which an exercise accumulates progress: the kind alone for
/// generator-backed sources, kind plus path for file-backed ones
pub fn source_key(kind: ExerciseKind, path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("{kind}:{}", path.display()),
        None => kind.to_string(),
    }
}

pub trait HistoryStore {
    fn load(&self) -> PracticeHistory;
    fn save(&self, history: &PracticeHistory) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new() -> Self {
        let path = AppDirs::history_path().unwrap_or_else(|| PathBuf::from("typetrain_history.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> PracticeHistory {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(history) = serde_json::from_slice::<PracticeHistory>(&bytes) {
                return history;
            }
        }
        PracticeHistory::default()
    }

    fn save(&self, history: &PracticeHistory) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(history).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
