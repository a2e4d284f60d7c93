use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// persisted defaults for the generator-backed exercises; flags given on the
/// command line win over these
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub numbers_words: usize,
    pub numbers_digits: u32,
    pub serials_words: usize,
    pub serials_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            numbers_words: 4,
            numbers_digits: 4,
            serials_words: 6,
            serials_chars: 9,
        }
    }
}

impl Config {
    /// Hand-edited files can carry zeros or oversized digit counts; pull
    /// them back into the ranges the command-line flags accept.
    pub fn sanitized(mut self) -> Self {
        self.numbers_words = self.numbers_words.max(1);
        self.numbers_digits = self.numbers_digits.clamp(1, 18);
        self.serials_words = self.serials_words.max(1);
        self.serials_chars = self.serials_chars.max(1);
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg.sanitized();
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
