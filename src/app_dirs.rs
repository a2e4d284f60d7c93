use directories::ProjectDirs;
use std::path::PathBuf;

/// One place that knows where state and config live on disk
pub struct AppDirs;

impl AppDirs {
    /// session log under $HOME/.local/state/typetrain
    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("log.csv"))
    }

    /// practice history (resume points) next to the log
    pub fn history_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("history.json"))
    }

    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "typetrain") {
            proj_dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("typetrain_config.json")
        }
    }

    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("typetrain"),
            )
        } else {
            ProjectDirs::from("", "", "typetrain")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
