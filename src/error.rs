use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Base config file {path} does not exist")]
    BaseMissing { path: PathBuf },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source} (in-memory overrides no longer match disk)")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render {path}: {reason}")]
    Render { path: PathBuf, reason: String },

    #[error("Failed to serialize override config: {0}")]
    Serialize(String),

    #[error("Invalid config path '{path}'")]
    InvalidPath { path: String },

    #[error("No keybinding at '{path}'")]
    UnresolvedKeybinding { path: String },

    #[error("Unknown keybinding target '{target}' (expected 'electron' or 'v-hotkey')")]
    UnknownTarget { target: String },

    #[error("File watcher error: {source}")]
    Watch {
        #[from]
        source: notify::Error,
    },
}
