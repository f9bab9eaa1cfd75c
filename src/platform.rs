//! Process-wide platform facts, injected into the config subsystem.
//!
//! Nothing in this crate reads ambient global state at use time: the store,
//! loader, and keybinding translation all take their platform knowledge from
//! a [`PlatformInfo`] built once at the composition root. Tests construct one
//! by hand pointing at a temp directory.
//!
//! File naming follows the two-layer scheme: a required `default.config.toml`
//! (the base schema) plus an optional override file whose name depends on the
//! run mode — `local.config.toml` next to the sources in development,
//! `user.config.toml` in the platform config directory when packaged.

use std::path::PathBuf;

use serde::Serialize;

/// Name of the required base config file.
pub const BASE_FILE_NAME: &str = "default.config.toml";
/// Override file name in development mode.
pub const DEV_OVERRIDE_FILE_NAME: &str = "local.config.toml";
/// Override file name when running packaged.
pub const USER_OVERRIDE_FILE_NAME: &str = "user.config.toml";

/// Operating system family, as far as keybinding modifiers care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Windows,
    Linux,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Platform {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// Whether the process runs from a source checkout or an installed package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Packaged,
}

/// Read-only facts the config subsystem needs from its host process.
#[derive(Debug, Clone)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub mode: Mode,
    /// Directory holding both config files for the current mode.
    pub config_dir: PathBuf,
}

impl PlatformInfo {
    /// Detect platform facts for `app_name`.
    ///
    /// Development mode resolves the working directory; packaged mode the
    /// platform config directory (XDG on Linux, `~/Library/Application
    /// Support` on macOS). Returns `None` when neither can be resolved.
    pub fn detect(app_name: &str, mode: Mode) -> Option<PlatformInfo> {
        let config_dir = match mode {
            Mode::Development => std::env::current_dir().ok()?,
            Mode::Packaged => {
                let proj = directories::ProjectDirs::from("", "", app_name)?;
                proj.config_dir().to_path_buf()
            }
        };
        Some(PlatformInfo {
            platform: Platform::current(),
            mode,
            config_dir,
        })
    }

    /// Location of the base (default) config file.
    pub fn base_path(&self) -> PathBuf {
        self.config_dir.join(BASE_FILE_NAME)
    }

    /// Location of the override file for the current mode.
    pub fn override_path(&self) -> PathBuf {
        let name = match self.mode {
            Mode::Development => DEV_OVERRIDE_FILE_NAME,
            Mode::Packaged => USER_OVERRIDE_FILE_NAME,
        };
        self.config_dir.join(name)
    }
}
