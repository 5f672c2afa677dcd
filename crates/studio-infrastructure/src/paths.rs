//! Platform path resolution.
//!
//! ```text
//! ~/.config/studio/            # Config directory
//! └── config.toml              # Optional client configuration
//!
//! ~/.local/share/studio/       # Data directory (key-value slots)
//! ├── studio_state             # Persisted snapshot (JSON)
//! └── auth_token               # Bearer token
//! ```

use std::path::{Path, PathBuf};

use studio_core::error::{Result, StudioError};

const APP_DIR: &str = "studio";
const CONFIG_FILE: &str = "config.toml";

/// Resolves client directories, with an optional override for tests and
/// portable installs.
#[derive(Debug, Clone, Default)]
pub struct StudioPaths {
    base_override: Option<PathBuf>,
}

impl StudioPaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Config directory, e.g. `~/.config/studio/`.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| StudioError::config("Cannot find config directory"))
    }

    /// Data directory, e.g. `~/.local/share/studio/`.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base_override {
            return Ok(base.join("data"));
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| StudioError::config("Cannot find data directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Data directory from config, falling back to the platform default.
    pub fn data_dir_or(&self, configured: Option<&Path>) -> Result<PathBuf> {
        match configured {
            Some(dir) => Ok(dir.to_path_buf()),
            None => self.data_dir(),
        }
    }
}
