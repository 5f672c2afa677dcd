//! Configuration service.
//!
//! Loads `config.toml` from the config directory and applies environment
//! overrides on top.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use studio_core::config::AppConfig;
use studio_core::error::{Result, StudioError};

use crate::paths::StudioPaths;

pub const ENV_API_URL: &str = "STUDIO_API_URL";
pub const ENV_API_ORIGIN: &str = "STUDIO_API_ORIGIN";
pub const ENV_DATA_DIR: &str = "STUDIO_DATA_DIR";
pub const ENV_LOG: &str = "STUDIO_LOG";

/// Loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: StudioPaths,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(paths: StudioPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| StudioError::internal("Config cache lock poisoned"))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = load_file(&self.paths.config_file()?)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| StudioError::internal("Config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Directory holding the key-value slots.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let config = self.get_config()?;
        self.paths.data_dir_or(config.storage.data_dir.as_deref())
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(StudioPaths::default())
    }
}

/// Reads `path`. A missing or empty file yields the defaults.
pub fn load_file(path: &Path) -> Result<AppConfig> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(AppConfig::default()),
        Ok(content) => {
            let config: AppConfig = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "Loaded config file");
            Ok(config)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Applies `STUDIO_*` overrides read through `lookup`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = get(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(origin) = get(ENV_API_ORIGIN) {
        config.api.origin = origin;
    }
    if let Some(dir) = get(ENV_DATA_DIR) {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(level) = get(ENV_LOG) {
        config.logging.level = level;
    }
}
