//! JSON persistence for [`PluginOptions`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::options::PluginOptions;

/// Errors raised when reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Wraps underlying IO errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Wraps JSON serialization issues.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reader/writer for a preset configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the options, or defaults when the file does not exist.
    pub fn load(&self) -> Result<PluginOptions, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no preset config, using defaults");
            return Ok(PluginOptions::default());
        }
        let bytes = fs::read(&self.path)?;
        let options = serde_json::from_slice(&bytes)?;
        Ok(options)
    }

    /// Writes `options` back as indented JSON, creating missing parent
    /// directories. Hooks are not persisted.
    pub fn save(&self, options: &PluginOptions) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(options)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved preset config");
        Ok(())
    }

    /// Location of the preset config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
