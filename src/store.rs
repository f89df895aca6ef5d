//! Single-slot persistence for the slide configuration.
//!
//! Failures never reach the caller: a failed load reads as "nothing saved"
//! and a failed save is logged and dropped.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::SlideConfig;
use crate::constants::{APP_DIR, CONFIG_FILENAME};

pub trait ConfigStore {
    fn save(&mut self, config: &SlideConfig);
    fn load(&self) -> Option<SlideConfig>;
}

/// JSON file under the user's config directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(CONFIG_FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, config: &SlideConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(config).context("Failed to encode slide configuration")?;
        fs::write(&self.path, json).with_context(|| format!("Failed to write {:?}", self.path))?;
        Ok(())
    }

    fn try_load(&self) -> Result<Option<SlideConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).with_context(|| format!("Failed to read {:?}", self.path))?;
        let config = serde_json::from_str(&json).with_context(|| format!("Failed to parse {:?}", self.path))?;
        Ok(Some(config))
    }
}

impl ConfigStore for FileStore {
    fn save(&mut self, config: &SlideConfig) {
        match self.try_save(config) {
            Ok(()) => info!(path = ?self.path, images = config.selected_images.len(), "Slide configuration saved"),
            Err(e) => error!("Failed to save slide configuration: {e:#}"),
        }
    }

    fn load(&self) -> Option<SlideConfig> {
        match self.try_load() {
            Ok(Some(config)) => {
                info!(path = ?self.path, last_updated = config.last_updated, "Loaded saved configuration");
                Some(config)
            }
            Ok(None) => {
                info!("No saved configuration found");
                None
            }
            Err(e) => {
                error!("Failed to load slide configuration: {e:#}");
                None
            }
        }
    }
}

/// Keeps the serialized configuration in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn save(&mut self, config: &SlideConfig) {
        match serde_json::to_string(config) {
            Ok(json) => self.slot = Some(json),
            Err(e) => error!("Failed to save slide configuration: {e}"),
        }
    }

    fn load(&self) -> Option<SlideConfig> {
        let json = self.slot.as_ref()?;
        serde_json::from_str(json)
            .inspect_err(|e| error!("Failed to load slide configuration: {e}"))
            .ok()
    }
}
