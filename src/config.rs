//! Configuration for rollstore
//!
//! Centralized configuration with sensible defaults. The storage location is
//! always passed in through here; nothing in the crate hardcodes a path.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Default name of the backing data file
pub const DEFAULT_DATA_FILE: &str = "student_records.dat";

/// Default name of the scratch file used by delete
pub const DEFAULT_TEMP_FILE: &str = "temp_records.dat";

/// Main configuration for a RecordStore
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file holding the fixed-width records
    pub data_path: PathBuf,

    /// Scratch file for delete's copy-and-replace.
    /// `None` means `temp_records.dat` next to the data file.
    pub temp_path: Option<PathBuf>,

    /// When to force written bytes to disk
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Record Policy
    // -------------------------------------------------------------------------
    /// Reject appends whose roll number is already present.
    /// Off by default: legacy data files may already hold duplicates.
    pub enforce_unique_keys: bool,
}

/// Sync strategy: whether writes are fsynced before an operation returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every append/update and before delete's rename (safest)
    EveryWrite,

    /// Leave flushing to the OS page cache
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            temp_path: None,
            sync_strategy: SyncStrategy::EveryWrite,
            enforce_unique_keys: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Effective path of the delete scratch file.
    ///
    /// Defaults to a sibling of the data file so the final rename never
    /// crosses a filesystem boundary.
    pub fn temp_path(&self) -> PathBuf {
        match &self.temp_path {
            Some(path) => path.clone(),
            None => sibling(&self.data_path, DEFAULT_TEMP_FILE),
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(StoreError::Config("data path is empty".to_string()));
        }
        if self.temp_path() == self.data_path {
            return Err(StoreError::Config(format!(
                "temporary path must differ from data path ({})",
                self.data_path.display()
            )));
        }
        Ok(())
    }
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Override the delete scratch file
    pub fn temp_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_path = Some(path.into());
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Reject duplicate roll numbers on append
    pub fn enforce_unique_keys(mut self, enforce: bool) -> Self {
        self.config.enforce_unique_keys = enforce;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
