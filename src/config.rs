use std::fs;
use std::path::{Path, PathBuf};

use log::{warn, LevelFilter};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ChromaError, Result};

/// Default SDK library name for the current pointer width.
#[cfg(target_pointer_width = "64")]
pub const DEFAULT_SDK_LIBRARY: &str = "RzChromaSDK64.dll";
#[cfg(not(target_pointer_width = "64"))]
pub const DEFAULT_SDK_LIBRARY: &str = "RzChromaSDK.dll";

/// Library configuration persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    /// File name or path of the native SDK library
    pub sdk_library: String,

    /// Maximum log level: "off" | "error" | "warn" | "info" | "debug" | "trace"
    pub log_level: String,

    /// Whether to clear every constructed device before uninitializing
    pub clear_on_uninitialize: bool,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            sdk_library: DEFAULT_SDK_LIBRARY.into(),
            log_level: "info".into(),
            clear_on_uninitialize: false,
        }
    }
}

impl ChromaConfig {
    /// Parsed `log_level`, falling back to `Info` on unknown names.
    #[must_use]
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using info", self.log_level);
            LevelFilter::Info
        })
    }
}

/// Thread-safe configuration store with automatic persistence.
pub struct ConfigStore {
    path: PathBuf,
    inner: RwLock<ChromaConfig>,
}

impl ConfigStore {
    /// Load `config.json` from `dir`, creating it with defaults if missing.
    pub fn init(dir: &Path) -> Result<Self> {
        let path = dir.join("config.json");

        fs::create_dir_all(dir).map_err(|e| {
            ChromaError::Config(format!("Failed to create config directory: {e}"))
        })?;

        let config = if path.exists() {
            let data = fs::read_to_string(&path)
                .map_err(|e| ChromaError::Config(format!("Failed to read config file: {e}")))?;
            serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Config parse error ({e}), using defaults");
                ChromaConfig::default()
            })
        } else {
            let default = ChromaConfig::default();
            if let Err(e) = write_to_disk(&path, &default) {
                warn!("Could not write default config: {e}");
            }
            default
        };

        Ok(Self {
            path,
            inner: RwLock::new(config),
        })
    }

    /// Read the full config snapshot.
    pub fn get(&self) -> ChromaConfig {
        self.inner.read().clone()
    }

    /// Update config via a closure and persist to disk.
    pub fn update<F>(&self, f: F) -> Result<ChromaConfig>
    where
        F: FnOnce(&mut ChromaConfig),
    {
        let mut guard = self.inner.write();
        f(&mut guard);
        write_to_disk(&self.path, &guard)?;
        Ok(guard.clone())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_to_disk(path: &Path, config: &ChromaConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| ChromaError::Config(format!("Failed to serialize config: {e}")))?;

    fs::write(path, json)
        .map_err(|e| ChromaError::Config(format!("Failed to write config file: {e}")))?;

    Ok(())
}
