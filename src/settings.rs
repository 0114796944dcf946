//! Persisted console settings.
//!
//! Settings live under a single key of a small key-value store, as one
//! JSON document. A missing document means defaults; a corrupt one is
//! logged and replaced by defaults so startup never fails on it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{info, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::model::Settings;

pub const SETTINGS_KEY: &str = "dashboardSettings";

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DashboardResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DashboardResult<()>;
    fn clear(&self, key: &str) -> DashboardResult<()>;
}

/// In-process store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DashboardResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DashboardResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> DashboardResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<config dir>/opsboard/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("opsboard").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> DashboardResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|source| DashboardError::StorageParseFailure { source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> DashboardResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|source| DashboardError::StorageParseFailure { source })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// A corrupt file is replaced rather than blocking writes forever.
    fn read_for_update(&self) -> BTreeMap<String, String> {
        self.read_all().unwrap_or_else(|e| {
            warn!(
                event = "settings.store_reset",
                path = %self.path.display(),
                error_code = e.error_code(),
                error = %e
            );
            BTreeMap::new()
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DashboardResult<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DashboardResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_for_update();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn clear(&self, key: &str) -> DashboardResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_for_update();
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Parse a stored settings document.
pub fn parse_settings(raw: &str) -> DashboardResult<Settings> {
    serde_json::from_str(raw).map_err(|source| DashboardError::StorageParseFailure { source })
}

/// Load settings, falling back to defaults on any failure.
pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    let loaded = store
        .get(SETTINGS_KEY)
        .and_then(|raw| raw.map(|r| parse_settings(&r)).transpose());
    match loaded {
        Ok(Some(settings)) => {
            info!(event = "settings.loaded", system_name = %settings.system_name);
            settings
        }
        Ok(None) => {
            info!(event = "settings.defaults", reason = "no stored settings");
            Settings::default()
        }
        Err(e) => {
            warn!(
                event = "settings.load_failed",
                error_code = e.error_code(),
                error = %e,
                "using default settings"
            );
            Settings::default()
        }
    }
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &Settings) -> DashboardResult<()> {
    let raw = serde_json::to_string(settings)
        .map_err(|source| DashboardError::StorageParseFailure { source })?;
    store.set(SETTINGS_KEY, &raw)?;
    info!(event = "settings.saved");
    Ok(())
}

/// Drop stored settings and return the defaults now in effect.
pub fn reset_settings(store: &dyn KeyValueStore) -> DashboardResult<Settings> {
    store.clear(SETTINGS_KEY)?;
    info!(event = "settings.reset");
    Ok(Settings::default())
}
