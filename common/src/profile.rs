use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::config::{ConfigContentProvider, ConfigError, FileContentConfigProvider};

pub const PLAYER_NAME_KEY: &str = "playerName";
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Small persistent string map for client-side preferences.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// Stores every key in one YAML mapping behind a content provider.
pub struct YamlFileStore<TConfigContentProvider: ConfigContentProvider = FileContentConfigProvider> {
    provider: TConfigContentProvider,
    lock: Mutex<()>,
}

impl YamlFileStore<FileContentConfigProvider> {
    pub fn from_path(path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(path))
    }
}

impl<TConfigContentProvider: ConfigContentProvider> YamlFileStore<TConfigContentProvider> {
    pub fn new(provider: TConfigContentProvider) -> Self {
        Self {
            provider,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        match self.provider.get_config_content()? {
            Some(content) if !content.trim().is_empty() => {
                serde_yaml_ng::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            _ => Ok(BTreeMap::new()),
        }
    }
}

impl<TConfigContentProvider: ConfigContentProvider> KeyValueStore for YamlFileStore<TConfigContentProvider> {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        let content = serde_yaml_ng::to_string(&values).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        self.provider.set_config_content(&content)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored player name, or `"Anonymous"` when missing, blank or unreadable.
pub fn player_name(store: &impl KeyValueStore) -> String {
    match store.get(PLAYER_NAME_KEY) {
        Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => DEFAULT_PLAYER_NAME.to_string(),
        Err(e) => {
            crate::log_warn!("Failed to read player name: {}", e);
            DEFAULT_PLAYER_NAME.to_string()
        }
    }
}

pub fn set_player_name(store: &impl KeyValueStore, name: &str) -> Result<(), ConfigError> {
    store.set(PLAYER_NAME_KEY, name.trim())
}
