use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};

/// Durable string values by key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let values = self.values.lock().map_err(|_| "Store lock poisoned".to_string())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self.values.lock().map_err(|_| "Store lock poisoned".to_string())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A flat `key: value` YAML document behind a content provider.
pub struct YamlFileStore<P: ConfigContentProvider = FileContentConfigProvider> {
    provider: P,
    serializer: YamlConfigSerializer,
    write_lock: Mutex<()>,
}

impl YamlFileStore<FileContentConfigProvider> {
    pub fn from_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<P: ConfigContentProvider> YamlFileStore<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            serializer: YamlConfigSerializer::new(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, String> {
        match self.provider.get_config_content()? {
            Some(content) if !content.trim().is_empty() => self.serializer.deserialize(&content),
            _ => Ok(BTreeMap::new()),
        }
    }
}

impl<P: ConfigContentProvider + Send + Sync> KeyValueStore for YamlFileStore<P> {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.write_lock.lock().map_err(|_| "Store lock poisoned".to_string())?;
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let content = self.serializer.serialize(&values)?;
        self.provider.set_config_content(&content)
    }
}
