//! Key-value preference storage (LocalStorage on web)

use std::collections::HashMap;

use crate::error::PreferenceError;

/// String key-value store for small preferences
pub trait PreferenceStore {
    fn get(&self, key: &'static str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &'static str, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<&'static str, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &'static str) -> Result<Option<String>, PreferenceError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &'static str, value: &str) -> Result<(), PreferenceError> {
        self.items.insert(key, value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the window's LocalStorage (fails in some private modes)
    pub fn open() -> Result<Self, PreferenceError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PreferenceError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStore {
    fn get(&self, key: &'static str) -> Result<Option<String>, PreferenceError> {
        self.storage
            .get_item(key)
            .map_err(|_| PreferenceError::Unavailable)
    }

    fn set(&mut self, key: &'static str, value: &str) -> Result<(), PreferenceError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| PreferenceError::Write { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").expect("get"), None);
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
    }
}
