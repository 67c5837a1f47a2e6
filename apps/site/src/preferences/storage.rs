use std::collections::HashMap;

use thiserror::Error;

/// Storage key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";
/// Storage key holding a supported locale code.
pub const LOCALE_KEY: &str = "locale";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("preference storage is unavailable")]
    Unavailable,

    #[error("value for '{key}' cannot be stored: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Durable key/value storage for user preferences (`localStorage`, cookies).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. `unavailable()` builds one that fails every call, like
/// a browser with storage disabled.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            values: HashMap::new(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        MemoryStore {
            values: HashMap::new(),
            available: false,
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY), Ok(None));
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY), Ok(Some("light".to_string())));
    }

    #[test]
    fn test_unavailable_store_fails_every_call() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(store.get(LOCALE_KEY), Err(StorageError::Unavailable));
        assert_eq!(store.set(LOCALE_KEY, "es"), Err(StorageError::Unavailable));
    }
}
