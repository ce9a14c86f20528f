//! Durable key-value surface behind the configuration store.

use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Minimal string key-value store, shaped after the browser `Storage` API.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Used by tests and as the fallback when the browser
/// refuses `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: FnvHashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes whose total size would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: FnvHashMap::default(),
            quota_bytes: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage that is never available (private browsing, disabled cookies).
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledStorage;

impl KeyValueStorage for DisabledStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Probe write/remove used to decide whether a backend is usable.
pub fn is_usable(storage: &mut impl KeyValueStorage) -> bool {
    storage.set_item("test", "test").is_ok() && storage.remove_item("test").is_ok()
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip_and_remove() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.get_item("k").unwrap(), None);
        s.set_item("k", "v").unwrap();
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v"));
        s.remove_item("k").unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_writes_but_allows_overwrite() {
        let mut s = MemoryStorage::with_quota(8);
        s.set_item("k", "1234").unwrap();
        s.set_item("k", "1234567").unwrap();
        assert_eq!(s.set_item("k", "12345678"), Err(StorageError::QuotaExceeded));
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("1234567"));
    }

    #[test]
    fn probe_detects_disabled_backend() {
        assert!(is_usable(&mut MemoryStorage::new()));
        assert!(!is_usable(&mut DisabledStorage));
    }
}
