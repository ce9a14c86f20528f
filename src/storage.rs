use valentine_core::storage::{is_usable, KeyValueStorage, MemoryStorage, StorageError};
use web_sys as web;

/// `window.localStorage` behind the core storage trait.
pub struct LocalStorage {
    inner: web::Storage,
}

impl LocalStorage {
    pub fn open() -> Option<Self> {
        let inner = web::window()?.local_storage().ok().flatten()?;
        Some(Self { inner })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(to_storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(to_storage_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(to_storage_error)
    }
}

fn to_storage_error(e: wasm_bindgen::JsValue) -> StorageError {
    let name = js_sys::Reflect::get(&e, &"name".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if name == "QuotaExceededError" {
        StorageError::QuotaExceeded
    } else {
        StorageError::Backend(format!("{:?}", e))
    }
}

/// Pick `localStorage` when it accepts a probe write, otherwise keep settings
/// in memory for this session only.
pub fn open_best() -> Box<dyn KeyValueStorage> {
    if let Some(mut local) = LocalStorage::open() {
        if is_usable(&mut local) {
            return Box::new(local);
        }
    }
    log::warn!("[config] localStorage not available, settings will not persist");
    Box::new(MemoryStorage::new())
}
