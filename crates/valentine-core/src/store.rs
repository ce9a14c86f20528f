//! Nested configuration store with dotted-path access.
//!
//! The tree lives in memory as untyped JSON. Every write goes straight to
//! the backing [`KeyValueStorage`]; storage failures are logged and never
//! surface to callers, so the page keeps working with in-memory values.

use crate::constants::CONFIG_STORAGE_KEY;
use crate::merge::deep_merge;
use crate::storage::{KeyValueStorage, StorageError};
use crate::tree::{ConfigTree, Photo, ThemeMode, Tone};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use thiserror::Error;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid token regex")
});

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config path {0:?}")]
    InvalidPath(String),
    #[error("invalid value {value:?} for {path}")]
    InvalidValue { path: &'static str, value: String },
    #[error("no photo at index {index} (have {len})")]
    PhotoIndex { index: usize, len: usize },
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of [`ConfigStore::load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was found and merged onto the defaults.
    Restored,
    /// Nothing persisted yet.
    Missing,
    /// The snapshot or the storage was unusable; defaults kept.
    Ignored,
}

pub struct ConfigStore<S> {
    tree: Value,
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ConfigStore<S> {
    /// Store holding the compiled-in defaults. Nothing is read yet.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CONFIG_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            tree: default_tree(),
            storage,
            key: key.to_string(),
        }
    }

    /// Construct and immediately overlay any persisted snapshot.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Tear the store down, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn load(&mut self) -> LoadOutcome {
        let saved = match self.storage.get_item(&self.key) {
            Ok(Some(s)) => s,
            Ok(None) => return LoadOutcome::Missing,
            Err(e) => {
                log::warn!("[config] could not load saved configuration: {e}");
                return LoadOutcome::Ignored;
            }
        };
        match serde_json::from_str::<Value>(&saved) {
            Ok(parsed @ Value::Object(_)) => {
                deep_merge(&mut self.tree, parsed);
                log::info!("[config] restored saved configuration");
                LoadOutcome::Restored
            }
            Ok(_) => {
                log::warn!("[config] saved configuration is not an object; using defaults");
                LoadOutcome::Ignored
            }
            Err(e) => {
                log::warn!("[config] could not parse saved configuration: {e}");
                LoadOutcome::Ignored
            }
        }
    }

    pub fn save(&mut self) {
        if let Err(e) = self.try_save() {
            log::warn!("[config] could not save configuration: {e}");
        }
    }

    pub fn try_save(&mut self) -> Result<(), ConfigError> {
        let text = serde_json::to_string(&self.tree)?;
        self.storage.set_item(&self.key, &text)?;
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.tree, |node, key| match node {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Write `value` at `path`, creating intermediate mappings, then persist.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        let keys = split_path(path)?;
        let Some((last, parents)) = keys.split_last() else {
            return Err(ConfigError::InvalidPath(path.to_string()));
        };
        let mut node = &mut self.tree;
        for key in parents {
            node = child_or_create(node, key);
        }
        *child_or_create(node, last) = value.into();
        self.save();
        Ok(())
    }

    /// Replace every `{{name}}` token with `personalization.name`.
    ///
    /// Unknown or empty fields leave the token as written.
    pub fn interpolate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let fields = self.tree.get("personalization");
        TOKEN
            .replace_all(text, |caps: &Captures| {
                match fields.and_then(|p| p.get(&caps[1])) {
                    Some(Value::String(s)) if !s.is_empty() => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Interpolated string at `path`; empty when absent or not a string.
    pub fn text(&self, path: &str) -> String {
        self.get_str(path)
            .map(|s| self.interpolate(s))
            .unwrap_or_default()
    }

    /// Typed view of the tree. Branches with an unexpected shape fall back to
    /// their defaults.
    pub fn snapshot(&self) -> ConfigTree {
        let defaults = ConfigTree::default();
        ConfigTree {
            personalization: self.branch("personalization", defaults.personalization),
            messages: self.branch("messages", defaults.messages),
            photos: self.photos(),
            audio: self.branch("audio", defaults.audio),
            theme: self.branch("theme", defaults.theme),
        }
    }

    /// Photo records in order. Entries that are not photo records (such as
    /// the nulls left by an index write past the end) are skipped.
    pub fn photos(&self) -> Vec<Photo> {
        match self.tree.get("photos") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn tone(&self) -> Tone {
        self.get_str("theme.tone")
            .and_then(Tone::parse)
            .unwrap_or_default()
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.get_str("theme.mode")
            .and_then(ThemeMode::parse)
            .unwrap_or_default()
    }

    /// Success-screen messages for the current tone.
    pub fn yes_messages(&self) -> Vec<String> {
        let path = format!("messages.yesMessages.{}", self.tone().as_str());
        self.get(&path)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn no_button_teases(&self) -> Vec<String> {
        self.get("messages.noButtonTeases")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn toggle_theme_mode(&mut self) -> Result<ThemeMode, ConfigError> {
        let next = self.theme_mode().toggled();
        self.set("theme.mode", next.as_str())?;
        Ok(next)
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<(), ConfigError> {
        self.set("audio.volume", f64::from(volume.clamp(0.0, 1.0)))
    }

    pub fn add_photo(&mut self, photo: Photo) -> Result<(), ConfigError> {
        let mut photos = self.photos();
        photos.push(photo);
        self.write_photos(&photos)
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<Photo, ConfigError> {
        let mut photos = self.photos();
        if index >= photos.len() {
            return Err(ConfigError::PhotoIndex {
                index,
                len: photos.len(),
            });
        }
        let removed = photos.remove(index);
        self.write_photos(&photos)?;
        Ok(removed)
    }

    pub fn set_photo_caption(&mut self, index: usize, caption: &str) -> Result<(), ConfigError> {
        let mut photos = self.photos();
        let len = photos.len();
        let photo = photos
            .get_mut(index)
            .ok_or(ConfigError::PhotoIndex { index, len })?;
        photo.caption = caption.to_string();
        self.write_photos(&photos)
    }

    /// Restore compiled-in defaults and persist them.
    pub fn reset(&mut self) {
        self.tree = default_tree();
        self.save();
    }

    fn write_photos(&mut self, photos: &[Photo]) -> Result<(), ConfigError> {
        let value = serde_json::to_value(photos)?;
        self.set("photos", value)
    }

    fn branch<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.tree.get(key) {
            Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
                log::warn!("[config] malformed `{key}` branch, using defaults: {e}");
                fallback
            }),
            None => fallback,
        }
    }
}

fn default_tree() -> Value {
    serde_json::to_value(ConfigTree::default()).unwrap_or_else(|e| {
        log::error!("[config] could not build default configuration: {e}");
        Value::Object(Map::new())
    })
}

fn split_path(path: &str) -> Result<SmallVec<[&str; 4]>, ConfigError> {
    let keys: SmallVec<[&str; 4]> = path.split('.').collect();
    if keys.iter().any(|k| k.is_empty()) {
        return Err(ConfigError::InvalidPath(path.to_string()));
    }
    Ok(keys)
}

/// Child `key` of `node`. A numeric key on a list indexes it, padding with
/// nulls when past the end so existing items survive. Any other non-mapping
/// node is replaced by an empty mapping first.
fn child_or_create<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    let index = match node {
        Value::Array(_) => key.parse::<usize>().ok(),
        _ => None,
    };
    if let Some(i) = index {
        if let Value::Array(items) = &mut *node {
            if i >= items.len() {
                items.resize(i + 1, Value::Null);
            }
        }
        return &mut node[i];
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    &mut node[key]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DisabledStorage, MemoryStorage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn empty_store() -> ConfigStore<MemoryStorage> {
        let mut store = ConfigStore::new(MemoryStorage::new());
        store.tree = json!({});
        store
    }

    #[test]
    fn set_creates_intermediate_branches() {
        let mut store = empty_store();
        store.set("a.b.c", 5).unwrap();
        assert_eq!(store.tree, json!({"a": {"b": {"c": 5}}}));
        assert_eq!(store.get("a.b.c"), Some(&json!(5)));
    }

    #[test]
    fn set_replaces_scalar_intermediate() {
        let mut store = empty_store();
        store.set("a", "leaf").unwrap();
        store.set("a.b", true).unwrap();
        assert_eq!(store.tree, json!({"a": {"b": true}}));
    }

    #[test]
    fn set_indexes_into_lists() {
        let store_tree = json!({"photos": [{"caption": "x"}]});
        let mut store = empty_store();
        store.tree = store_tree;
        store.set("photos.0.caption", "y").unwrap();
        assert_eq!(store.get_str("photos.0.caption"), Some("y"));
        assert!(store.get("photos.3.caption").is_none());
    }

    #[test]
    fn set_past_end_of_list_pads_instead_of_replacing() {
        let mut store = empty_store();
        store.tree = json!({"tags": ["a"]});
        store.set("tags.2", "c").unwrap();
        assert_eq!(store.tree, json!({"tags": ["a", null, "c"]}));
    }

    #[test]
    fn empty_segments_are_rejected() {
        let mut store = empty_store();
        assert!(matches!(store.set("", 1), Err(ConfigError::InvalidPath(_))));
        assert!(matches!(store.set("a..b", 1), Err(ConfigError::InvalidPath(_))));
        assert_eq!(store.tree, json!({}));
    }

    #[test]
    fn get_missing_path_is_none() {
        let store = ConfigStore::new(MemoryStorage::new());
        assert!(store.get("theme.nope").is_none());
        assert!(store.get("theme.mode.deeper").is_none());
        assert!(store.get("").is_none());
    }

    #[test]
    fn set_survives_disabled_storage() {
        let mut store = ConfigStore::new(DisabledStorage);
        store.set("theme.tone", "cute").unwrap();
        assert_eq!(store.tone(), Tone::Cute);
        assert!(store.try_save().is_err());
    }
}
