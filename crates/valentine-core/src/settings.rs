//! What the settings dialog edits, and how an edited form is written back.

use crate::storage::KeyValueStorage;
use crate::store::{ConfigError, ConfigStore};
use crate::tree::{ConfigTree, Photo, Tone};
use crate::validate::{validate_date, validate_url};
use serde_json::Value;

pub const UPLOADED_CAPTION: &str = "New memory";
pub const UPLOADED_ALT: &str = "Uploaded photo";

#[derive(Clone, Debug, PartialEq)]
pub struct SettingsForm {
    pub lover_name: String,
    pub your_name: String,
    pub special_place: String,
    pub date: String,
    pub memory: String,
    pub subhead: String,
    pub tone: Tone,
    pub audio_enabled: bool,
}

impl SettingsForm {
    pub fn from_tree(tree: &ConfigTree) -> Self {
        let p = &tree.personalization;
        Self {
            lover_name: p.lover_name.clone(),
            your_name: p.your_name.clone(),
            special_place: p.special_place.clone(),
            date: p.date.clone(),
            memory: p.memory.clone(),
            subhead: tree.messages.subhead.clone(),
            tone: tree.theme.tone,
            audio_enabled: tree.audio.enabled,
        }
    }

    fn entries(&self) -> [(&'static str, Value); 8] {
        [
            ("personalization.lover_name", self.lover_name.trim().into()),
            ("personalization.your_name", self.your_name.trim().into()),
            ("personalization.special_place", self.special_place.trim().into()),
            ("personalization.date", self.date.trim().into()),
            ("personalization.memory", self.memory.trim().into()),
            ("messages.subhead", self.subhead.trim().into()),
            ("theme.tone", self.tone.as_str().into()),
            ("audio.enabled", self.audio_enabled.into()),
        ]
    }
}

/// Gallery record for a freshly uploaded image.
pub fn uploaded_photo(url: &str, uploaded_at: &str) -> Photo {
    Photo {
        date: Some(uploaded_at.to_string()),
        ..Photo::new(url, UPLOADED_CAPTION, UPLOADED_ALT)
    }
}

impl<S: KeyValueStorage> ConfigStore<S> {
    /// Write every form field. An empty date is allowed; anything else must
    /// be a real `YYYY-MM-DD` day. Nothing is written when the form is
    /// rejected.
    pub fn apply_settings(&mut self, form: &SettingsForm) -> Result<(), ConfigError> {
        let date = form.date.trim();
        if !date.is_empty() && !validate_date(date) {
            return Err(ConfigError::InvalidValue {
                path: "personalization.date",
                value: date.to_string(),
            });
        }
        for (path, value) in form.entries() {
            self.set(path, value)?;
        }
        Ok(())
    }

    pub fn set_audio_url(&mut self, url: &str) -> Result<(), ConfigError> {
        if !validate_url(url) {
            return Err(ConfigError::InvalidValue {
                path: "audio.url",
                value: url.chars().take(64).collect(),
            });
        }
        self.set("audio.url", url)
    }

    /// Append an uploaded image. `url` is usually a `data:` URL.
    pub fn add_uploaded_photo(&mut self, url: &str, uploaded_at: &str) -> Result<(), ConfigError> {
        if !validate_url(url) {
            return Err(ConfigError::InvalidValue {
                path: "photos",
                value: url.chars().take(64).collect(),
            });
        }
        self.add_photo(uploaded_photo(url, uploaded_at))
    }
}
