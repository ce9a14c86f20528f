//! Typed mirror of the configuration tree.
//!
//! The store itself works on an untyped JSON tree so that dotted-path writes
//! can create arbitrary branches. These types provide the compiled-in
//! defaults and a typed view for the front-end. Field names match the
//! persisted JSON (camelCase for the message lists).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigTree {
    pub personalization: Personalization,
    pub messages: Messages,
    pub photos: Vec<Photo>,
    pub audio: AudioSettings,
    pub theme: Theme,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self {
            personalization: Personalization::default(),
            messages: Messages::default(),
            photos: default_photos(),
            audio: AudioSettings::default(),
            theme: Theme::default(),
        }
    }
}

/// Named text fields substituted into `{{name}}` tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personalization {
    pub lover_name: String,
    pub your_name: String,
    pub special_place: String,
    pub date: String,
    pub memory: String,
}

impl Default for Personalization {
    fn default() -> Self {
        Self {
            lover_name: "My Valentine".to_string(),
            your_name: "Me".to_string(),
            special_place: "our favorite spot".to_string(),
            date: "2024-02-14".to_string(),
            memory: "that perfect day".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub subhead: String,
    pub no_button_teases: Vec<String>,
    pub yes_messages: BTreeMap<String, Vec<String>>,
}

impl Default for Messages {
    fn default() -> Self {
        let mut yes_messages = BTreeMap::new();
        yes_messages.insert(
            Tone::Cute.as_str().to_string(),
            strings(&[
                "You're my favorite notification 💕",
                "I love you more than {{your_name}} loves coffee ☕",
                "You make my heart go beep boop 🤖❤️",
                "You're the peanut butter to my jelly 🥜",
                "I'm bananas for you! 🍌",
                "You're my sunshine on a cloudy day ☀️",
                "Together we're pawfect! 🐾",
            ]),
        );
        yes_messages.insert(
            Tone::Dramatic.as_str().to_string(),
            strings(&[
                "This is the beginning of our forever ❤️",
                "I’ve planned everything… you just have to hold my hand and spend the day with me ❤️",
            ]),
        );
        yes_messages.insert(
            Tone::Poetic.as_str().to_string(),
            strings(&[
                "You are the reason I believe in serendipity ✨",
                "In your eyes, I found my home 🏡",
                "You turned my ordinary into extraordinary 🌟",
                "Like stars need darkness to shine, I need you to feel alive 🌌",
                "You are the verse in my favorite song 🎵",
                "With you, every moment becomes a memory worth keeping 📸",
                "You are the dream I never want to wake from 💭",
            ]),
        );
        Self {
            subhead: "Because every day with you feels like February 14th".to_string(),
            no_button_teases: strings(&[
                "Are you sure? 🥺",
                "Think again... 💭",
                "Really? My heart... 💔",
                "One more chance? 🙏",
                "Please reconsider 😢",
                "You're breaking my heart 💔",
                "Don't do this to me 😭",
            ]),
            yes_messages,
        }
    }
}

/// One gallery entry. `date` is only present on uploaded photos.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub url: String,
    pub caption: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Photo {
    pub fn new(url: &str, caption: &str, alt: &str) -> Self {
        Self {
            url: url.to_string(),
            caption: caption.to_string(),
            alt: alt.to_string(),
            date: None,
        }
    }

    /// Alt text, falling back to the caption when empty.
    pub fn alt_text(&self) -> &str {
        if self.alt.is_empty() {
            &self.caption
        } else {
            &self.alt
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub url: String,
    pub enabled: bool,
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            enabled: true,
            volume: 0.5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub mode: ThemeMode,
    pub tone: Tone,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Glyph shown on the theme toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            ThemeMode::Dark => "🌙",
            ThemeMode::Light => "☀️",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Cute,
    #[default]
    Dramatic,
    Poetic,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Cute => "cute",
            Tone::Dramatic => "dramatic",
            Tone::Poetic => "poetic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cute" => Some(Tone::Cute),
            "dramatic" => Some(Tone::Dramatic),
            "poetic" => Some(Tone::Poetic),
            _ => None,
        }
    }
}

fn default_photos() -> Vec<Photo> {
    vec![
        Photo::new(
            "First Date.jpg",
            "Our first date at {{special_place}}",
            "Romantic couple moment",
        ),
        Photo::new("Sunset.jpg", "That sunset we'll never forget", "Beautiful sunset"),
        Photo::new(
            "Laugh.jpeg",
            "When {{lover_name}} made me laugh",
            "Happy couple laughing",
        ),
        Photo::new("beach.jpeg", "Perfect day at the beach", "Beach memories"),
        Photo::new("Adventure.jpg", "Adventures with you", "Adventure together"),
        Photo::new("moment.jpeg", "Every moment with {{your_name}}", "Romantic moment"),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_with_five_branches() {
        let v = serde_json::to_value(ConfigTree::default()).unwrap();
        let obj = v.as_object().unwrap();
        for key in ["personalization", "messages", "photos", "audio", "theme"] {
            assert!(obj.contains_key(key), "missing branch {key}");
        }
        assert_eq!(v["theme"]["mode"], "dark");
        assert_eq!(v["theme"]["tone"], "dramatic");
        assert!(v["messages"]["noButtonTeases"].is_array());
        assert!(v["messages"]["yesMessages"]["poetic"].is_array());
        assert!(v["photos"][0].get("date").is_none());
    }

    #[test]
    fn theme_mode_toggles_back_and_forth() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let tree: ConfigTree =
            serde_json::from_str(r#"{"theme":{"tone":"cute"},"audio":{"volume":0.9}}"#).unwrap();
        assert_eq!(tree.theme.tone, Tone::Cute);
        assert_eq!(tree.theme.mode, ThemeMode::Dark);
        assert!((tree.audio.volume - 0.9).abs() < 1e-6);
        assert!(tree.audio.enabled);
        assert_eq!(tree.personalization.your_name, "Me");
    }

    #[test]
    fn photo_alt_falls_back_to_caption() {
        let p = Photo::new("a.jpg", "A caption", "");
        assert_eq!(p.alt_text(), "A caption");
    }
}
