// Integration tests for the configuration store: persistence, merge rules
// and interpolation against an in-memory storage backend.

use pretty_assertions::assert_eq;
use serde_json::json;
use valentine_core::*;

fn fresh() -> ConfigStore<MemoryStorage> {
    ConfigStore::new(MemoryStorage::new())
}

fn persisted(snapshot: &str) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    storage.set_item(CONFIG_STORAGE_KEY, snapshot).unwrap();
    storage
}

#[test]
fn set_then_get_returns_value() {
    let mut store = fresh();
    for (path, value) in [
        ("theme.tone", json!("poetic")),
        ("personalization.lover_name", json!("Sam")),
        ("audio.volume", json!(0.25)),
        ("brand.new.branch", json!([1, 2, 3])),
    ] {
        store.set(path, value.clone()).unwrap();
        assert_eq!(store.get(path), Some(&value), "path {path}");
    }
}

#[test]
fn every_set_is_persisted_immediately() {
    let mut store = fresh();
    store.set("personalization.your_name", "Alex").unwrap();
    let raw = store
        .storage()
        .get_item(CONFIG_STORAGE_KEY)
        .unwrap()
        .expect("snapshot written");
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["personalization"]["your_name"], "Alex");
    assert_eq!(saved, *store.tree());
}

#[test]
fn load_merges_snapshot_onto_defaults() {
    let storage = persisted(r#"{"personalization":{"lover_name":"Sam"},"theme":{"tone":"cute"}}"#);
    let mut store = ConfigStore::new(storage);
    assert_eq!(store.load(), LoadOutcome::Restored);
    assert_eq!(store.get_str("personalization.lover_name"), Some("Sam"));
    // default-only fields survive
    assert_eq!(store.get_str("personalization.your_name"), Some("Me"));
    assert_eq!(store.tone(), Tone::Cute);
    assert_eq!(store.theme_mode(), ThemeMode::Dark);
}

#[test]
fn persisted_photos_replace_defaults() {
    let storage = persisted(r#"{"photos":[{"url":"x.png","caption":"only","alt":""}]}"#);
    let store = ConfigStore::open(storage);
    let photos = store.photos();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].caption, "only");
}

#[test]
fn malformed_snapshot_keeps_defaults() {
    for bad in ["{not json", "42", "[1,2]", "\"text\""] {
        let mut store = ConfigStore::new(persisted(bad));
        assert_eq!(store.load(), LoadOutcome::Ignored, "snapshot {bad}");
        assert_eq!(store.snapshot(), ConfigTree::default());
    }
}

#[test]
fn missing_snapshot_and_disabled_storage() {
    let mut store = fresh();
    assert_eq!(store.load(), LoadOutcome::Missing);

    let mut store = ConfigStore::new(DisabledStorage);
    assert_eq!(store.load(), LoadOutcome::Ignored);
    store.set("theme.mode", "light").unwrap();
    assert_eq!(store.theme_mode(), ThemeMode::Light);
}

#[test]
fn failed_save_leaves_memory_ahead_of_storage() {
    let mut store = ConfigStore::new(MemoryStorage::with_quota(16));
    store.set("personalization.memory", "a long summer").unwrap();
    assert_eq!(store.get_str("personalization.memory"), Some("a long summer"));
    assert!(store.storage().is_empty());
    assert!(matches!(
        store.try_save(),
        Err(ConfigError::Storage(StorageError::QuotaExceeded))
    ));
}

#[test]
fn state_survives_a_reopen() {
    let mut store = fresh();
    store.set("theme.tone", "poetic").unwrap();
    store
        .add_photo(Photo::new("new.png", "New memory", "Uploaded photo"))
        .unwrap();
    let storage = store.into_storage();

    let reopened = ConfigStore::open(storage);
    assert_eq!(reopened.tone(), Tone::Poetic);
    assert_eq!(reopened.photos().len(), 7);
    assert_eq!(reopened.photos()[6].url, "new.png");
}

#[test]
fn merge_is_idempotent_on_defaults() {
    let tree = fresh().tree().clone();
    assert_eq!(merged(&tree, &tree), tree);
}

#[test]
fn merge_rule_both_branches() {
    assert_eq!(
        merged(&json!({"photos": [1, 2]}), &json!({"photos": [3]}))["photos"],
        json!([3])
    );
    assert_eq!(
        merged(
            &json!({"personalization": {"a": 1, "b": 2}}),
            &json!({"personalization": {"a": 9}})
        ),
        json!({"personalization": {"a": 9, "b": 2}})
    );
}

#[test]
fn interpolation_resolves_known_fields_only() {
    let mut store = fresh();
    store.set("personalization.lover_name", "Sam").unwrap();
    assert_eq!(store.interpolate("Hi {{lover_name}}"), "Hi Sam");
    assert_eq!(store.interpolate("Hi {{missing}}"), "Hi {{missing}}");
    assert_eq!(store.interpolate(""), "");
    assert_eq!(
        store.interpolate("{{lover_name}} & {{your_name}} at {{special_place}}"),
        "Sam & Me at our favorite spot"
    );
}

#[test]
fn malformed_tokens_pass_through() {
    let store = fresh();
    for text in ["{{lover name}}", "{lover_name}", "{{lover_name", "{{}}", "{{ your_name }}"] {
        assert_eq!(store.interpolate(text), text);
    }
}

#[test]
fn empty_field_keeps_token() {
    let mut store = fresh();
    store.set("personalization.memory", "").unwrap();
    assert_eq!(store.interpolate("{{memory}}"), "{{memory}}");
    store.set("personalization.count", 3).unwrap();
    assert_eq!(store.interpolate("{{count}} years"), "3 years");
}

#[test]
fn text_helper_interpolates_or_is_empty() {
    let store = fresh();
    assert_eq!(
        store.text("photos.2.caption"),
        "When My Valentine made me laugh"
    );
    assert_eq!(store.text("messages.nothing"), "");
}

#[test]
fn yes_messages_follow_tone() {
    let mut store = fresh();
    assert_eq!(store.yes_messages().len(), 2);
    store.set("theme.tone", "cute").unwrap();
    let msgs = store.yes_messages();
    assert_eq!(msgs.len(), 7);
    assert!(msgs[1].contains("{{your_name}}"));
    assert_eq!(store.no_button_teases().len(), 7);
}

#[test]
fn toggle_theme_mode_persists() {
    let mut store = fresh();
    assert_eq!(store.toggle_theme_mode().unwrap(), ThemeMode::Light);
    assert_eq!(store.get_str("theme.mode"), Some("light"));
    assert_eq!(store.toggle_theme_mode().unwrap(), ThemeMode::Dark);
}

#[test]
fn photo_edits() {
    let mut store = fresh();
    store.set_photo_caption(1, "Golden hour").unwrap();
    assert_eq!(store.get_str("photos.1.caption"), Some("Golden hour"));
    let removed = store.remove_photo(0).unwrap();
    assert_eq!(removed.url, "First Date.jpg");
    assert_eq!(store.photos().len(), 5);
    assert!(matches!(
        store.remove_photo(10),
        Err(ConfigError::PhotoIndex { index: 10, len: 5 })
    ));
}

#[test]
fn volume_is_clamped() {
    let mut store = fresh();
    store.set_volume(1.7).unwrap();
    assert_eq!(store.get("audio.volume").and_then(|v| v.as_f64()), Some(1.0));
    store.set_volume(-1.0).unwrap();
    assert_eq!(store.snapshot().audio.volume, 0.0);
}

#[test]
fn snapshot_falls_back_per_branch() {
    let mut store = fresh();
    store.set("theme.tone", "grumpy").unwrap();
    store.set("personalization.lover_name", "Sam").unwrap();
    let snap = store.snapshot();
    assert_eq!(snap.theme, Theme::default());
    assert_eq!(snap.personalization.lover_name, "Sam");
    assert_eq!(store.tone(), Tone::Dramatic);
}

#[test]
fn reset_restores_defaults() {
    let mut store = fresh();
    store.set("personalization.lover_name", "Sam").unwrap();
    store.reset();
    assert_eq!(store.snapshot(), ConfigTree::default());
    let reopened = ConfigStore::open(store.into_storage());
    assert_eq!(reopened.snapshot(), ConfigTree::default());
}

#[test]
fn index_write_past_end_keeps_existing_photos() {
    let mut store = fresh();
    store.set("photos.6.caption", "seventh").unwrap();
    assert_eq!(store.get_str("photos.0.url"), Some("First Date.jpg"));
    assert_eq!(store.get_str("photos.6.caption"), Some("seventh"));
    let photos = store.photos();
    assert_eq!(photos.len(), 7);
    assert_eq!(photos[6].caption, "seventh");

    // The padded write is what gets persisted.
    let reopened = ConfigStore::open(store.into_storage());
    assert_eq!(reopened.photos().len(), 7);
}

#[test]
fn index_write_leaves_gaps_out_of_photo_view() {
    let mut store = fresh();
    store.set("photos.8.url", "late.jpg").unwrap();
    assert_eq!(store.get("photos.7"), Some(&serde_json::Value::Null));
    let photos = store.photos();
    assert_eq!(photos.len(), 7);
    assert_eq!(photos.last().map(|p| p.url.as_str()), Some("late.jpg"));
}

#[test]
fn settings_form_round_trips_through_store() {
    let mut store = fresh();
    let mut form = SettingsForm::from_tree(&store.snapshot());
    form.lover_name = "  Sam ".to_string();
    form.subhead = "For {{lover_name}}".to_string();
    form.tone = Tone::Poetic;
    form.audio_enabled = false;
    form.date = String::new();
    store.apply_settings(&form).unwrap();

    assert_eq!(store.get_str("personalization.lover_name"), Some("Sam"));
    assert_eq!(store.text("messages.subhead"), "For Sam");
    assert_eq!(store.tone(), Tone::Poetic);
    assert_eq!(store.get("audio.enabled"), Some(&json!(false)));
    assert_eq!(store.get_str("personalization.date"), Some(""));

    let reopened = ConfigStore::open(store.into_storage());
    assert_eq!(SettingsForm::from_tree(&reopened.snapshot()).lover_name, "Sam");
}

#[test]
fn uploads_are_checked_before_writing() {
    let mut store = fresh();
    assert!(matches!(
        store.set_audio_url("not a url"),
        Err(ConfigError::InvalidValue { path: "audio.url", .. })
    ));
    assert_eq!(store.get_str("audio.url"), Some(""));
    store.set_audio_url("data:audio/mpeg;base64,SUQz").unwrap();
    assert_eq!(store.snapshot().audio.url, "data:audio/mpeg;base64,SUQz");

    store
        .add_uploaded_photo("data:image/png;base64,iVBOR", "2024-02-14T00:00:00.000Z")
        .unwrap();
    let last = store.photos().pop().unwrap();
    assert_eq!(last.caption, "New memory");
    assert!(last.date.is_some());
    assert!(store.add_uploaded_photo("", "2024-02-14").is_err());
    assert_eq!(store.photos().len(), 7);
}
