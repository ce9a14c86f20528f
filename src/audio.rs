use crate::constants::*;
use crate::dom;
use crate::overlay;
use crate::SharedStore;
use valentine_core::ConfigError;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const PLAY_LABEL: &str = "<span>▶️</span>";
const PAUSE_LABEL: &str = "<span>⏸️</span>";

/// Looping background track driven by the `audio` branch of the config.
#[derive(Clone)]
pub struct BackgroundAudio {
    element: web::HtmlAudioElement,
}

impl BackgroundAudio {
    pub fn new(store: &SharedStore) -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new().map_err(|e| anyhow::anyhow!("audio element: {:?}", e))?;
        element.set_loop(true);
        let settings = store.borrow().snapshot().audio;
        element.set_volume(f64::from(settings.volume.clamp(0.0, 1.0)));
        if !settings.url.is_empty() {
            element.set_src(&settings.url);
        }
        Ok(Self { element })
    }

    pub fn is_paused(&self) -> bool {
        self.element.paused()
    }

    pub fn play(&self) {
        let Ok(promise) = self.element.play() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] play failed: {:?}", e);
            }
        });
    }

    pub fn pause(&self) {
        _ = self.element.pause();
    }

    pub fn toggle(&self) {
        if self.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    pub fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    pub fn set_volume(&self, store: &SharedStore, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.element.set_volume(f64::from(volume));
        if let Err(e) = store.borrow_mut().set_volume(volume) {
            log::error!("[config] could not store volume: {}", e);
        }
    }

    /// Switch to a newly uploaded track and remember it.
    pub fn update_source(&self, store: &SharedStore, url: &str) -> Result<(), ConfigError> {
        store.borrow_mut().set_audio_url(url)?;
        self.element.set_src(url);
        Ok(())
    }

    /// Start muted (browsers allow that) and ask before turning sound on.
    /// A rejected attempt just waits for the play button.
    fn attempt_autoplay(&self, document: web::Document) {
        self.set_muted(true);
        let Ok(promise) = self.element.play() else {
            return;
        };
        let audio = self.clone();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => audio.show_unmute_prompt(&document),
                Err(_) => log::info!("[audio] autoplay blocked, waiting for user interaction"),
            }
        });
    }

    fn show_unmute_prompt(&self, document: &web::Document) {
        if document.get_element_by_id(UNMUTE_PROMPT_ID).is_none() {
            return;
        }
        overlay::show(document, UNMUTE_PROMPT_ID);

        let audio = self.clone();
        let doc = document.clone();
        dom::add_click_listener(document, UNMUTE_YES_ID, move || {
            audio.set_muted(false);
            overlay::hide(&doc, UNMUTE_PROMPT_ID);
        });
        let audio = self.clone();
        let doc = document.clone();
        dom::add_click_listener(document, UNMUTE_NO_ID, move || {
            audio.pause();
            overlay::hide(&doc, UNMUTE_PROMPT_ID);
        });
    }
}

/// Build the player, hook its controls and try to start playback when a
/// track is configured and enabled.
pub fn init_audio(document: &web::Document, store: &SharedStore) -> anyhow::Result<BackgroundAudio> {
    let audio = BackgroundAudio::new(store)?;

    let play_pause = dom::element_by_id::<web::HtmlElement>(document, PLAY_PAUSE_ID);
    let slider = dom::element_by_id::<web::HtmlInputElement>(document, VOLUME_SLIDER_ID);
    if let (Some(button), Some(slider)) = (play_pause, slider) {
        bind_controls(document, &audio, store, button, slider);
    }

    let settings = store.borrow().snapshot().audio;
    if !settings.url.is_empty() && settings.enabled {
        audio.attempt_autoplay(document.clone());
    }
    log::info!("[audio] ready (track configured: {})", !settings.url.is_empty());
    Ok(audio)
}

fn bind_controls(
    document: &web::Document,
    audio: &BackgroundAudio,
    store: &SharedStore,
    button: web::HtmlElement,
    slider: web::HtmlInputElement,
) {
    let a = audio.clone();
    dom::listen(&button, "click", move |_: web::MouseEvent| a.toggle());

    let a = audio.clone();
    let s = store.clone();
    let input = slider.clone();
    dom::listen(&slider, "input", move |_: web::Event| {
        if let Ok(percent) = input.value().parse::<f32>() {
            a.set_volume(&s, percent / 100.0);
        }
    });

    let label = button.clone();
    dom::listen(&audio.element, "play", move |_: web::Event| {
        label.set_inner_html(PAUSE_LABEL);
        _ = label.set_attribute("aria-label", "Pause");
    });
    let label = button;
    dom::listen(&audio.element, "pause", move |_: web::Event| {
        label.set_inner_html(PLAY_LABEL);
        _ = label.set_attribute("aria-label", "Play");
    });

    let doc = document.clone();
    dom::listen(&audio.element, "error", move |e: web::Event| {
        log::warn!("[audio] playback error: {:?}", e.type_());
        overlay::hide(&doc, AUDIO_PLAYER_ID);
    });
}
