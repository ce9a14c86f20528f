#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::{ConfigStore, KeyValueStorage};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod dom;
mod ecard;
mod events;
mod frame;
mod gallery;
mod overlay;
mod settings;
mod storage;
mod support;

pub(crate) type SharedStore = Rc<RefCell<ConfigStore<Box<dyn KeyValueStorage>>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("valentine-web starting");
    support::report_uncaught_errors();

    let Some(document) = dom::window_document() else {
        return Err(JsValue::from_str("no document"));
    };
    if document.ready_state() == "loading" {
        let doc = document.clone();
        dom::listen(&document, "DOMContentLoaded", move |_: web::Event| run(&doc));
    } else {
        run(&document);
    }
    Ok(())
}

fn run(document: &web::Document) {
    let store: SharedStore = Rc::new(RefCell::new(ConfigStore::open(storage::open_best())));
    support::mark_missing_backdrop_filter(document);

    events::apply_theme(document, store.borrow().theme_mode());

    let field = frame::init_particles(document);
    let lightbox = gallery::wire_lightbox(document, store.clone());
    let page = events::Page {
        document: document.clone(),
        store: store.clone(),
        field,
        lightbox,
    };
    events::update_content(&page);
    events::wire_all(&page);
    let doc = document.clone();
    dom::set_timeout(constants::HERO_REVEAL_DELAY_MS, move || {
        events::reveal_hero_title(&doc)
    });

    let audio = match audio::init_audio(document, &store) {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("[audio] disabled: {:#}", e);
            overlay::hide(document, constants::AUDIO_PLAYER_ID);
            None
        }
    };
    settings::wire_settings(&page, audio);
    ecard::wire_ecard_button(document, &store);

    log::info!("valentine-web ready");
}
