use crate::audio::BackgroundAudio;
use crate::constants::*;
use crate::dom;
use crate::events::{self, Page};
use anyhow::{anyhow, Context};
use valentine_core::validate::{sanitize_html, validate_audio_upload, validate_photo_upload};
use valentine_core::{SettingsForm, Tone};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const THUMB_PLACEHOLDER_SVG: &str = "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"60\" height=\"60\"><rect fill=\"%23333\" width=\"60\" height=\"60\"/></svg>";

/// Settings dialog: personalization form, photo list and music upload.
pub fn wire_settings(page: &Page, audio: Option<BackgroundAudio>) {
    let document = &page.document;
    if document.get_element_by_id(SETTINGS_MODAL_ID).is_none() {
        log::info!("[settings] no #{} on this page", SETTINGS_MODAL_ID);
    } else {
        wire_dialog(page);
    }
    wire_music_upload(page, audio);
}

fn wire_dialog(page: &Page) {
    let document = &page.document;

    let p = page.clone();
    dom::add_click_listener(document, SETTINGS_BUTTON_ID, move || open(&p));
    let doc = document.clone();
    dom::add_click_listener(document, SETTINGS_CLOSE_ID, move || close(&doc));

    if let Some(modal) = document.get_element_by_id(SETTINGS_MODAL_ID) {
        let doc = document.clone();
        let backdrop = modal.clone();
        dom::listen(&modal, "click", move |ev: web::MouseEvent| {
            let on_backdrop = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .is_some_and(|t| t == backdrop);
            if on_backdrop {
                close(&doc);
            }
        });
    }

    if let Some(form) = document.get_element_by_id(SETTINGS_FORM_ID) {
        let p = page.clone();
        dom::listen(&form, "submit", move |ev: web::Event| {
            ev.prevent_default();
            save(&p);
        });
    }

    let p = page.clone();
    dom::add_click_listener(document, ADD_PHOTO_ID, move || add_photo(&p));

    let p = page.clone();
    dom::add_click_listener(document, SETTINGS_RESET_ID, move || {
        let confirmed = web::window()
            .and_then(|w| w.confirm_with_message("Restore all default settings?").ok())
            .unwrap_or(false);
        if confirmed {
            p.store.borrow_mut().reset();
            events::apply_theme(&p.document, p.store.borrow().theme_mode());
            populate_form(&p);
            events::update_content(&p);
            log::info!("[settings] restored defaults");
        }
    });
}

pub fn open(page: &Page) {
    populate_form(page);
    let Some(modal) = page.document.get_element_by_id(SETTINGS_MODAL_ID) else {
        return;
    };
    match modal.dyn_ref::<web::HtmlDialogElement>() {
        Some(dialog) => {
            if let Err(e) = dialog.show_modal() {
                log::warn!("[settings] showModal failed: {:?}", e);
            }
        }
        None => {
            if let Some(el) = modal.dyn_ref::<web::HtmlElement>() {
                dom::set_style(el, "display", "flex");
            }
            _ = modal.set_attribute("open", "");
        }
    }
}

pub fn close(document: &web::Document) {
    let Some(modal) = document.get_element_by_id(SETTINGS_MODAL_ID) else {
        return;
    };
    match modal.dyn_ref::<web::HtmlDialogElement>() {
        Some(dialog) => dialog.close(),
        None => {
            if let Some(el) = modal.dyn_ref::<web::HtmlElement>() {
                dom::set_style(el, "display", "none");
            }
            _ = modal.remove_attribute("open");
        }
    }
}

fn populate_form(page: &Page) {
    let document = &page.document;
    let form = SettingsForm::from_tree(&page.store.borrow().snapshot());
    for (id, value) in [
        (FIELD_LOVER_NAME, form.lover_name.as_str()),
        (FIELD_YOUR_NAME, form.your_name.as_str()),
        (FIELD_SPECIAL_PLACE, form.special_place.as_str()),
        (FIELD_DATE, form.date.as_str()),
        (FIELD_MEMORY, form.memory.as_str()),
        (FIELD_SUBHEAD, form.subhead.as_str()),
        (FIELD_TONE, form.tone.as_str()),
    ] {
        set_field_value(document, id, value);
    }
    if let Some(checkbox) = dom::element_by_id::<web::HtmlInputElement>(document, FIELD_AUDIO_ENABLED)
    {
        checkbox.set_checked(form.audio_enabled);
    }
    render_photo_list(page);
}

/// Current form state; fields missing from the page keep their stored value.
fn read_form(page: &Page) -> SettingsForm {
    let document = &page.document;
    let mut form = SettingsForm::from_tree(&page.store.borrow().snapshot());
    for (id, slot) in [
        (FIELD_LOVER_NAME, &mut form.lover_name),
        (FIELD_YOUR_NAME, &mut form.your_name),
        (FIELD_SPECIAL_PLACE, &mut form.special_place),
        (FIELD_DATE, &mut form.date),
        (FIELD_MEMORY, &mut form.memory),
        (FIELD_SUBHEAD, &mut form.subhead),
    ] {
        if let Some(value) = field_value(document, id) {
            *slot = value;
        }
    }
    if let Some(tone) = field_value(document, FIELD_TONE).and_then(|v| Tone::parse(&v)) {
        form.tone = tone;
    }
    if let Some(checkbox) = dom::element_by_id::<web::HtmlInputElement>(document, FIELD_AUDIO_ENABLED)
    {
        form.audio_enabled = checkbox.checked();
    }
    form
}

fn save(page: &Page) {
    let form = read_form(page);
    let applied = page.store.borrow_mut().apply_settings(&form);
    match applied {
        Ok(()) => {
            events::update_content(page);
            close(&page.document);
            log::info!("[settings] saved");
        }
        Err(e) => {
            log::warn!("[settings] rejected: {}", e);
            alert("Please check the date (YYYY-MM-DD).");
        }
    }
}

fn render_photo_list(page: &Page) {
    let Some(container) = page.document.get_element_by_id(PHOTO_UPLOADER_ID) else {
        return;
    };
    let photos = page.store.borrow().photos();
    let html: String = photos
        .iter()
        .enumerate()
        .map(|(i, photo)| {
            let caption = sanitize_html(&photo.caption);
            format!(
                "<div class=\"photo-item\">\
                   <img src=\"{url}\" alt=\"{caption}\">\
                   <input type=\"text\" value=\"{caption}\" data-index=\"{i}\" placeholder=\"Caption\" class=\"photo-caption-input\">\
                   <button type=\"button\" class=\"remove-photo\" data-index=\"{i}\">Remove</button>\
                 </div>",
                url = sanitize_html(&photo.url),
            )
        })
        .collect();
    container.set_inner_html(&html);

    for_each_indexed::<web::HtmlImageElement>(&container, "img", |img, _| {
        let target = img.clone();
        dom::listen(&img, "error", move |_: web::Event| {
            if target.src() != THUMB_PLACEHOLDER_SVG {
                target.set_src(THUMB_PLACEHOLDER_SVG);
            }
        });
    });

    for_each_indexed::<web::HtmlInputElement>(&container, ".photo-caption-input", |input, index| {
        let p = page.clone();
        let field = input.clone();
        dom::listen(&input, "change", move |_: web::Event| {
            let edited = p
                .store
                .borrow_mut()
                .set_photo_caption(index, field.value().trim());
            match edited {
                Ok(()) => events::update_content(&p),
                Err(e) => log::warn!("[settings] caption not saved: {}", e),
            }
        });
    });

    for_each_indexed::<web::HtmlElement>(&container, ".remove-photo", |button, index| {
        let p = page.clone();
        dom::listen(&button, "click", move |_: web::MouseEvent| {
            let removed = p.store.borrow_mut().remove_photo(index);
            match removed {
                Ok(photo) => {
                    log::info!("[settings] removed photo {:?}", photo.caption);
                    render_photo_list(&p);
                    events::update_content(&p);
                }
                Err(e) => log::warn!("[settings] {}", e),
            }
        });
    });
}

fn add_photo(page: &Page) {
    let p = page.clone();
    choose_file(&page.document, "image/*", move |file| {
        if let Err(e) = validate_photo_upload(&file.type_(), file.size() as u64) {
            alert(&e.to_string());
            return;
        }
        spawn_local(async move {
            let url = match read_data_url(&file).await {
                Ok(url) => url,
                Err(e) => {
                    log::error!("[settings] {:#}", e);
                    alert("Could not read that photo.");
                    return;
                }
            };
            let uploaded_at = String::from(js_sys::Date::new_0().to_iso_string());
            let added = p.store.borrow_mut().add_uploaded_photo(&url, &uploaded_at);
            match added {
                Ok(()) => {
                    render_photo_list(&p);
                    events::update_content(&p);
                }
                Err(e) => {
                    log::error!("[settings] photo not saved: {}", e);
                    alert("Could not save that photo.");
                }
            }
        });
    });
}

fn wire_music_upload(page: &Page, audio: Option<BackgroundAudio>) {
    let Some(input) = dom::element_by_id::<web::HtmlInputElement>(&page.document, MUSIC_UPLOAD_ID)
    else {
        return;
    };
    let store = page.store.clone();
    let field = input.clone();
    dom::listen(&input, "change", move |_: web::Event| {
        let Some(file) = field.files().and_then(|files| files.get(0)) else {
            return;
        };
        if let Err(e) = validate_audio_upload(&file.type_(), file.size() as u64) {
            alert(&e.to_string());
            return;
        }
        let store = store.clone();
        let audio = audio.clone();
        spawn_local(async move {
            let stored = match read_data_url(&file).await {
                Ok(url) => match &audio {
                    Some(player) => player.update_source(&store, &url).map_err(anyhow::Error::from),
                    None => store.borrow_mut().set_audio_url(&url).map_err(anyhow::Error::from),
                },
                Err(e) => Err(e),
            };
            match stored {
                Ok(()) => alert("Audio uploaded successfully! It will play on the success screen."),
                Err(e) => {
                    log::error!("[settings] music upload failed: {:#}", e);
                    alert("Could not use that audio file.");
                }
            }
        });
    });
}

fn for_each_indexed<T: JsCast>(container: &web::Element, selector: &str, mut f: impl FnMut(T, usize)) {
    let Ok(nodes) = container.query_selector_all(selector) else {
        return;
    };
    for n in 0..nodes.length() {
        if let Some(el) = nodes.item(n).and_then(|node| node.dyn_into::<T>().ok()) {
            f(el, n as usize);
        }
    }
}

fn field_value(document: &web::Document, id: &str) -> Option<String> {
    let el = document.get_element_by_id(id)?;
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        return Some(area.value());
    }
    el.dyn_ref::<web::HtmlSelectElement>().map(|select| select.value())
}

fn set_field_value(document: &web::Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        select.set_value(value);
    }
}

/// Open the browser file picker and hand the first chosen file to `on_file`.
fn choose_file(document: &web::Document, accept: &str, on_file: impl FnOnce(web::File) + 'static) {
    let Ok(input) = document
        .create_element("input")
        .map(|el| el.unchecked_into::<web::HtmlInputElement>())
    else {
        return;
    };
    input.set_type("file");
    input.set_accept(accept);
    let field = input.clone();
    let mut on_file = Some(on_file);
    dom::listen(&input, "change", move |_: web::Event| {
        let file = field.files().and_then(|files| files.get(0));
        if let (Some(file), Some(f)) = (file, on_file.take()) {
            f(file);
        }
    });
    input.click();
}

async fn read_data_url(file: &web::File) -> anyhow::Result<String> {
    let reader = web::FileReader::new().map_err(|e| anyhow!("{:?}", e))?;
    let target = reader.clone();
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once_into_js(move || {
            _ = reject.call0(&JsValue::NULL);
        });
        target.set_onload(Some(on_load.unchecked_ref()));
        target.set_onerror(Some(on_error.unchecked_ref()));
    });
    reader
        .read_as_data_url(file)
        .map_err(|e| anyhow!("read {}: {:?}", file.name(), e))?;
    JsFuture::from(done)
        .await
        .map_err(|_| anyhow!("could not read {}", file.name()))?;
    reader
        .result()
        .map_err(|e| anyhow!("{:?}", e))?
        .as_string()
        .context("file reader returned no text")
}

fn alert(message: &str) {
    if let Some(w) = web::window() {
        _ = w.alert_with_message(message);
    }
}
