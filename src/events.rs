use crate::constants::*;
use crate::dom;
use crate::frame::SharedField;
use crate::gallery::{self, SharedLightbox};
use crate::overlay;
use crate::SharedStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::reveal::{letter_reveal, reveal_duration_ms};
use valentine_core::{EvasiveButton, ThemeMode};
use wasm_bindgen::JsCast;
use web_sys as web;

const DODGE_TRANSITION: &str = "all 0.3s cubic-bezier(0.68, -0.55, 0.265, 1.55)";

/// Handles every page-level listener needs.
#[derive(Clone)]
pub struct Page {
    pub document: web::Document,
    pub store: SharedStore,
    pub field: Option<SharedField>,
    pub lightbox: SharedLightbox,
}

pub fn wire_all(page: &Page) {
    wire_yes_button(page);
    wire_no_button(page);
    wire_theme_toggle(page);
}

/// Write the stored theme onto `<html data-theme>` and the toggle icon.
pub fn apply_theme(document: &web::Document, mode: ThemeMode) {
    if let Some(root) = document.document_element() {
        _ = root.set_attribute("data-theme", mode.as_str());
    }
    dom::set_text(document, THEME_ICON_SELECTOR, mode.icon());
}

/// Refresh text that depends on the personalization values.
pub fn update_content(page: &Page) {
    let subhead = page.store.borrow().text("messages.subhead");
    dom::set_text(&page.document, HERO_SUBTITLE_SELECTOR, &subhead);
    if overlay::is_active(&page.document, SUCCESS_ID) {
        gallery::render_gallery(&page.document, &page.store, &page.lightbox);
    }
}

/// Fade the hero title in one letter at a time. A `.heart-icon` inside the
/// title is put back once every letter has started.
pub fn reveal_hero_title(document: &web::Document) {
    let Some(title) = document
        .query_selector(HERO_TITLE_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    let heart = title.query_selector(HEART_ICON_SELECTOR).ok().flatten();
    if let Some(icon) = &heart {
        icon.remove();
    }
    let letters = letter_reveal(&title.text_content().unwrap_or_default());
    title.set_text_content(None);
    dom::set_style(&title, "opacity", "1");
    for (letter, animation) in &letters {
        let Ok(span) = document
            .create_element("span")
            .map(|el| el.unchecked_into::<web::HtmlElement>())
        else {
            continue;
        };
        span.set_text_content(Some(&letter.to_string()));
        dom::set_style(&span, "opacity", "0");
        dom::set_style(&span, "display", "inline-block");
        dom::set_style(&span, "animation", animation);
        _ = title.append_child(&span);
    }
    if let Some(icon) = heart {
        let delay = reveal_duration_ms(letters.len()) as i32;
        dom::set_timeout(delay, move || {
            _ = title.append_with_str_1(" ");
            _ = title.append_with_node_1(&icon);
        });
    }
}

fn wire_yes_button(page: &Page) {
    let Some(button) = dom::element_by_id::<web::HtmlElement>(&page.document, YES_BUTTON_ID) else {
        log::warn!("[ui] #{} missing", YES_BUTTON_ID);
        return;
    };
    let page = page.clone();
    let target = button.clone();
    dom::listen(&button, "click", move |_: web::MouseEvent| {
        dom::set_style(&target, "transform", "scale(1.2)");
        dom::set_style(&target, "opacity", "0");
        let page = page.clone();
        dom::set_timeout(YES_TRANSITION_MS, move || show_success(&page));
    });
}

fn show_success(page: &Page) {
    overlay::deactivate(&page.document, LANDING_ID);
    overlay::activate(&page.document, SUCCESS_ID);
    if let Some(field) = &page.field {
        field.borrow_mut().burst_at_center();
    }
    reveal_messages(page);
    gallery::render_gallery(&page.document, &page.store, &page.lightbox);
    log::info!("[ui] answered yes");
}

/// Fill each `.message` slot after its own `data-delay`.
fn reveal_messages(page: &Page) {
    let Ok(slots) = page.document.query_selector_all(MESSAGE_SELECTOR) else {
        return;
    };
    let messages: Vec<String> = {
        let store = page.store.borrow();
        store
            .yes_messages()
            .iter()
            .map(|m| store.interpolate(m))
            .collect()
    };
    for n in 0..slots.length() {
        let Some(slot) = slots
            .item(n)
            .and_then(|node| node.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        let Some(text) = messages.get(n as usize).cloned() else {
            continue;
        };
        let delay = slot
            .dataset()
            .get("delay")
            .and_then(|d| d.trim().parse::<i32>().ok())
            .unwrap_or(0);
        dom::set_timeout(delay, move || {
            slot.set_text_content(Some(&text));
            dom::set_style(&slot, "animation-delay", "0s");
        });
    }
}

struct NoButtonState {
    evasive: EvasiveButton,
    rng: StdRng,
}

fn wire_no_button(page: &Page) {
    let Some(button) = dom::element_by_id::<web::HtmlElement>(&page.document, NO_BUTTON_ID) else {
        log::warn!("[ui] #{} missing", NO_BUTTON_ID);
        return;
    };
    let state = Rc::new(RefCell::new(NoButtonState {
        evasive: EvasiveButton::new(),
        rng: StdRng::from_entropy(),
    }));

    let dodge = {
        let page = page.clone();
        let button = button.clone();
        move || {
            let teases = page.store.borrow().no_button_teases();
            let size = (
                f64::from(button.offset_width()),
                f64::from(button.offset_height()),
            );
            let mut st = state.borrow_mut();
            let NoButtonState { evasive, rng } = &mut *st;
            let step = evasive.dodge(dom::viewport_size(), size, &teases, rng);

            dom::set_style(&button, "position", "fixed");
            dom::set_style(&button, "left", &format!("{}px", step.left));
            dom::set_style(&button, "top", &format!("{}px", step.top));
            dom::set_style(&button, "transition", DODGE_TRANSITION);
            if let Some(label) = &step.label {
                button.set_text_content(Some(label));
            }
            if let Some(hint) = step.tooltip {
                overlay::show_tooltip(&page.document, &button, hint);
            }
        }
    };
    let dodge = Rc::new(dodge);

    let on_hover = dodge.clone();
    dom::listen(&button, "mouseenter", move |_: web::Event| (*on_hover)());
    for event in ["click", "touchstart"] {
        let on_press = dodge.clone();
        dom::listen(&button, event, move |ev: web::Event| {
            ev.prevent_default();
            (*on_press)();
        });
    }

    let document = page.document.clone();
    dom::listen(&button, "keydown", move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if key == "Enter" || key == " " {
            ev.prevent_default();
            overlay::show_confirm_modal(&document);
        }
    });
}

fn wire_theme_toggle(page: &Page) {
    let store = page.store.clone();
    let document = page.document.clone();
    dom::add_click_listener(&page.document, THEME_TOGGLE_ID, move || {
        let toggled = store.borrow_mut().toggle_theme_mode();
        match toggled {
            Ok(mode) => apply_theme(&document, mode),
            Err(e) => log::error!("[ui] theme toggle failed: {}", e),
        }
    });
}
