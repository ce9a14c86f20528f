use crate::constants::*;
use crate::dom;
use crate::overlay;
use crate::SharedStore;
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::validate::sanitize_html;
use valentine_core::{Lightbox, LightboxKey, Photo};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct LightboxView {
    state: Lightbox,
    photos: Vec<Photo>,
    store: SharedStore,
}

pub type SharedLightbox = Rc<RefCell<LightboxView>>;

impl LightboxView {
    pub fn open(&mut self, document: &web::Document, index: usize) {
        self.photos = self.store.borrow().photos();
        if !self.state.open(index, self.photos.len()) {
            return;
        }
        self.show_current(document);
        overlay::activate(document, LIGHTBOX_ID);
        if let Some(el) = document.get_element_by_id(LIGHTBOX_ID) {
            _ = el.set_attribute("aria-hidden", "false");
        }
        if let Some(body) = document.body() {
            dom::set_style(&body, "overflow", "hidden");
        }
        if let Some(close) = dom::element_by_id::<web::HtmlElement>(document, LIGHTBOX_CLOSE_ID) {
            _ = close.focus();
        }
    }

    pub fn close(&mut self, document: &web::Document) {
        self.state.close();
        overlay::deactivate(document, LIGHTBOX_ID);
        if let Some(el) = document.get_element_by_id(LIGHTBOX_ID) {
            _ = el.set_attribute("aria-hidden", "true");
        }
        if let Some(body) = document.body() {
            dom::set_style(&body, "overflow", "");
        }
    }

    fn handle_key(&mut self, document: &web::Document, key: LightboxKey) {
        if !self.state.handle_key(key) {
            return;
        }
        if key == LightboxKey::Close {
            self.close(document);
        } else {
            self.show_current(document);
        }
    }

    /// Cross-fade the lightbox image to the current photo.
    fn show_current(&self, document: &web::Document) {
        let Some(photo) = self.photos.get(self.state.index()) else {
            return;
        };
        let Some(image) = dom::element_by_id::<web::HtmlImageElement>(document, LIGHTBOX_IMAGE_ID)
        else {
            return;
        };
        let caption_el = document.get_element_by_id(LIGHTBOX_CAPTION_ID);
        let url = photo.url.clone();
        let alt = photo.alt_text().to_string();
        let caption = self.store.borrow().interpolate(&photo.caption);

        dom::set_style(&image, "opacity", "0");
        let image_for_swap = image.clone();
        dom::set_timeout(LIGHTBOX_SWAP_MS, move || {
            image_for_swap.set_src(&url);
            image_for_swap.set_alt(&alt);
            if let Some(el) = caption_el {
                el.set_text_content(Some(&caption));
            }
            dom::set_style(&image_for_swap, "opacity", "1");
        });
    }
}

pub fn wire_lightbox(document: &web::Document, store: SharedStore) -> SharedLightbox {
    let view = Rc::new(RefCell::new(LightboxView {
        state: Lightbox::new(),
        photos: Vec::new(),
        store,
    }));

    if let Some(image) = dom::element_by_id::<web::HtmlImageElement>(document, LIGHTBOX_IMAGE_ID) {
        let img = image.clone();
        dom::listen(&image, "error", move |_: web::Event| {
            if img.src() != MISSING_IMAGE_SVG {
                img.set_src(MISSING_IMAGE_SVG);
            }
        });
    }

    for (id, key) in [
        (LIGHTBOX_CLOSE_ID, LightboxKey::Close),
        (LIGHTBOX_PREV_ID, LightboxKey::Prev),
        (LIGHTBOX_NEXT_ID, LightboxKey::Next),
    ] {
        let v = view.clone();
        let doc = document.clone();
        dom::add_click_listener(document, id, move || v.borrow_mut().handle_key(&doc, key));
    }

    if let Some(el) = document.get_element_by_id(LIGHTBOX_ID) {
        let v = view.clone();
        let doc = document.clone();
        let backdrop = el.clone();
        dom::listen(&el, "click", move |ev: web::MouseEvent| {
            let on_backdrop = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .map(|t| t == backdrop)
                .unwrap_or(false);
            if on_backdrop {
                v.borrow_mut().close(&doc);
            }
        });
    }

    let v = view.clone();
    let doc = document.clone();
    dom::listen(document, "keydown", move |ev: web::KeyboardEvent| {
        if let Some(key) = LightboxKey::from_key(&ev.key()) {
            v.borrow_mut().handle_key(&doc, key);
        }
    });

    view
}

/// Fill `#photo-gallery` with the configured photos and hook each tile to
/// the lightbox.
pub fn render_gallery(document: &web::Document, store: &SharedStore, lightbox: &SharedLightbox) {
    let Some(container) = document.get_element_by_id(GALLERY_ID) else {
        return;
    };
    let html: String = {
        let store = store.borrow();
        store
            .photos()
            .iter()
            .enumerate()
            .map(|(i, photo)| {
                let caption = sanitize_html(&store.interpolate(&photo.caption));
                format!(
                    "<div class=\"photo-item\" data-index=\"{i}\" role=\"button\" tabindex=\"0\" aria-label=\"View photo: {caption}\">\
                       <img src=\"{url}\" alt=\"{alt}\" loading=\"lazy\">\
                       <div class=\"photo-caption\">{caption}</div>\
                     </div>",
                    url = sanitize_html(&photo.url),
                    alt = sanitize_html(photo.alt_text()),
                )
            })
            .collect()
    };
    container.set_inner_html(&html);

    let Ok(items) = container.query_selector_all(".photo-item") else {
        return;
    };
    for n in 0..items.length() {
        let Some(item) = items.item(n).and_then(|node| node.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        let index = n as usize;

        let lb = lightbox.clone();
        let doc = document.clone();
        dom::listen(&item, "click", move |_: web::MouseEvent| {
            lb.borrow_mut().open(&doc, index);
        });

        let lb = lightbox.clone();
        let doc = document.clone();
        dom::listen(&item, "keydown", move |ev: web::KeyboardEvent| {
            let key = ev.key();
            if key == "Enter" || key == " " {
                ev.prevent_default();
                lb.borrow_mut().open(&doc, index);
            }
        });

        if let Ok(Some(img)) = item.query_selector("img") {
            if let Ok(img) = img.dyn_into::<web::HtmlImageElement>() {
                let target = img.clone();
                dom::listen(&img, "error", move |_: web::Event| {
                    if target.src() != MISSING_IMAGE_SVG {
                        target.set_src(MISSING_IMAGE_SVG);
                    }
                });
            }
        }
    }
}
