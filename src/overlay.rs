use crate::constants::{TOOLTIP_FADE_MS, TOOLTIP_OFFSET_Y_PX, TOOLTIP_VISIBLE_MS};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn activate(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("active");
    }
}

#[inline]
pub fn deactivate(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("active");
    }
}

#[inline]
pub fn is_active(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .map(|el| el.class_list().contains("active"))
        .unwrap_or(false)
}

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = dom::element_by_id::<web::HtmlElement>(document, id) {
        dom::set_style(&el, "display", "block");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = dom::element_by_id::<web::HtmlElement>(document, id) {
        dom::set_style(&el, "display", "none");
    }
}

/// Floating hint above `anchor` that fades out on its own.
pub fn show_tooltip(document: &web::Document, anchor: &web::HtmlElement, message: &str) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(tooltip) = document
        .create_element("div")
        .map(|el| el.unchecked_into::<web::HtmlElement>())
    else {
        return;
    };
    tooltip.set_class_name("tooltip glass-card");
    tooltip.set_text_content(Some(message));
    let left = format!("{}px", anchor.offset_left());
    let top = format!("{}px", anchor.offset_top() as f64 - TOOLTIP_OFFSET_Y_PX);
    for (prop, value) in [
        ("position", "fixed"),
        ("left", left.as_str()),
        ("top", top.as_str()),
        ("padding", "0.5rem 1rem"),
        ("font-size", "0.9rem"),
        ("z-index", "1000"),
        ("animation", "fadeIn 0.3s ease-out"),
    ] {
        dom::set_style(&tooltip, prop, value);
    }
    _ = body.append_child(&tooltip);

    dom::set_timeout(TOOLTIP_VISIBLE_MS, move || {
        dom::set_style(&tooltip, "opacity", "0");
        dom::set_timeout(TOOLTIP_FADE_MS, move || tooltip.remove());
    });
}

/// "Are you really sure?" dialog for keyboard users. Both answers simply
/// close it; the page state does not change.
pub fn show_confirm_modal(document: &web::Document) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(modal) = document
        .create_element("div")
        .map(|el| el.unchecked_into::<web::HtmlElement>())
    else {
        return;
    };
    modal.set_class_name("modal confirm-modal");
    _ = modal.set_attribute("role", "dialog");
    _ = modal.set_attribute("aria-modal", "true");
    modal.set_inner_html(
        "<div class=\"glass-card\" style=\"padding: 2rem; text-align: center;\">\
           <p style=\"font-size: 1.3rem; margin-bottom: 1.5rem;\">Are you really sure? 🥺</p>\
           <div class=\"button-group\">\
             <button data-answer=\"no\" class=\"btn btn-primary\">Wait, let me reconsider</button>\
             <button data-answer=\"yes\" class=\"btn btn-secondary\">Yes, I'm sure</button>\
           </div>\
         </div>",
    );
    _ = body.append_child(&modal);

    let modal_for_click = modal.clone();
    dom::listen(&modal, "click", move |ev: web::MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let backdrop: &web::Node = &modal_for_click;
        let on_backdrop = target.is_same_node(Some(backdrop));
        if on_backdrop || target.has_attribute("data-answer") {
            modal_for_click.remove();
        }
    });
}
