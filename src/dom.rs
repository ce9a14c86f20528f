use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Attach `handler` for `event` on `target`; the closure lives for the page.
pub fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[dom] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::once(f);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        ms,
    );
    closure.forget();
}

/// Run `f` every `ms` milliseconds for the rest of the page's life.
pub fn set_interval(ms: i32, f: impl FnMut() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        ms,
    );
    closure.forget();
}

/// Window inner size in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Match the canvas backing store to the window; returns the new size.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let (w, h) = viewport_size();
    let w_px = (w as u32).max(1);
    let h_px = (h as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_text(document: &web::Document, selector: &str, text: &str) {
    if let Ok(Some(el)) = document.query_selector(selector) {
        el.set_text_content(Some(text));
    }
}
