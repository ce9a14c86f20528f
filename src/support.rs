use crate::dom;
use web_sys as web;

const NO_BACKDROP_FILTER_CLASS: &str = "no-backdrop-filter";

/// Log uncaught script errors instead of losing them.
pub fn report_uncaught_errors() {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(&window, "error", |e: web::ErrorEvent| {
        log::error!(
            "[ui] uncaught error: {} ({}:{})",
            e.message(),
            e.filename(),
            e.lineno()
        );
    });
}

/// Flag the body so the stylesheet can drop frosted-glass effects the
/// browser cannot render.
pub fn mark_missing_backdrop_filter(document: &web::Document) {
    let supported = ["backdrop-filter", "-webkit-backdrop-filter"]
        .iter()
        .any(|property| web::css::supports_with_value(property, "blur(10px)").unwrap_or(false));
    if supported {
        return;
    }
    if let Some(body) = document.body() {
        _ = body.class_list().add_1(NO_BACKDROP_FILTER_CLASS);
    }
    log::info!("[ui] backdrop-filter unsupported, using flat panels");
}
