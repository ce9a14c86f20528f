use crate::constants::ECARD_BUTTON_ID;
use crate::dom;
use crate::SharedStore;
use anyhow::{anyhow, Context};
use valentine_core::ecard::{self, CARD_HEIGHT, CARD_WIDTH};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn wire_ecard_button(document: &web::Document, store: &SharedStore) {
    let doc = document.clone();
    let store = store.clone();
    dom::add_click_listener(document, ECARD_BUTTON_ID, move || {
        let doc = doc.clone();
        let store = store.clone();
        spawn_local(async move {
            if let Err(e) = generate(&doc, &store).await {
                log::error!("[ecard] generation failed: {:#}", e);
            }
        });
    });
}

/// Draw the 1200x630 card offscreen and hand it to the browser as a PNG
/// download.
pub async fn generate(document: &web::Document, store: &SharedStore) -> anyhow::Result<()> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("created element is not a canvas"))?;
    canvas.set_width(CARD_WIDTH);
    canvas.set_height(CARD_HEIGHT);
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .context("2d context unavailable")?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected context type"))?;

    let (w, h) = (f64::from(CARD_WIDTH), f64::from(CARD_HEIGHT));
    let gradient = ctx.create_linear_gradient(0.0, 0.0, w, h);
    _ = gradient.add_color_stop(0.0, ecard::GRADIENT_FROM);
    _ = gradient.add_color_stop(1.0, ecard::GRADIENT_TO);
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);

    // Copy what we need out of the store before awaiting.
    let (photo_url, message) = {
        let store = store.borrow();
        let photo_url = store.photos().first().map(|p| p.url.clone());
        let message = store
            .yes_messages()
            .first()
            .map(|m| store.interpolate(m))
            .unwrap_or_default();
        (photo_url, message)
    };

    if let Some(url) = photo_url {
        match load_image(&url).await {
            Ok(img) => {
                let fitted = ecard::fit_photo(
                    f64::from(img.natural_width()),
                    f64::from(img.natural_height()),
                );
                if let Some(r) = fitted {
                    _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &img, r.x, r.y, r.width, r.height,
                    );
                }
            }
            Err(e) => log::warn!("[ecard] could not load image for e-card: {:#}", e),
        }
    }

    ctx.set_font(ecard::ORNAMENT_FONT);
    for (glyph, x, y) in ecard::ornaments() {
        _ = ctx.fill_text(glyph, x, y);
    }

    ctx.set_fill_style_str(ecard::MESSAGE_COLOR);
    ctx.set_font(ecard::MESSAGE_FONT);
    ctx.set_text_align("center");
    let lines = ecard::wrap_text(&message, ecard::message_max_width(), |s| {
        ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
    });
    let baselines = ecard::line_baselines(
        lines.len(),
        ecard::MESSAGE_CENTER_Y,
        ecard::MESSAGE_LINE_HEIGHT,
    );
    for (line, y) in lines.iter().zip(baselines) {
        _ = ctx.fill_text(line, w / 2.0, y);
    }

    let today = js_sys::Date::new_0();
    let date = ecard::long_date(
        today.get_full_year(),
        today.get_month() + 1,
        today.get_date(),
    );
    ctx.set_fill_style_str(ecard::DATE_COLOR);
    ctx.set_font(ecard::DATE_FONT);
    _ = ctx.fill_text(&date, w / 2.0, ecard::DATE_Y);

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|e| anyhow!("export failed: {:?}", e))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlAnchorElement>()
        .map_err(|_| anyhow!("created element is not an anchor"))?;
    anchor.set_href(&data_url);
    let name = ecard::download_name(js_sys::Date::now() as u64);
    anchor.set_download(&name);
    anchor.click();
    log::info!("[ecard] downloaded {}", name);
    Ok(())
}

async fn load_image(url: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow!("{:?}", e))?;
    img.set_cross_origin(Some("anonymous"));

    let target = img.clone();
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once_into_js(move || {
            _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        });
        let on_error = Closure::once_into_js(move || {
            _ = reject.call0(&wasm_bindgen::JsValue::NULL);
        });
        target.set_onload(Some(on_load.unchecked_ref()));
        target.set_onerror(Some(on_error.unchecked_ref()));
    });
    img.set_src(url);
    JsFuture::from(loaded)
        .await
        .map_err(|_| anyhow!("image failed to load: {}", url))?;
    Ok(img)
}
