use crate::canvas::CanvasSurface;
use crate::constants::PARTICLE_CANVAS_ID;
use crate::dom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use valentine_core::{ParticleField, AMBIENT_INTERVAL_MS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedField = Rc<RefCell<ParticleField<StdRng>>>;

pub struct FrameContext {
    pub field: SharedField,
    pub surface: CanvasSurface,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let mut field = self.field.borrow_mut();
        field.advance_frame();
        field.render(&mut self.surface);
    }
}

/// Build the particle layer on `#particle-canvas`. Without a canvas or a 2D
/// context the effects are disabled and `None` is returned.
pub fn init_particles(document: &web::Document) -> Option<SharedField> {
    let Some(canvas) = dom::element_by_id::<web::HtmlCanvasElement>(document, PARTICLE_CANVAS_ID)
    else {
        log::warn!("[particles] #{} missing, particle effects disabled", PARTICLE_CANVAS_ID);
        return None;
    };
    let Some(surface) = CanvasSurface::new(&canvas) else {
        log::warn!("[particles] canvas 2D unsupported, particle effects disabled");
        return None;
    };
    let (w, h) = dom::sync_canvas_to_viewport(&canvas);
    let field: SharedField = Rc::new(RefCell::new(ParticleField::new(
        w as f32,
        h as f32,
        StdRng::from_entropy(),
    )));

    wire_canvas_resize(&canvas, field.clone());
    start_ambient(field.clone());
    start_loop(Rc::new(RefCell::new(FrameContext {
        field: field.clone(),
        surface,
    })));
    log::info!("[particles] running on {}x{}", w, h);
    Some(field)
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, field: SharedField) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    dom::listen(&window, "resize", move |_: web::Event| {
        let (w, h) = dom::sync_canvas_to_viewport(&canvas);
        field.borrow_mut().resize(w as f32, h as f32);
    });
}

fn start_ambient(field: SharedField) {
    dom::set_interval(AMBIENT_INTERVAL_MS, move || {
        field.borrow_mut().emit_ambient();
    });
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
