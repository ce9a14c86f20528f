use valentine_core::{ParticleKind, ParticleSurface, Sprite};
use wasm_bindgen::JsCast;
use web_sys as web;

const HEART_GLYPH: &str = "❤️";

/// 2D canvas context the particle field draws onto.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the browser refuses a 2D context.
    pub fn new(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl ParticleSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw(&mut self, sprite: &Sprite) {
        let ctx = &self.ctx;
        let size = sprite.size as f64;
        ctx.save();
        ctx.set_global_alpha(sprite.opacity as f64);
        _ = ctx.translate(sprite.position.x as f64, sprite.position.y as f64);
        _ = ctx.rotate(sprite.rotation as f64);
        ctx.set_fill_style_str(sprite.color);
        match sprite.kind {
            ParticleKind::Heart => {
                ctx.set_font(&format!("{}px Arial", sprite.size));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                _ = ctx.fill_text(HEART_GLYPH, 0.0, 0.0);
            }
            ParticleKind::Confetti => {
                ctx.fill_rect(-size / 2.0, -size / 2.0, size, size);
            }
        }
        ctx.restore();
    }
}
