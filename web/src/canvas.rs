use playroom_core::Surface;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] backed by a canvas 2D context.
pub(crate) struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { context })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(x, y, width, height);
    }

    fn fill_glyph(&mut self, glyph: &str, font: &str, x: f64, y: f64) {
        self.context.set_font(font);
        self.context.set_text_align("center");
        if let Err(err) = self.context.fill_text(glyph, x, y) {
            log::error!("failed to draw {:?}: {:?}", glyph, err);
        }
    }
}
