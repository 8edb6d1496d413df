use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use starfield_core::animation::Rect;
use starfield_core::crop::CropRect;
use starfield_core::Painter;
use crate::canvas::image_loader::LoadingImage;

pub fn get_canvas_ctx(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Draws one frame of the scroller onto a 2d canvas context.
pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
    placeholder: Option<&'a LoadingImage>,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(
        ctx: &'a CanvasRenderingContext2d,
        canvas: &HtmlCanvasElement,
        placeholder: Option<&'a LoadingImage>,
    ) -> Self {
        Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            placeholder,
        }
    }
}

impl Painter<LoadingImage> for CanvasPainter<'_> {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_placeholder(&mut self, dest: Rect) {
        // Still decoding: skip it this frame.
        let Some(el) = self.placeholder.and_then(|p| p.loaded_element()) else { return };
        self.ctx.set_global_alpha(1.0);
        let _ = self.ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            el,
            0.0, 0.0,
            el.natural_width() as f64, el.natural_height() as f64,
            dest.x, dest.y,
            dest.width, dest.height,
        );
    }

    fn draw_tile(&mut self, image: &LoadingImage, crop: &CropRect, dest: Rect, opacity: f64) {
        let Some(el) = image.loaded_element() else { return };
        self.ctx.set_global_alpha(opacity);
        let _ = self.ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            el,
            crop.left, crop.top,
            crop.width, crop.height,
            dest.x, dest.y,
            dest.width, dest.height,
        );
    }
}
