//! Canvas 2D backend for `Surface`

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Rgb, Surface};

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Grab the 2D context of a canvas element
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self::new(ctx))
    }

    /// Trace a rounded rectangle as the current path
    fn round_rect_path(&self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
    }
}

impl Surface for Canvas2dSurface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_gradient_rect(&mut self, pos: Vec2, size: Vec2, top: Rgb, bottom: Rgb) {
        let (x, y, w, h) = (pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        let gradient = self.ctx.create_linear_gradient(x, y, x, y + h);
        let _ = gradient.add_color_stop(0.0, &top.css());
        let _ = gradient.add_color_stop(1.0, &bottom.css());
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_round_rect(&mut self, pos: Vec2, size: f32, radius: f32, color: Rgb) {
        let (x, y, s) = (pos.x as f64, pos.y as f64, size as f64);
        self.ctx.set_fill_style_str(&color.css());
        self.round_rect_path(x, y, s, s, radius as f64);
        self.ctx.fill();
    }

    fn dashed_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: [f32; 2], color: Rgb) {
        let ctx = &self.ctx;
        let pattern = js_sys::Array::of2(
            &JsValue::from_f64(dash[0] as f64),
            &JsValue::from_f64(dash[1] as f64),
        );
        ctx.begin_path();
        ctx.set_stroke_style_str(&color.css());
        ctx.set_line_width(width as f64);
        let _ = ctx.set_line_dash(&pattern);
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }
}
