//! Canvas 2D drawing surface.

use std::f64::consts::TAU;
use std::fmt::Write as _;

use codefield_core::{BlendMode, Color, DrawSurface, TextRun};
use web_sys::CanvasRenderingContext2d;

use crate::dom;

/// [`DrawSurface`] over a `CanvasRenderingContext2d`.
///
/// Font and composite mode are only pushed to the context when they change.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    font: String,
    scratch: String,
    blend: BlendMode,
}

impl CanvasSurface {
    /// Wraps a 2D context.
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            font: String::new(),
            scratch: String::with_capacity(64),
            blend: BlendMode::Normal,
        }
    }

    fn apply_blend(&self, mode: BlendMode) {
        if let Err(e) = self.ctx.set_global_composite_operation(mode.composite_operation()) {
            dom::warn("canvas composite operation", &e);
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        // Resizing the backing store resets context state.
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.apply_blend(BlendMode::Normal);
        self.blend = BlendMode::Normal;
        self.font.clear();
    }

    fn fill_text(&mut self, run: &TextRun<'_>) {
        self.scratch.clear();
        if write!(self.scratch, "{}px {}", run.font_px, run.font_family).is_err() {
            return;
        }
        if self.scratch != self.font {
            self.ctx.set_font(&self.scratch);
            std::mem::swap(&mut self.font, &mut self.scratch);
        }
        self.ctx.set_fill_style_str(&run.color.to_css());
        if let Err(e) = self.ctx.fill_text(run.text, run.x, run.y) {
            dom::warn("canvas fill_text", &e);
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&color.to_css());
        match self.ctx.arc(x, y, radius, 0.0, TAU) {
            Ok(()) => self.ctx.fill(),
            Err(e) => dom::warn("canvas arc", &e),
        }
    }

    fn set_blend(&mut self, mode: BlendMode) {
        if mode != self.blend {
            self.apply_blend(mode);
            self.blend = mode;
        }
    }
}
