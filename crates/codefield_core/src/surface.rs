//! Drawing surface seam.
//!
//! The field issues clear, fill-text and filled-circle calls plus one blend
//! toggle per token. The browser host implements [`DrawSurface`] over a
//! canvas 2D context; [`RecordingSurface`] collects the calls for headless
//! runs.

use crate::style::{BlendMode, Color};

/// One label draw call.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    /// Text to draw, centered on `(x, y)`.
    pub text: &'a str,
    /// Center x in device pixels.
    pub x: f64,
    /// Center y in device pixels.
    pub y: f64,
    /// Font size in pixels.
    pub font_px: f64,
    /// CSS font family list.
    pub font_family: &'a str,
    /// Fill color including alpha.
    pub color: Color,
}

/// A 2D raster target sized in device pixels.
pub trait DrawSurface {
    /// Clears the whole surface.
    fn clear(&mut self, width: f64, height: f64);

    /// Fills a centered text run.
    fn fill_text(&mut self, run: &TextRun<'_>);

    /// Fills a circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

    /// Switches the compositing mode for subsequent calls.
    fn set_blend(&mut self, mode: BlendMode);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Surface cleared.
    Clear {
        /// Cleared width.
        width: f64,
        /// Cleared height.
        height: f64,
    },
    /// Text filled.
    Text {
        /// Label.
        text: String,
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Font size, px.
        font_px: f64,
        /// Fill color.
        color: Color,
        /// Blend mode in effect.
        blend: BlendMode,
    },
    /// Circle filled.
    Circle {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Color,
        /// Blend mode in effect.
        blend: BlendMode,
    },
    /// Blend mode switched.
    Blend(BlendMode),
}

/// Surface that records every call of the current frame.
///
/// A `clear` starts a new frame and drops the previous frame's commands.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Commands since the last clear.
    commands: Vec<DrawCommand>,
    /// Blend mode currently in effect.
    blend: BlendMode,
    /// Number of clears seen.
    frames: u64,
}

impl RecordingSurface {
    /// Creates an empty recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            blend: BlendMode::Normal,
            frames: 0,
        }
    }

    /// Commands of the current frame.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Blend mode currently in effect.
    #[must_use]
    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Text commands of the current frame.
    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
    }

    /// Circle commands of the current frame.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_text(&mut self, run: &TextRun<'_>) {
        self.commands.push(DrawCommand::Text {
            text: run.text.to_string(),
            x: run.x,
            y: run.y,
            font_px: run.font_px,
            color: run.color,
            blend: self.blend,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            blend: self.blend,
        });
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.blend = mode;
        self.commands.push(DrawCommand::Blend(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_frame() {
        let mut surface = RecordingSurface::new();
        surface.clear(10.0, 10.0);
        surface.fill_circle(1.0, 1.0, 2.0, Color::ACCENT);
        assert_eq!(surface.commands().len(), 2);

        surface.clear(10.0, 10.0);
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn test_blend_is_recorded_per_call() {
        let mut surface = RecordingSurface::new();
        surface.clear(10.0, 10.0);
        surface.set_blend(BlendMode::Additive);
        surface.fill_circle(1.0, 1.0, 2.0, Color::ACCENT);
        surface.set_blend(BlendMode::Normal);
        surface.fill_text(&TextRun {
            text: "fn",
            x: 0.0,
            y: 0.0,
            font_px: 12.0,
            font_family: "monospace",
            color: Color::ACCENT,
        });

        let circle = surface.circles().next().unwrap();
        assert!(matches!(circle, DrawCommand::Circle { blend: BlendMode::Additive, .. }));
        let text = surface.texts().next().unwrap();
        assert!(matches!(text, DrawCommand::Text { blend: BlendMode::Normal, .. }));
        assert_eq!(surface.blend(), BlendMode::Normal);
    }
}
