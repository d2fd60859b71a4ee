//! Colors and blend modes for the token field.
//!
//! Dark page, one neon accent. Everything is drawn in the accent at varying
//! alpha, so the palette stays tiny.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Token accent, `#00e6a8`.
    pub const ACCENT: Self = Self::rgb(0.0, 230.0 / 255.0, 168.0 / 255.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub fn hex_rgb(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the 8-bit channels, rounded.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Formats as a CSS `rgba()` string with three alpha decimals.
    #[must_use]
    pub fn to_css(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({r},{g},{b},{:.3})", self.a.clamp(0.0, 1.0))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::ACCENT
    }
}

/// Compositing mode for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha blending (`source-over`).
    #[default]
    Normal,
    /// Additive blending (`lighter`), used for the glow halo.
    Additive,
}

impl BlendMode {
    /// Canvas `globalCompositeOperation` name.
    #[must_use]
    pub const fn composite_operation(self) -> &'static str {
        match self {
            Self::Normal => "source-over",
            Self::Additive => "lighter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_channels() {
        assert_eq!(Color::ACCENT.to_rgb8(), [0x00, 0xe6, 0xa8]);
    }

    #[test]
    fn test_hex_matches_constants() {
        assert_eq!(Color::hex_rgb(0x00_e6_a8).to_rgb8(), Color::ACCENT.to_rgb8());
    }

    #[test]
    fn test_css_format() {
        let css = Color::ACCENT.with_alpha(0.5).to_css();
        assert_eq!(css, "rgba(0,230,168,0.500)");
    }

    #[test]
    fn test_blend_names() {
        assert_eq!(BlendMode::Additive.composite_operation(), "lighter");
        assert_eq!(BlendMode::default().composite_operation(), "source-over");
    }
}
