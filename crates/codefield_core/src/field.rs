//! # Token Field
//!
//! Owns the whole token set for one viewport size and advances it one
//! display refresh at a time.
//!
//! ## Lifecycle
//!
//! ```text
//! new(viewport) ──► rebuild ──► frame ──► frame ──► ...
//!                      ▲                     │
//!                      └──── resize(viewport)┘   (old set discarded)
//! ```
//!
//! The set is never grown or shrunk in place. A resize recomputes the device
//! pixel ratio and backing store, then spawns a complete new generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::FieldConfig;
use crate::error::FieldResult;
use crate::pointer::PointerState;
use crate::style::{BlendMode, Color};
use crate::surface::{DrawSurface, TextRun};
use crate::token::{SpawnParams, Token};
use crate::viewport::Viewport;

/// Summary of one frame step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frame counter value the step ran with.
    pub frame: u64,
    /// Tokens drawn.
    pub tokens: usize,
    /// Tokens that wrapped on at least one axis.
    pub wrapped: usize,
    /// Smallest drawing alpha used.
    pub min_alpha: f64,
    /// Largest drawing alpha used.
    pub max_alpha: f64,
}

/// The particle field renderer.
///
/// Generic over the random source so tests can inject a seeded one; the
/// default is [`ChaCha8Rng`].
#[derive(Debug)]
pub struct TokenField<R = ChaCha8Rng> {
    config: FieldConfig,
    viewport: Viewport,
    /// Backing-store size, device pixels.
    width: f64,
    height: f64,
    dpr: f64,
    tokens: Vec<Token>,
    pointer: PointerState,
    /// Global frame counter.
    frame: u64,
    /// Bumped on every rebuild.
    generation: u64,
    accent: Color,
    rng: R,
}

impl TokenField<ChaCha8Rng> {
    /// Creates a field driven by a ChaCha8 stream seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn with_seed(config: FieldConfig, viewport: Viewport, seed: u64) -> FieldResult<Self> {
        Self::new(config, viewport, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> TokenField<R> {
    /// Creates a field and spawns the first generation.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn new(config: FieldConfig, viewport: Viewport, rng: R) -> FieldResult<Self> {
        config.validate()?;
        let accent = config.accent();
        let mut field = Self {
            config,
            viewport,
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
            tokens: Vec::new(),
            pointer: PointerState::CENTER,
            frame: 0,
            generation: 0,
            accent,
            rng,
        };
        field.rebuild();
        Ok(field)
    }

    /// Replaces the viewport and rebuilds the whole token set.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.dpr = self.viewport.dpr();
        self.width = self.viewport.backing_width();
        self.height = self.viewport.backing_height();
        self.generation += 1;

        let count = self.config.token_count(&self.viewport);
        let params = SpawnParams {
            width: self.width,
            height: self.height,
            dpr: self.dpr,
            speed_base: self.config.speed_base(&self.viewport),
            vocabulary_len: self.config.vocabulary.len(),
            min_size: self.config.min_size,
            max_size: self.config.max_size,
            generation: self.generation,
        };

        let rng = &mut self.rng;
        self.tokens = (0..count).map(|_| Token::spawn(rng, &params)).collect();

        tracing::debug!(
            tokens = count,
            dpr = self.dpr,
            width = self.width,
            height = self.height,
            compact = self.viewport.is_compact(self.config.mobile_breakpoint),
            generation = self.generation,
            "token field rebuilt"
        );
    }

    /// Overwrites the pointer sample read by the next frame.
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Records a mouse position in CSS client coordinates.
    pub fn track_pointer(&mut self, client_x: f64, client_y: f64) -> bool {
        let viewport = self.viewport;
        self.pointer.track(client_x, client_y, &viewport)
    }

    /// Records the first active touch point; `None` is ignored.
    pub fn track_touch(&mut self, first_touch: Option<(f64, f64)>) -> bool {
        let viewport = self.viewport;
        self.pointer.track_touch(first_touch, &viewport)
    }

    /// Advances every token by one frame and draws it.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let Self {
            config,
            width,
            height,
            tokens,
            pointer,
            frame,
            accent,
            rng,
            ..
        } = self;
        let (w, h) = (*width, *height);
        let t = *frame;
        let reach = (config.pointer_reach_x, config.pointer_reach_y);

        surface.clear(w, h);

        let mut stats = FrameStats {
            frame: t,
            tokens: tokens.len(),
            wrapped: 0,
            min_alpha: if tokens.is_empty() { 0.0 } else { 1.0 },
            max_alpha: 0.0,
        };

        for token in tokens.iter_mut() {
            token.advance_twinkle(rng.gen());
            let alpha = token.alpha(t, config.min_alpha);
            stats.min_alpha = stats.min_alpha.min(alpha);
            stats.max_alpha = stats.max_alpha.max(alpha);

            token.ease_toward(*pointer, reach, config.pointer_smoothing);
            token.integrate(config.drift);
            if token.wrap(w, h, config.wrap_margin) {
                stats.wrapped += 1;
            }

            let (px, py) = token.render_position(t, w, h);
            let label = label_text(&config.vocabulary, token);

            surface.fill_text(&TextRun {
                text: label,
                x: px,
                y: py,
                font_px: token.size().clamp(config.min_font_px, config.max_font_px),
                font_family: &config.font_family,
                color: accent.with_alpha((alpha * config.text_alpha) as f32),
            });

            surface.set_blend(BlendMode::Additive);
            surface.fill_circle(
                px,
                py,
                (token.size() * config.glow_radius_factor).max(config.min_glow_radius),
                accent.with_alpha((alpha * config.glow_alpha) as f32),
            );
            surface.set_blend(BlendMode::Normal);
        }

        *frame += 1;
        stats
    }

    /// Current tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Label text of `token`.
    #[must_use]
    pub fn label_of(&self, token: &Token) -> &str {
        label_text(&self.config.vocabulary, token)
    }

    /// Frames stepped so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Current generation; every rebuild increments it.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Backing-store size in device pixels.
    #[must_use]
    pub fn backing_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Effective device pixel ratio of the current generation.
    #[must_use]
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Latest pointer sample.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Field configuration.
    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

fn label_text<'a>(vocabulary: &'a [String], token: &Token) -> &'a str {
    vocabulary.get(token.label()).map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn desktop() -> Viewport {
        Viewport::new(1200.0, 800.0).unwrap()
    }

    #[test]
    fn test_initial_generation() {
        let field = TokenField::with_seed(FieldConfig::default(), desktop(), 1).unwrap();
        assert_eq!(field.token_count(), 180);
        assert_eq!(field.generation(), 1);
        assert_eq!(field.backing_size(), (1200.0, 800.0));
        assert!(field.tokens().iter().all(|t| t.generation() == 1));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = TokenField::with_seed(FieldConfig::default(), desktop(), 42).unwrap();
        let b = TokenField::with_seed(FieldConfig::default(), desktop(), 42).unwrap();
        assert_eq!(a.tokens(), b.tokens());
    }

    #[test]
    fn test_frame_draw_sequence() {
        let mut field = TokenField::with_seed(FieldConfig::default(), desktop(), 9).unwrap();
        let mut surface = RecordingSurface::new();
        let stats = field.frame(&mut surface);

        assert_eq!(stats.frame, 0);
        assert_eq!(field.frame_count(), 1);
        // clear + (text, blend, circle, blend) per token
        assert_eq!(surface.commands().len(), 1 + 4 * 180);
        assert!(matches!(
            surface.commands()[0],
            DrawCommand::Clear { width, height } if width == 1200.0 && height == 800.0
        ));
        assert!(matches!(
            &surface.commands()[1..5],
            [
                DrawCommand::Text { blend: BlendMode::Normal, .. },
                DrawCommand::Blend(BlendMode::Additive),
                DrawCommand::Circle { blend: BlendMode::Additive, .. },
                DrawCommand::Blend(BlendMode::Normal),
            ]
        ));
        assert_eq!(surface.blend(), BlendMode::Normal);
    }

    #[test]
    fn test_labels_come_from_vocabulary() {
        let config = FieldConfig {
            vocabulary: vec!["fn".to_string(), "impl".to_string()],
            ..FieldConfig::default()
        };
        let mut field = TokenField::with_seed(config, desktop(), 5).unwrap();
        for token in field.tokens() {
            assert!(matches!(field.label_of(token), "fn" | "impl"));
        }

        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);
        let drawn: Vec<&str> = surface
            .texts()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let expected: Vec<&str> = field.tokens().iter().map(|t| field.label_of(t)).collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn test_pointer_tracking() {
        let mut field = TokenField::with_seed(FieldConfig::default(), desktop(), 3).unwrap();
        assert_eq!(field.pointer(), PointerState::CENTER);
        assert_eq!(field.viewport().width(), 1200.0);

        assert!(field.track_pointer(900.0, 200.0));
        assert_eq!(field.pointer(), PointerState { nx: 0.25, ny: -0.25 });

        assert!(!field.track_touch(None));
        assert_eq!(field.pointer(), PointerState { nx: 0.25, ny: -0.25 });

        assert!(field.track_touch(Some((0.0, 800.0))));
        assert_eq!(field.pointer(), PointerState { nx: -0.5, ny: 0.5 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FieldConfig {
            vocabulary: Vec::new(),
            ..FieldConfig::default()
        };
        assert!(TokenField::with_seed(config, desktop(), 0).is_err());
    }
}
