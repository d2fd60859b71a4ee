//! # Configuration
//!
//! Every tunable of the page lives here and is loaded once at startup from a
//! TOML document. Each field carries a serde default equal to the stock
//! value, so an empty document is the stock configuration:
//!
//! ```toml
//! [field]
//! max_tokens = 120
//!
//! [typewriter]
//! lines = ["Rust", "WebAssembly"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};
use crate::style::Color;
use crate::viewport::Viewport;

/// Labels drawn by the stock token field.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "</>", "JS", "TS", "0101", "{ }", "<>", "API", "CLI", "fn", "const", "let", "var", "=>",
    "() =>", "if", "for", "while", "npm", "git", "push", "pull", "dev", "console.log", "HTTP",
    "JSON", "XML", "CSS", "HTML", "<main>", "</main>", "async", "await", "try", "catch",
    "Promise", "argv", "stdin", "stdout", "docker", "kubectl", "lambda", "handler", "render",
    "bind",
];

/// Tunables of the token field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// CSS px² of viewport per token in the default configuration.
    pub density: f64,
    /// CSS px² of viewport per token in the compact configuration.
    pub compact_density: f64,
    /// Lower bound on the token count.
    pub min_tokens: usize,
    /// Upper bound on the token count in the default configuration.
    pub max_tokens: usize,
    /// Upper bound on the token count in the compact configuration.
    pub compact_max_tokens: usize,
    /// Viewports narrower than this (CSS px) use the compact configuration.
    pub mobile_breakpoint: f64,
    /// Velocity scale in the default configuration.
    pub speed_base: f64,
    /// Velocity scale in the compact configuration.
    pub compact_speed_base: f64,
    /// Blend factor of the pointer-offset easing, in (0, 1].
    pub pointer_smoothing: f64,
    /// Horizontal parallax reach of the nearest token, px per unit pointer.
    pub pointer_reach_x: f64,
    /// Vertical parallax reach of the nearest token, px per unit pointer.
    pub pointer_reach_y: f64,
    /// Constant downward drift of the nearest token, px per frame.
    pub drift: f64,
    /// Distance past the edge before a token wraps, device px.
    pub wrap_margin: f64,
    /// Smallest token size before device scaling.
    pub min_size: f64,
    /// Largest token size before device scaling.
    pub max_size: f64,
    /// Lower bound on the drawing alpha.
    pub min_alpha: f64,
    /// Accent color as `0xRRGGBB`.
    pub accent_rgb: u32,
    /// Fraction of the token alpha used for the label.
    pub text_alpha: f64,
    /// Fraction of the token alpha used for the glow.
    pub glow_alpha: f64,
    /// Glow radius as a fraction of token size.
    pub glow_radius_factor: f64,
    /// Smallest glow radius, px.
    pub min_glow_radius: f64,
    /// Smallest rendered font size, px.
    pub min_font_px: f64,
    /// Largest rendered font size, px.
    pub max_font_px: f64,
    /// CSS font family list for the labels.
    pub font_family: String,
    /// Labels sampled uniformly at token creation.
    pub vocabulary: Vec<String>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 3500.0,
            compact_density: 6500.0,
            min_tokens: 8,
            max_tokens: 180,
            compact_max_tokens: 36,
            mobile_breakpoint: 720.0,
            speed_base: 0.06,
            compact_speed_base: 0.005,
            pointer_smoothing: 0.15,
            pointer_reach_x: 35.0,
            pointer_reach_y: 25.0,
            drift: 0.02,
            wrap_margin: 40.0,
            min_size: 7.0,
            max_size: 14.0,
            min_alpha: 0.05,
            accent_rgb: 0x00_e6_a8,
            text_alpha: 0.95,
            glow_alpha: 0.22,
            glow_radius_factor: 0.42,
            min_glow_radius: 6.0,
            min_font_px: 10.0,
            max_font_px: 16.0,
            font_family: "'Fira Code', 'Courier New', monospace".to_string(),
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl FieldConfig {
    /// Checks that every value is in its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmptyVocabulary`] if there are no labels, or
    /// [`FieldError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> FieldResult<()> {
        if self.vocabulary.is_empty() {
            return Err(FieldError::EmptyVocabulary);
        }
        let tunables = [
            ("density", self.density),
            ("compact_density", self.compact_density),
            ("mobile_breakpoint", self.mobile_breakpoint),
            ("speed_base", self.speed_base),
            ("compact_speed_base", self.compact_speed_base),
            ("pointer_smoothing", self.pointer_smoothing),
            ("pointer_reach_x", self.pointer_reach_x),
            ("pointer_reach_y", self.pointer_reach_y),
            ("drift", self.drift),
            ("wrap_margin", self.wrap_margin),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("min_alpha", self.min_alpha),
            ("text_alpha", self.text_alpha),
            ("glow_alpha", self.glow_alpha),
            ("glow_radius_factor", self.glow_radius_factor),
            ("min_glow_radius", self.min_glow_radius),
            ("min_font_px", self.min_font_px),
            ("max_font_px", self.max_font_px),
        ];
        if let Some((name, value)) = tunables.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FieldError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if !(self.density > 0.0) || !(self.compact_density > 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "densities must be positive, got {} / {}",
                self.density, self.compact_density
            )));
        }
        if self.min_tokens > self.max_tokens || self.min_tokens > self.compact_max_tokens {
            return Err(FieldError::InvalidConfig(format!(
                "min_tokens {} exceeds a ceiling ({} / {})",
                self.min_tokens, self.max_tokens, self.compact_max_tokens
            )));
        }
        if !(self.pointer_smoothing > 0.0 && self.pointer_smoothing <= 1.0) {
            return Err(FieldError::InvalidConfig(format!(
                "pointer_smoothing must be in (0, 1], got {}",
                self.pointer_smoothing
            )));
        }
        if self.min_size > self.max_size || self.min_font_px > self.max_font_px {
            return Err(FieldError::InvalidConfig(
                "size and font bounds must satisfy min <= max".to_string(),
            ));
        }
        if !(self.wrap_margin >= 0.0) {
            return Err(FieldError::InvalidConfig(format!(
                "wrap_margin must be non-negative, got {}",
                self.wrap_margin
            )));
        }
        if !(self.min_alpha > 0.0 && self.min_alpha <= 1.0) {
            return Err(FieldError::InvalidConfig(format!(
                "min_alpha must be in (0, 1], got {}",
                self.min_alpha
            )));
        }
        Ok(())
    }

    /// Number of tokens for `viewport`.
    ///
    /// `max(min_tokens, min(ceiling, floor(area / density)))`, with the
    /// compact density and ceiling under reduced motion or a narrow viewport.
    #[must_use]
    pub fn token_count(&self, viewport: &Viewport) -> usize {
        let (density, ceiling) = if viewport.is_compact(self.mobile_breakpoint) {
            (self.compact_density, self.compact_max_tokens)
        } else {
            (self.density, self.max_tokens)
        };
        let by_area = (viewport.area() / density).floor() as usize;
        by_area.min(ceiling).max(self.min_tokens)
    }

    /// Velocity scale for `viewport`.
    #[must_use]
    pub fn speed_base(&self, viewport: &Viewport) -> f64 {
        if viewport.is_compact(self.mobile_breakpoint) {
            self.compact_speed_base
        } else {
            self.speed_base
        }
    }

    /// Accent as a [`Color`].
    #[must_use]
    pub fn accent(&self) -> Color {
        Color::hex_rgb(self.accent_rgb)
    }
}

/// Tunables of the DOM layer parallax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    /// Blend factor of the pointer easing.
    pub smoothing: f64,
    /// Viewport width at which the full parallax strength is reached.
    pub full_strength_width: f64,
    /// Translation in px per unit pointer offset per unit depth.
    pub pointer_travel: f64,
    /// Vertical translation per scrolled px per unit depth.
    pub scroll_factor: f64,
    /// Depth of `layer-grid` layers.
    pub grid_depth: f64,
    /// Depth of `layer-circuits` layers.
    pub circuits_depth: f64,
    /// Depth of `layer-dust` layers.
    pub dust_depth: f64,
    /// Depth of any other parallax layer.
    pub default_depth: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.08,
            full_strength_width: 1200.0,
            pointer_travel: 80.0,
            scroll_factor: 0.06,
            grid_depth: 0.03,
            circuits_depth: 0.07,
            dust_depth: 0.12,
            default_depth: 0.05,
        }
    }
}

/// Tunables of the terminal typewriter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterConfig {
    /// Lines typed in order, cycling forever.
    pub lines: Vec<String>,
    /// Prefix shown before the typed text.
    pub prompt: String,
    /// Delay between characters, ms.
    pub char_delay_ms: u64,
    /// Pause after a completed line, ms.
    pub line_pause_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                "JavaScript • Node.js • TS".to_string(),
                "Clean Architecture".to_string(),
                "CI/CD • Docker • GH Actions".to_string(),
                "Testing • Observability".to_string(),
            ],
            prompt: "~ ".to_string(),
            char_delay_ms: 80,
            line_pause_ms: 800,
        }
    }
}

/// Tunables of the skill-bar reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillRevealConfig {
    /// Visible fraction of the skills section that triggers the reveal.
    pub threshold: f64,
    /// Element id of the observed section.
    pub section_id: String,
}

impl Default for SkillRevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            section_id: "skills".to_string(),
        }
    }
}

/// Complete page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Token field background.
    pub field: FieldConfig,
    /// DOM layer parallax.
    pub parallax: ParallaxConfig,
    /// Terminal typewriter.
    pub typewriter: TypewriterConfig,
    /// Skill-bar reveal.
    pub skills: SkillRevealConfig,
}

impl PageConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ConfigParse`] on malformed TOML or unknown keys,
    /// and any error of [`PageConfig::validate`].
    pub fn from_toml_str(source: &str) -> FieldResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        tracing::info!(
            max_tokens = config.field.max_tokens,
            vocabulary = config.field.vocabulary.len(),
            "page configuration loaded"
        );
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Io`] if the file cannot be read, otherwise as
    /// [`PageConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> FieldResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> FieldResult<()> {
        self.field.validate()?;
        if self.typewriter.lines.is_empty() {
            return Err(FieldError::InvalidConfig(
                "typewriter needs at least one line".to_string(),
            ));
        }
        let parallax = &self.parallax;
        let tunables = [
            ("full_strength_width", parallax.full_strength_width),
            ("pointer_travel", parallax.pointer_travel),
            ("scroll_factor", parallax.scroll_factor),
            ("grid_depth", parallax.grid_depth),
            ("circuits_depth", parallax.circuits_depth),
            ("dust_depth", parallax.dust_depth),
            ("default_depth", parallax.default_depth),
        ];
        if let Some((name, value)) = tunables.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FieldError::InvalidConfig(format!(
                "parallax {name} must be finite, got {value}"
            )));
        }
        if !(self.parallax.smoothing > 0.0 && self.parallax.smoothing <= 1.0) {
            return Err(FieldError::InvalidConfig(format!(
                "parallax smoothing must be in (0, 1], got {}",
                self.parallax.smoothing
            )));
        }
        if !(self.parallax.full_strength_width > 0.0) {
            return Err(FieldError::InvalidConfig(
                "parallax full_strength_width must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.skills.threshold) {
            return Err(FieldError::InvalidConfig(format!(
                "skill reveal threshold must be in [0, 1], got {}",
                self.skills.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_stock() {
        let config = PageConfig::from_toml_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.field.vocabulary.len(), DEFAULT_VOCABULARY.len());
    }

    #[test]
    fn test_partial_override() {
        let config = PageConfig::from_toml_str(
            r#"
            [field]
            max_tokens = 90
            vocabulary = ["fn", "impl"]

            [typewriter]
            char_delay_ms = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.field.max_tokens, 90);
        assert_eq!(config.field.density, 3500.0);
        assert_eq!(config.field.vocabulary, vec!["fn", "impl"]);
        assert_eq!(config.typewriter.char_delay_ms, 40);
        assert_eq!(config.typewriter.line_pause_ms, 800);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PageConfig::from_toml_str("[field]\nmax_tokenz = 3\n").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let err = PageConfig::from_toml_str("[field]\nvocabulary = []\n").unwrap_err();
        assert!(matches!(err, FieldError::EmptyVocabulary));

        let err = PageConfig::from_toml_str("[field]\npointer_smoothing = 0.0\n").unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));

        let err = PageConfig::from_toml_str("[field]\nmin_tokens = 50\n").unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));

        let err = PageConfig::from_toml_str("[typewriter]\nlines = []\n").unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for doc in [
            "[field]\nmin_size = nan\n",
            "[field]\nmax_size = inf\n",
            "[field]\nmin_font_px = nan\n",
            "[field]\nmax_font_px = nan\n",
            "[field]\ndensity = inf\n",
            "[field]\ncompact_speed_base = nan\n",
            "[field]\npointer_reach_x = -inf\n",
            "[field]\ndrift = nan\n",
            "[field]\nglow_radius_factor = nan\n",
            "[field]\nmobile_breakpoint = nan\n",
            "[parallax]\ndust_depth = nan\n",
            "[skills]\nthreshold = nan\n",
        ] {
            let err = PageConfig::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, FieldError::InvalidConfig(_)), "{doc}");
        }
    }

    #[test]
    fn test_rejected_before_construction() {
        let config = FieldConfig {
            max_font_px: f64::NAN,
            ..FieldConfig::default()
        };
        let viewport = Viewport::new(1200.0, 800.0).unwrap();
        assert!(crate::TokenField::with_seed(config, viewport, 1).is_err());
    }

    #[test]
    fn test_token_count_scenarios() {
        let config = FieldConfig::default();

        let desktop = Viewport::new(1200.0, 800.0).unwrap();
        assert_eq!(config.token_count(&desktop), 180);

        let reduced = Viewport::new(600.0, 400.0).unwrap().with_reduced_motion(true);
        assert_eq!(config.token_count(&reduced), 36);
        assert_eq!(config.speed_base(&reduced), 0.005);

        let tiny = Viewport::new(100.0, 100.0).unwrap();
        assert_eq!(config.token_count(&tiny), 8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PageConfig::from_toml_file("/nonexistent/codefield.toml").unwrap_err();
        assert!(matches!(err, FieldError::Io(_)));
    }
}
