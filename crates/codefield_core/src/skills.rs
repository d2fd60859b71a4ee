//! One-shot skill-bar reveal.
//!
//! Bars render at 0% until the skills section first becomes visible, then
//! all of them fill to their declared percentage and observation ends.

use crate::config::SkillRevealConfig;

/// Parses a `data-percent` attribute. Missing or unparsable values are 0;
/// the result is clamped to `[0, 100]`.
#[must_use]
pub fn parse_percent(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().trim_end_matches('%').parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .map_or(0.0, |p| p.clamp(0.0, 100.0))
}

/// CSS width for a bar at `percent`.
#[must_use]
pub fn width_css(percent: f64) -> String {
    format!("{percent}%")
}

/// Reveal state shared by every bar on the page.
#[derive(Debug, Clone)]
pub struct SkillReveal {
    threshold: f64,
    revealed: bool,
}

impl SkillReveal {
    /// Creates an unrevealed state.
    #[must_use]
    pub fn new(config: &SkillRevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            revealed: false,
        }
    }

    /// Intersection threshold to observe with.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the bars have been filled.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feeds one intersection entry. Returns true exactly once, on the first
    /// intersecting entry; the caller fills the bars and disconnects.
    pub fn observe(&mut self, is_intersecting: bool) -> bool {
        if self.revealed || !is_intersecting {
            return false;
        }
        self.revealed = true;
        tracing::debug!("skill bars revealed");
        true
    }

    /// Reveals unconditionally, for hosts without intersection observation.
    /// Returns true if this call did the reveal.
    pub fn reveal_now(&mut self) -> bool {
        self.observe(true)
    }

    /// Called once the bars are reset to 0%. Without intersection
    /// observation there is nothing to wait for, so the reveal happens here.
    /// Returns true when the caller should fill the bars now.
    pub fn start(&mut self, observer_supported: bool) -> bool {
        if observer_supported {
            return false;
        }
        self.reveal_now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent(Some("85")), 85.0);
        assert_eq!(parse_percent(Some(" 42.5% ")), 42.5);
        assert_eq!(parse_percent(Some("140")), 100.0);
        assert_eq!(parse_percent(Some("-3")), 0.0);
        assert_eq!(parse_percent(Some("lots")), 0.0);
        assert_eq!(parse_percent(Some("NaN")), 0.0);
        assert_eq!(parse_percent(None), 0.0);
    }

    #[test]
    fn test_width_css() {
        assert_eq!(width_css(0.0), "0%");
        assert_eq!(width_css(72.5), "72.5%");
    }

    #[test]
    fn test_reveals_once() {
        let mut reveal = SkillReveal::new(&SkillRevealConfig::default());
        assert_eq!(reveal.threshold(), 0.25);
        assert!(!reveal.observe(false));
        assert!(reveal.observe(true));
        assert!(!reveal.observe(true));
        assert!(!reveal.reveal_now());
        assert!(reveal.is_revealed());
    }

    #[test]
    fn test_start_without_observer_fills_at_once() {
        let mut reveal = SkillReveal::new(&SkillRevealConfig::default());
        assert!(reveal.start(false));
        assert!(reveal.is_revealed());
        assert!(!reveal.start(false));
    }

    #[test]
    fn test_start_with_observer_waits() {
        let mut reveal = SkillReveal::new(&SkillRevealConfig::default());
        assert!(!reveal.start(true));
        assert!(!reveal.is_revealed());
        assert!(reveal.observe(true));
    }
}
