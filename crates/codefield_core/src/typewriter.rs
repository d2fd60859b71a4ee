//! Terminal typing effect.
//!
//! A timer-driven state machine: every tick reveals one more character of the
//! current line and says how long to wait before the next tick. After a full
//! line it pauses, then starts the next line from empty.

use std::time::Duration;

use crate::config::TypewriterConfig;
use crate::error::{FieldError, FieldResult};

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStep {
    /// Full text to display, prompt included.
    pub text: String,
    /// Delay before the next tick.
    pub delay: Duration,
}

/// Cycles through the configured lines forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: Vec<Vec<char>>,
    prompt: String,
    char_delay: Duration,
    line_pause: Duration,
    /// Current line.
    line: usize,
    /// Characters shown on the next tick.
    shown: usize,
}

impl Typewriter {
    /// Creates a typewriter positioned at the start of the first line.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidConfig`] if there are no lines.
    pub fn new(config: &TypewriterConfig) -> FieldResult<Self> {
        if config.lines.is_empty() {
            return Err(FieldError::InvalidConfig(
                "typewriter needs at least one line".to_string(),
            ));
        }
        Ok(Self {
            lines: config.lines.iter().map(|l| l.chars().collect()).collect(),
            prompt: config.prompt.clone(),
            char_delay: Duration::from_millis(config.char_delay_ms),
            line_pause: Duration::from_millis(config.line_pause_ms),
            line: 0,
            shown: 0,
        })
    }

    /// Index of the line being typed.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line
    }

    /// Renders the current prefix and advances.
    pub fn tick(&mut self) -> TypeStep {
        let line = &self.lines[self.line];
        let take = self.shown.min(line.len());
        let mut text = String::with_capacity(self.prompt.len() + take * 4);
        text.push_str(&self.prompt);
        text.extend(&line[..take]);

        self.shown += 1;
        let delay = if self.shown > line.len() {
            self.shown = 0;
            self.line = (self.line + 1) % self.lines.len();
            self.line_pause
        } else {
            self.char_delay
        };

        TypeStep { text, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lines: &[&str]) -> TypewriterConfig {
        TypewriterConfig {
            lines: lines.iter().map(|s| (*s).to_string()).collect(),
            ..TypewriterConfig::default()
        }
    }

    #[test]
    fn test_types_then_pauses() {
        let mut typewriter = Typewriter::new(&config(&["ab", "c"])).unwrap();

        let steps: Vec<TypeStep> = (0..6).map(|_| typewriter.tick()).collect();
        let texts: Vec<&str> = steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["~ ", "~ a", "~ ab", "~ ", "~ c", "~ "]);

        let fast = Duration::from_millis(80);
        let pause = Duration::from_millis(800);
        let delays: Vec<Duration> = steps.iter().map(|s| s.delay).collect();
        assert_eq!(delays, [fast, fast, pause, fast, pause, fast]);
        assert_eq!(typewriter.line_index(), 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut typewriter = Typewriter::new(&config(&["a•b"])).unwrap();
        typewriter.tick();
        typewriter.tick();
        assert_eq!(typewriter.tick().text, "~ a•");
    }

    #[test]
    fn test_empty_lines_rejected() {
        assert!(Typewriter::new(&config(&[])).is_err());
    }
}
