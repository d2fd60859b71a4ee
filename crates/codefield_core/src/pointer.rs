//! Pointer tracking.
//!
//! Only the latest sample matters. Mouse and touch handlers overwrite the
//! normalized offset; the frame step reads it without blocking.

use crate::viewport::Viewport;

/// Latest pointer position, normalized to `[-0.5, 0.5]` per axis relative to
/// the viewport center.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Horizontal offset from center.
    pub nx: f64,
    /// Vertical offset from center.
    pub ny: f64,
}

impl PointerState {
    /// Pointer resting at the viewport center.
    pub const CENTER: Self = Self { nx: 0.0, ny: 0.0 };

    /// Records a pointer sample in CSS client coordinates.
    ///
    /// Returns false and keeps the previous state if the viewport is empty.
    pub fn track(&mut self, client_x: f64, client_y: f64, viewport: &Viewport) -> bool {
        if viewport.width() <= 0.0 || viewport.height() <= 0.0 {
            return false;
        }
        self.nx = (client_x / viewport.width() - 0.5).clamp(-0.5, 0.5);
        self.ny = (client_y / viewport.height() - 0.5).clamp(-0.5, 0.5);
        true
    }

    /// Records the first active touch point, if any.
    ///
    /// A touch event without an active point is ignored.
    pub fn track_touch(&mut self, first_touch: Option<(f64, f64)>, viewport: &Viewport) -> bool {
        match first_touch {
            Some((x, y)) => self.track(x, y, viewport),
            None => {
                tracing::trace!("touch event without an active point ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let vp = Viewport::new(1000.0, 500.0).unwrap();
        let mut pointer = PointerState::default();

        assert!(pointer.track(500.0, 250.0, &vp));
        assert_eq!(pointer, PointerState::CENTER);

        pointer.track(0.0, 500.0, &vp);
        assert_eq!(pointer.nx, -0.5);
        assert_eq!(pointer.ny, 0.5);

        pointer.track(750.0, 125.0, &vp);
        assert_eq!(pointer.nx, 0.25);
        assert_eq!(pointer.ny, -0.25);
    }

    #[test]
    fn test_missing_touch_keeps_state() {
        let vp = Viewport::new(1000.0, 500.0).unwrap();
        let mut pointer = PointerState::default();
        pointer.track(1000.0, 0.0, &vp);

        assert!(!pointer.track_touch(None, &vp));
        assert_eq!(pointer.nx, 0.5);
        assert_eq!(pointer.ny, -0.5);

        assert!(pointer.track_touch(Some((500.0, 250.0)), &vp));
        assert_eq!(pointer, PointerState::CENTER);
    }

    #[test]
    fn test_empty_viewport_ignored() {
        let vp = Viewport::new(0.0, 0.0).unwrap();
        let mut pointer = PointerState { nx: 0.1, ny: 0.2 };
        assert!(!pointer.track(10.0, 10.0, &vp));
        assert_eq!(pointer.nx, 0.1);
    }
}
