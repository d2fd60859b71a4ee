//! Frame loop with an explicit start/stop contract.
//!
//! The host's display-refresh scheduler calls [`FrameLoop::step`] once per
//! refresh and must request the next refresh only when the step returns
//! [`FrameOutcome::Continue`]. Nothing repeats on its own. Teardown goes
//! through a [`StopHandle`], which input handlers and page navigation can
//! hold without borrowing the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::field::{FrameStats, TokenField};
use crate::surface::DrawSurface;

/// What the host should do after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// A frame was drawn; request the next refresh.
    Continue(FrameStats),
    /// The loop is stopped; do not request another refresh.
    Stopped,
}

impl FrameOutcome {
    /// True if the host should schedule another step.
    #[must_use]
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Cloneable handle that stops a running loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Stops the loop. The next step draws nothing and returns
    /// [`FrameOutcome::Stopped`].
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            tracing::debug!("frame loop stop requested");
        }
    }

    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Owns a [`TokenField`] and gates its frame step on the running flag.
#[derive(Debug)]
pub struct FrameLoop<R = ChaCha8Rng> {
    field: TokenField<R>,
    handle: StopHandle,
}

impl<R: Rng> FrameLoop<R> {
    /// Wraps a field. The loop starts stopped.
    #[must_use]
    pub fn new(field: TokenField<R>) -> Self {
        Self {
            field,
            handle: StopHandle::default(),
        }
    }

    /// Marks the loop running and returns its stop handle.
    ///
    /// The host then schedules the first step.
    pub fn start(&mut self) -> StopHandle {
        if !self.handle.running.swap(true, Ordering::AcqRel) {
            tracing::debug!(tokens = self.field.token_count(), "frame loop started");
        }
        self.handle.clone()
    }

    /// Stops the loop.
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Handle sharing this loop's running flag.
    #[must_use]
    pub fn handle(&self) -> StopHandle {
        self.handle.clone()
    }

    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Runs one frame if the loop is running.
    pub fn step<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameOutcome {
        if !self.handle.is_running() {
            return FrameOutcome::Stopped;
        }
        FrameOutcome::Continue(self.field.frame(surface))
    }

    /// Drives up to `frames` steps back to back, as a headless scheduler.
    ///
    /// Returns the number of frames drawn; fewer than `frames` if the loop
    /// was stopped meanwhile.
    pub fn run_frames<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, frames: u64) -> u64 {
        let mut drawn = 0;
        while drawn < frames {
            if !self.step(surface).should_continue() {
                break;
            }
            drawn += 1;
        }
        drawn
    }

    /// The driven field.
    #[must_use]
    pub fn field(&self) -> &TokenField<R> {
        &self.field
    }

    /// The driven field, for resize and pointer updates.
    pub fn field_mut(&mut self) -> &mut TokenField<R> {
        &mut self.field
    }

    /// Consumes the loop, returning the field.
    #[must_use]
    pub fn into_field(self) -> TokenField<R> {
        self.handle.stop();
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::surface::RecordingSurface;
    use crate::viewport::Viewport;

    fn frame_loop() -> FrameLoop {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        FrameLoop::new(TokenField::with_seed(FieldConfig::default(), viewport, 11).unwrap())
    }

    #[test]
    fn test_stopped_until_started() {
        let mut frame_loop = frame_loop();
        let mut surface = RecordingSurface::new();

        assert_eq!(frame_loop.step(&mut surface), FrameOutcome::Stopped);
        assert_eq!(surface.frames(), 0);

        frame_loop.start();
        assert!(frame_loop.step(&mut surface).should_continue());
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_stop_handle_ends_loop() {
        let mut frame_loop = frame_loop();
        let mut surface = RecordingSurface::new();
        let handle = frame_loop.start();

        assert_eq!(frame_loop.run_frames(&mut surface, 5), 5);
        handle.stop();
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.run_frames(&mut surface, 5), 0);
        assert_eq!(frame_loop.field().frame_count(), 5);

        frame_loop.start();
        assert_eq!(frame_loop.run_frames(&mut surface, 2), 2);
        assert_eq!(frame_loop.field().frame_count(), 7);
    }

    #[test]
    fn test_handle_shares_running_flag() {
        let mut frame_loop = frame_loop();
        let observer = frame_loop.handle();
        assert!(!observer.is_running());

        frame_loop.start();
        assert!(observer.is_running());

        frame_loop.stop();
        assert!(!observer.is_running());
    }

    #[test]
    fn test_into_field_stops_loop() {
        let mut frame_loop = frame_loop();
        let handle = frame_loop.start();
        let mut surface = RecordingSurface::new();
        frame_loop.run_frames(&mut surface, 3);

        let field = frame_loop.into_field();
        assert!(!handle.is_running());
        assert_eq!(field.frame_count(), 3);
    }
}
