//! Host viewport snapshot.
//!
//! The field reads the viewport only at init/resize time. Everything here is
//! in CSS pixels except the `backing_*` accessors, which are device pixels.

use crate::error::{FieldError, FieldResult};

/// Viewport dimensions and accessibility flags supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    width: f64,
    /// Height in CSS pixels.
    height: f64,
    /// Raw device pixel ratio as reported by the host.
    device_pixel_ratio: f64,
    /// `prefers-reduced-motion: reduce` is active.
    reduced_motion: bool,
}

impl Viewport {
    /// Creates a viewport with a device pixel ratio of 1 and default motion.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidViewport`] if either dimension is
    /// negative or not finite.
    pub fn new(width: f64, height: f64) -> FieldResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(FieldError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio: 1.0,
            reduced_motion: false,
        })
    }

    /// Sets the device pixel ratio reported by the host.
    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Sets the reduced-motion preference.
    #[must_use]
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Width in CSS pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in CSS pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Effective device pixel ratio, never below 1.
    ///
    /// A missing or garbage ratio (zero, NaN) falls back to 1.
    #[inline]
    #[must_use]
    pub fn dpr(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.max(1.0)
        } else {
            1.0
        }
    }

    /// Whether reduced motion was requested.
    #[inline]
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// CSS area used for density calculations.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Backing-store width in device pixels.
    #[must_use]
    pub fn backing_width(&self) -> f64 {
        (self.width * self.dpr()).floor()
    }

    /// Backing-store height in device pixels.
    #[must_use]
    pub fn backing_height(&self) -> f64 {
        (self.height * self.dpr()).floor()
    }

    /// True when the field should run in its reduced configuration: reduced
    /// motion is requested or the viewport is narrower than `breakpoint`.
    #[must_use]
    pub fn is_compact(&self, breakpoint: f64) -> bool {
        self.reduced_motion || self.width < breakpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_store_scaling() {
        let vp = Viewport::new(1001.0, 500.5)
            .unwrap()
            .with_device_pixel_ratio(1.5);
        assert_eq!(vp.backing_width(), 1501.0);
        assert_eq!(vp.backing_height(), 750.0);
    }

    #[test]
    fn test_dpr_floor() {
        let vp = Viewport::new(100.0, 100.0).unwrap();
        assert_eq!(vp.with_device_pixel_ratio(0.5).dpr(), 1.0);
        assert_eq!(vp.with_device_pixel_ratio(f64::NAN).dpr(), 1.0);
        assert_eq!(vp.with_device_pixel_ratio(2.0).dpr(), 2.0);
    }

    #[test]
    fn test_compact_mode() {
        let wide = Viewport::new(1200.0, 800.0).unwrap();
        assert!(!wide.is_compact(720.0));
        assert!(wide.with_reduced_motion(true).is_compact(720.0));
        assert!(Viewport::new(719.0, 800.0).unwrap().is_compact(720.0));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(Viewport::new(-1.0, 10.0).is_err());
        assert!(Viewport::new(10.0, f64::INFINITY).is_err());
    }
}
