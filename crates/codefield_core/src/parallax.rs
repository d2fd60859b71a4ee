//! DOM layer parallax.
//!
//! Decorative page layers follow the pointer with an eased lag and sink
//! slightly with scroll. Each layer's depth comes from its class list.

use crate::config::ParallaxConfig;
use crate::pointer::PointerState;

/// Kind of a parallax layer, read from its CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// `layer-grid`
    Grid,
    /// `layer-circuits`
    Circuits,
    /// `layer-dust`
    Dust,
    /// Any other `.parallax-layer`.
    Other,
}

impl LayerKind {
    /// Classifies a whitespace separated class list. The first matching
    /// class in grid, circuits, dust order wins.
    #[must_use]
    pub fn from_class_list(classes: &str) -> Self {
        let has = |name: &str| classes.split_whitespace().any(|c| c == name);
        if has("layer-grid") {
            Self::Grid
        } else if has("layer-circuits") {
            Self::Circuits
        } else if has("layer-dust") {
            Self::Dust
        } else {
            Self::Other
        }
    }

    /// Depth of this kind under `config`.
    #[must_use]
    pub fn depth(self, config: &ParallaxConfig) -> f64 {
        match self {
            Self::Grid => config.grid_depth,
            Self::Circuits => config.circuits_depth,
            Self::Dust => config.dust_depth,
            Self::Other => config.default_depth,
        }
    }
}

/// Translation of one layer for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerOffset {
    /// Horizontal translation, CSS px.
    pub x: f64,
    /// Vertical translation, CSS px.
    pub y: f64,
}

impl LayerOffset {
    /// CSS transform value.
    #[must_use]
    pub fn to_css_transform(self) -> String {
        format!("translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// Eased pointer state plus the depth of every layer.
#[derive(Debug, Clone)]
pub struct ParallaxLayers {
    config: ParallaxConfig,
    depths: Vec<f64>,
    target: PointerState,
    /// Eased pointer.
    eased: PointerState,
    scroll_y: f64,
}

impl ParallaxLayers {
    /// Creates the state for `layers`, in document order.
    #[must_use]
    pub fn new(config: ParallaxConfig, layers: &[LayerKind]) -> Self {
        let depths = layers.iter().map(|kind| kind.depth(&config)).collect();
        Self {
            config,
            depths,
            target: PointerState::CENTER,
            eased: PointerState::CENTER,
            scroll_y: 0.0,
        }
    }

    /// No layers: the host should not start a loop.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Sets the pointer target.
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.target = pointer;
    }

    /// Sets the vertical scroll position, CSS px.
    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Eased pointer after the last step.
    #[must_use]
    pub fn eased_pointer(&self) -> PointerState {
        self.eased
    }

    /// Eases toward the target and writes one offset per layer into `out`.
    ///
    /// `out` is resized to the layer count.
    pub fn step(&mut self, viewport_width: f64, out: &mut Vec<LayerOffset>) {
        let k = self.config.smoothing;
        self.eased.nx += (self.target.nx - self.eased.nx) * k;
        self.eased.ny += (self.target.ny - self.eased.ny) * k;

        let base = (viewport_width / self.config.full_strength_width).min(1.0);
        let travel = self.config.pointer_travel;

        out.clear();
        out.extend(self.depths.iter().map(|depth| {
            let d = depth * base;
            LayerOffset {
                x: self.eased.nx * d * travel,
                y: self.eased.ny * d * travel + self.scroll_y * d * self.config.scroll_factor,
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_classification() {
        assert_eq!(LayerKind::from_class_list("parallax-layer layer-grid"), LayerKind::Grid);
        assert_eq!(LayerKind::from_class_list("layer-dust parallax-layer"), LayerKind::Dust);
        assert_eq!(LayerKind::from_class_list("layer-circuits"), LayerKind::Circuits);
        assert_eq!(LayerKind::from_class_list("parallax-layer layer-gridlines"), LayerKind::Other);
    }

    #[test]
    fn test_one_offset_per_layer() {
        let kinds = [LayerKind::Grid, LayerKind::Circuits, LayerKind::Dust];
        let mut layers = ParallaxLayers::new(ParallaxConfig::default(), &kinds);
        assert_eq!(layers.len(), 3);
        assert!(!layers.is_empty());

        let mut out = vec![LayerOffset::default(); 7];
        layers.step(1200.0, &mut out);
        assert_eq!(out.len(), layers.len());

        assert!(ParallaxLayers::new(ParallaxConfig::default(), &[]).is_empty());
    }

    #[test]
    fn test_scroll_offset_without_pointer() {
        let mut layers = ParallaxLayers::new(ParallaxConfig::default(), &[LayerKind::Dust]);
        layers.set_scroll(1000.0);
        let mut out = Vec::new();
        layers.step(1200.0, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].x, 0.0);
        assert!((out[0].y - 1000.0 * 0.12 * 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_viewport_weakens_parallax() {
        let mut wide = ParallaxLayers::new(ParallaxConfig::default(), &[LayerKind::Grid]);
        let mut narrow = wide.clone();
        let pointer = PointerState { nx: 0.5, ny: 0.0 };
        wide.set_pointer(pointer);
        narrow.set_pointer(pointer);

        let (mut a, mut b) = (Vec::new(), Vec::new());
        wide.step(2400.0, &mut a);
        narrow.step(600.0, &mut b);
        assert!((b[0].x * 2.0 - a[0].x).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_easing_lags() {
        let mut layers = ParallaxLayers::new(ParallaxConfig::default(), &[LayerKind::Other]);
        layers.set_pointer(PointerState { nx: 0.5, ny: -0.5 });
        let mut out = Vec::new();
        layers.step(1200.0, &mut out);
        assert!((layers.eased_pointer().nx - 0.04).abs() < 1e-12);
        for _ in 0..500 {
            layers.step(1200.0, &mut out);
        }
        assert!((layers.eased_pointer().nx - 0.5).abs() < 1e-6);
        assert!((out[0].x - 0.5 * 0.05 * 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_css_transform() {
        let offset = LayerOffset { x: 1.5, y: -2.0 };
        assert_eq!(offset.to_css_transform(), "translate3d(1.5px, -2px, 0)");
    }
}
