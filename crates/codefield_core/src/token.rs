//! A single drifting code token.
//!
//! Positions are device pixels. Depth `z` is in `[0, 1)`: 0 is the nearest,
//! largest and most pointer-reactive token, 1 the farthest.

use std::f64::consts::TAU;

use rand::Rng;

use crate::pointer::PointerState;

/// Fixed part of the per-frame twinkle advance.
pub const TWINKLE_STEP: f64 = 0.008;
/// Random part of the per-frame twinkle advance.
pub const TWINKLE_JITTER: f64 = 0.006;

/// Everything needed to spawn one generation of tokens.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    /// Backing-store width.
    pub width: f64,
    /// Backing-store height.
    pub height: f64,
    /// Effective device pixel ratio.
    pub dpr: f64,
    /// Velocity scale.
    pub speed_base: f64,
    /// Number of labels to pick from.
    pub vocabulary_len: usize,
    /// Size clamp, before device scaling.
    pub min_size: f64,
    /// Size clamp, before device scaling.
    pub max_size: f64,
    /// Field generation the tokens belong to.
    pub generation: u64,
}

/// A labeled particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    /// Smoothed pointer offset.
    mx: f64,
    my: f64,
    /// Index into the field vocabulary.
    label: usize,
    base_alpha: f64,
    /// Twinkle phase, radians.
    twinkle: f64,
    /// Size in device pixels.
    size: f64,
    generation: u64,
}

impl Token {
    /// Samples a token uniformly over the backing store.
    pub fn spawn<R: Rng>(rng: &mut R, params: &SpawnParams) -> Self {
        let z: f64 = rng.gen();
        let angle = rng.gen::<f64>() * TAU;
        let speed = (0.12 + rng.gen::<f64>() * 0.6) * params.speed_base * params.dpr;
        let raw = raw_size(z, rng.gen());
        let size = raw.clamp(params.min_size, params.max_size) * params.dpr;
        let label = if params.vocabulary_len == 0 {
            0
        } else {
            rng.gen_range(0..params.vocabulary_len)
        };

        Self {
            x: rng.gen::<f64>() * params.width,
            y: rng.gen::<f64>() * params.height,
            z,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            mx: 0.0,
            my: 0.0,
            label,
            base_alpha: 0.28 + rng.gen::<f64>() * 0.44,
            twinkle: rng.gen::<f64>() * TAU,
            size,
            generation: params.generation,
        }
    }

    /// Places a token at rest. Used to build exact scenarios.
    #[must_use]
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            vx: 0.0,
            vy: 0.0,
            mx: 0.0,
            my: 0.0,
            label: 0,
            base_alpha: 0.5,
            twinkle: 0.0,
            size: 10.0,
            generation: 0,
        }
    }

    /// Sets the velocity.
    #[must_use]
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Position `(x, y)`.
    #[inline]
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Depth `z`.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Nearness `1 - z`; scales size, reach and drift.
    #[inline]
    #[must_use]
    pub fn nearness(&self) -> f64 {
        1.0 - self.z
    }

    /// Velocity `(vx, vy)`.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    /// Velocity magnitude.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Smoothed pointer offset `(mx, my)`.
    #[inline]
    #[must_use]
    pub fn pointer_offset(&self) -> (f64, f64) {
        (self.mx, self.my)
    }

    /// Vocabulary index of the label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> usize {
        self.label
    }

    /// Base alpha before twinkle.
    #[inline]
    #[must_use]
    pub fn base_alpha(&self) -> f64 {
        self.base_alpha
    }

    /// Twinkle phase.
    #[inline]
    #[must_use]
    pub fn twinkle(&self) -> f64 {
        self.twinkle
    }

    /// Size in device pixels.
    #[inline]
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Field generation this token was spawned in.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances the twinkle phase; `jitter` is a uniform sample in `[0, 1)`.
    #[inline]
    pub fn advance_twinkle(&mut self, jitter: f64) {
        self.twinkle += TWINKLE_STEP + TWINKLE_JITTER * jitter;
    }

    /// Drawing alpha at global frame `frame`, clamped to `[min_alpha, 1]`.
    #[must_use]
    pub fn alpha(&self, frame: u64, min_alpha: f64) -> f64 {
        let oscillation = 0.6 + 0.4 * (self.twinkle + frame as f64 * 0.01).sin();
        (self.base_alpha * oscillation).clamp(min_alpha, 1.0)
    }

    /// Eases the smoothed pointer offset toward the depth-scaled target.
    pub fn ease_toward(&mut self, pointer: PointerState, reach: (f64, f64), smoothing: f64) {
        let near = self.nearness();
        let tx = pointer.nx * reach.0 * near;
        let ty = pointer.ny * reach.1 * near;
        self.mx += (tx - self.mx) * smoothing;
        self.my += (ty - self.my) * smoothing;
    }

    /// Integrates velocity, pointer offset and the constant drift.
    #[inline]
    pub fn integrate(&mut self, drift: f64) {
        self.x += self.vx + self.mx;
        self.y += self.vy + self.my + drift * self.nearness();
    }

    /// Wraps the position toroidally once it leaves `[-margin, extent + margin]`.
    ///
    /// Returns true if either axis wrapped.
    pub fn wrap(&mut self, width: f64, height: f64, margin: f64) -> bool {
        let (x, wrapped_x) = wrap_axis(self.x, width, margin);
        let (y, wrapped_y) = wrap_axis(self.y, height, margin);
        self.x = x;
        self.y = y;
        wrapped_x || wrapped_y
    }

    /// Where the token is drawn on frame `frame`. Adds a small wobble that is
    /// not written back, then folds into `[0, width) x [0, height)`.
    #[must_use]
    pub fn render_position(&self, frame: u64, width: f64, height: f64) -> (f64, f64) {
        let near = self.nearness();
        let t = frame as f64;
        let px = self.x + (self.twinkle * 0.6).sin() * (3.0 + near * 6.0);
        let py = self.y + (self.twinkle * 0.4).cos() * (2.0 + near * 5.0) + t * 0.015 * near;
        (fold(px, width), fold(py, height))
    }
}

/// Unclamped size from depth and a uniform sample.
#[inline]
#[must_use]
pub fn raw_size(z: f64, sample: f64) -> f64 {
    ((1.0 - z) * (5.0 + sample * 6.0)).floor()
}

/// Wraps one coordinate. Inside the margin band nothing changes; past it the
/// coordinate re-enters from the opposite side, `v ∓ (extent + 2·margin)`.
#[must_use]
pub fn wrap_axis(value: f64, extent: f64, margin: f64) -> (f64, bool) {
    if value >= -margin && value <= extent + margin {
        return (value, false);
    }
    let span = extent + 2.0 * margin;
    if span <= 0.0 {
        return (-margin, true);
    }
    (-margin + (value + margin).rem_euclid(span), true)
}

fn fold(value: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        value.rem_euclid(extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params() -> SpawnParams {
        SpawnParams {
            width: 1200.0,
            height: 800.0,
            dpr: 1.0,
            speed_base: 0.06,
            vocabulary_len: 44,
            min_size: 7.0,
            max_size: 14.0,
            generation: 3,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let token = Token::spawn(&mut rng, &params());
            let (x, y) = token.position();
            assert!((0.0..1200.0).contains(&x));
            assert!((0.0..800.0).contains(&y));
            assert!((0.0..1.0).contains(&token.z()));
            assert!((7.0..=14.0).contains(&token.size()));
            assert!((0.28..0.72).contains(&token.base_alpha()));
            assert!(token.label() < 44);
            assert_eq!(token.generation(), 3);
            let speed = token.speed();
            assert!(speed >= 0.12 * 0.06 - 1e-12 && speed <= 0.72 * 0.06 + 1e-12);
        }
    }

    #[test]
    fn test_wrap_exact_formula() {
        let width = 1200.0;
        let mut token = Token::at(width + 50.0, 100.0, 0.5);
        assert!(token.wrap(width, 800.0, 40.0));
        assert_eq!(token.position().0, width + 50.0 - (width + 80.0));
        assert_eq!(token.position().0, -30.0);

        let mut token = Token::at(-45.0, 100.0, 0.5);
        assert!(token.wrap(width, 800.0, 40.0));
        assert_eq!(token.position().0, -45.0 + width + 80.0);
    }

    #[test]
    fn test_wrap_leaves_band_untouched() {
        let mut token = Token::at(1240.0, -40.0, 0.5);
        assert!(!token.wrap(1200.0, 800.0, 40.0));
        assert_eq!(token.position(), (1240.0, -40.0));
    }

    #[test]
    fn test_alpha_clamped() {
        let mut token = Token::at(0.0, 0.0, 0.0);
        for frame in 0..2000 {
            token.advance_twinkle(0.5);
            let alpha = token.alpha(frame, 0.05);
            assert!((0.05..=1.0).contains(&alpha));
        }
    }

    #[test]
    fn test_render_position_folds() {
        let token = Token::at(-30.0, 830.0, 0.2);
        let (px, py) = token.render_position(10_000, 1200.0, 800.0);
        assert!((0.0..1200.0).contains(&px));
        assert!((0.0..800.0).contains(&py));
        // The wobble never persists.
        assert_eq!(token.position(), (-30.0, 830.0));
    }
}
