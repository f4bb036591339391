//! Color utilities for the weather layers.

/// An RGBA color with 8-bit channels and a unit-interval alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black, the cleared state of every surface.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// The same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Source-over composite of `self` on top of `below`.
    pub fn over(self, below: Rgba) -> Rgba {
        let a = self.a + below.a * (1.0 - self.a);
        if a <= f32::EPSILON {
            return Rgba::TRANSPARENT;
        }

        let blend = |top: u8, bottom: u8| -> u8 {
            let top = f32::from(top) * self.a;
            let bottom = f32::from(bottom) * below.a * (1.0 - self.a);
            ((top + bottom) / a).round() as u8
        };

        Rgba {
            r: blend(self.r, below.r),
            g: blend(self.g, below.g),
            b: blend(self.b, below.b),
            a,
        }
    }
}

/// Linear interpolation from `from` to `to` by `t` in [0, 1].
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Interpolate a single 8-bit channel.
pub fn lerp_channel(from: f32, to: f32, t: f32) -> u8 {
    lerp(from, to, t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(255.0, 150.0, 0.0), 255.0);
        assert_eq!(lerp(255.0, 150.0, 1.0), 150.0);
        assert_eq!(lerp_channel(255.0, 150.0, 0.5), 203);
    }

    #[test]
    fn test_over_opaque_top_wins() {
        let top = Rgba::opaque(10, 20, 30);
        let below = Rgba::opaque(200, 200, 200);
        assert_eq!(top.over(below), top);
    }

    #[test]
    fn test_over_transparent_top_is_identity() {
        let below = Rgba::opaque(200, 100, 50);
        assert_eq!(Rgba::TRANSPARENT.over(below), below);
    }

    #[test]
    fn test_over_half_alpha_mixes() {
        let top = Rgba::new(255, 255, 255, 0.5);
        let below = Rgba::opaque(0, 0, 0);
        let out = top.over(below);
        assert_eq!(out.a, 1.0);
        assert_eq!((out.r, out.g, out.b), (128, 128, 128));
    }

    #[test]
    fn test_over_both_transparent() {
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::TRANSPARENT), Rgba::TRANSPARENT);
    }
}
