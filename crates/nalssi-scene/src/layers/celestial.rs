//! The sun or moon, sinking behind the cloud deck as cover grows.
//!
//! A static layer: nothing here animates, the body is rederived only when the
//! viewport, cloud cover or day/night flag changes.

use nalssi_core::Viewport;

use crate::color::Rgba;
use crate::surface::Surface;

/// Body radius relative to the viewport scale.
const RADIUS_SCALE: f32 = 0.15;

/// Sun body and glow (gold).
const SUN_FILL: Rgba = Rgba::opaque(255, 187, 0);
const SUN_GLOW: Rgba = Rgba::opaque(255, 165, 0);

/// Moon body and glow (pale blue).
const MOON_FILL: Rgba = Rgba::opaque(227, 229, 249);
const MOON_GLOW: Rgba = Rgba::opaque(201, 206, 255);

/// How far the glow reaches past the body edge.
const GLOW_REACH: f32 = 50.0;

/// Rings used to approximate the blurred glow.
const GLOW_RINGS: u32 = 8;

/// Decorative specs trailing diagonally away from the body.
const SPEC_COUNT: u32 = 4;
const SPEC_FILL: Rgba = Rgba::new(255, 255, 255, 0.05);

/// Position and size of the sun or moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl CelestialBody {
    /// Derive the body from the viewport and cloud cover. The body sits near
    /// the top-right corner and sinks behind the cloud deck as cover grows.
    pub fn derive(viewport: Viewport, cloud_cover: f32) -> Self {
        let radius = viewport.scale() * RADIUS_SCALE;
        Self {
            x: viewport.width - 1.3 * radius,
            y: 1.3 * radius - 2.0 * radius * cloud_cover,
            radius,
        }
    }
}

/// Static layer painting the sun or moon with a glow and spec trail.
#[derive(Debug)]
pub struct CelestialLayer {
    viewport: Viewport,
    cloud_cover: f32,
    is_day: bool,
    body: CelestialBody,
}

impl CelestialLayer {
    pub fn new(viewport: Viewport, cloud_cover: f32, is_day: bool) -> Self {
        Self {
            viewport,
            cloud_cover,
            is_day,
            body: CelestialBody::derive(viewport, cloud_cover),
        }
    }

    pub fn body(&self) -> CelestialBody {
        self.body
    }

    /// Rederive the body when any defining input changes.
    pub fn update(&mut self, viewport: Viewport, cloud_cover: f32, is_day: bool) {
        if viewport != self.viewport || cloud_cover != self.cloud_cover || is_day != self.is_day {
            self.viewport = viewport;
            self.cloud_cover = cloud_cover;
            self.is_day = is_day;
            self.body = CelestialBody::derive(viewport, cloud_cover);
        }
    }

    /// Clear and repaint the body, its glow and the spec trail.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();

        let (fill, glow) = if self.is_day {
            (SUN_FILL, SUN_GLOW)
        } else {
            (MOON_FILL, MOON_GLOW)
        };
        let CelestialBody { x, y, radius } = self.body;

        // Stacked translucent rings stand in for a blurred shadow: the
        // outermost is faintest, and the overlap brightens toward the body.
        for ring in 1..=GLOW_RINGS {
            let t = ring as f32 / GLOW_RINGS as f32;
            let alpha = 0.1 * (1.0 - t) + 0.02;
            surface.fill_circle((x, y), radius + GLOW_REACH * t, glow.with_alpha(alpha));
        }

        surface.fill_circle((x, y), radius, fill);

        // Each spec is derived from the previous: half the radius, offset
        // down-and-left by two thirds of it.
        let (mut sx, mut sy, mut sr) = (x, y, radius);
        for _ in 0..SPEC_COUNT {
            sx -= sr / 1.5;
            sy += sr / 1.5;
            sr /= 2.0;
            surface.fill_circle((sx, sy), sr, SPEC_FILL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_derivation() {
        let vp = Viewport::new(800.0, 600.0);
        let body = CelestialBody::derive(vp, 0.0);
        let radius = vp.scale() * RADIUS_SCALE;
        assert!((body.radius - radius).abs() < 1e-3);
        assert!((body.x - (vp.width - 1.3 * radius)).abs() < 1e-3);
        assert!((body.y - 1.3 * radius).abs() < 1e-3);
    }

    #[test]
    fn test_body_sinks_with_cover() {
        let vp = Viewport::new(800.0, 600.0);
        let clear = CelestialBody::derive(vp, 0.0);
        let overcast = CelestialBody::derive(vp, 1.0);
        assert!(overcast.y < clear.y);
        // Fully covered, the body has sunk below its clear-sky position by a
        // full diameter
        assert!((clear.y - overcast.y - 2.0 * clear.radius).abs() < 1e-3);
    }

    #[test]
    fn test_update_rederives_only_on_change() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = CelestialLayer::new(vp, 0.5, true);
        let before = layer.body();

        layer.update(vp, 0.5, true);
        assert_eq!(layer.body(), before);

        layer.update(vp, 1.0, true);
        assert_ne!(layer.body(), before);
    }
}
