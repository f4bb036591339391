//! Drifting cloud puffs across the upper quarter of the sky.

use nalssi_core::Viewport;
use rand::Rng;

use crate::color::{Rgba, lerp_channel};
use crate::surface::Surface;

/// Puff count at full cover.
const MAX_PUFFS: f32 = 40.0;

/// Floor on the puff radius; the raw size formula can go arbitrarily small.
const MIN_RADIUS: f32 = 20.0;

/// Puff radius upper bound relative to the viewport scale.
const RADIUS_SCALE: f32 = 0.75;

/// Numerator of the size/speed tradeoff: bigger puffs drift slower.
const SPEED_FACTOR: f32 = 75.0;

/// Fixed alpha of the cloud fill.
const FILL_ALPHA: f32 = 0.4;

/// Channel value of a dry (lightest) and a saturated (darkest) cloud.
const DRY_CHANNEL: f32 = 255.0;
const WET_CHANNEL: f32 = 150.0;

/// A single cloud puff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPuff {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Horizontal displacement per tick.
    pub speed: f32,
}

/// Owns and animates the puff population for the current conditions.
#[derive(Debug)]
pub struct CloudLayer {
    cover: f32,
    wind: f32,
    precip_amount: f32,
    viewport: Viewport,
    fill: Rgba,
    puffs: Vec<CloudPuff>,
}

impl CloudLayer {
    pub fn new(
        viewport: Viewport,
        cover: f32,
        wind: f32,
        precip_amount: f32,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            cover,
            wind,
            precip_amount,
            viewport,
            fill: fill_color(precip_amount),
            puffs: spawn_puffs(viewport, cover, wind, rng),
        }
    }

    pub fn puffs(&self) -> &[CloudPuff] {
        &self.puffs
    }

    pub fn fill(&self) -> Rgba {
        self.fill
    }

    /// Apply new inputs. The fill color is rederived only when the
    /// precipitation amount changes; the puff population is replaced
    /// wholesale when the viewport, cover or wind changes.
    pub fn update(
        &mut self,
        viewport: Viewport,
        cover: f32,
        wind: f32,
        precip_amount: f32,
        rng: &mut impl Rng,
    ) {
        if precip_amount != self.precip_amount {
            self.fill = fill_color(precip_amount);
            self.precip_amount = precip_amount;
        }

        let changed = viewport != self.viewport || cover != self.cover || wind != self.wind;
        self.viewport = viewport;
        self.cover = cover;
        self.wind = wind;
        if changed {
            self.puffs = spawn_puffs(viewport, cover, wind, rng);
        }
    }

    /// Drift every puff one tick to the right. Still air when there is no
    /// wind.
    ///
    /// A puff that clears the right edge wraps to the far left of the
    /// double-width spawn band, so the apparent population never dips.
    pub fn tick(&mut self) {
        if self.wind == 0.0 {
            return;
        }

        let width = self.viewport.width;
        for puff in &mut self.puffs {
            puff.x += puff.speed;
            if puff.x > width + puff.radius {
                puff.x = -(width + puff.radius);
            }
        }
    }

    /// Clear and repaint every puff as a filled circle.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for puff in &self.puffs {
            surface.fill_circle((puff.x, puff.y), puff.radius, self.fill);
        }
    }
}

/// Cloud fill darkens linearly with precipitation amount: 255 when dry, 150
/// under a downpour.
fn fill_color(precip_amount: f32) -> Rgba {
    let channel = lerp_channel(DRY_CHANNEL, WET_CHANNEL, precip_amount);
    Rgba::new(channel, channel, channel, FILL_ALPHA)
}

/// Generate a fresh puff population.
///
/// Puffs spawn across a double-width band `[-w, w)` so the frame is already
/// populated at start and keeps replenishing from the left. They sit in the
/// upper quarter, lifted by their own radius so large puffs are not clipped.
fn spawn_puffs(viewport: Viewport, cover: f32, wind: f32, rng: &mut impl Rng) -> Vec<CloudPuff> {
    if viewport.is_degenerate() {
        return Vec::new();
    }

    let count = (MAX_PUFFS * cover) as usize;
    (0..count)
        .map(|_| {
            let radius = (rng.random::<f32>() * viewport.scale() * RADIUS_SCALE).max(MIN_RADIUS);
            CloudPuff {
                x: -viewport.width + rng.random::<f32>() * viewport.width * 2.0,
                y: rng.random::<f32>() * viewport.height / 4.0 - radius,
                radius,
                speed: SPEED_FACTOR / radius * wind,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_puff_count_scales_with_cover() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(CloudLayer::new(vp, 1.0, 0.5, 0.0, &mut rng()).puffs().len(), 40);
        assert_eq!(CloudLayer::new(vp, 0.5, 0.5, 0.0, &mut rng()).puffs().len(), 20);
        assert!(CloudLayer::new(vp, 0.0, 0.5, 0.0, &mut rng()).puffs().is_empty());
    }

    #[test]
    fn test_radius_floor_is_enforced() {
        // A tiny viewport makes the raw radius formula land below the floor
        let vp = Viewport::new(10.0, 10.0);
        let layer = CloudLayer::new(vp, 1.0, 0.5, 0.0, &mut rng());
        for puff in layer.puffs() {
            assert!(puff.radius >= MIN_RADIUS);
        }
    }

    #[test]
    fn test_puffs_spawn_in_band_and_upper_quarter() {
        let vp = Viewport::new(800.0, 600.0);
        let layer = CloudLayer::new(vp, 1.0, 1.0, 0.0, &mut rng());
        for puff in layer.puffs() {
            assert!((-vp.width..vp.width).contains(&puff.x));
            assert!(puff.y >= -puff.radius);
            assert!(puff.y < vp.height / 4.0 - puff.radius + 0.001);
        }
    }

    #[test]
    fn test_speed_inverse_to_radius() {
        let vp = Viewport::new(800.0, 600.0);
        let layer = CloudLayer::new(vp, 1.0, 0.5, 0.0, &mut rng());
        for puff in layer.puffs() {
            assert!((puff.speed - SPEED_FACTOR / puff.radius * 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_wrap_preserves_band_invariant() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = CloudLayer::new(vp, 1.0, 1.0, 0.0, &mut rng());
        let radius = layer.puffs[0].radius;
        layer.puffs[0].x = vp.width + radius; // At the invariant boundary
        layer.puffs[0].speed = 5.0;

        layer.tick();
        assert_eq!(layer.puffs[0].x, -(vp.width + radius));

        for puff in layer.puffs() {
            assert!(puff.x <= vp.width + puff.radius);
        }
    }

    #[test]
    fn test_no_wind_means_no_motion() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = CloudLayer::new(vp, 1.0, 0.0, 0.0, &mut rng());
        let before = layer.puffs().to_vec();
        layer.tick();
        assert_eq!(layer.puffs(), before.as_slice());
    }

    #[test]
    fn test_fill_color_endpoints() {
        let dry = fill_color(0.0);
        assert_eq!((dry.r, dry.g, dry.b, dry.a), (255, 255, 255, FILL_ALPHA));

        let wet = fill_color(1.0);
        assert_eq!((wet.r, wet.g, wet.b), (150, 150, 150));
    }

    #[test]
    fn test_fill_rederived_only_on_precip_change() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = CloudLayer::new(vp, 1.0, 0.5, 0.0, &mut rng());
        let puffs_before = layer.puffs().to_vec();

        // Precip change recolors but keeps the population
        layer.update(vp, 1.0, 0.5, 1.0, &mut rng());
        assert_eq!(layer.fill().r, 150);
        assert_eq!(layer.puffs(), puffs_before.as_slice());

        // Wind change regenerates the population
        layer.update(vp, 1.0, 1.0, 1.0, &mut rng());
        assert_ne!(layer.puffs(), puffs_before.as_slice());
    }
}
