//! Falling precipitation: streaks of rain, snow or sleet.

use nalssi_core::{PrecipKind, Viewport};
use rand::Rng;

use crate::color::Rgba;
use crate::surface::{Stroke, Surface};

/// Hard cap on the droplet population.
const MAX_DROPS: usize = 1000;

/// Respawn height above the viewport, so wrapped drops fall back into view
/// instead of popping in at the bottom.
const RESPAWN_Y: f32 = -20.0;

/// Style and dynamics constants for one precipitation kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipProfile {
    /// Stroke color of each droplet streak.
    pub color: Rgba,
    /// Stroke width of each droplet streak.
    pub stroke_width: f32,
    /// Bound on the zero-centered horizontal jitter per tick.
    pub drift: f32,
    /// Base vertical displacement per tick; actual fall is in [fall, 2·fall).
    pub fall: f32,
    /// Upper bound of the random streak-length multiplier.
    pub streak: f32,
}

impl PrecipProfile {
    /// The fixed profile for a precipitation kind. Pure: the same kind always
    /// yields the same tuple.
    pub fn for_kind(kind: PrecipKind) -> Self {
        match kind {
            PrecipKind::Rain => Self {
                color: Rgba::new(174, 194, 224, 0.6),
                stroke_width: 1.0,
                drift: 1.0,
                fall: 8.0,
                streak: 2.0,
            },
            PrecipKind::Snow => Self {
                color: Rgba::new(255, 255, 255, 0.6),
                stroke_width: 3.0,
                drift: 2.0,
                fall: 1.0,
                streak: 0.0,
            },
            PrecipKind::Sleet => Self {
                color: Rgba::new(190, 200, 224, 0.6),
                stroke_width: 2.0,
                drift: 2.0,
                fall: 4.0,
                streak: 1.0,
            },
        }
    }
}

/// A single falling droplet streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    /// Origin of the streak.
    pub x: f32,
    pub y: f32,
    /// Streak-length multiplier applied to the per-tick displacement.
    pub len: f32,
    /// Horizontal displacement per tick.
    pub vx: f32,
    /// Vertical displacement per tick, always downward.
    pub vy: f32,
}

/// Owns and animates the droplet population for the current conditions.
#[derive(Debug)]
pub struct PrecipitationLayer {
    kind: PrecipKind,
    amount: f32,
    viewport: Viewport,
    profile: PrecipProfile,
    drops: Vec<Raindrop>,
}

impl PrecipitationLayer {
    pub fn new(kind: PrecipKind, amount: f32, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let profile = PrecipProfile::for_kind(kind);
        Self {
            kind,
            amount,
            viewport,
            profile,
            drops: spawn_drops(viewport, amount, profile, rng),
        }
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn profile(&self) -> PrecipProfile {
        self.profile
    }

    /// Apply new inputs. The profile is rederived only when the kind changes;
    /// the droplet population is replaced wholesale when any of the fields
    /// that shape it (viewport, amount, kind) changes.
    pub fn update(
        &mut self,
        kind: PrecipKind,
        amount: f32,
        viewport: Viewport,
        rng: &mut impl Rng,
    ) {
        let changed = kind != self.kind || amount != self.amount || viewport != self.viewport;

        if kind != self.kind {
            self.profile = PrecipProfile::for_kind(kind);
        }
        self.kind = kind;
        self.amount = amount;
        self.viewport = viewport;

        if changed {
            self.drops = spawn_drops(viewport, amount, self.profile, rng);
        }
    }

    /// Advance every droplet one tick. Still air when nothing is falling.
    ///
    /// Drops that leave the viewport respawn at a fresh horizontal position
    /// just above the visible area.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.amount == 0.0 {
            return;
        }

        let Viewport { width, height } = self.viewport;
        for drop in &mut self.drops {
            drop.x += drop.vx;
            drop.y += drop.vy;
            if drop.x > width || drop.y > height {
                drop.x = rng.random::<f32>() * width;
                drop.y = RESPAWN_Y;
            }
        }
    }

    /// Clear and repaint every droplet as a round-capped streak.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();

        let stroke = Stroke {
            color: self.profile.color,
            width: self.profile.stroke_width,
        };
        for drop in &self.drops {
            let end = (drop.x + drop.len * drop.vx, drop.y + drop.len * drop.vy);
            surface.stroke_line((drop.x, drop.y), end, stroke);
        }
    }
}

/// Generate a fresh droplet population for the given inputs.
///
/// The count scales with the viewport's geometric-mean size and the amount,
/// capped at [`MAX_DROPS`].
fn spawn_drops(
    viewport: Viewport,
    amount: f32,
    profile: PrecipProfile,
    rng: &mut impl Rng,
) -> Vec<Raindrop> {
    if viewport.is_degenerate() {
        return Vec::new();
    }

    let count = (viewport.scale() * amount).min(MAX_DROPS as f32) as usize;
    (0..count)
        .map(|_| Raindrop {
            x: rng.random::<f32>() * viewport.width,
            y: rng.random::<f32>() * viewport.height,
            len: rng.random::<f32>() * profile.streak,
            vx: -profile.drift + rng.random::<f32>() * profile.drift + profile.drift / 2.0,
            vy: rng.random::<f32>() * profile.fall + profile.fall,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_profile_is_pure_and_matches_table() {
        let rain = PrecipProfile::for_kind(PrecipKind::Rain);
        assert_eq!(rain, PrecipProfile::for_kind(PrecipKind::Rain));
        assert_eq!(rain.color, Rgba::new(174, 194, 224, 0.6));
        assert_eq!(
            (rain.stroke_width, rain.drift, rain.fall, rain.streak),
            (1.0, 1.0, 8.0, 2.0)
        );

        let snow = PrecipProfile::for_kind(PrecipKind::Snow);
        assert_eq!(
            (snow.stroke_width, snow.drift, snow.fall, snow.streak),
            (3.0, 2.0, 1.0, 0.0)
        );

        let sleet = PrecipProfile::for_kind(PrecipKind::Sleet);
        assert_eq!(
            (sleet.stroke_width, sleet.drift, sleet.fall, sleet.streak),
            (2.0, 2.0, 4.0, 1.0)
        );
    }

    #[test]
    fn test_drop_count_formula() {
        let vp = Viewport::new(800.0, 600.0);
        let layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, vp, &mut rng());
        // floor(min(1000, sqrt(800 * 600))) = floor(692.82)
        assert_eq!(layer.drops().len(), 692);
    }

    #[test]
    fn test_drop_count_caps_at_thousand() {
        let vp = Viewport::new(2000.0, 2000.0);
        let layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, vp, &mut rng());
        assert_eq!(layer.drops().len(), 1000);
    }

    #[test]
    fn test_no_drops_when_dry_or_degenerate() {
        let vp = Viewport::new(800.0, 600.0);
        let dry = PrecipitationLayer::new(PrecipKind::Rain, 0.0, vp, &mut rng());
        assert!(dry.drops().is_empty());

        let flat = Viewport::new(800.0, 0.0);
        let layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, flat, &mut rng());
        assert!(layer.drops().is_empty());
    }

    #[test]
    fn test_spawned_drops_are_in_range() {
        let vp = Viewport::new(800.0, 600.0);
        let layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, vp, &mut rng());
        let profile = layer.profile();

        for drop in layer.drops() {
            assert!((0.0..vp.width).contains(&drop.x));
            assert!((0.0..vp.height).contains(&drop.y));
            assert!((0.0..profile.streak).contains(&drop.len) || profile.streak == 0.0);
            // vx is zero-centered jitter bounded by +-drift/2
            assert!(drop.vx >= -profile.drift / 2.0 && drop.vx < profile.drift / 2.0 + 0.001);
            // vy is always downward, in [fall, 2*fall)
            assert!(drop.vy >= profile.fall && drop.vy < 2.0 * profile.fall);
        }
    }

    #[test]
    fn test_tick_moves_drops_by_velocity() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, vp, &mut rng());
        layer.drops[0] = Raindrop {
            x: 100.0,
            y: 100.0,
            len: 1.0,
            vx: 0.25,
            vy: 9.0,
        };
        layer.tick(&mut rng());
        assert_eq!(layer.drops[0].x, 100.25);
        assert_eq!(layer.drops[0].y, 109.0);
    }

    #[test]
    fn test_offscreen_drop_respawns_above_viewport() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, vp, &mut rng());
        layer.drops[0].y = 599.5;
        layer.drops[0].vy = 10.0;
        layer.tick(&mut rng());

        let drop = layer.drops[0];
        assert_eq!(drop.y, RESPAWN_Y);
        assert!((0.0..vp.width).contains(&drop.x));
    }

    #[test]
    fn test_tick_is_a_no_op_when_dry() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = PrecipitationLayer::new(PrecipKind::Rain, 1.0, vp, &mut rng());
        layer.update(PrecipKind::Rain, 0.0, vp, &mut rng());
        assert!(layer.drops().is_empty());
        layer.tick(&mut rng()); // Must not panic or spawn anything
        assert!(layer.drops().is_empty());
    }

    #[test]
    fn test_update_regenerates_only_on_field_change() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = PrecipitationLayer::new(PrecipKind::Rain, 0.5, vp, &mut rng());
        let before = layer.drops().to_vec();

        // Identical inputs keep the exact same population
        layer.update(PrecipKind::Rain, 0.5, vp, &mut rng());
        assert_eq!(layer.drops(), before.as_slice());

        // An amount change replaces it wholesale
        layer.update(PrecipKind::Rain, 1.0, vp, &mut rng());
        assert_ne!(layer.drops().len(), before.len());
    }

    #[test]
    fn test_kind_change_swaps_profile() {
        let vp = Viewport::new(800.0, 600.0);
        let mut layer = PrecipitationLayer::new(PrecipKind::Rain, 0.5, vp, &mut rng());
        layer.update(PrecipKind::Snow, 0.5, vp, &mut rng());
        assert_eq!(layer.profile(), PrecipProfile::for_kind(PrecipKind::Snow));
        for drop in layer.drops() {
            assert!(drop.vy >= 1.0 && drop.vy < 2.0);
        }
    }
}
