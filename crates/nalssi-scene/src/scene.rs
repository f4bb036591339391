//! The layer stack and the frame-driver entry points.

use nalssi_core::{Conditions, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::color::Rgba;
use crate::layers::{CelestialLayer, CloudLayer, PrecipitationLayer, SkyLayer};
use crate::raster::Raster;

/// The full weather scene: four layers in fixed stack order (sky, sun/moon,
/// clouds, precipitation) plus the RNG that seeds their particle populations.
///
/// The scene never schedules itself. An external frame driver calls
/// [`Scene::advance`] once per display refresh and [`Scene::render`] whenever
/// it wants pixels; one tick therefore spans exactly one refresh interval.
#[derive(Debug)]
pub struct Scene {
    conditions: Conditions,
    viewport: Viewport,
    sky: SkyLayer,
    celestial: CelestialLayer,
    clouds: CloudLayer,
    precipitation: PrecipitationLayer,
    rng: StdRng,
}

impl Scene {
    pub fn new(conditions: Conditions, viewport: Viewport) -> Self {
        Self::with_rng(conditions, viewport, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests and replays.
    pub fn with_rng(conditions: Conditions, viewport: Viewport, mut rng: StdRng) -> Self {
        let conditions = conditions.clamped();
        let sky = SkyLayer::new(viewport, conditions.is_day, conditions.cloud_cover);
        let celestial = CelestialLayer::new(viewport, conditions.cloud_cover, conditions.is_day);
        let clouds = CloudLayer::new(
            viewport,
            conditions.cloud_cover,
            conditions.wind,
            conditions.precip_amount,
            &mut rng,
        );
        let precipitation = PrecipitationLayer::new(
            conditions.precip,
            conditions.precip_amount,
            viewport,
            &mut rng,
        );

        Self {
            conditions,
            viewport,
            sky,
            celestial,
            clouds,
            precipitation,
            rng,
        }
    }

    pub fn conditions(&self) -> Conditions {
        self.conditions
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clouds(&self) -> &CloudLayer {
        &self.clouds
    }

    pub fn precipitation(&self) -> &PrecipitationLayer {
        &self.precipitation
    }

    /// Apply new weather inputs. Each layer diffs the specific fields it
    /// cares about and regenerates only what changed.
    pub fn set_conditions(&mut self, conditions: Conditions) {
        self.conditions = conditions.clamped();
        self.sync_layers();
    }

    /// Apply a new viewport, regenerating every sized layer.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.sync_layers();
    }

    fn sync_layers(&mut self) {
        let c = self.conditions;
        self.sky.update(self.viewport, c.is_day, c.cloud_cover);
        self.celestial.update(self.viewport, c.cloud_cover, c.is_day);
        self.clouds.update(
            self.viewport,
            c.cloud_cover,
            c.wind,
            c.precip_amount,
            &mut self.rng,
        );
        self.precipitation
            .update(c.precip, c.precip_amount, self.viewport, &mut self.rng);
    }

    /// Advance the animated layers by `ticks` display-refresh intervals.
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.clouds.tick();
            self.precipitation.tick(&mut self.rng);
        }
    }

    /// Repaint every layer onto its surface in the frame. Each layer clears
    /// and fully repaints its own raster; a degenerate viewport paints
    /// nothing at all.
    pub fn render(&self, frame: &mut SceneFrame) {
        if self.viewport.is_degenerate() {
            frame.clear();
            return;
        }

        self.sky.render(&mut frame.sky);
        self.celestial.render(&mut frame.celestial);
        self.clouds.render(&mut frame.clouds);
        self.precipitation.render(&mut frame.precipitation);
    }
}

/// One raster per layer, composited per pixel in stack order.
///
/// Layers never share a surface, so a layer repainting itself cannot disturb
/// its neighbors; compositing happens only on read.
#[derive(Debug, Clone)]
pub struct SceneFrame {
    sky: Raster,
    celestial: Raster,
    clouds: Raster,
    precipitation: Raster,
}

impl SceneFrame {
    /// Create a frame of cleared layer rasters.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            sky: Raster::new(width, height),
            celestial: Raster::new(width, height),
            clouds: Raster::new(width, height),
            precipitation: Raster::new(width, height),
        }
    }

    /// Resize every layer raster, discarding pixel content.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.sky.resize(width, height);
        self.celestial.resize(width, height);
        self.clouds.resize(width, height);
        self.precipitation.resize(width, height);
    }

    pub fn width(&self) -> usize {
        self.sky.width()
    }

    pub fn height(&self) -> usize {
        self.sky.height()
    }

    /// Clear every layer raster.
    pub fn clear(&mut self) {
        use crate::surface::Surface;
        self.sky.clear();
        self.celestial.clear();
        self.clouds.clear();
        self.precipitation.clear();
    }

    /// Composite the stack at one pixel over a backdrop color.
    pub fn composite(&self, x: usize, y: usize, backdrop: Rgba) -> Rgba {
        let mut out = backdrop;
        for layer in [&self.sky, &self.celestial, &self.clouds, &self.precipitation] {
            out = layer.pixel(x, y).over(out);
        }
        out
    }
}
