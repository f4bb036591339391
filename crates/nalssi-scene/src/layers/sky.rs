//! The sky gradient behind every other layer.
//!
//! A static layer: the color is a pure function of day/night and cloud cover,
//! and the gradient is repainted only when those inputs or the viewport
//! change.

use nalssi_core::Viewport;

use crate::color::{Rgba, lerp_channel};
use crate::surface::Surface;

/// Clear daytime sky.
const DAY_RGB: (f32, f32, f32) = (43.0, 170.0, 255.0);

/// Clear nighttime sky.
const NIGHT_RGB: (f32, f32, f32) = (26.0, 26.0, 102.0);

/// Channel value every component converges to under full cloud cover.
const OVERCAST_CHANNEL: f32 = 61.0;

/// Derive the base sky color: a day or night blue pulled toward neutral gray
/// by cloud cover. Pure function of its inputs.
pub fn sky_color(is_day: bool, cloud_cover: f32) -> Rgba {
    let (r, g, b) = if is_day { DAY_RGB } else { NIGHT_RGB };
    Rgba::opaque(
        lerp_channel(r, OVERCAST_CHANNEL, cloud_cover),
        lerp_channel(g, OVERCAST_CHANNEL, cloud_cover),
        lerp_channel(b, OVERCAST_CHANNEL, cloud_cover),
    )
}

/// Static layer painting the vertical sky gradient.
#[derive(Debug)]
pub struct SkyLayer {
    viewport: Viewport,
    is_day: bool,
    cloud_cover: f32,
    color: Rgba,
}

impl SkyLayer {
    pub fn new(viewport: Viewport, is_day: bool, cloud_cover: f32) -> Self {
        Self {
            viewport,
            is_day,
            cloud_cover,
            color: sky_color(is_day, cloud_cover),
        }
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Rederive the color when any defining input changes.
    pub fn update(&mut self, viewport: Viewport, is_day: bool, cloud_cover: f32) {
        self.viewport = viewport;
        if is_day != self.is_day || cloud_cover != self.cloud_cover {
            self.is_day = is_day;
            self.cloud_cover = cloud_cover;
            self.color = sky_color(is_day, cloud_cover);
        }
    }

    /// Clear and repaint the gradient: the sky color at the top, fading to
    /// fully transparent at twice the viewport height so only the upper half
    /// of the fade is visible.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.fill_gradient(
            (self.viewport.width, self.viewport.height),
            self.color,
            self.viewport.height * 2.0,
        );
    }
}
