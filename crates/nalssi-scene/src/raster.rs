//! Software raster backend for the [`Surface`] trait.
//!
//! A plain RGBA pixel buffer with source-over blending. Pixel centers sit at
//! half-integer coordinates; coverage tests are hard-edged, which is plenty at
//! the cell resolutions the terminal blitter works with.

use crate::color::Rgba;
use crate::surface::{Stroke, Surface};

/// An owned RGBA pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Raster {
    /// Create a cleared raster of the given pixel dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width * height],
        }
    }

    /// Resize the buffer, discarding all pixel content.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgba::TRANSPARENT);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read one pixel; out-of-range coordinates read as transparent.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Rgba::TRANSPARENT
        }
    }

    /// Blend `color` over the pixel at `(x, y)`, ignoring out-of-range writes.
    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = color.over(self.pixels[idx]);
    }

    /// Blend `color` into every pixel whose center lies within `radius` of
    /// `center`, visiting each pixel at most once.
    fn blend_disc(&mut self, center: (f32, f32), radius: f32, color: Rgba) {
        let (cx, cy) = center;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        let r2 = radius * radius;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5) - cx;
                let dy = (y as f32 + 0.5) - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

/// Squared distance from point `p` to the segment `a`..`b`.
fn dist_sq_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (px, py) = p;
    let (ax, ay) = a;
    let (bx, by) = b;
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let (nx, ny) = (ax + t * dx, ay + t * dy);
    let (ex, ey) = (px - nx, py - ny);
    ex * ex + ey * ey
}

impl Surface for Raster {
    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        // Half-width coverage with a floor of half a pixel keeps hairline
        // strokes visible. The caps fall out round for free.
        let half = (stroke.width / 2.0).max(0.5);
        let x0 = (from.0.min(to.0) - half).floor() as i64;
        let x1 = (from.0.max(to.0) + half).ceil() as i64;
        let y0 = (from.1.min(to.1) - half).floor() as i64;
        let y1 = (from.1.max(to.1) + half).ceil() as i64;
        let half_sq = half * half;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if dist_sq_to_segment(p, from, to) <= half_sq {
                    self.blend(x, y, stroke.color);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba) {
        self.blend_disc(center, radius, color);
    }

    fn fill_gradient(&mut self, size: (f32, f32), top: Rgba, fade_to_y: f32) {
        let (width, height) = size;
        let cols = (width.ceil() as usize).min(self.width);
        let rows = (height.ceil() as usize).min(self.height);

        for y in 0..rows {
            let t = if fade_to_y > 0.0 {
                (1.0 - (y as f32 + 0.5) / fade_to_y).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let row_color = top.with_alpha(top.a * t);
            for x in 0..cols {
                let idx = y * self.width + x;
                self.pixels[idx] = row_color.over(self.pixels[idx]);
            }
        }
    }
}
