//! The immediate-mode drawing contract shared by all weather layers.

use crate::color::Rgba;

/// Stroke style for line painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// A 2D immediate-mode drawing target.
///
/// Layers clear and fully repaint a surface on every render, so a backend
/// only needs these four operations; there is no dirty-rect tracking and no
/// retained style state. Style is passed explicitly with every call.
pub trait Surface {
    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Stroke a round-capped line segment.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);

    /// Fill a circle centered at `center`.
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba);

    /// Paint a vertical linear gradient over `size = (width, height)`:
    /// `top` at y = 0, fading to fully transparent at `fade_to_y`.
    fn fill_gradient(&mut self, size: (f32, f32), top: Rgba, fade_to_y: f32);
}
