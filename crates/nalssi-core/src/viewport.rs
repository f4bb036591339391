//! Viewport dimensions supplied by the host's resize observer.

/// The drawable area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport from pixel dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero or unset; nothing should be painted
    /// into a degenerate viewport.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The geometric-mean size used to scale particle counts and radii.
    pub fn scale(&self) -> f32 {
        (self.width * self.height).sqrt()
    }
}
