use glam::{Vec2, vec2};

/// Output rectangle on the drawing surface.
///
/// Recomputed every frame from the host surface size; never cached.
/// Projection only sees `width`/`height`, `origin` places the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport anchored at the surface origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self::at(Vec2::ZERO, width, height)
    }

    pub fn at(origin: Vec2, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Bottom-right corner in surface space.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + vec2(self.width, self.height)
    }

    /// Viewport-local pixel → surface pixel.
    #[inline]
    pub fn to_surface(&self, p: Vec2) -> Vec2 {
        self.origin + p
    }
}
