//! Camera: a look-at point clamped inside world bounds, exposing the
//! world-space viewport rectangle the tile map culls against.

use glam::Vec2;

use crate::api::types::Rect;
use crate::renderer::traits::RenderContext;

#[derive(Debug, Clone)]
pub struct Camera {
    world_bounds: Rect,
    look_at: Vec2,
    /// Viewport width/height, refreshed from the rendering surface each
    /// update.
    viewport: Vec2,
}

impl Camera {
    /// Create a camera over the given world bounds. The viewport is zero
    /// until the first `update` queries the rendering surface.
    ///
    /// # Panics
    ///
    /// Panics when the bounds have a nonpositive extent; that is a caller
    /// bug, not a runtime condition.
    pub fn new(world_bounds: Rect) -> Self {
        assert!(
            world_bounds.w > 0.0 && world_bounds.h > 0.0,
            "world bounds must have positive extents"
        );
        Self {
            world_bounds,
            look_at: Vec2::ZERO,
            viewport: Vec2::ZERO,
        }
    }

    /// Replace the world bounds (extents must be positive) and re-clamp the
    /// look-at point against them.
    pub fn set_world_bounds(&mut self, bounds: Rect) {
        assert!(
            bounds.w > 0.0 && bounds.h > 0.0,
            "world bounds must have positive extents"
        );
        self.world_bounds = bounds;
        self.clamp_look_at();
    }

    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    /// Aim the camera. Each axis clamps independently so the viewport never
    /// leaves the world bounds; bounds smaller than the viewport pin the
    /// axis to zero.
    pub fn set_xy(&mut self, look_at: Vec2) {
        self.look_at = look_at;
        self.clamp_look_at();
    }

    pub fn look_at(&self) -> Vec2 {
        self.look_at
    }

    fn clamp_look_at(&mut self) {
        let max_x = (self.world_bounds.w - self.viewport.x).max(0.0);
        let max_y = (self.world_bounds.h - self.viewport.y).max(0.0);
        self.look_at.x = self.look_at.x.clamp(0.0, max_x);
        self.look_at.y = self.look_at.y.clamp(0.0, max_y);
    }

    /// Refresh the viewport from the rendering surface: the logical size
    /// when one is configured, the physical output size otherwise. The
    /// look-at point is re-clamped against the new viewport but not
    /// otherwise moved.
    pub fn update(&mut self, ctx: &dyn RenderContext) {
        let (w, h) = ctx.logical_size().unwrap_or_else(|| ctx.output_size());
        self.viewport = Vec2::new(w, h);
        self.clamp_look_at();
    }

    /// Current world-space viewport rectangle.
    pub fn view(&self) -> Rect {
        Rect::new(
            self.look_at.x,
            self.look_at.y,
            self.viewport.x,
            self.viewport.y,
        )
    }

    /// Whether a world position falls inside the world bounds. The scene
    /// uses this to cull positioned entities before dispatching draw.
    pub fn entity_in_bounds(&self, position: Vec2) -> bool {
        position.x >= self.world_bounds.x
            && position.x <= self.world_bounds.w
            && position.y >= self.world_bounds.y
            && position.y <= self.world_bounds.h
    }

    /// World position relative to the camera origin, i.e. screen space.
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.look_at
    }
}
