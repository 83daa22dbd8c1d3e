//! Drawable capability and a minimal positioned sprite.
//!
//! The full entity/component object model lives outside this crate; the
//! scene only needs update/draw dispatch plus an optional position for
//! culling.

use glam::Vec2;

use crate::api::types::{Rect, TextureHandle};
use crate::assets::texture_cache::TextureCache;
use crate::components::animation::Animation;
use crate::core::frame::Frame;
use crate::renderer::command::{DrawCommand, Flip};
use crate::renderer::traits::RenderContext;

/// Capability interface the scene dispatches through each frame.
pub trait Drawable {
    /// Advance per-frame state. Runs after the active camera has updated.
    fn update(&mut self, cache: &mut TextureCache, frame: &Frame);

    /// Issue draw commands. Runs after `update` within the same frame.
    fn draw(&self, cache: &mut TextureCache, ctx: &mut dyn RenderContext, frame: &Frame);

    /// World position for camera culling; `None` is never culled.
    fn position(&self) -> Option<Vec2> {
        None
    }
}

/// A camera-relative point sprite: a static texture or an animation, drawn
/// at natural size with its top-left corner at `position`.
pub struct Sprite {
    position: Vec2,
    handle: TextureHandle,
    animation: Option<Animation>,
}

impl Sprite {
    pub fn new(handle: TextureHandle) -> Self {
        Self {
            position: Vec2::ZERO,
            handle,
            animation: None,
        }
    }

    pub fn animated(animation: Animation) -> Self {
        Self {
            position: Vec2::ZERO,
            handle: animation.current_texture(),
            animation: Some(animation),
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Handle currently shown: the animation's frame when one is attached
    /// and non-empty, the static handle otherwise.
    pub fn current_texture(&self) -> TextureHandle {
        match &self.animation {
            Some(animation) if animation.current_texture().is_valid() => {
                animation.current_texture()
            }
            _ => self.handle,
        }
    }
}

impl Drawable for Sprite {
    fn update(&mut self, _cache: &mut TextureCache, frame: &Frame) {
        if let Some(animation) = &mut self.animation {
            animation.update(frame.ticks);
        }
    }

    fn draw(&self, cache: &mut TextureCache, ctx: &mut dyn RenderContext, frame: &Frame) {
        let handle = self.current_texture();
        if !handle.is_valid() {
            return;
        }
        let Some(region) = cache.lookup(ctx, handle) else {
            return;
        };
        let origin = match frame.view {
            Some(view) => self.position - Vec2::new(view.x, view.y),
            None => self.position,
        };
        ctx.draw_quad(&DrawCommand {
            texture: region.texture,
            src: region.src,
            dest: Rect::new(origin.x, origin.y, region.width as f32, region.height as f32),
            rotation: 0.0,
            flip: Flip::NONE,
        });
    }

    fn position(&self) -> Option<Vec2> {
        Some(self.position)
    }
}
