//! Scene: owns the texture cache and the renderable set, and drives the
//! per-frame update/draw traversal in the required order.
//!
//! Within one frame the active camera updates first (so the viewport is
//! current), then every entity updates, then `draw` runs against the state
//! `update` computed. Violating that order yields stale culling, never a
//! crash.

use std::collections::HashMap;

use crate::assets::texture_cache::TextureCache;
use crate::components::entity::Drawable;
use crate::core::frame::Frame;
use crate::renderer::camera::Camera;
use crate::renderer::traits::RenderContext;

pub struct Scene {
    name: String,
    cache: TextureCache,
    entities: Vec<Box<dyn Drawable>>,
    cameras: HashMap<String, Camera>,
    active_camera: Option<String>,
    /// Context computed by the last `update`, reused by `draw`.
    frame: Frame,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cache: TextureCache::new(),
            entities: Vec::with_capacity(16),
            cameras: HashMap::new(),
            active_camera: None,
            frame: Frame::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene's private texture cache; sheets and sprites register their
    /// art here.
    pub fn texture_cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn texture_cache_mut(&mut self) -> &mut TextureCache {
        &mut self.cache
    }

    pub fn add_entity(&mut self, entity: impl Drawable + 'static) {
        self.entities.push(Box::new(entity));
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Register a camera. The first registered camera becomes active.
    pub fn add_camera(&mut self, id: impl Into<String>, camera: Camera) {
        let id = id.into();
        if self.active_camera.is_none() {
            self.active_camera = Some(id.clone());
        }
        self.cameras.insert(id, camera);
    }

    /// Switch the active camera; `false` when no camera has that id.
    pub fn set_active_camera(&mut self, id: &str) -> bool {
        if self.cameras.contains_key(id) {
            self.active_camera = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn active_camera(&self) -> Option<&Camera> {
        self.cameras.get(self.active_camera.as_deref()?)
    }

    pub fn active_camera_mut(&mut self) -> Option<&mut Camera> {
        self.cameras.get_mut(self.active_camera.as_deref()?)
    }

    /// Advance one frame: the active camera first, then every entity with
    /// the fresh viewport in its frame context.
    pub fn update(&mut self, ctx: &dyn RenderContext, ticks: u64) {
        let mut frame = Frame::new(ticks);
        if let Some(id) = self.active_camera.as_deref() {
            if let Some(camera) = self.cameras.get_mut(id) {
                camera.update(ctx);
                frame.view = Some(camera.view());
            }
        }
        self.frame = frame;
        for entity in &mut self.entities {
            entity.update(&mut self.cache, &frame);
        }
    }

    /// Draw the frame `update` prepared. Positioned entities outside the
    /// camera's world bounds are culled; everything else submits draw
    /// commands through the shared cache.
    pub fn draw(&mut self, ctx: &mut dyn RenderContext) {
        let camera = self.active_camera().cloned();
        let frame = self.frame;
        for entity in &self.entities {
            if let (Some(camera), Some(position)) = (&camera, entity.position()) {
                if !camera.entity_in_bounds(position) {
                    continue;
                }
            }
            entity.draw(&mut self.cache, ctx, &frame);
        }
    }
}
