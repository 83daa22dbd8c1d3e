//! Render context boundary.
//!
//! The engine issues decode requests and draw commands through this trait and
//! never touches a windowing or GPU API directly. The top-level application
//! constructs one concrete context with an explicit init/shutdown lifecycle
//! and passes it into the scene each frame; there is no hidden singleton.

use std::path::Path;

use crate::api::types::{Rect, TextureId};
use crate::error::EngineError;
use crate::renderer::command::DrawCommand;

/// A decoded backing image: the platform texture id plus its natural pixel
/// size.
#[derive(Debug, Clone, Copy)]
pub struct DecodedImage {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Contract a rendering backend fulfills.
pub trait RenderContext {
    /// Backend identifier (e.g. "sdl2", "wgpu", "headless").
    fn backend(&self) -> &'static str;

    /// Decode an image file into a platform texture and report its natural
    /// size. Expensive; the texture cache guarantees at most one successful
    /// call per backing file.
    fn decode_image(&mut self, path: &Path) -> Result<DecodedImage, EngineError>;

    /// Logical surface size, if one is configured.
    fn logical_size(&self) -> Option<(f32, f32)>;

    /// Physical output size, used when no logical size is configured.
    fn output_size(&self) -> (f32, f32);

    /// Submit one textured quad.
    fn draw_quad(&mut self, cmd: &DrawCommand);

    /// Draw an unfilled rectangle. Only the tile map's debug grid uses this;
    /// backends that don't care keep the default no-op.
    fn draw_outline(&mut self, _dest: Rect) {}
}
