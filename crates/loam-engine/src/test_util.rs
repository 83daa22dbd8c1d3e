//! Shared test fixture: a scriptable, recording render context.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::api::types::{Rect, TextureId};
use crate::error::EngineError;
use crate::renderer::command::DrawCommand;
use crate::renderer::traits::{DecodedImage, RenderContext};

/// Headless render context for tests: decodes succeed with scripted natural
/// sizes (unless the path is marked broken) and every submission is recorded
/// for inspection.
pub struct StubContext {
    pub decode_calls: usize,
    pub quads: Vec<DrawCommand>,
    pub outlines: Vec<Rect>,
    pub logical: Option<(f32, f32)>,
    pub output: (f32, f32),
    sizes: HashMap<PathBuf, (u32, u32)>,
    default_size: (u32, u32),
    broken: Vec<PathBuf>,
    next_id: u64,
}

impl StubContext {
    pub fn new() -> Self {
        Self {
            decode_calls: 0,
            quads: Vec::new(),
            outlines: Vec::new(),
            logical: None,
            output: (640.0, 480.0),
            sizes: HashMap::new(),
            default_size: (256, 256),
            broken: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_output(mut self, w: f32, h: f32) -> Self {
        self.output = (w, h);
        self
    }

    pub fn with_logical(mut self, w: f32, h: f32) -> Self {
        self.logical = Some((w, h));
        self
    }

    /// Script the natural size reported for one image path.
    pub fn with_size(mut self, path: &str, w: u32, h: u32) -> Self {
        self.sizes.insert(PathBuf::from(path), (w, h));
        self
    }

    /// Natural size reported for paths without a scripted size.
    pub fn with_default_size(mut self, w: u32, h: u32) -> Self {
        self.default_size = (w, h);
        self
    }

    /// Mark a path as refusing to decode.
    pub fn with_broken(mut self, path: &str) -> Self {
        self.broken.push(PathBuf::from(path));
        self
    }
}

impl RenderContext for StubContext {
    fn backend(&self) -> &'static str {
        "stub"
    }

    fn decode_image(&mut self, path: &Path) -> Result<DecodedImage, EngineError> {
        self.decode_calls += 1;
        if self.broken.iter().any(|p| p == path) {
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                reason: "scripted failure".into(),
            });
        }
        let (width, height) = self.sizes.get(path).copied().unwrap_or(self.default_size);
        let id = TextureId(self.next_id);
        self.next_id += 1;
        Ok(DecodedImage { id, width, height })
    }

    fn logical_size(&self) -> Option<(f32, f32)> {
        self.logical
    }

    fn output_size(&self) -> (f32, f32) {
        self.output
    }

    fn draw_quad(&mut self, cmd: &DrawCommand) {
        self.quads.push(*cmd);
    }

    fn draw_outline(&mut self, dest: Rect) {
        self.outlines.push(dest);
    }
}
