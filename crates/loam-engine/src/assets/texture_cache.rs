//! Texture cache: the sole owner of every drawable region.
//!
//! Loading a file registers a node without decoding; decode and upload happen
//! on the first `lookup` during an active frame, because decoding may need a
//! live rendering context. Subregions share their parent's backing texture
//! and never trigger a second decode. Nodes live exactly as long as the
//! cache, so a subregion can never outlive the root it slices.

use std::path::PathBuf;

use crate::api::types::{Rect, TextureHandle, TextureId};
use crate::renderer::traits::RenderContext;

/// Where a node's pixels come from.
#[derive(Debug, Clone)]
enum NodeSource {
    /// Root node owning a backing image on disk.
    File(PathBuf),
    /// Rectangular slice of a root node's image.
    Subregion { parent: TextureHandle },
}

/// One entry per distinct drawable region.
#[derive(Debug)]
struct TextureNode {
    source: NodeSource,
    /// Pixel rectangle within the backing image; `None` for whole-image
    /// roots.
    region: Option<Rect>,
    /// Lazily realized platform texture. Stays `None` after a failed decode
    /// so the next lookup retries.
    texture: Option<TextureId>,
    /// Natural size: the region size for subregions, the decoded image size
    /// for roots (zero until realized).
    width: u32,
    height: u32,
}

/// Read-only view of a resolved node, ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct TextureRegion {
    pub texture: TextureId,
    /// Source rectangle for subregions; `None` draws the whole texture.
    pub src: Option<Rect>,
    pub width: u32,
    pub height: u32,
}

pub struct TextureCache {
    nodes: Vec<TextureNode>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    // Handle 0 is reserved, so node i answers to handle i + 1.
    fn handle_for(index: usize) -> TextureHandle {
        TextureHandle(index as u32 + 1)
    }

    fn index_of(&self, handle: TextureHandle) -> Option<usize> {
        if !handle.is_valid() {
            return None;
        }
        let index = handle.0 as usize - 1;
        if index >= self.nodes.len() {
            return None;
        }
        Some(index)
    }

    /// Register a root node bound to `path`. Nothing is decoded yet; the
    /// returned handle stays valid for the cache's lifetime.
    pub fn load_file(&mut self, path: impl Into<PathBuf>) -> TextureHandle {
        self.nodes.push(TextureNode {
            source: NodeSource::File(path.into()),
            region: None,
            texture: None,
            width: 0,
            height: 0,
        });
        Self::handle_for(self.nodes.len() - 1)
    }

    /// Register a rectangular slice of `parent`'s backing image.
    ///
    /// Returns `TextureHandle::INVALID` when `parent` does not refer to a
    /// root node: subregions of subregions are disallowed.
    pub fn subregion(&mut self, parent: TextureHandle, region: Rect) -> TextureHandle {
        let Some(parent_index) = self.index_of(parent) else {
            log::warn!("subregion request against unknown handle {:?}", parent);
            return TextureHandle::INVALID;
        };
        if matches!(
            self.nodes[parent_index].source,
            NodeSource::Subregion { .. }
        ) {
            log::warn!("subregion request against subregion handle {:?}", parent);
            return TextureHandle::INVALID;
        }
        self.nodes.push(TextureNode {
            source: NodeSource::Subregion { parent },
            region: Some(region),
            texture: None,
            width: region.w as u32,
            height: region.h as u32,
        });
        Self::handle_for(self.nodes.len() - 1)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a handle for drawing, realizing the platform texture on first
    /// use. Returns `None` for unknown handles and for nodes whose backing
    /// image failed to decode (those retry on the next lookup).
    pub fn lookup(
        &mut self,
        ctx: &mut dyn RenderContext,
        handle: TextureHandle,
    ) -> Option<TextureRegion> {
        let index = self.index_of(handle)?;
        self.realize(ctx, index)?;
        let node = &self.nodes[index];
        Some(TextureRegion {
            texture: node.texture?,
            src: node.region,
            width: node.width,
            height: node.height,
        })
    }

    fn realize(&mut self, ctx: &mut dyn RenderContext, index: usize) -> Option<TextureId> {
        if let Some(id) = self.nodes[index].texture {
            return Some(id);
        }
        match self.nodes[index].source.clone() {
            NodeSource::File(path) => match ctx.decode_image(&path) {
                Ok(img) => {
                    let node = &mut self.nodes[index];
                    node.texture = Some(img.id);
                    node.width = img.width;
                    node.height = img.height;
                    Some(img.id)
                }
                Err(err) => {
                    log::warn!("texture decode failed: {err}");
                    None
                }
            },
            NodeSource::Subregion { parent } => {
                let parent_index = self.index_of(parent)?;
                let id = self.realize(ctx, parent_index)?;
                self.nodes[index].texture = Some(id);
                Some(id)
            }
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::StubContext;

    #[test]
    fn load_file_mints_fresh_valid_handles() {
        let mut cache = TextureCache::new();
        let a = cache.load_file("a.png");
        let b = cache.load_file("b.png");
        assert!(a.is_valid());
        assert!(b.is_valid());
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn lookup_of_invalid_handle_misses() {
        let mut cache = TextureCache::new();
        let mut ctx = StubContext::new();
        assert!(cache.lookup(&mut ctx, TextureHandle::INVALID).is_none());
        assert!(cache.lookup(&mut ctx, TextureHandle(99)).is_none());
        assert_eq!(ctx.decode_calls, 0);
    }

    #[test]
    fn lookup_decodes_once_and_memoizes() {
        let mut cache = TextureCache::new();
        let mut ctx = StubContext::new().with_size("hero.png", 128, 64);
        let handle = cache.load_file("hero.png");
        assert_eq!(ctx.decode_calls, 0);

        let first = cache.lookup(&mut ctx, handle).expect("realized");
        let second = cache.lookup(&mut ctx, handle).expect("memoized");
        assert_eq!(ctx.decode_calls, 1);
        assert_eq!(first.texture, second.texture);
        assert_eq!(first.width, 128);
        assert_eq!(first.height, 64);
        assert!(first.src.is_none());
    }

    #[test]
    fn subregions_share_one_decode() {
        let mut cache = TextureCache::new();
        let mut ctx = StubContext::new().with_size("sheet.png", 256, 256);
        let root = cache.load_file("sheet.png");
        let a = cache.subregion(root, Rect::new(0.0, 0.0, 32.0, 32.0));
        let b = cache.subregion(root, Rect::new(32.0, 0.0, 32.0, 64.0));

        let ra = cache.lookup(&mut ctx, a).expect("subregion a");
        let rb = cache.lookup(&mut ctx, b).expect("subregion b");
        assert_eq!(ctx.decode_calls, 1);
        assert_eq!(ra.texture, rb.texture);
        assert_eq!(ra.src, Some(Rect::new(0.0, 0.0, 32.0, 32.0)));
        assert_eq!(rb.width, 32);
        assert_eq!(rb.height, 64);

        // The root resolves to the same backing texture without re-decoding.
        let root_region = cache.lookup(&mut ctx, root).expect("root");
        assert_eq!(ctx.decode_calls, 1);
        assert_eq!(root_region.texture, ra.texture);
    }

    #[test]
    fn subregion_of_subregion_is_rejected() {
        let mut cache = TextureCache::new();
        let root = cache.load_file("sheet.png");
        let child = cache.subregion(root, Rect::new(0.0, 0.0, 16.0, 16.0));
        let grandchild = cache.subregion(child, Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(grandchild, TextureHandle::INVALID);
    }

    #[test]
    fn subregion_of_unknown_parent_is_rejected() {
        let mut cache = TextureCache::new();
        let orphan = cache.subregion(TextureHandle(7), Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(orphan, TextureHandle::INVALID);
    }

    #[test]
    fn failed_decode_leaves_node_unrealized_and_retries() {
        let mut cache = TextureCache::new();
        let mut ctx = StubContext::new().with_broken("missing.png");
        let handle = cache.load_file("missing.png");

        assert!(cache.lookup(&mut ctx, handle).is_none());
        assert!(cache.lookup(&mut ctx, handle).is_none());
        // Each lookup attempted realization again.
        assert_eq!(ctx.decode_calls, 2);
    }
}
