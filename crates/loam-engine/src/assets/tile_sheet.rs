//! Tile sheets: lookup tables from tile identifiers to texture handles,
//! with optional per-cell animation.
//!
//! A sheet built from a regular-grid sprite sheet keys its cells by
//! sequential gid; one built from a free-form atlas keys them by name. Both
//! register their art with the shared texture cache and hold only non-owning
//! handles into it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::api::types::{Rect, TextureHandle};
use crate::assets::manifest::{AtlasDesc, SpriteSheetDesc};
use crate::assets::texture_cache::TextureCache;
use crate::components::animation::Animation;
use crate::error::EngineError;

/// Key for one sheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SheetKey {
    Gid(u32),
    Name(String),
}

/// One cell: a static handle, optionally overridden by a live animation.
#[derive(Debug)]
struct SheetCell {
    handle: TextureHandle,
    animation: Option<Animation>,
}

#[derive(Debug, Default)]
pub struct TileSheet {
    cells: HashMap<SheetKey, SheetCell>,
}

impl TileSheet {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Slice a regular-grid sprite sheet into sequential-gid cells and attach
    /// its per-tile animations. Animation frames reference other cells of the
    /// same sheet by sheet-local tile id.
    pub fn from_grid(
        cache: &mut TextureCache,
        desc: &SpriteSheetDesc,
    ) -> Result<Self, EngineError> {
        if desc.tile_width == 0 || desc.tile_height == 0 || desc.columns == 0 {
            return Err(EngineError::InvalidSheetGrid {
                tile_width: desc.tile_width,
                tile_height: desc.tile_height,
                columns: desc.columns,
            });
        }

        let mut sheet = Self::new();
        let root = cache.load_file(desc.image.as_str());

        for i in 0..desc.tile_count {
            let col = i % desc.columns;
            let row = i / desc.columns;
            let region = Rect::new(
                (desc.margin + col * (desc.tile_width + desc.spacing)) as f32,
                (desc.margin + row * (desc.tile_height + desc.spacing)) as f32,
                desc.tile_width as f32,
                desc.tile_height as f32,
            );
            let handle = cache.subregion(root, region);
            sheet.put(SheetKey::Gid(desc.first_gid + i), handle);
        }

        for anim_desc in &desc.animations {
            let mut animation = Animation::new().with_looping(anim_desc.looping);
            for frame in &anim_desc.frames {
                let Some(handle) = sheet.lookup_gid(desc.first_gid + frame.tile_id) else {
                    log::warn!(
                        "animation frame references unknown tile {} in {}",
                        frame.tile_id,
                        desc.image
                    );
                    continue;
                };
                animation.add_frame(handle, frame.duration);
            }
            sheet.put_animation(SheetKey::Gid(desc.first_gid + anim_desc.tile_id), animation);
        }

        Ok(sheet)
    }

    /// Build a named-region atlas over one root image.
    pub fn from_atlas(cache: &mut TextureCache, desc: &AtlasDesc) -> Self {
        let mut sheet = Self::new();
        let root = cache.load_file(desc.image.as_str());
        for region in &desc.regions {
            let handle = cache.subregion(
                root,
                Rect::new(
                    region.x as f32,
                    region.y as f32,
                    region.width as f32,
                    region.height as f32,
                ),
            );
            sheet.put(SheetKey::Name(region.name.clone()), handle);
        }
        sheet
    }

    /// Register or overwrite a cell's static handle. An attached animation,
    /// if any, keeps precedence.
    pub fn put(&mut self, key: SheetKey, handle: TextureHandle) {
        self.cells
            .entry(key)
            .and_modify(|cell| cell.handle = handle)
            .or_insert(SheetCell {
                handle,
                animation: None,
            });
    }

    /// Attach an animation; the cell reports the animation's current frame
    /// from now on. Creates the cell when absent.
    pub fn put_animation(&mut self, key: SheetKey, animation: Animation) {
        match self.cells.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().animation = Some(animation),
            Entry::Vacant(entry) => {
                let handle = animation.current_texture();
                entry.insert(SheetCell {
                    handle,
                    animation: Some(animation),
                });
            }
        }
    }

    /// Current handle for a key, animation-aware. `None` when the key was
    /// never registered; the caller treats that as "no texture", not an
    /// error.
    pub fn lookup(&self, key: &SheetKey) -> Option<TextureHandle> {
        let cell = self.cells.get(key)?;
        if let Some(animation) = &cell.animation {
            let handle = animation.current_texture();
            if handle.is_valid() {
                return Some(handle);
            }
        }
        Some(cell.handle)
    }

    pub fn lookup_gid(&self, gid: u32) -> Option<TextureHandle> {
        self.lookup(&SheetKey::Gid(gid))
    }

    pub fn contains(&self, key: &SheetKey) -> bool {
        self.cells.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Advance every owned animation exactly once.
    pub fn update(&mut self, ticks: u64) {
        for cell in self.cells.values_mut() {
            if let Some(animation) = &mut cell.animation {
                animation.update(ticks);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::{FrameDesc, RegionDesc, TileAnimationDesc};
    use crate::test_util::StubContext;

    fn grid_desc() -> SpriteSheetDesc {
        SpriteSheetDesc {
            image: "terrain.png".into(),
            tile_width: 16,
            tile_height: 16,
            margin: 2,
            spacing: 1,
            columns: 4,
            tile_count: 8,
            first_gid: 1,
            animations: Vec::new(),
        }
    }

    #[test]
    fn put_then_lookup_round_trips() {
        let mut sheet = TileSheet::new();
        sheet.put(SheetKey::Gid(5), TextureHandle(9));
        assert_eq!(sheet.lookup_gid(5), Some(TextureHandle(9)));
        assert_eq!(sheet.lookup_gid(6), None);
    }

    #[test]
    fn unknown_name_reports_not_found() {
        let sheet = TileSheet::new();
        assert!(sheet.lookup(&SheetKey::Name("tree".into())).is_none());
    }

    #[test]
    fn grid_slices_with_margin_and_spacing() {
        let mut cache = TextureCache::new();
        let mut ctx = StubContext::new();
        let sheet = TileSheet::from_grid(&mut cache, &grid_desc()).unwrap();
        assert_eq!(sheet.len(), 8);

        // Tile 5 sits at column 1, row 1 of the grid.
        let handle = sheet.lookup_gid(6).expect("gid 6 registered");
        let region = cache.lookup(&mut ctx, handle).expect("resolvable");
        assert_eq!(region.src, Some(Rect::new(19.0, 19.0, 16.0, 16.0)));

        // All cells share the one backing decode.
        let first = sheet.lookup_gid(1).unwrap();
        let first_region = cache.lookup(&mut ctx, first).unwrap();
        assert_eq!(ctx.decode_calls, 1);
        assert_eq!(first_region.texture, region.texture);
        assert_eq!(first_region.src, Some(Rect::new(2.0, 2.0, 16.0, 16.0)));
    }

    #[test]
    fn degenerate_grid_is_rejected() {
        let mut cache = TextureCache::new();
        let mut desc = grid_desc();
        desc.columns = 0;
        assert!(TileSheet::from_grid(&mut cache, &desc).is_err());
    }

    #[test]
    fn animated_cell_tracks_the_animation() {
        let mut cache = TextureCache::new();
        let mut desc = grid_desc();
        desc.animations = vec![TileAnimationDesc {
            tile_id: 0,
            looping: true,
            frames: vec![
                FrameDesc {
                    tile_id: 0,
                    duration: 100,
                },
                FrameDesc {
                    tile_id: 1,
                    duration: 100,
                },
            ],
        }];
        let mut sheet = TileSheet::from_grid(&mut cache, &desc).unwrap();

        let static_frame = sheet.lookup_gid(1).unwrap();
        let plain_cell = sheet.lookup_gid(3).unwrap();
        sheet.update(100);
        let advanced = sheet.lookup_gid(1).unwrap();
        assert_ne!(static_frame, advanced);
        assert_eq!(advanced, sheet.lookup_gid(2).unwrap());

        // Unanimated cells are unaffected.
        assert_eq!(sheet.lookup_gid(3), Some(plain_cell));
    }

    #[test]
    fn empty_animation_falls_back_to_static_handle() {
        let mut sheet = TileSheet::new();
        sheet.put(SheetKey::Gid(4), TextureHandle(7));
        sheet.put_animation(SheetKey::Gid(4), Animation::new());
        assert_eq!(sheet.lookup_gid(4), Some(TextureHandle(7)));
    }

    #[test]
    fn atlas_registers_named_regions() {
        let mut cache = TextureCache::new();
        let mut ctx = StubContext::new();
        let desc = AtlasDesc {
            image: "props.png".into(),
            regions: vec![
                RegionDesc {
                    name: "tree".into(),
                    x: 0,
                    y: 0,
                    width: 70,
                    height: 140,
                },
                RegionDesc {
                    name: "rock".into(),
                    x: 70,
                    y: 70,
                    width: 70,
                    height: 70,
                },
            ],
        };
        let sheet = TileSheet::from_atlas(&mut cache, &desc);

        let tree = sheet.lookup(&SheetKey::Name("tree".into())).unwrap();
        let region = cache.lookup(&mut ctx, tree).expect("resolvable");
        assert_eq!(region.src, Some(Rect::new(0.0, 0.0, 70.0, 140.0)));
        assert_eq!(region.height, 140);
        assert_eq!(ctx.decode_calls, 1);
    }
}
