//! Tile map: a multi-layer packed gid grid with camera-driven viewport
//! culling.
//!
//! Each cell is a 32-bit value holding a 29-bit global tile id plus three
//! flip bits, the packing tiled-map editors emit. Rendering walks only the
//! window of cells the active viewport intersects; the window is recomputed
//! every update so draw never scans the whole grid.

use crate::api::types::{Rect, TextureHandle};
use crate::assets::manifest::{MapDesc, TilesetDesc};
use crate::assets::texture_cache::TextureCache;
use crate::assets::tile_sheet::TileSheet;
use crate::components::entity::Drawable;
use crate::core::frame::Frame;
use crate::error::EngineError;
use crate::renderer::command::{DrawCommand, Flip};
use crate::renderer::traits::RenderContext;

const FLIP_HORIZONTAL: u32 = 0x8000_0000;
const FLIP_VERTICAL: u32 = 0x4000_0000;
const FLIP_DIAGONAL: u32 = 0x2000_0000;
const GID_MASK: u32 = !(FLIP_HORIZONTAL | FLIP_VERTICAL | FLIP_DIAGONAL);

/// One unpacked cell: which atlas tile it references and how it's mirrored.
/// `gid == 0` means the cell is empty on its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub gid: u32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub flip_diagonal: bool,
}

impl Tile {
    pub fn new(gid: u32) -> Self {
        Self {
            gid,
            ..Self::default()
        }
    }

    /// Pack into the stored 32-bit cell value.
    pub fn pack(self) -> u32 {
        let mut value = self.gid & GID_MASK;
        if self.flip_horizontal {
            value |= FLIP_HORIZONTAL;
        }
        if self.flip_vertical {
            value |= FLIP_VERTICAL;
        }
        if self.flip_diagonal {
            value |= FLIP_DIAGONAL;
        }
        value
    }

    /// Inverse of `pack`.
    pub fn unpack(value: u32) -> Self {
        Self {
            gid: value & GID_MASK,
            flip_horizontal: value & FLIP_HORIZONTAL != 0,
            flip_vertical: value & FLIP_VERTICAL != 0,
            flip_diagonal: value & FLIP_DIAGONAL != 0,
        }
    }

    fn flip(self) -> Flip {
        Flip {
            horizontal: self.flip_horizontal,
            vertical: self.flip_vertical,
            diagonal: self.flip_diagonal,
        }
    }
}

/// One layer of cells, rendered in list order (index 0 at the bottom).
#[derive(Debug)]
struct Layer {
    /// Loader-assigned ordering hint; draw order is list order regardless.
    #[allow(dead_code)]
    render_index: i32,
    tiles: Vec<u32>,
}

/// The row/column window the viewport intersects, plus the screen-space
/// position at which its first cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderWindow {
    first_col: u32,
    first_row: u32,
    max_col: u32,
    max_row: u32,
    x_start: f32,
    y_start: f32,
}

pub struct TileMap {
    tile_size: u32,
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    sheets: Vec<TileSheet>,
    window: RenderWindow,
    debug_grid: bool,
}

impl TileMap {
    /// Create an empty map of `width * height` square cells. Layers and tile
    /// sheets are attached separately; until the first update the whole grid
    /// counts as visible.
    pub fn new(tile_size: u32, width: u32, height: u32) -> Result<Self, EngineError> {
        if tile_size == 0 || width == 0 || height == 0 {
            return Err(EngineError::InvalidMapSize {
                tile_size,
                width,
                height,
            });
        }
        Ok(Self {
            tile_size,
            width,
            height,
            layers: Vec::with_capacity(4),
            sheets: Vec::new(),
            window: RenderWindow {
                first_col: 0,
                first_row: 0,
                max_col: width,
                max_row: height,
                x_start: 0.0,
                y_start: 0.0,
            },
            debug_grid: false,
        })
    }

    /// Build a map, its layers, and its tile sheets from a loader-produced
    /// description.
    pub fn from_desc(desc: &MapDesc, cache: &mut TextureCache) -> Result<Self, EngineError> {
        let mut map = Self::new(desc.tile_size, desc.width, desc.height)?;
        let expected = (desc.width * desc.height) as usize;
        for layer_desc in &desc.layers {
            if layer_desc.data.len() != expected {
                return Err(EngineError::LayerSizeMismatch {
                    expected,
                    got: layer_desc.data.len(),
                });
            }
            let index = map.add_layer(layer_desc.render_index);
            map.layers[index].tiles.copy_from_slice(&layer_desc.data);
        }
        for tileset in &desc.tilesets {
            let sheet = match tileset {
                TilesetDesc::Grid(grid) => TileSheet::from_grid(cache, grid)?,
                TilesetDesc::Atlas(atlas) => TileSheet::from_atlas(cache, atlas),
            };
            map.add_tilesheet(sheet);
        }
        Ok(map)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Outline empty layer-0 cells while drawing, as a placement aid.
    pub fn set_debug_grid(&mut self, on: bool) {
        self.debug_grid = on;
    }

    /// Append a zero-filled layer and return its index.
    pub fn add_layer(&mut self, render_index: i32) -> usize {
        self.layers.push(Layer {
            render_index,
            tiles: vec![0; (self.width * self.height) as usize],
        });
        self.layers.len() - 1
    }

    fn cell_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Overwrite one cell, last write wins. `false` when the layer or the
    /// coordinates are out of range; the grid is untouched in that case.
    pub fn set_tile(&mut self, layer: usize, x: u32, y: u32, tile: Tile) -> bool {
        let Some(index) = self.cell_index(x, y) else {
            return false;
        };
        let Some(layer) = self.layers.get_mut(layer) else {
            return false;
        };
        layer.tiles[index] = tile.pack();
        true
    }

    pub fn get_tile(&self, layer: usize, x: u32, y: u32) -> Option<Tile> {
        let index = self.cell_index(x, y)?;
        let layer = self.layers.get(layer)?;
        Some(Tile::unpack(layer.tiles[index]))
    }

    /// Append a sheet to the gid search list. Earlier sheets win.
    pub fn add_tilesheet(&mut self, sheet: TileSheet) {
        self.sheets.push(sheet);
    }

    /// First sheet that knows `gid` wins; a gid no sheet resolves is treated
    /// as empty.
    fn resolve_gid(&self, gid: u32) -> Option<TextureHandle> {
        self.sheets.iter().find_map(|sheet| sheet.lookup_gid(gid))
    }

    fn compute_window(&self, view: Option<Rect>) -> RenderWindow {
        let Some(view) = view else {
            return RenderWindow {
                first_col: 0,
                first_row: 0,
                max_col: self.width,
                max_row: self.height,
                x_start: 0.0,
                y_start: 0.0,
            };
        };
        let tile = self.tile_size as f32;
        let visible_cols = (view.w / tile).ceil() as u32;
        let visible_rows = (view.h / tile).ceil() as u32;
        let first_col = (view.x / tile).floor().max(0.0) as u32;
        let first_row = (view.y / tile).floor().max(0.0) as u32;
        // The extra trailing column and row cover partially visible cells.
        RenderWindow {
            first_col,
            first_row,
            max_col: self.width.min(first_col + visible_cols + 1),
            max_row: self.height.min(first_row + visible_rows + 1),
            x_start: -view.x + first_col as f32 * tile,
            y_start: -view.y + first_row as f32 * tile,
        }
    }

    /// Per-frame update: advance sheet animations, then refresh the visible
    /// window from the camera viewport. Must run after the camera's update
    /// and before `draw`.
    pub fn update(&mut self, frame: &Frame) {
        for sheet in &mut self.sheets {
            sheet.update(frame.ticks);
        }
        self.window = self.compute_window(frame.view);
    }

    /// Issue draw commands for every visible, resolvable cell, layers in
    /// list order.
    pub fn draw(&self, cache: &mut TextureCache, ctx: &mut dyn RenderContext) {
        let tile_size = self.tile_size as f32;
        for (layer_index, layer) in self.layers.iter().enumerate() {
            let mut y_draw = self.window.y_start;
            for y in self.window.first_row..self.window.max_row {
                let mut x_draw = self.window.x_start;
                for x in self.window.first_col..self.window.max_col {
                    let tile = Tile::unpack(layer.tiles[(y * self.width + x) as usize]);
                    self.draw_cell(cache, ctx, layer_index, tile, x_draw, y_draw, tile_size);
                    x_draw += tile_size;
                }
                y_draw += tile_size;
            }
        }
    }

    fn draw_cell(
        &self,
        cache: &mut TextureCache,
        ctx: &mut dyn RenderContext,
        layer_index: usize,
        tile: Tile,
        x_draw: f32,
        y_draw: f32,
        tile_size: f32,
    ) {
        let region = if tile.gid == 0 {
            None
        } else {
            self.resolve_gid(tile.gid)
                .and_then(|handle| cache.lookup(ctx, handle))
        };
        let Some(region) = region else {
            if self.debug_grid && layer_index == 0 {
                ctx.draw_outline(Rect::new(x_draw, y_draw, tile_size, tile_size));
            }
            return;
        };

        // Tall art keeps its natural size, anchored to the cell's bottom
        // edge.
        let height = region.height as f32;
        let dest = Rect::new(
            x_draw,
            y_draw + (tile_size - height),
            region.width as f32,
            height,
        );
        ctx.draw_quad(&DrawCommand {
            texture: region.texture,
            src: region.src,
            dest,
            rotation: 0.0,
            flip: tile.flip(),
        });
    }
}

impl Drawable for TileMap {
    fn update(&mut self, _cache: &mut TextureCache, frame: &Frame) {
        TileMap::update(self, frame);
    }

    fn draw(&self, cache: &mut TextureCache, ctx: &mut dyn RenderContext, _frame: &Frame) {
        TileMap::draw(self, cache, ctx);
    }
}
