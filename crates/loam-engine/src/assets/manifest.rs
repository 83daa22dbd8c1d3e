//! Loader-facing descriptions of maps and tile sheets.
//!
//! An external TMX/TSX-equivalent loader parses its files into these structs;
//! the engine only consumes the structured result. JSON is the interchange
//! format used for manifests authored by hand or emitted by tooling.

use serde::{Deserialize, Serialize};

/// Complete description of a tile map: grid geometry plus per-layer packed
/// cell values and the tile sheets gids resolve through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDesc {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Square cell edge in pixels.
    pub tile_size: u32,
    pub layers: Vec<LayerDesc>,
    #[serde(default)]
    pub tilesets: Vec<TilesetDesc>,
}

impl MapDesc {
    /// Parse a map description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One layer's cells in row-major order, packed as 29-bit gid plus flip
/// bits, exactly what a tiled-map loader emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDesc {
    /// Loader-assigned ordering hint; layers render in list order.
    #[serde(default)]
    pub render_index: i32,
    pub data: Vec<u32>,
}

/// Tile sheet description: either a regular grid over one image or a list of
/// named regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TilesetDesc {
    Grid(SpriteSheetDesc),
    Atlas(AtlasDesc),
}

/// Regular-grid sprite sheet: `tile_count` cells sliced left-to-right,
/// top-to-bottom, addressed by sequential gid starting at `first_gid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSheetDesc {
    pub image: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Pixels between the image edge and the first cell.
    #[serde(default)]
    pub margin: u32,
    /// Pixels between adjacent cells.
    #[serde(default)]
    pub spacing: u32,
    pub columns: u32,
    pub tile_count: u32,
    #[serde(default = "default_first_gid")]
    pub first_gid: u32,
    #[serde(default)]
    pub animations: Vec<TileAnimationDesc>,
}

fn default_first_gid() -> u32 {
    1
}

/// Animation attached to one tile, cycling through other tiles of the same
/// sheet. Tile ids are sheet-local (0-based); the sheet's `first_gid` maps
/// them to gids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileAnimationDesc {
    pub tile_id: u32,
    #[serde(default = "default_looping")]
    pub looping: bool,
    pub frames: Vec<FrameDesc>,
}

fn default_looping() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDesc {
    pub tile_id: u32,
    /// Milliseconds this frame stays active.
    pub duration: u32,
}

/// Free-form atlas: one root image plus named rectangular subregions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDesc {
    pub image: String,
    pub regions: Vec<RegionDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDesc {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
