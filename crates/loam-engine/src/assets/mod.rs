pub mod manifest;
pub mod texture_cache;
pub mod tile_sheet;

pub use manifest::{AtlasDesc, MapDesc, SpriteSheetDesc, TilesetDesc};
pub use texture_cache::{TextureCache, TextureRegion};
pub use tile_sheet::{SheetKey, TileSheet};
