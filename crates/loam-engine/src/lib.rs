//! Tilemap-first 2D engine core.
//!
//! Owns the scene graph glue, the texture/atlas cache, frame-driven
//! animation, and camera-culled tile rendering. Windowing, input, and the
//! actual GPU backend live outside this crate behind the
//! [`RenderContext`](renderer::RenderContext) trait.

pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;

#[cfg(test)]
mod test_util;

// Re-export key types at crate root for convenience
pub use api::types::{Rect, TextureHandle, TextureId};
pub use assets::manifest::{AtlasDesc, MapDesc, SpriteSheetDesc, TilesetDesc};
pub use assets::texture_cache::{TextureCache, TextureRegion};
pub use assets::tile_sheet::{SheetKey, TileSheet};
pub use components::animation::Animation;
pub use components::entity::{Drawable, Sprite};
pub use components::tilemap::{Tile, TileMap};
pub use self::core::frame::{FixedTimestep, Frame};
pub use self::core::scene::Scene;
pub use error::EngineError;
pub use renderer::camera::Camera;
pub use renderer::command::{DrawCommand, Flip};
pub use renderer::traits::{DecodedImage, RenderContext};
