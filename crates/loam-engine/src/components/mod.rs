pub mod animation;
pub mod entity;
pub mod tilemap;

pub use animation::Animation;
pub use entity::{Drawable, Sprite};
pub use tilemap::{Tile, TileMap};
