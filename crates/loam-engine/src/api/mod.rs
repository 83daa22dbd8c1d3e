pub mod types;

pub use types::{Rect, TextureHandle, TextureId};
