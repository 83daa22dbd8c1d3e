//! Draw submissions handed to the render context.

use crate::api::types::{Rect, TextureId};

/// Mirror flags applied when a quad is rasterized. Matches the three flip
/// bits a tile cell can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl Flip {
    pub const NONE: Flip = Flip {
        horizontal: false,
        vertical: false,
        diagonal: false,
    };

    /// Whether any mirroring is requested.
    pub fn any(self) -> bool {
        self.horizontal || self.vertical || self.diagonal
    }
}

/// One textured-quad draw.
///
/// `src: None` samples the whole backing texture; otherwise `src` is a pixel
/// rectangle within it (a cached subregion).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureId,
    pub src: Option<Rect>,
    pub dest: Rect,
    /// Rotation in radians around the destination center.
    pub rotation: f32,
    pub flip: Flip,
}
