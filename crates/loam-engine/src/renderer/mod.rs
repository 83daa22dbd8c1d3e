pub mod camera;
pub mod command;
pub mod traits;

// Re-export key types for convenient access
pub use camera::Camera;
pub use command::{DrawCommand, Flip};
pub use traits::{DecodedImage, RenderContext};
