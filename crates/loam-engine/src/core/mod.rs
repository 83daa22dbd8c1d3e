pub mod frame;
pub mod scene;

pub use frame::{FixedTimestep, Frame};
pub use scene::Scene;
