pub mod grid;
pub mod save;
pub mod types;
pub mod world;
pub mod worldgen;

pub use grid::TileGrid;
pub use save::SaveData;
pub use types::*;
pub use world::{SIGHT_RADIUS, World};
pub use worldgen::{GenRng, GeneratedWorld, Hallway, Room, WorldGenerator};
