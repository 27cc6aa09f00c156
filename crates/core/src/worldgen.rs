//! Procedural world generation domain split into coherent submodules.

pub mod hallway;
pub mod room;

mod generator;
mod rng;

pub use generator::{GeneratedWorld, MAX_ROOM_DIM, MIN_ROOM_DIM, WorldGenerator};
pub use hallway::Hallway;
pub use rng::GenRng;
pub use room::Room;

use crate::types::GenError;

pub fn generate_world(seed: u64, width: usize, height: usize) -> Result<GeneratedWorld, GenError> {
    let mut rng = GenRng::new(seed);
    WorldGenerator::new(width, height).generate(&mut rng)
}
