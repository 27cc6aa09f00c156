//! The one-shot generation pipeline: room placement, greedy nearest-neighbor
//! connection, rasterization with wall inference, and avatar start selection.

use crate::grid::TileGrid;
use crate::types::{GenError, Pos, Tile};

use super::hallway::Hallway;
use super::rng::GenRng;
use super::room::Room;

pub const MIN_ROOM_DIM: i32 = 5;
/// Exclusive, matching the half-open dimension draw.
pub const MAX_ROOM_DIM: i32 = 10;

/// Minimum fraction of the grid area covered by accepted rooms.
const AREA_THRESHOLD: f64 = 0.4;
/// Placement is rejection sampling; overrunning this budget means the
/// grid/room-size configuration cannot reach the area threshold.
const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedWorld {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    pub hallways: Vec<Hallway>,
    pub avatar_start: Pos,
}

impl GeneratedWorld {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        bytes.extend(self.avatar_start.x.to_le_bytes());
        bytes.extend(self.avatar_start.y.to_le_bytes());
        bytes
    }
}

pub struct WorldGenerator {
    width: usize,
    height: usize,
}

impl WorldGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Run the four pipeline stages in order, consuming `rng` in a fixed
    /// call sequence so the result is a pure function of the seed.
    pub fn generate(&self, rng: &mut GenRng) -> Result<GeneratedWorld, GenError> {
        if (self.width as i32) < MAX_ROOM_DIM || (self.height as i32) < MAX_ROOM_DIM {
            return Err(GenError::GridTooSmall { width: self.width, height: self.height });
        }

        let rooms = self.place_rooms(rng)?;
        let hallways = connect_rooms(&rooms, rng);
        let mut grid = rasterize(self.width, self.height, &rooms, &hallways);
        let avatar_start = place_avatar(&rooms, &mut grid, rng);

        Ok(GeneratedWorld { grid, rooms, hallways, avatar_start })
    }

    fn place_rooms(&self, rng: &mut GenRng) -> Result<Vec<Room>, GenError> {
        let target = AREA_THRESHOLD * (self.width * self.height) as f64;
        let mut rooms: Vec<Room> = Vec::new();
        let mut filled = 0.0;
        let mut attempts = 0_u32;

        while filled < target {
            attempts += 1;
            if attempts > MAX_PLACEMENT_ATTEMPTS {
                return Err(GenError::PlacementBudgetExhausted {
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                });
            }

            let candidate = Room::generate(
                MIN_ROOM_DIM,
                MAX_ROOM_DIM,
                self.width as i32,
                self.height as i32,
                rng,
            );
            // an exact duplicate of an accepted room does not collide with
            // it, so it has to be rejected by equality
            if rooms.iter().any(|room| room == &candidate || room.collides_with(&candidate)) {
                continue;
            }
            filled += candidate.area() as f64;
            rooms.push(candidate);
        }

        Ok(rooms)
    }
}

/// Greedy nearest-neighbor chain starting from the first generated room.
/// Each step connects the current frontier room to the closest room not yet
/// in the chain, so the visitation order is deterministic.
fn connect_rooms(rooms: &[Room], rng: &mut GenRng) -> Vec<Hallway> {
    let mut hallways = Vec::new();
    if rooms.is_empty() {
        return hallways;
    }

    let mut connected = vec![false; rooms.len()];
    connected[0] = true;
    let mut frontier = 0_usize;

    for _ in 1..rooms.len() {
        let mut nearest: Option<(i32, usize)> = None;
        for (index, room) in rooms.iter().enumerate() {
            if connected[index] {
                continue;
            }
            let distance = rooms[frontier].distance_to(room);
            if nearest.is_none_or(|(best, _)| distance < best) {
                nearest = Some((distance, index));
            }
        }
        let Some((_, next)) = nearest else { break };

        // no legal hallway for this pair: end the chain early and leave the
        // remaining rooms disconnected
        let Ok(hallway) = Hallway::generate(&rooms[frontier], &rooms[next], rng) else {
            break;
        };
        hallways.push(hallway);
        connected[next] = true;
        frontier = next;
    }

    hallways
}

fn rasterize(width: usize, height: usize, rooms: &[Room], hallways: &[Hallway]) -> TileGrid {
    let mut grid = TileGrid::new(width, height);

    for room in rooms {
        for pos in room.floor_tiles() {
            grid.set_tile(pos, Tile::Floor);
        }
    }
    for hallway in hallways {
        for pos in hallway.tiles() {
            grid.set_tile(pos, Tile::Floor);
        }
    }

    // any non-floor cell touching a floor cell becomes a wall
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Pos { x, y };
            if grid.tile_at(pos) != Tile::Floor && next_to_floor(&grid, pos) {
                grid.set_tile(pos, Tile::Wall);
            }
        }
    }

    grid
}

fn next_to_floor(grid: &TileGrid, pos: Pos) -> bool {
    [(1, 0), (-1, 0), (0, 1), (0, -1)]
        .iter()
        .any(|&(dx, dy)| grid.tile_at(Pos { x: pos.x + dx, y: pos.y + dy }) == Tile::Floor)
}

/// A uniformly random cell strictly inside a uniformly random room, leaving
/// a one-cell margin against the room's own walls.
fn place_avatar(rooms: &[Room], grid: &mut TileGrid, rng: &mut GenRng) -> Pos {
    let room = rooms[rng.below(rooms.len())];
    let x = rng.range(room.origin.x + 1, room.right_x() - 1);
    let y = rng.range(room.origin.y + 1, room.top_y() - 1);
    let start = Pos { x, y };
    grid.set_tile(start, Tile::Avatar);
    start
}
