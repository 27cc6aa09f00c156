//! The live world: tile grid, avatar state, move log, and the fog-of-war
//! view. Generation happens once at construction; afterwards only the avatar
//! cell and the sight flag ever change.

use std::borrow::Cow;
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::grid::{TileGrid, manhattan};
use crate::save;
use crate::types::{Command, Direction, GenError, LoadError, Pos, Tile};
use crate::worldgen::{GenRng, GeneratedWorld, Hallway, Room, WorldGenerator};

/// Manhattan radius of the fog-limited view.
pub const SIGHT_RADIUS: u32 = 8;

pub struct World {
    grid: TileGrid,
    rooms: Vec<Room>,
    hallways: Vec<Hallway>,
    seed: u64,
    avatar: Pos,
    avatar_start: Pos,
    sight_limit: bool,
    move_log: Vec<Command>,
}

impl World {
    /// Generate a fresh world. The only other way to obtain a `World` is
    /// [`World::load`].
    pub fn new(seed: u64, height: usize, width: usize) -> Result<World, GenError> {
        let mut rng = GenRng::new(seed);
        let generated = WorldGenerator::new(width, height).generate(&mut rng)?;
        Ok(World::from_generated(seed, generated))
    }

    /// Regenerate the world recorded in `input` and replay its move log.
    pub fn load(input: &str, height: usize, width: usize) -> Result<World, LoadError> {
        save::load(input, height, width)
    }

    fn from_generated(seed: u64, generated: GeneratedWorld) -> World {
        World {
            grid: generated.grid,
            rooms: generated.rooms,
            hallways: generated.hallways,
            seed,
            avatar: generated.avatar_start,
            avatar_start: generated.avatar_start,
            sight_limit: false,
            move_log: Vec::new(),
        }
    }

    /// Try to step the avatar; a successful move is appended to the log.
    /// Anything but a `Floor` target (walls, voids, out of bounds) rejects
    /// the move and leaves the grid untouched.
    pub fn move_avatar(&mut self, direction: Direction) -> bool {
        if self.step(direction) {
            self.move_log.push(Command::Move(direction));
            return true;
        }
        false
    }

    /// Remove the last logged command and revert its effect. The reverting
    /// step itself is not logged, so the undone command leaves no trace.
    pub fn undo_move(&mut self) {
        match self.move_log.pop() {
            Some(Command::Move(direction)) => {
                self.step(direction.inverse());
            }
            Some(Command::ToggleSight) => {
                self.sight_limit = !self.sight_limit;
            }
            None => {}
        }
    }

    pub fn toggle_sight_limit(&mut self) {
        self.move_log.push(Command::ToggleSight);
        self.sight_limit = !self.sight_limit;
    }

    /// Dispatch one logged command through its entry point. Replay uses this
    /// so a loaded world matches the saved one, sight toggles included.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => self.move_avatar(direction),
            Command::ToggleSight => {
                self.toggle_sight_limit();
                true
            }
        }
    }

    fn step(&mut self, direction: Direction) -> bool {
        let target = self.avatar.stepped(direction);
        if self.grid.tile_at(target) != Tile::Floor {
            return false;
        }
        self.grid.set_tile(self.avatar, Tile::Floor);
        self.avatar = target;
        self.grid.set_tile(target, Tile::Avatar);
        true
    }

    /// The grid as the renderer should see it: the full grid when the sight
    /// limit is off, otherwise a derived copy with every cell beyond
    /// [`SIGHT_RADIUS`] of the avatar blanked to `Nothing`.
    pub fn view(&self) -> Cow<'_, TileGrid> {
        if !self.sight_limit {
            return Cow::Borrowed(&self.grid);
        }
        let mut limited = TileGrid::new(self.grid.width(), self.grid.height());
        for y in 0..self.grid.height() as i32 {
            for x in 0..self.grid.width() as i32 {
                let pos = Pos { x, y };
                if manhattan(self.avatar, pos) <= SIGHT_RADIUS {
                    limited.set_tile(pos, self.grid.tile_at(pos));
                }
            }
        }
        Cow::Owned(limited)
    }

    pub fn save_string(&self) -> String {
        save::encode(self.seed, &self.move_log)
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_i32(self.avatar.x);
        hasher.write_i32(self.avatar.y);
        hasher.write_u8(u8::from(self.sight_limit));
        for command in &self.move_log {
            hasher.write_u8(command.key() as u8);
        }
        hasher.write(&self.grid.canonical_bytes());
        hasher.finish()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn avatar(&self) -> Pos {
        self.avatar
    }

    pub fn avatar_start(&self) -> Pos {
        self.avatar_start
    }

    pub fn sight_limit(&self) -> bool {
        self.sight_limit
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn move_log(&self) -> &[Command] {
        &self.move_log
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 5x5 open chamber: floors in the 3x3 middle, avatar at the center,
    /// walls on the ring. No rooms or hallways; movement rules do not care.
    fn chamber() -> World {
        let mut grid = TileGrid::new(5, 5);
        for y in 1..4 {
            for x in 1..4 {
                grid.set_tile(Pos { x, y }, Tile::Floor);
            }
        }
        for y in 0..5 {
            for x in 0..5 {
                if x == 0 || x == 4 || y == 0 || y == 4 {
                    grid.set_tile(Pos { x, y }, Tile::Wall);
                }
            }
        }
        let start = Pos { x: 2, y: 2 };
        grid.set_tile(start, Tile::Avatar);
        World::from_generated(
            77,
            GeneratedWorld { grid, rooms: Vec::new(), hallways: Vec::new(), avatar_start: start },
        )
    }

    /// A single floor cell in the grid corner, so every direction leads
    /// either out of bounds or into `Nothing`.
    fn corner_cell() -> World {
        let mut grid = TileGrid::new(3, 3);
        let start = Pos { x: 0, y: 0 };
        grid.set_tile(start, Tile::Avatar);
        World::from_generated(
            5,
            GeneratedWorld { grid, rooms: Vec::new(), hallways: Vec::new(), avatar_start: start },
        )
    }

    #[test]
    fn successful_move_swaps_the_avatar_and_floor_cells() {
        let mut world = chamber();
        assert!(world.move_avatar(Direction::Right));
        assert_eq!(world.avatar(), Pos { x: 3, y: 2 });
        assert_eq!(world.grid().tile_at(Pos { x: 2, y: 2 }), Tile::Floor);
        assert_eq!(world.grid().tile_at(Pos { x: 3, y: 2 }), Tile::Avatar);
        assert_eq!(world.move_log(), &[Command::Move(Direction::Right)]);
    }

    #[test]
    fn blocked_moves_change_nothing_and_log_nothing() {
        let mut world = chamber();
        // two steps right: the second target is a wall
        assert!(world.move_avatar(Direction::Right));
        let before = world.grid().clone();
        assert!(!world.move_avatar(Direction::Right));
        assert_eq!(world.grid(), &before);
        assert_eq!(world.move_log().len(), 1);
    }

    #[test]
    fn moves_into_void_or_out_of_bounds_are_rejected() {
        let mut world = corner_cell();
        let before = world.grid().clone();
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!world.move_avatar(direction), "{direction:?} should be rejected");
        }
        assert_eq!(world.grid(), &before);
        assert!(world.move_log().is_empty());
    }

    #[test]
    fn undo_restores_the_prior_position_without_logging() {
        let mut world = chamber();
        world.move_avatar(Direction::Up);
        world.move_avatar(Direction::Left);
        world.undo_move();
        assert_eq!(world.avatar(), Pos { x: 2, y: 3 });
        assert_eq!(world.move_log(), &[Command::Move(Direction::Up)]);
        world.undo_move();
        assert_eq!(world.avatar(), Pos { x: 2, y: 2 });
        assert!(world.move_log().is_empty());
    }

    #[test]
    fn undo_on_an_empty_log_is_a_no_op() {
        let mut world = chamber();
        let before = world.grid().clone();
        world.undo_move();
        assert_eq!(world.grid(), &before);
        assert_eq!(world.avatar(), Pos { x: 2, y: 2 });
    }

    #[test]
    fn undo_reverts_a_sight_toggle() {
        let mut world = chamber();
        world.toggle_sight_limit();
        assert!(world.sight_limit());
        world.undo_move();
        assert!(!world.sight_limit());
        assert!(world.move_log().is_empty());
    }

    #[test]
    fn view_is_the_full_grid_until_the_limit_is_toggled() {
        let mut world = chamber();
        assert!(matches!(world.view(), Cow::Borrowed(_)));
        assert_eq!(world.view().as_ref(), world.grid());
        world.toggle_sight_limit();
        assert!(matches!(world.view(), Cow::Owned(_)));
    }

    #[test]
    fn limited_view_blanks_cells_beyond_the_sight_radius() {
        let mut world = World::new(42, 30, 70).expect("generation");
        world.toggle_sight_limit();
        let view = world.view();
        let avatar = world.avatar();
        for y in 0..30_i32 {
            for x in 0..70_i32 {
                let pos = Pos { x, y };
                if manhattan(avatar, pos) > SIGHT_RADIUS {
                    assert_eq!(view.tile_at(pos), Tile::Nothing, "leak at {pos:?}");
                } else {
                    assert_eq!(view.tile_at(pos), world.grid().tile_at(pos), "lost {pos:?}");
                }
            }
        }
    }

    #[test]
    fn replaying_the_log_reproduces_the_avatar_position() {
        let mut world = World::new(2024, 30, 70).expect("generation");
        let script = [
            Direction::Up,
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        for direction in script {
            world.move_avatar(direction);
        }
        world.undo_move();

        let mut replayed = World::new(2024, 30, 70).expect("generation");
        assert_eq!(replayed.avatar(), world.avatar_start());
        for &command in world.move_log() {
            replayed.apply(command);
        }
        assert_eq!(replayed.avatar(), world.avatar());
        assert_eq!(replayed.grid(), world.grid());
    }
}
