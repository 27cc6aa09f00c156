use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn stepped(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { x: self.x + dx, y: self.y + dy }
    }
}

/// One grid cell's semantic type. The grid is the single source of truth for
/// occupancy; there is no separate wall set or avatar marker elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    Nothing,
    Floor,
    Wall,
    Avatar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn inverse(self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A state-changing command as recorded in the move log. The char mapping is
/// the save-string alphabet: `w`/`a`/`s`/`d` for movement, `t` for the sight
/// toggle. Undo is not a command; it removes log entries instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    ToggleSight,
}

impl Command {
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            'w' => Some(Self::Move(Direction::Up)),
            's' => Some(Self::Move(Direction::Down)),
            'a' => Some(Self::Move(Direction::Left)),
            'd' => Some(Self::Move(Direction::Right)),
            't' => Some(Self::ToggleSight),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Self::Move(Direction::Up) => 'w',
            Self::Move(Direction::Down) => 's',
            Self::Move(Direction::Left) => 'a',
            Self::Move(Direction::Right) => 'd',
            Self::ToggleSight => 't',
        }
    }
}

/// Describes why world generation could not produce a valid world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenError {
    /// The grid cannot fit even a maximum-size room.
    GridTooSmall { width: usize, height: usize },
    /// Room placement failed to reach the area threshold within the
    /// attempt budget.
    PlacementBudgetExhausted { attempts: u32 },
    /// A hallway's segments are misaligned or zero-length. This signals a
    /// defect in the geometric case analysis, not a runtime condition.
    DegenerateHallway,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} is too small for the minimum room size")
            }
            Self::PlacementBudgetExhausted { attempts } => {
                write!(f, "room placement did not reach the area threshold in {attempts} attempts")
            }
            Self::DegenerateHallway => {
                write!(f, "hallway segments must be axis-aligned and non-zero-length")
            }
        }
    }
}

/// Describes why a save string could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The save string does not start with the `n` prefix.
    MissingPrefix,
    /// No `s` delimiter terminating the seed digits.
    MissingSeedDelimiter,
    /// The seed between `n` and `s` is not a decimal number.
    InvalidSeed,
    /// A character after the delimiter is not part of the command alphabet.
    UnknownCommand(char),
    /// Regenerating the world from the parsed seed failed.
    Generation(GenError),
}

impl From<GenError> for LoadError {
    fn from(error: GenError) -> Self {
        Self::Generation(error)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => write!(f, "save string must start with 'n'"),
            Self::MissingSeedDelimiter => write!(f, "save string has no 's' seed delimiter"),
            Self::InvalidSeed => write!(f, "save string seed is not a decimal number"),
            Self::UnknownCommand(key) => write!(f, "unknown command character {key:?}"),
            Self::Generation(error) => write!(f, "world regeneration failed: {error}"),
        }
    }
}
