//! Hallways: one-tile-wide paths of at most two axis-aligned segments
//! joining two rooms, plus the geometric case analysis that picks them.

use serde::{Deserialize, Serialize};

use crate::types::{GenError, Pos};

use super::rng::GenRng;
use super::room::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hallway {
    start: Pos,
    end: Pos,
    turn: Option<Pos>,
}

impl Hallway {
    /// A zero-turn hallway. Fails on misaligned or zero-length segments.
    pub fn straight(start: Pos, end: Pos) -> Result<Hallway, GenError> {
        segment_check(start, end)?;
        Ok(Hallway { start, end, turn: None })
    }

    /// An L-shaped hallway whose two segments meet at `turn`.
    pub fn with_turn(start: Pos, turn: Pos, end: Pos) -> Result<Hallway, GenError> {
        segment_check(start, turn)?;
        segment_check(turn, end)?;
        Ok(Hallway { start, end, turn: Some(turn) })
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn turn(&self) -> Option<Pos> {
        self.turn
    }

    pub fn has_turn(&self) -> bool {
        self.turn.is_some()
    }

    /// Classify the room pair and build a connecting hallway.
    ///
    /// When the rooms' y-extents overlap by more than one row on both sides
    /// a straight horizontal hallway joins their facing x-edges; the x-extent
    /// case is symmetric. Otherwise the hallway takes one turn, with a coin
    /// flip deciding which axis it leaves the first room along.
    pub fn generate(r1: &Room, r2: &Room, rng: &mut GenRng) -> Result<Hallway, GenError> {
        if r1.top_y() - 1 > r2.bottom_y() && r2.top_y() - 1 > r1.bottom_y() {
            Self::horizontal(r1, r2, rng)
        } else if r1.right_x() - 1 > r2.left_x() && r2.right_x() - 1 > r1.left_x() {
            Self::vertical(r1, r2, rng)
        } else {
            Self::l_shaped(r1, r2, rng)
        }
    }

    fn horizontal(r1: &Room, r2: &Room, rng: &mut GenRng) -> Result<Hallway, GenError> {
        // rows strictly inside both rooms' vertical extents
        let from = r1.bottom_y().max(r2.bottom_y()) + 1;
        let to = (r1.bottom_y() + r1.height).min(r2.bottom_y() + r2.height) - 1;
        let y = checked_range(rng, from, to)?;
        if r1.origin.x < r2.origin.x {
            Self::straight(Pos { x: r1.right_x(), y }, Pos { x: r2.left_x(), y })
        } else {
            Self::straight(Pos { x: r2.right_x(), y }, Pos { x: r1.left_x(), y })
        }
    }

    fn vertical(r1: &Room, r2: &Room, rng: &mut GenRng) -> Result<Hallway, GenError> {
        let from = r1.left_x().max(r2.left_x()) + 1;
        let to = (r1.left_x() + r1.width).min(r2.left_x() + r2.width) - 1;
        let x = checked_range(rng, from, to)?;
        if r1.origin.y < r2.origin.y {
            Self::straight(Pos { x, y: r1.top_y() }, Pos { x, y: r2.bottom_y() })
        } else {
            Self::straight(Pos { x, y: r2.top_y() }, Pos { x, y: r1.bottom_y() })
        }
    }

    /// The turn coordinate on each random axis is clamped so the first
    /// segment leaves room one cleanly and the second lands strictly inside
    /// room two's facing edge.
    fn l_shaped(r1: &Room, r2: &Room, rng: &mut GenRng) -> Result<Hallway, GenError> {
        if rng.coin_flip() {
            // vertical leg out of r1's top or bottom edge, then horizontal into r2
            let start_x = if r1.origin.x < r2.origin.x {
                checked_range(rng, r1.left_x() + 1, r1.right_x().min(r2.left_x()))?
            } else {
                checked_range(rng, (r1.left_x() + 1).max(r2.right_x() + 1), r1.right_x())?
            };
            let start_y = if r1.origin.y < r2.origin.y { r1.top_y() } else { r1.bottom_y() };
            let end_y = if r1.origin.y < r2.origin.y {
                checked_range(rng, (r2.bottom_y() + 1).max(r1.top_y() + 1), r2.top_y())?
            } else {
                checked_range(rng, r2.bottom_y() + 1, r2.top_y().min(r1.bottom_y()))?
            };
            let end_x = if r1.origin.x < r2.origin.x { r2.left_x() } else { r2.right_x() };
            Self::with_turn(
                Pos { x: start_x, y: start_y },
                Pos { x: start_x, y: end_y },
                Pos { x: end_x, y: end_y },
            )
        } else {
            // horizontal leg out of r1's left or right edge, then vertical into r2
            let start_y = if r1.origin.y < r2.origin.y {
                checked_range(rng, r1.bottom_y() + 1, r1.top_y().min(r2.bottom_y()))?
            } else {
                checked_range(rng, (r1.bottom_y() + 1).max(r2.top_y() + 1), r1.top_y())?
            };
            let start_x = if r1.origin.x < r2.origin.x { r1.right_x() } else { r1.left_x() };
            let end_x = if r1.origin.x < r2.origin.x {
                checked_range(rng, (r2.left_x() + 1).max(r1.right_x() + 1), r2.right_x())?
            } else {
                checked_range(rng, r2.left_x() + 1, r2.right_x().min(r1.left_x()))?
            };
            let end_y = if r1.origin.y < r2.origin.y { r2.bottom_y() } else { r2.top_y() };
            Self::with_turn(
                Pos { x: start_x, y: start_y },
                Pos { x: end_x, y: start_y },
                Pos { x: end_x, y: end_y },
            )
        }
    }

    /// Cells of the hallway, one unit step at a time from `start` to `end`.
    pub fn tiles(&self) -> HallwayTiles {
        HallwayTiles { cursor: Some(self.start), waypoint: self.turn, end: self.end }
    }
}

fn segment_check(a: Pos, b: Pos) -> Result<(), GenError> {
    let aligned = a.x == b.x || a.y == b.y;
    if !aligned || a == b {
        return Err(GenError::DegenerateHallway);
    }
    Ok(())
}

fn checked_range(rng: &mut GenRng, lo: i32, hi: i32) -> Result<i32, GenError> {
    if lo >= hi {
        return Err(GenError::DegenerateHallway);
    }
    Ok(rng.range(lo, hi))
}

/// Walks segment one and then segment two. The turn cell is yielded once at
/// the end of the first segment and once at the start of the second; floor
/// marking is idempotent, so the duplicate is harmless.
pub struct HallwayTiles {
    cursor: Option<Pos>,
    waypoint: Option<Pos>,
    end: Pos,
}

impl Iterator for HallwayTiles {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let current = self.cursor?;
        let target = self.waypoint.unwrap_or(self.end);
        if current == target {
            if self.waypoint.take().is_none() {
                self.cursor = None;
            }
            // when a waypoint was consumed the cursor stays on the turn cell
            // and the next call begins the second segment from it
            return Some(current);
        }
        self.cursor = Some(step_toward(current, target));
        Some(current)
    }
}

fn step_toward(from: Pos, to: Pos) -> Pos {
    if from.x == to.x {
        Pos { x: from.x, y: from.y + (to.y - from.y).signum() }
    } else {
        Pos { x: from.x + (to.x - from.x).signum(), y: from.y }
    }
}
