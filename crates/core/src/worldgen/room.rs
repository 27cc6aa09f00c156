//! Axis-aligned rectangular rooms: random generation, overlap and distance
//! queries, and enumeration of floor cells.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

use super::rng::GenRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub width: i32,
    pub height: i32,
    /// Bottom-left corner.
    pub origin: Pos,
}

impl Room {
    pub fn new(width: i32, height: i32, origin: Pos) -> Room {
        Room { width, height, origin }
    }

    /// Draw dimensions uniformly from `[min_dim, max_dim)` and an origin so
    /// the room fits inside the grid. Overlap rejection is the caller's job.
    pub fn generate(
        min_dim: i32,
        max_dim: i32,
        grid_width: i32,
        grid_height: i32,
        rng: &mut GenRng,
    ) -> Room {
        let width = rng.range(min_dim, max_dim);
        let height = rng.range(min_dim, max_dim);
        let x = rng.range(0, grid_width - width);
        let y = rng.range(0, grid_height - height);
        Room::new(width, height, Pos { x, y })
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn left_x(&self) -> i32 {
        self.origin.x
    }

    pub fn right_x(&self) -> i32 {
        self.origin.x + self.width - 1
    }

    pub fn bottom_y(&self) -> i32 {
        self.origin.y
    }

    pub fn top_y(&self) -> i32 {
        self.origin.y + self.height - 1
    }

    pub fn center(&self) -> Pos {
        Pos { x: self.origin.x + self.width / 2, y: self.origin.y + self.height / 2 }
    }

    /// Strict interior overlap. Rectangles that only share an edge line do
    /// not collide, and a room never collides with itself.
    pub fn collides_with(&self, other: &Room) -> bool {
        if self == other {
            return false;
        }
        self.origin.x < other.origin.x + other.width
            && self.origin.x + self.width > other.origin.x
            && self.origin.y < other.origin.y + other.height
            && self.origin.y + self.height > other.origin.y
    }

    /// Manhattan distance between integer-rounded centers. A connection
    /// heuristic only, not a metric.
    pub fn distance_to(&self, other: &Room) -> i32 {
        let a = self.center();
        let b = other.center();
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    /// Floor cells of the room, excluding its bottom row and left column.
    /// Walls are inferred just outside the floor set during rasterization.
    pub fn floor_tiles(self) -> impl Iterator<Item = Pos> {
        let (left, right) = (self.origin.x + 1, self.right_x());
        let (bottom, top) = (self.origin.y + 1, self.top_y());
        (bottom..=top).flat_map(move |y| (left..=right).map(move |x| Pos { x, y }))
    }
}
