//! Flat tile grid storage and the coordinate helpers shared by generation,
//! movement, and visibility filtering.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Tile};

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Row-major `width x height` grid of tiles. After generation it is owned by
/// the world and mutated only through avatar movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![Tile::Nothing; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Out-of-bounds reads come back as `Nothing`, which no movement or wall
    /// rule ever accepts.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Nothing;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    /// Stable byte encoding for fingerprinting and determinism checks.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                Tile::Nothing => 0,
                Tile::Floor => 1,
                Tile::Wall => 2,
                Tile::Avatar => 3,
            });
        }
        bytes
    }

    /// ASCII rendering with the top row first, for the CLI and for test
    /// failure diagnostics.
    pub fn render(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                text.push(match self.tile_at(Pos { x, y }) {
                    Tile::Nothing => ' ',
                    Tile::Floor => '.',
                    Tile::Wall => '#',
                    Tile::Avatar => '@',
                });
            }
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_nothing_and_writes_are_ignored() {
        let mut grid = TileGrid::new(4, 3);
        for pos in [
            Pos { x: -1, y: 0 },
            Pos { x: 0, y: -1 },
            Pos { x: 4, y: 0 },
            Pos { x: 0, y: 3 },
        ] {
            assert_eq!(grid.tile_at(pos), Tile::Nothing);
            grid.set_tile(pos, Tile::Floor);
        }
        assert_eq!(grid, TileGrid::new(4, 3));
    }

    #[test]
    fn set_and_read_back_round_trips() {
        let mut grid = TileGrid::new(5, 5);
        grid.set_tile(Pos { x: 2, y: 3 }, Tile::Wall);
        assert_eq!(grid.tile_at(Pos { x: 2, y: 3 }), Tile::Wall);
        assert_eq!(grid.tile_at(Pos { x: 3, y: 2 }), Tile::Nothing);
    }

    #[test]
    fn render_puts_the_top_row_first() {
        let mut grid = TileGrid::new(2, 2);
        grid.set_tile(Pos { x: 0, y: 1 }, Tile::Avatar);
        grid.set_tile(Pos { x: 1, y: 0 }, Tile::Floor);
        assert_eq!(grid.render(), "@ \n .\n");
    }

    #[test]
    fn canonical_bytes_distinguishes_tile_changes() {
        let mut left = TileGrid::new(3, 3);
        let right = left.clone();
        assert_eq!(left.canonical_bytes(), right.canonical_bytes());
        left.set_tile(Pos { x: 1, y: 1 }, Tile::Floor);
        assert_ne!(left.canonical_bytes(), right.canonical_bytes());
    }
}
