//! Tile grid
//!
//! The 2D array of typed tiles plus the room rectangles it was built from.

use rand::Rng;

use super::geometry::{Position, Rect};
use super::tile::{Tile, TileType};
use crate::error::GridError;

/// A dungeon floor as a fixed-size grid of tiles
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    rooms: Vec<Rect>,
}

/// The up-to-8 tiles around a cell. Out-of-grid neighbours are `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbours<'a> {
    pub n: Option<&'a Tile>,
    pub s: Option<&'a Tile>,
    pub w: Option<&'a Tile>,
    pub e: Option<&'a Tile>,
    pub nw: Option<&'a Tile>,
    pub ne: Option<&'a Tile>,
    pub sw: Option<&'a Tile>,
    pub se: Option<&'a Tile>,
}

impl<'a> Neighbours<'a> {
    pub fn all(&self) -> [Option<&'a Tile>; 8] {
        [self.n, self.s, self.w, self.e, self.nw, self.ne, self.sw, self.se]
    }
}

impl TileGrid {
    /// Create a grid, asking `tile_type` for the type of every cell.
    ///
    /// The corridor flag of each tile is derived from `rooms`.
    pub fn from_fn<F>(width: i32, height: i32, rooms: Vec<Rect>, mut tile_type: F) -> Result<Self, GridError>
    where
        F: FnMut(i32, i32) -> TileType,
    {
        // Tile indices are computed in i32
        let len = match width.checked_mul(height) {
            Some(len) if width > 0 && height > 0 => len as usize,
            _ => return Err(GridError::InvalidDimensions { width, height }),
        };

        let mut grid = Self {
            width,
            height,
            tiles: Vec::with_capacity(len),
            rooms,
        };

        for y in 0..height {
            for x in 0..width {
                let corridor = !grid.within_any_room(x, y);
                grid.tiles.push(Tile::new(tile_type(x, y), corridor));
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The whole grid as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position, `None` outside the grid
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    pub(crate) fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Check if a position blocks movement and sight. Out of bounds does not collide.
    pub fn collides(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).map_or(false, |t| t.collides)
    }

    /// Open the door at a position. Returns true if a closed door was opened.
    pub fn open(&mut self, x: i32, y: i32) -> bool {
        let opened = self.tile_at_mut(x, y).map_or(false, Tile::open);
        if opened {
            log::debug!("Door at ({}, {}) opened", x, y);
        }
        opened
    }

    /// True if the cell lies inside a room or the one-cell border around it
    pub fn within_any_room(&self, x: i32, y: i32) -> bool {
        self.rooms.iter().any(|room| room.inflate(1).contains(x, y))
    }

    /// The 8 tiles around a cell, or `None` if the cell is outside the grid
    pub fn neighbours(&self, x: i32, y: i32) -> Option<Neighbours<'_>> {
        if !self.in_bounds(x, y) {
            return None;
        }

        Some(Neighbours {
            n: self.tile_at(x, y - 1),
            s: self.tile_at(x, y + 1),
            w: self.tile_at(x - 1, y),
            e: self.tile_at(x + 1, y),
            nw: self.tile_at(x - 1, y - 1),
            ne: self.tile_at(x + 1, y - 1),
            sw: self.tile_at(x - 1, y + 1),
            se: self.tile_at(x + 1, y + 1),
        })
    }

    /// Replace a tile with a fresh one of another type
    pub(crate) fn rebuild(&mut self, x: i32, y: i32, tile_type: TileType) {
        let corridor = !self.within_any_room(x, y);
        if let Some(tile) = self.tile_at_mut(x, y) {
            *tile = Tile::new(tile_type, corridor);
        }
    }

    /// Center of a random room, or the grid center if there are no rooms
    pub fn starting_cell<R: Rng>(&self, rng: &mut R) -> Position {
        if self.rooms.is_empty() {
            return Position::new(self.width / 2, self.height / 2);
        }
        let room = self.rooms[rng.gen_range(0..self.rooms.len())];
        room.center()
    }
}
