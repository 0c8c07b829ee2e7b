//! Tile definitions
//!
//! Tile kinds and the per-cell state the fog of war animates.

use serde::{Deserialize, Serialize};

/// Fog opacity of a cell that has never been revealed
pub const UNSEEN_ALPHA: f32 = 1.0;

/// A single tile in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub tile_type: TileType,
    /// Blocks movement and sight
    pub collides: bool,
    /// Lies outside every room and its border
    pub corridor: bool,
    /// Has been inside a visibility sweep at least once
    pub seen: bool,
    /// Fog opacity the overlay is fading toward
    pub desired_alpha: f32,
    /// Fog opacity currently rendered
    pub current_alpha: f32,
}

impl Tile {
    pub fn new(tile_type: TileType, corridor: bool) -> Self {
        Self {
            tile_type,
            collides: tile_type != TileType::None,
            corridor,
            seen: false,
            desired_alpha: UNSEEN_ALPHA,
            current_alpha: UNSEEN_ALPHA,
        }
    }

    /// Make a door passable. Returns true only on the call that opened it.
    pub fn open(&mut self) -> bool {
        if self.tile_type == TileType::Door && self.collides {
            self.collides = false;
            true
        } else {
            false
        }
    }

    pub fn is_wall(&self) -> bool {
        self.tile_type == TileType::Wall
    }

    pub fn is_door(&self) -> bool {
        self.tile_type == TileType::Door
    }

    /// A door that has been opened
    pub fn is_open_door(&self) -> bool {
        self.is_door() && !self.collides
    }

    /// Blocks line of sight
    pub fn is_opaque(&self) -> bool {
        self.collides
    }
}

/// Kinds of tiles in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Floor, or anything the layout does not name
    #[default]
    None,
    Wall,
    Door,
}

impl TileType {
    /// Map a layout cell tag to a tile type. Unknown tags become `None`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "wall" => TileType::Wall,
            "door" => TileType::Door,
            _ => TileType::None,
        }
    }
}
