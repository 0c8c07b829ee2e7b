//! Autotiling
//!
//! Picks a tileset index for each tile from its neighbourhood so that wall
//! art forms continuous runs and corners. Room walls and corridor walls are
//! styled separately and never join into one run.

use super::grid::{Neighbours, TileGrid};
use super::tile::{Tile, TileType};
use crate::error::GridError;

/// Tileset indices for the environment sheet
pub mod indices {
    pub const WALL_ALONE: u16 = 0x14;
    pub const WALL_E_S: u16 = 0x00;
    pub const WALL_N_E_S_W: u16 = 0x01;
    pub const WALL_E_W: u16 = 0x02;
    pub const WALL_S_W: u16 = 0x03;
    pub const WALL_N_E_S: u16 = 0x10;
    pub const WALL_W: u16 = 0x11;
    pub const WALL_E: u16 = 0x12;
    pub const WALL_N_S_W: u16 = 0x13;
    pub const WALL_N_S: u16 = 0x20;
    pub const WALL_S: u16 = 0x21;
    pub const WALL_E_S_W: u16 = 0x22;
    pub const WALL_N_E: u16 = 0x30;
    pub const WALL_N_E_W: u16 = 0x31;
    pub const WALL_N: u16 = 0x32;
    pub const WALL_N_W: u16 = 0x33;
    pub const WALL_E_DOOR: u16 = 0x65;
    pub const WALL_W_DOOR: u16 = 0x67;

    pub const DOOR_HORIZONTAL: u16 = 0x81;
    pub const DOOR_VERTICAL: u16 = 0x92;
    pub const DOOR_DESTROYED: u16 = 0x35;

    /// Room floor art, repeated entries weight the random pick
    pub const FLOOR_ROOM: [u16; 6] = [0x05, 0x05, 0x05, 0x15, 0x07, 0x17];
    pub const FLOOR_CORRIDOR: [u16; 6] = [0x0d, 0x0d, 0x0d, 0x1d, 0x0f, 0x1f];

    /// Distance from a room wall variant to its corridor-styled twin
    pub const CORRIDOR_OFFSET: u16 = 8;
}

/// Bit flags describing which sides of a wall continue the run
pub mod side {
    pub const N: u8 = 1 << 0;
    pub const E: u8 = 1 << 1;
    pub const S: u8 = 1 << 2;
    pub const W: u8 = 1 << 3;
    /// A door (open or not) to the east
    pub const DOOR_E: u8 = 1 << 4;
    /// A door (open or not) to the west
    pub const DOOR_W: u8 = 1 << 5;
}

/// Geometric shape of a wall run through a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallShape {
    Cross,
    NorthEastSouth,
    NorthSouthWest,
    EastSouthWest,
    NorthEastWest,
    EastSouth,
    EastWest,
    SouthWest,
    NorthSouth,
    NorthEast,
    NorthWest,
    DoorToEast,
    DoorToWest,
    North,
    South,
    East,
    West,
    Alone,
}

impl WallShape {
    /// Room-styled tileset index for this shape
    pub fn base_index(self) -> u16 {
        use indices::*;
        match self {
            WallShape::Cross => WALL_N_E_S_W,
            WallShape::NorthEastSouth => WALL_N_E_S,
            WallShape::NorthSouthWest => WALL_N_S_W,
            WallShape::EastSouthWest => WALL_E_S_W,
            WallShape::NorthEastWest => WALL_N_E_W,
            WallShape::EastSouth => WALL_E_S,
            WallShape::EastWest => WALL_E_W,
            WallShape::SouthWest => WALL_S_W,
            WallShape::NorthSouth => WALL_N_S,
            WallShape::NorthEast => WALL_N_E,
            WallShape::NorthWest => WALL_N_W,
            WallShape::DoorToEast => WALL_E_DOOR,
            WallShape::DoorToWest => WALL_W_DOOR,
            WallShape::North => WALL_N,
            WallShape::South => WALL_S,
            WallShape::East => WALL_E,
            WallShape::West => WALL_W,
            WallShape::Alone => WALL_ALONE,
        }
    }

    /// Shape drawn by a wall index, room or corridor styled
    pub fn from_index(index: u16) -> Option<WallShape> {
        WALL_RULES.iter().map(|(_, shape)| *shape).find(|shape| {
            let base = shape.base_index();
            index == base || index == base + indices::CORRIDOR_OFFSET
        })
    }
}

/// Wall classification rules. A rule applies when every side it requires is
/// present; the first rule that applies wins, so the order matters.
pub const WALL_RULES: [(u8, WallShape); 18] = {
    use side::*;
    [
        (N | E | S | W, WallShape::Cross),
        (N | E | S, WallShape::NorthEastSouth),
        (N | S | W, WallShape::NorthSouthWest),
        (E | S | W, WallShape::EastSouthWest),
        (N | E | W, WallShape::NorthEastWest),
        (E | S, WallShape::EastSouth),
        (E | W, WallShape::EastWest),
        (S | W, WallShape::SouthWest),
        (N | S, WallShape::NorthSouth),
        (N | E, WallShape::NorthEast),
        (N | W, WallShape::NorthWest),
        (W | DOOR_E, WallShape::DoorToEast),
        (E | DOOR_W, WallShape::DoorToWest),
        (N, WallShape::North),
        (S, WallShape::South),
        (E, WallShape::East),
        (W, WallShape::West),
        (0, WallShape::Alone),
    ]
};

/// Shape selected by the first rule whose required sides are all in `mask`
pub fn wall_shape(mask: u8) -> WallShape {
    WALL_RULES
        .iter()
        .find(|(required, _)| mask & required == *required)
        .map_or(WallShape::Alone, |(_, shape)| *shape)
}

/// A wall of the same kind (room or corridor) as `subject`
fn is_matching_wall(subject: &Tile, neighbour: Option<&Tile>) -> bool {
    neighbour.map_or(false, |t| t.is_wall() && t.corridor == subject.corridor)
}

/// Side flags for `tile` given its neighbours. Diagonals are not consulted.
pub fn side_mask(tile: &Tile, neighbours: &Neighbours<'_>) -> u8 {
    let mut mask = 0;
    if is_matching_wall(tile, neighbours.n) {
        mask |= side::N;
    }
    if is_matching_wall(tile, neighbours.e) {
        mask |= side::E;
    }
    if is_matching_wall(tile, neighbours.s) {
        mask |= side::S;
    }
    if is_matching_wall(tile, neighbours.w) {
        mask |= side::W;
    }
    if neighbours.e.map_or(false, Tile::is_door) {
        mask |= side::DOOR_E;
    }
    if neighbours.w.map_or(false, Tile::is_door) {
        mask |= side::DOOR_W;
    }
    mask
}

/// Tileset index for a tile and its neighbourhood
pub fn classify(tile: &Tile, neighbours: &Neighbours<'_>) -> u16 {
    let mask = side_mask(tile, neighbours);

    match tile.tile_type {
        TileType::Wall => {
            let base = wall_shape(mask).base_index();
            if tile.corridor {
                base + indices::CORRIDOR_OFFSET
            } else {
                base
            }
        }
        TileType::Door if !tile.collides => indices::DOOR_DESTROYED,
        TileType::Door => {
            if mask & (side::N | side::S) != 0 {
                indices::DOOR_VERTICAL
            } else {
                indices::DOOR_HORIZONTAL
            }
        }
        TileType::None => 0,
    }
}

/// Tileset index for the tile at a position.
///
/// Not cached: callers re-query after a tile or one of its neighbours changes.
pub fn variant_index(grid: &TileGrid, x: i32, y: i32) -> Result<u16, GridError> {
    match (grid.tile_at(x, y), grid.neighbours(x, y)) {
        (Some(tile), Some(neighbours)) => Ok(classify(tile, &neighbours)),
        _ => Err(GridError::MissingNeighborContext { x, y }),
    }
}

/// Candidate floor art for the ground under a position
pub fn floor_choices(grid: &TileGrid, x: i32, y: i32) -> &'static [u16] {
    if grid.within_any_room(x, y) {
        &indices::FLOOR_ROOM
    } else {
        &indices::FLOOR_CORRIDOR
    }
}
