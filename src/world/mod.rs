//! World module
//!
//! Contains the tile grid, its construction, autotiling, field of view and
//! the fog of war.

pub mod geometry;
pub mod tile;
pub mod grid;
pub mod builder;
pub mod autotile;
pub mod fov;
pub mod visibility;
pub mod generation;

pub use geometry::{Position, Rect};
pub use tile::{Tile, TileType};
pub use grid::{Neighbours, TileGrid};
pub use builder::{GridBuilder, RawLayout};
pub use autotile::{variant_index, WallShape};
pub use fov::compute_fov;
pub use visibility::VisibilityField;
