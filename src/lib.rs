//! Gloomveil - tile dungeon core
//!
//! Builds a typed tile grid from a raw room/corridor layout, picks wall art
//! from each tile's neighbourhood, and drives a shadow-cast fog of war that
//! fades in and out around a moving observer.

pub mod config;
pub mod error;
pub mod dungeon;
pub mod world;
pub mod game;
pub mod render;
pub mod ui;

// Re-export commonly used types
pub use config::{Config, DungeonSettings, FogSettings};
pub use dungeon::Dungeon;
pub use error::{ConfigError, GridError};
pub use world::{GridBuilder, Position, RawLayout, Rect, Tile, TileGrid, TileType, VisibilityField};
