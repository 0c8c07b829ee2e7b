//! Dungeon
//!
//! The surface a renderer or physics layer polls: tile queries, art
//! selection, fog opacity, door opening and the per-frame update.

use crate::config::FogSettings;
use crate::error::GridError;
use crate::world::autotile;
use crate::world::{GridBuilder, Position, RawLayout, Rect, Tile, TileGrid, VisibilityField};

/// A tile grid together with its fog of war
#[derive(Debug, Clone)]
pub struct Dungeon {
    grid: TileGrid,
    visibility: VisibilityField,
}

impl Dungeon {
    pub fn new(grid: TileGrid, fog: FogSettings) -> Self {
        Self {
            grid,
            visibility: VisibilityField::new(fog),
        }
    }

    /// Build from a layout covering its full declared size
    pub fn from_layout(layout: &RawLayout, fog: FogSettings) -> Result<Self, GridError> {
        let grid = GridBuilder::build(layout, layout.width, layout.height)?;
        Ok(Self::new(grid, fog))
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid.tile_at(x, y)
    }

    pub fn collides(&self, x: i32, y: i32) -> bool {
        self.grid.collides(x, y)
    }

    /// Tileset index for the tile at a position
    pub fn variant_index(&self, x: i32, y: i32) -> Result<u16, GridError> {
        autotile::variant_index(&self.grid, x, y)
    }

    /// Rendered fog opacity at a position
    pub fn current_alpha(&self, x: i32, y: i32) -> Option<f32> {
        self.grid.tile_at(x, y).map(|t| t.current_alpha)
    }

    /// Open the door at a position. The caller decides when to
    /// [`invalidate_visibility`](Self::invalidate_visibility) and re-render.
    pub fn open(&mut self, x: i32, y: i32) -> bool {
        self.grid.open(x, y)
    }

    pub fn invalidate_visibility(&mut self) {
        self.visibility.invalidate();
    }

    /// Advance the fog of war by one frame
    pub fn update(&mut self, observer: Position, viewport: Rect, delta_ms: f32) -> Result<bool, GridError> {
        self.visibility.update(&mut self.grid, observer, viewport, delta_ms)
    }
}
