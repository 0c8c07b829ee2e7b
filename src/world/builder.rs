//! Grid construction
//!
//! Turns a raw room/corridor layout from an external generator into a
//! [`TileGrid`], then prunes walls that can never be seen.

use serde::{Deserialize, Serialize};

use super::geometry::{Position, Rect};
use super::grid::TileGrid;
use super::tile::TileType;
use crate::error::GridError;

/// A layout as produced by a dungeon generator: per-cell type tags
/// (`"wall"`, `"door"`, anything else is floor) in row-major order, plus
/// the room rectangles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLayout {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<Rect>,
}

impl RawLayout {
    /// A layout of the given size with every cell set to `tag`
    pub fn filled(width: i32, height: i32, tag: &str) -> Self {
        let len = cell_count(width.max(0), height.max(0)).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![tag.to_string(); len],
            rooms: Vec::new(),
        }
    }

    /// Parse a layout drawn as text: `#` wall, `+` door, anything else floor
    pub fn from_ascii(rows: &[&str], rooms: Vec<Rect>) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut cells = Vec::with_capacity((width * height) as usize);

        for row in rows {
            let mut chars = row.chars();
            for _ in 0..width {
                let tag = match chars.next() {
                    Some('#') => "wall",
                    Some('+') => "door",
                    _ => "floor",
                };
                cells.push(tag.to_string());
            }
        }

        Self { width, height, cells, rooms }
    }

    pub fn tag_at(&self, x: i32, y: i32) -> Option<&str> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize).map(String::as_str)
    }

    pub fn set_tag(&mut self, x: i32, y: i32, tag: &str) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        if let Some(cell) = self.cells.get_mut(y as usize * self.width as usize + x as usize) {
            *cell = tag.to_string();
        }
    }
}

/// Builds tile grids from raw layouts
pub struct GridBuilder;

impl GridBuilder {
    /// Build a `width` x `height` grid from the top-left corner of `layout`
    /// and prune enclosed walls.
    pub fn build(layout: &RawLayout, width: i32, height: i32) -> Result<TileGrid, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }

        let expected = cell_count(width, height).ok_or(GridError::InvalidDimensions { width, height })?;
        let backed = cell_count(layout.width.max(0), layout.height.max(0)).unwrap_or(usize::MAX);
        if layout.width < width || layout.height < height || layout.cells.len() < backed {
            return Err(GridError::LayoutSizeMismatch {
                expected,
                found: layout.cells.len().min(backed),
            });
        }

        let mut grid = TileGrid::from_fn(width, height, layout.rooms.clone(), |x, y| {
            layout.tag_at(x, y).map_or(TileType::None, TileType::from_tag)
        })?;

        let pruned = prune_enclosed(&mut grid);
        log::info!(
            "Built {}x{} grid with {} rooms ({} enclosed walls pruned)",
            width,
            height,
            grid.rooms().len(),
            pruned
        );

        Ok(grid)
    }
}

/// Number of cells in a `width` x `height` layout, if it fits in memory indices
fn cell_count(width: i32, height: i32) -> Option<usize> {
    usize::try_from(width).ok()?.checked_mul(usize::try_from(height).ok()?)
}

/// True if every neighbour is out of the grid or a wall of the same kind
pub fn is_enclosed(grid: &TileGrid, x: i32, y: i32) -> bool {
    let (Some(tile), Some(neighbours)) = (grid.tile_at(x, y), grid.neighbours(x, y)) else {
        return false;
    };

    neighbours
        .all()
        .iter()
        .all(|n| n.map_or(true, |t| t.is_wall() && t.corridor == tile.corridor))
}

/// Turn every enclosed wall into an empty tile. Returns how many were pruned.
///
/// Enclosure is decided against the grid as it was before the pass, so
/// pruning one wall never exposes its neighbours within the same pass.
pub fn prune_enclosed(grid: &mut TileGrid) -> usize {
    let to_reset: Vec<Position> = grid
        .bounds()
        .cells()
        .filter(|p| grid.tile_at(p.x, p.y).map_or(false, |t| t.is_wall()) && is_enclosed(grid, p.x, p.y))
        .collect();

    for pos in &to_reset {
        grid.rebuild(pos.x, pos.y, TileType::None);
    }

    log::debug!("Pruned {} enclosed walls", to_reset.len());
    to_reset.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_wall_grid_is_fully_pruned() {
        let layout = RawLayout::filled(5, 5, "wall");
        let grid = GridBuilder::build(&layout, 5, 5).unwrap();

        assert_eq!(grid.tiles().len(), 25);
        for tile in grid.tiles() {
            assert_eq!(tile.tile_type, TileType::None);
            assert!(!tile.collides);
        }
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let layout = RawLayout::from_ascii(
            &[
                "##########",
                "##########",
                "###....###",
                "###....###",
                "###..+.###",
                "##########",
                "##########",
            ],
            vec![Rect::new(3, 2, 4, 3)],
        );
        let mut grid = GridBuilder::build(&layout, 10, 7).unwrap();
        let snapshot: Vec<TileType> = grid.tiles().iter().map(|t| t.tile_type).collect();

        assert_eq!(prune_enclosed(&mut grid), 0);
        let after: Vec<TileType> = grid.tiles().iter().map(|t| t.tile_type).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_pruning_uses_pre_pass_snapshot() {
        // A 3x3 block of corridor walls: only the center is enclosed
        let layout = RawLayout::from_ascii(&[".....", ".###.", ".###.", ".###.", "....."], Vec::new());
        let grid = GridBuilder::build(&layout, 5, 5).unwrap();

        assert_eq!(grid.tile_at(2, 2).unwrap().tile_type, TileType::None);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            assert!(grid.tile_at(x, y).unwrap().is_wall(), "wall at ({}, {}) should remain", x, y);
        }
    }

    #[test]
    fn test_room_and_corridor_walls_do_not_enclose_each_other() {
        // Room border ring lies at x in 0..=3; x = 4 is corridor
        let mut layout = RawLayout::filled(8, 5, "wall");
        layout.rooms = vec![Rect::new(1, 1, 2, 3)];
        let grid = GridBuilder::build(&layout, 8, 5).unwrap();

        // (3, 2) is a room-border wall whose east neighbours are corridor walls
        assert!(!grid.tile_at(3, 2).unwrap().corridor);
        assert!(grid.tile_at(4, 2).unwrap().corridor);
        assert!(grid.tile_at(3, 2).unwrap().is_wall());
        assert!(grid.tile_at(4, 2).unwrap().is_wall());
        // Fully surrounded room walls still go
        assert_eq!(grid.tile_at(1, 2).unwrap().tile_type, TileType::None);
    }

    #[test]
    fn test_pruning_is_not_applied_in_place() {
        // Every wall of a solid block is enclosed; resetting during the scan
        // would leave some of them standing
        let layout = RawLayout::filled(4, 3, "wall");
        let grid = GridBuilder::build(&layout, 4, 3).unwrap();
        assert!(grid.tiles().iter().all(|t| t.tile_type == TileType::None));
    }

    #[test]
    fn test_doors_are_never_pruned() {
        let layout = RawLayout::from_ascii(&["###", "#+#", "###"], Vec::new());
        let grid = GridBuilder::build(&layout, 3, 3).unwrap();
        assert_eq!(grid.tile_at(1, 1).unwrap().tile_type, TileType::Door);
        assert!(grid.tile_at(0, 0).unwrap().is_wall());
    }

    #[test]
    fn test_unknown_tags_become_none() {
        let mut layout = RawLayout::filled(2, 1, "floor");
        layout.cells[1] = "chasm".to_string();
        let grid = GridBuilder::build(&layout, 2, 1).unwrap();
        assert!(grid.tiles().iter().all(|t| t.tile_type == TileType::None));
    }

    #[test]
    fn test_invalid_dimensions() {
        let layout = RawLayout::filled(4, 4, "floor");
        assert_eq!(
            GridBuilder::build(&layout, 0, 4).unwrap_err(),
            GridError::InvalidDimensions { width: 0, height: 4 }
        );
        assert!(matches!(
            GridBuilder::build(&layout, 4, -2),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_layout_too_small() {
        let layout = RawLayout::filled(4, 4, "floor");
        assert!(matches!(
            GridBuilder::build(&layout, 5, 4),
            Err(GridError::LayoutSizeMismatch { expected: 20, .. })
        ));

        let mut short = RawLayout::filled(4, 4, "floor");
        short.cells.truncate(10);
        assert_eq!(
            GridBuilder::build(&short, 4, 4).unwrap_err(),
            GridError::LayoutSizeMismatch { expected: 16, found: 10 }
        );
    }

    #[test]
    fn test_huge_declared_layout_is_rejected() {
        let layout = RawLayout {
            width: 50_000,
            height: 50_000,
            cells: Vec::new(),
            rooms: Vec::new(),
        };
        assert_eq!(
            GridBuilder::build(&layout, 50_000, 50_000).unwrap_err(),
            GridError::LayoutSizeMismatch { expected: 2_500_000_000, found: 0 }
        );

        let wide = RawLayout { width: i32::MAX, height: i32::MAX, ..layout };
        assert!(matches!(
            GridBuilder::build(&wide, i32::MAX, i32::MAX),
            Err(GridError::LayoutSizeMismatch { found: 0, .. })
        ));
        assert!(wide.tag_at(i32::MAX - 1, i32::MAX - 1).is_none());
    }

    #[test]
    fn test_larger_layout_is_cropped() {
        let layout = RawLayout::from_ascii(&["..#", "..#", "###"], Vec::new());
        let grid = GridBuilder::build(&layout, 2, 2).unwrap();
        assert_eq!(grid.width(), 2);
        assert!(grid.tiles().iter().all(|t| t.tile_type == TileType::None));
    }

    #[test]
    fn test_layout_json_round_trip() {
        let layout = RawLayout::from_ascii(&["#+#"], vec![Rect::new(0, 0, 3, 1)]);
        let json = serde_json::to_string(&layout).unwrap();
        let parsed: RawLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, layout);
    }
}
