//! Field of View calculation
//!
//! Recursive shadowcasting over 8 octants. Colliding tiles stop sight but
//! are themselves visible.

use super::geometry::Position;
use super::grid::TileGrid;

/// Cells visible from `origin` within a circular `radius`.
///
/// Cells on octant boundaries may be reported more than once.
pub fn compute_fov(grid: &TileGrid, origin: Position, radius: i32) -> Vec<Position> {
    let mut visible = Vec::new();

    if !grid.in_bounds(origin.x, origin.y) {
        return visible;
    }

    // Origin is always visible
    visible.push(origin);

    for octant in 0..8 {
        cast_light(grid, &mut visible, origin, radius, 1, 1.0, 0.0, octant);
    }

    visible
}

fn is_opaque(grid: &TileGrid, x: i32, y: i32) -> bool {
    grid.tile_at(x, y).map_or(true, |t| t.is_opaque())
}

/// Recursive shadowcasting for a single octant
#[allow(clippy::too_many_arguments)]
fn cast_light(
    grid: &TileGrid,
    visible: &mut Vec<Position>,
    origin: Position,
    radius: i32,
    row: i32,
    mut start_slope: f64,
    end_slope: f64,
    octant: u8,
) {
    if start_slope < end_slope {
        return;
    }

    let mut next_start_slope = start_slope;

    for j in row..=radius {
        let mut blocked = false;

        let dy = -j;
        for dx in dy..=0 {
            let (map_x, map_y) = transform_octant(dx, dy, octant);
            let cur_x = origin.x + map_x;
            let cur_y = origin.y + map_y;

            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start_slope < right_slope {
                continue;
            }
            if end_slope > left_slope {
                break;
            }

            if dx * dx + dy * dy <= radius * radius && grid.in_bounds(cur_x, cur_y) {
                visible.push(Position::new(cur_x, cur_y));
            }

            if blocked {
                if is_opaque(grid, cur_x, cur_y) {
                    next_start_slope = right_slope;
                } else {
                    blocked = false;
                    start_slope = next_start_slope;
                }
            } else if is_opaque(grid, cur_x, cur_y) && j < radius {
                blocked = true;
                cast_light(grid, visible, origin, radius, j + 1, start_slope, left_slope, octant);
                next_start_slope = right_slope;
            }
        }

        if blocked {
            break;
        }
    }
}

/// Transform coordinates based on octant
fn transform_octant(col: i32, row: i32, octant: u8) -> (i32, i32) {
    match octant {
        0 => (col, row),
        1 => (row, col),
        2 => (row, -col),
        3 => (col, -row),
        4 => (-col, -row),
        5 => (-row, -col),
        6 => (-row, col),
        7 => (-col, row),
        _ => (col, row),
    }
}
