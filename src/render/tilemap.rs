//! Tile rendering
//!
//! Turns tileset indices into terminal glyphs and colors, and darkens each
//! cell by its fog opacity.

use ratatui::{buffer::Buffer, style::Color};

use super::RenderMode;
use crate::dungeon::Dungeon;
use crate::world::autotile::{self, indices, WallShape};
use crate::world::{Tile, TileGrid, TileType};

/// Tile renderer for ASCII and Unicode modes
pub struct TileRenderer {
    /// Current rendering mode
    pub mode: RenderMode,
}

impl TileRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    /// Character for a tile drawn with tileset index `index`
    pub fn tile_char(&self, tile: &Tile, index: u16) -> char {
        match self.mode {
            RenderMode::Ascii => Self::ascii_char(tile, index),
            RenderMode::Unicode => Self::unicode_char(tile, index),
        }
    }

    fn ascii_char(tile: &Tile, index: u16) -> char {
        match tile.tile_type {
            TileType::Wall => '#',
            TileType::Door if index == indices::DOOR_DESTROYED => '\'',
            TileType::Door => '+',
            TileType::None => match floor_base(index) {
                0x05 => '.',
                _ => ',',
            },
        }
    }

    fn unicode_char(tile: &Tile, index: u16) -> char {
        match tile.tile_type {
            TileType::Wall => match WallShape::from_index(index) {
                Some(shape) => wall_char(shape, tile.corridor),
                None => '#',
            },
            TileType::Door => match index {
                indices::DOOR_DESTROYED => '▯',
                indices::DOOR_VERTICAL => '▮',
                _ => '▬',
            },
            TileType::None => match floor_base(index) {
                0x05 => '·',
                0x15 => '∙',
                0x07 => '˙',
                _ => '∴',
            },
        }
    }

    /// Get foreground color for a tile
    pub fn tile_fg_color(&self, tile: &Tile) -> Color {
        let (r, g, b) = match tile.tile_type {
            TileType::Wall if tile.corridor => (100, 95, 90),
            TileType::Wall => (130, 110, 90),
            TileType::Door if tile.is_open_door() => (140, 100, 50),
            TileType::Door => (160, 120, 60),
            TileType::None if tile.corridor => (70, 70, 70),
            TileType::None => (80, 80, 80),
        };
        Color::Rgb(r, g, b)
    }

    /// Get background color for a tile
    pub fn tile_bg_color(&self, tile: &Tile) -> Color {
        let (r, g, b) = match tile.tile_type {
            TileType::Wall => (40, 35, 30),
            TileType::Door if tile.is_open_door() => (20, 18, 15),
            TileType::Door => (35, 28, 18),
            TileType::None if tile.corridor => (15, 13, 10),
            TileType::None => (20, 18, 15),
        };
        Color::Rgb(r, g, b)
    }

    /// Render the dungeon cell at (`x`, `y`) into the buffer cell at
    /// (`col`, `row`)
    #[allow(clippy::too_many_arguments)]
    pub fn render_tile_to_buffer(
        &self,
        buf: &mut Buffer,
        col: u16,
        row: u16,
        dungeon: &Dungeon,
        x: i32,
        y: i32,
        fog_enabled: bool,
    ) {
        let Some(cell) = buf.cell_mut((col, row)) else {
            return;
        };

        let Some(tile) = dungeon.tile_at(x, y) else {
            cell.set_char(' ');
            cell.set_bg(Color::Black);
            return;
        };

        let index = match tile.tile_type {
            TileType::None => floor_art(dungeon.grid(), x, y),
            _ => dungeon.variant_index(x, y).unwrap_or(indices::WALL_ALONE),
        };

        let mut fg = self.tile_fg_color(tile);
        let mut bg = self.tile_bg_color(tile);
        if fog_enabled {
            fg = fog_color(fg, tile.current_alpha);
            bg = fog_color(bg, tile.current_alpha);
        }

        cell.set_char(self.tile_char(tile, index));
        cell.set_fg(fg);
        cell.set_bg(bg);
    }
}

/// Room-styled floor index for a room or corridor floor index
fn floor_base(index: u16) -> u16 {
    if indices::FLOOR_CORRIDOR.contains(&index) {
        index - indices::CORRIDOR_OFFSET
    } else {
        index
    }
}

/// Double lines for room walls, single lines for corridor walls
fn wall_char(shape: WallShape, corridor: bool) -> char {
    let (single, double) = match shape {
        WallShape::Cross => ('┼', '╬'),
        WallShape::NorthEastSouth => ('├', '╠'),
        WallShape::NorthSouthWest => ('┤', '╣'),
        WallShape::EastSouthWest => ('┬', '╦'),
        WallShape::NorthEastWest => ('┴', '╩'),
        WallShape::EastSouth => ('┌', '╔'),
        WallShape::SouthWest => ('┐', '╗'),
        WallShape::NorthEast => ('└', '╚'),
        WallShape::NorthWest => ('┘', '╝'),
        WallShape::NorthSouth | WallShape::North | WallShape::South => ('│', '║'),
        WallShape::EastWest
        | WallShape::East
        | WallShape::West
        | WallShape::DoorToEast
        | WallShape::DoorToWest => ('─', '═'),
        WallShape::Alone => ('▪', '■'),
    };
    if corridor {
        single
    } else {
        double
    }
}

/// Floor art for a position, picked from its candidates by a position hash
/// so the same cell always draws the same way
pub fn floor_art(grid: &TileGrid, x: i32, y: i32) -> u16 {
    let choices = autotile::floor_choices(grid, x, y);
    let hash = (x as u32).wrapping_mul(73_856_093) ^ (y as u32).wrapping_mul(19_349_663);
    choices[(hash as usize) % choices.len()]
}

/// Darken a color by fog opacity `alpha` (0 clear, 1 black)
pub fn fog_color(base: Color, alpha: f32) -> Color {
    let light = (1.0 - alpha).clamp(0.0, 1.0);
    match base {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * light) as u8,
            (g as f32 * light) as u8,
            (b as f32 * light) as u8,
        ),
        other if light > 0.0 => other,
        _ => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FogSettings;
    use crate::world::{Position, RawLayout, Rect};
    use ratatui::layout::Rect as Area;

    fn room_dungeon() -> Dungeon {
        let layout = RawLayout::from_ascii(
            &[
                "#####....",
                "#...#....",
                "#...+....",
                "#...#....",
                "#####....",
            ],
            vec![Rect::new(1, 1, 3, 3)],
        );
        Dungeon::from_layout(&layout, FogSettings::default()).unwrap()
    }

    #[test]
    fn test_fog_color_scales() {
        assert_eq!(fog_color(Color::Rgb(100, 50, 200), 0.0), Color::Rgb(100, 50, 200));
        assert_eq!(fog_color(Color::Rgb(100, 50, 200), 1.0), Color::Rgb(0, 0, 0));
        assert_eq!(fog_color(Color::Rgb(100, 50, 200), 0.5), Color::Rgb(50, 25, 100));
        assert_eq!(fog_color(Color::Red, 1.0), Color::Black);
    }

    #[test]
    fn test_wall_glyphs() {
        let renderer = TileRenderer::new(RenderMode::Unicode);
        let dungeon = room_dungeon();
        let char_at = |x, y| {
            let index = dungeon.variant_index(x, y).unwrap();
            renderer.tile_char(dungeon.tile_at(x, y).unwrap(), index)
        };

        assert_eq!(char_at(0, 0), '╔');
        assert_eq!(char_at(4, 0), '╗');
        assert_eq!(char_at(0, 4), '╚');
        assert_eq!(char_at(2, 0), '═');
        assert_eq!(char_at(0, 2), '║');
        assert_eq!(char_at(4, 2), '▮');
    }

    #[test]
    fn test_ascii_glyphs() {
        let renderer = TileRenderer::new(RenderMode::Ascii);
        let mut dungeon = room_dungeon();
        let wall = dungeon.tile_at(0, 0).unwrap();
        assert_eq!(renderer.tile_char(wall, dungeon.variant_index(0, 0).unwrap()), '#');

        assert_eq!(renderer.tile_char(dungeon.tile_at(4, 2).unwrap(), indices::DOOR_VERTICAL), '+');
        dungeon.open(4, 2);
        let index = dungeon.variant_index(4, 2).unwrap();
        assert_eq!(renderer.tile_char(dungeon.tile_at(4, 2).unwrap(), index), '\'');
    }

    #[test]
    fn test_floor_art_is_stable() {
        let dungeon = room_dungeon();
        let grid = dungeon.grid();
        assert_eq!(floor_art(grid, 2, 2), floor_art(grid, 2, 2));
        assert!(indices::FLOOR_ROOM.contains(&floor_art(grid, 2, 2)));
        assert!(indices::FLOOR_CORRIDOR.contains(&floor_art(grid, 7, 2)));
    }

    #[test]
    fn test_unseen_cells_render_black() {
        let renderer = TileRenderer::new(RenderMode::Unicode);
        let dungeon = room_dungeon();
        let mut buf = Buffer::empty(Area::new(0, 0, 4, 4));

        renderer.render_tile_to_buffer(&mut buf, 0, 0, &dungeon, 0, 0, true);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 0, 0));

        renderer.render_tile_to_buffer(&mut buf, 1, 0, &dungeon, 0, 0, false);
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(130, 110, 90));

        renderer.render_tile_to_buffer(&mut buf, 2, 0, &dungeon, -3, 0, true);
        assert_eq!(buf[(2, 0)].symbol(), " ");
    }

    #[test]
    fn test_revealed_cells_render_lit() {
        let renderer = TileRenderer::new(RenderMode::Unicode);
        let mut dungeon = room_dungeon();
        let view = Rect::new(0, 0, 9, 5);
        for _ in 0..100 {
            dungeon.update(Position::new(2, 2), view, 16.0).unwrap();
        }

        let mut buf = Buffer::empty(Area::new(0, 0, 1, 1));
        renderer.render_tile_to_buffer(&mut buf, 0, 0, &dungeon, 2, 2, true);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(80, 80, 80));
    }
}
