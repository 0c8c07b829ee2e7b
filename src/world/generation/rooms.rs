//! Room and corridor layout generator
//!
//! Rectangular rooms connected by L-shaped corridors, with doors where a
//! corridor passes through a room's wall ring. Everything else stays wall.

use rand::Rng;

use crate::config::DungeonSettings;
use crate::world::builder::RawLayout;
use crate::world::geometry::{Position, Rect};

const WALL: &str = "wall";
const FLOOR: &str = "floor";
const DOOR: &str = "door";

/// Generate a layout with rooms and corridors
pub fn generate_rooms<R: Rng>(rng: &mut R, settings: &DungeonSettings) -> RawLayout {
    let width = settings.width.max(1);
    let height = settings.height.max(1);
    let mut layout = RawLayout::filled(width, height, WALL);

    let min_size = settings.min_room_size.max(1);
    let max_size = settings.max_room_size.max(min_size);
    let mut rooms: Vec<Rect> = Vec::new();

    // Rooms need a wall ring plus one cell of margin to the grid edge
    if width < min_size + 4 || height < min_size + 4 {
        log::warn!("Layout {}x{} too small for rooms of size {}", width, height, min_size);
        return layout;
    }

    for _ in 0..settings.max_rooms * 8 {
        if rooms.len() >= settings.max_rooms {
            break;
        }

        let w = rng.gen_range(min_size..=max_size.min(width - 4));
        let h = rng.gen_range(min_size..=max_size.min(height - 4));
        let x = rng.gen_range(2..=width - w - 2);
        let y = rng.gen_range(2..=height - h - 2);
        let room = Rect::new(x, y, w, h);

        // Keep wall rings from touching
        if rooms.iter().any(|r| r.inflate(2).intersects(&room)) {
            continue;
        }

        carve_room(&mut layout, &room);

        if let Some(prev) = rooms.last() {
            let (a, b) = (prev.center(), room.center());
            if rng.gen_bool(0.5) {
                carve_h_corridor(&mut layout, a.x, b.x, a.y);
                carve_v_corridor(&mut layout, a.y, b.y, b.x);
            } else {
                carve_v_corridor(&mut layout, a.y, b.y, a.x);
                carve_h_corridor(&mut layout, a.x, b.x, b.y);
            }
        }

        rooms.push(room);
    }

    place_doors(&mut layout, &rooms);
    layout.rooms = rooms;
    layout
}

/// Carve out a room
fn carve_room(layout: &mut RawLayout, room: &Rect) {
    for pos in room.cells() {
        layout.set_tag(pos.x, pos.y, FLOOR);
    }
}

/// Carve a horizontal corridor
fn carve_h_corridor(layout: &mut RawLayout, x1: i32, x2: i32, y: i32) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    for x in start..=end {
        layout.set_tag(x, y, FLOOR);
    }
}

/// Carve a vertical corridor
fn carve_v_corridor(layout: &mut RawLayout, y1: i32, y2: i32, x: i32) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    for y in start..=end {
        layout.set_tag(x, y, FLOOR);
    }
}

/// Turn corridor openings in a room's wall ring into doors.
///
/// An opening gets a door only when the ring continues as wall on both
/// sides of it, so corridors that run along a ring stay open.
fn place_doors(layout: &mut RawLayout, rooms: &[Rect]) {
    let mut doors: Vec<Position> = Vec::new();

    for room in rooms {
        let ring = room.inflate(1);
        for pos in ring.cells() {
            let on_vertical_edge = pos.x == ring.x || pos.x == ring.right() - 1;
            let on_horizontal_edge = pos.y == ring.y || pos.y == ring.bottom() - 1;
            if on_vertical_edge == on_horizontal_edge {
                // Interior or a corner
                continue;
            }
            if layout.tag_at(pos.x, pos.y) != Some(FLOOR) {
                continue;
            }

            let (a, b) = if on_vertical_edge {
                ((pos.x, pos.y - 1), (pos.x, pos.y + 1))
            } else {
                ((pos.x - 1, pos.y), (pos.x + 1, pos.y))
            };
            if layout.tag_at(a.0, a.1) == Some(WALL) && layout.tag_at(b.0, b.1) == Some(WALL) {
                doors.push(pos);
            }
        }
    }

    for pos in doors {
        layout.set_tag(pos.x, pos.y, DOOR);
    }
}
