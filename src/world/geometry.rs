//! Grid geometry
//!
//! Cell positions and axis-aligned rectangles in tile coordinates.

use serde::{Deserialize, Serialize};

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, floored to whole cells
    pub fn floor_distance(&self, other: &Position) -> i32 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt().floor() as i32
    }
}

/// An axis-aligned rectangle: rooms in a layout, or a camera viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow by `amount` cells on every side
    pub fn inflate(&self, amount: i32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2,
            self.height + amount * 2,
        )
    }

    /// Overlapping area of two rectangles (empty if they are disjoint)
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Every cell inside the rectangle, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_distance() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.floor_distance(&Position::new(3, 4)), 5);
        assert_eq!(origin.floor_distance(&Position::new(1, 1)), 1); // sqrt(2)
        assert_eq!(origin.floor_distance(&Position::new(5, 5)), 7); // 7.07
    }

    #[test]
    fn test_intersection_clips_to_bounds() {
        let bounds = Rect::new(0, 0, 10, 10);
        let view = Rect::new(-3, 8, 6, 6);
        assert_eq!(view.intersection(&bounds), Rect::new(0, 8, 3, 2));

        let outside = Rect::new(20, 20, 4, 4);
        assert!(outside.intersection(&bounds).is_empty());
    }

    #[test]
    fn test_inflate() {
        assert_eq!(Rect::new(2, 2, 4, 3).inflate(1), Rect::new(1, 1, 6, 5));
        assert_eq!(Rect::new(0, 0, 2, 2).cells().count(), 4);
    }
}
