//! Rendering layer
//!
//! Supports two glyph sets:
//! - ASCII: Classic roguelike characters
//! - Unicode: Box-drawing walls that follow the autotiled wall runs

pub mod mode;
pub mod tilemap;

pub use mode::{detect_render_mode, RenderMode};
pub use tilemap::{fog_color, TileRenderer};
