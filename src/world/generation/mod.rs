//! Procedural layout generation
//!
//! Stands in for an external dungeon generator: produces the raw
//! room/corridor layout that [`GridBuilder`](super::GridBuilder) consumes.

pub mod rooms;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::builder::RawLayout;
use crate::config::DungeonSettings;

/// Generate a layout, seeded from the settings when a seed is given
pub fn generate_layout(settings: &DungeonSettings) -> RawLayout {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let layout = rooms::generate_rooms(&mut rng, settings);
    log::info!(
        "Generated {}x{} layout with {} rooms",
        layout.width,
        layout.height,
        layout.rooms.len()
    );
    layout
}
