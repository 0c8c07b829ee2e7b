//! Game module - the observer walking a dungeon, as a host loop drives it

mod state;

pub use state::{Game, GameState, MoveOutcome};
