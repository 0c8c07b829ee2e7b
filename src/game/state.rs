//! Game state
//!
//! Owns the dungeon and the observer walking through it, and feeds the
//! fog of war once per frame.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::dungeon::Dungeon;
use crate::error::GridError;
use crate::world::{Position, RawLayout, Rect};

/// The main game struct that holds all game data
pub struct Game {
    /// Current game state
    state: GameState,
    dungeon: Dungeon,
    /// Observer cell
    player: Position,
    /// Cells currently on screen
    viewport: Rect,
    /// Whether the fog overlay is drawn
    fog_enabled: bool,
    /// Message log
    messages: Vec<String>,
}

/// All possible game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Quit,
}

/// What happened when the player tried to step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    OpenedDoor,
    Blocked,
}

impl Game {
    /// Build a game over `layout`, starting in a random room
    pub fn new(config: &Config, layout: &RawLayout) -> Result<Self, GridError> {
        let dungeon = Dungeon::from_layout(layout, config.fog.clone())?;

        let mut rng = match config.dungeon.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = dungeon.grid().starting_cell(&mut rng);
        log::info!("Player starts at ({}, {})", player.x, player.y);

        Ok(Self {
            state: GameState::Playing,
            dungeon,
            player,
            viewport: Rect::new(player.x, player.y, 1, 1),
            fog_enabled: true,
            messages: vec!["You descend into the gloom.".to_string()],
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn fog_enabled(&self) -> bool {
        self.fog_enabled
    }

    pub fn toggle_fog(&mut self) {
        self.fog_enabled = !self.fog_enabled;
        log::debug!("Fog overlay {}", if self.fog_enabled { "on" } else { "off" });
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn add_message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());

        // Keep only last 100 messages
        if self.messages.len() > 100 {
            self.messages.remove(0);
        }
    }

    /// Step the player by one cell. Bumping a closed door opens it.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        let target = Position::new(self.player.x + dx, self.player.y + dy);

        if self.dungeon.tile_at(target.x, target.y).is_none() {
            return MoveOutcome::Blocked;
        }

        if self.dungeon.open(target.x, target.y) {
            // The door no longer blocks sight
            self.dungeon.invalidate_visibility();
            self.add_message("The door splinters open.");
            return MoveOutcome::OpenedDoor;
        }

        if self.dungeon.collides(target.x, target.y) {
            return MoveOutcome::Blocked;
        }

        self.player = target;
        MoveOutcome::Moved
    }

    /// Update game state
    pub fn update(&mut self, delta: Duration) {
        if self.state != GameState::Playing {
            return;
        }

        let delta_ms = delta.as_secs_f32() * 1000.0;
        if let Err(e) = self.dungeon.update(self.player, self.viewport, delta_ms) {
            log::warn!("Skipping fog update: {}", e);
        }
    }

    pub fn quit(&mut self) {
        self.state = GameState::Quit;
    }
}
