//! Fog of war
//!
//! Keeps each tile's fog target in step with what the observer can see and
//! fades the rendered fog toward it frame by frame.

use super::fov::compute_fov;
use super::geometry::{Position, Rect};
use super::grid::TileGrid;
use crate::config::FogSettings;
use crate::error::GridError;

/// Observer cell that no real cell can equal, so the next update recomputes
const NO_OBSERVER: Position = Position { x: -1, y: -1 };

/// Visibility state for one grid
#[derive(Debug, Clone)]
pub struct VisibilityField {
    settings: FogSettings,
    last_observer: Position,
}

impl VisibilityField {
    pub fn new(settings: FogSettings) -> Self {
        Self {
            settings,
            last_observer: NO_OBSERVER,
        }
    }

    /// The cell the field was last recomputed for
    pub fn last_observer(&self) -> Option<Position> {
        (self.last_observer != NO_OBSERVER).then_some(self.last_observer)
    }

    /// Force the next update to recompute, e.g. after a door opens
    pub fn invalidate(&mut self) {
        self.last_observer = NO_OBSERVER;
    }

    /// Fog opacity for a visible cell at `distance` from the observer.
    ///
    /// Distances closer than the dropoff table reaches come out fully revealed.
    pub fn dropoff_alpha(&self, distance: i32) -> f32 {
        let radius = self.settings.radius;
        let idx = if distance <= radius { radius - distance } else { 0 };
        self.settings.dropoff.get(idx as usize).copied().unwrap_or(0.0)
    }

    /// Advance one frame: recompute if the observer moved, then animate the
    /// tiles under `viewport` (plus a one-cell margin).
    ///
    /// Returns whether a recompute ran.
    pub fn update(
        &mut self,
        grid: &mut TileGrid,
        observer: Position,
        viewport: Rect,
        delta_ms: f32,
    ) -> Result<bool, GridError> {
        if !grid.in_bounds(observer.x, observer.y) {
            return Err(GridError::OutOfBounds { x: observer.x, y: observer.y });
        }

        let recomputed = if observer != self.last_observer {
            self.recompute(grid, observer)?;
            true
        } else {
            false
        };

        self.animate(grid, viewport, delta_ms);
        Ok(recomputed)
    }

    /// Dim everything remembered, then reveal what `observer` can see
    pub fn recompute(&mut self, grid: &mut TileGrid, observer: Position) -> Result<(), GridError> {
        if !grid.in_bounds(observer.x, observer.y) {
            return Err(GridError::OutOfBounds { x: observer.x, y: observer.y });
        }

        let remembered = self.settings.remembered_alpha;
        for tile in grid.tiles_mut().iter_mut().filter(|t| t.seen) {
            tile.desired_alpha = remembered;
        }

        let visible = compute_fov(grid, observer, self.settings.radius);
        for pos in &visible {
            let alpha = self.dropoff_alpha(observer.floor_distance(pos));
            if let Some(tile) = grid.tile_at_mut(pos.x, pos.y) {
                tile.desired_alpha = alpha;
                tile.seen = true;
            }
        }

        log::debug!(
            "Recomputed visibility at ({}, {}): {} cells in view",
            observer.x,
            observer.y,
            visible.len()
        );
        self.last_observer = observer;
        Ok(())
    }

    /// Fade rendered fog toward its target for tiles under `viewport`
    pub fn animate(&self, grid: &mut TileGrid, viewport: Rect, delta_ms: f32) {
        let window = viewport.inflate(1).intersection(&grid.bounds());
        let delta_ms = delta_ms.max(0.0);

        for pos in window.cells() {
            if let Some(tile) = grid.tile_at_mut(pos.x, pos.y) {
                tile.current_alpha = step_alpha(
                    tile.current_alpha,
                    tile.desired_alpha,
                    delta_ms,
                    self.settings.alpha_per_ms,
                    self.settings.min_fade_distance,
                );
            }
        }

        log::trace!("Animated fog over {}x{} cells", window.width, window.height);
    }
}

impl Default for VisibilityField {
    fn default() -> Self {
        Self::new(FogSettings::default())
    }
}

/// Move `current` toward `desired` without passing it.
///
/// The step grows with the remaining distance, which is floored at
/// `min_distance` so the fade always finishes.
pub fn step_alpha(current: f32, desired: f32, delta_ms: f32, rate: f32, min_distance: f32) -> f32 {
    let distance = (current - desired).abs().max(min_distance);
    let step = rate * delta_ms * distance;

    if current > desired {
        (current - step).max(desired)
    } else if current < desired {
        (current + step).min(desired)
    } else {
        current
    }
}
