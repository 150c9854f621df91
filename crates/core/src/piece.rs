//! Active piece - the falling tetromino
//!
//! The piece owns its anchor, rotation index and current (post-rotation) cell
//! offsets. Every transformation asks the grid for validity before committing.
//!
//! Operations assume the piece's own footprint is *not* written into the grid
//! while they run. [`ActivePiece::tick`] takes care of that by erasing the
//! footprint first and writing it back last.
//!
//! # Lock / step state machine
//!
//! The lock timer counts real elapsed time every tick and is reset by every
//! successful translation. Once per step interval the piece tries to move
//! down one row; after that attempt, if the lock timer has reached the lock
//! delay the piece locks. A grounded piece therefore locks at the first step
//! that comes at least one lock delay after its last successful move.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Pivot, Shape, TetrominoDefinition};
use crate::grid::Grid;
use crate::surface::TileSurface;
use crate::types::{
    Cell, Command, RotationDirection, LOCK_DELAY_SECS, ROTATION_STATES, STEP_INTERVAL_SECS,
};

/// Wrap `value` into `[min, max)` using floor-style modulo.
///
/// Defined for every integer, including negatives far outside the range.
///
/// ```
/// use blockfall_core::wrap;
///
/// assert_eq!(wrap(-1, 0, 4), 3);
/// assert_eq!(wrap(-4, 0, 4), 0);
/// assert_eq!(wrap(9, 0, 4), 1);
/// ```
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    min + (value - min).rem_euclid(max - min)
}

/// 90° rotation matrix as `[cos, sin, -sin, cos]`.
const ROTATION_MATRIX: [f32; 4] = [0.0, 1.0, -1.0, 0.0];

/// Rotate one offset by a quarter turn in `direction` (`+1` clockwise).
pub fn rotate_offset(cell: Cell, pivot: Pivot, direction: i32) -> Cell {
    let d = direction as f32;
    let [m0, m1, m2, m3] = ROTATION_MATRIX;

    match pivot {
        Pivot::Corner => {
            let x = cell.x as f32 - 0.5;
            let y = cell.y as f32 - 0.5;
            Cell::new(
                (x * m0 * d + y * m1 * d).ceil() as i32,
                (x * m2 * d + y * m3 * d).ceil() as i32,
            )
        }
        Pivot::Center => {
            let x = cell.x as f32;
            let y = cell.y as f32;
            Cell::new(
                (x * m0 * d + y * m1 * d).round() as i32,
                (x * m2 * d + y * m3 * d).round() as i32,
            )
        }
    }
}

/// Step and lock timing, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceTiming {
    pub step_interval: f32,
    pub lock_delay: f32,
}

impl Default for PieceTiming {
    fn default() -> Self {
        Self {
            step_interval: STEP_INTERVAL_SECS,
            lock_delay: LOCK_DELAY_SECS,
        }
    }
}

/// Where a piece stands after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    /// Free to fall.
    Falling,
    /// Resting on the stack or floor; the lock timer is running.
    Locking,
    /// Committed to the grid. The piece must be replaced.
    Locked,
}

/// The falling piece. Exactly one exists per session at a time.
#[derive(Debug, Clone)]
pub struct ActivePiece {
    definition: Arc<TetrominoDefinition>,
    anchor: Cell,
    rotation_index: usize,
    cells: Shape,
    timing: PieceTiming,
    /// Seconds since spawn.
    elapsed: f32,
    next_step_at: f32,
    lock_timer: f32,
}

impl ActivePiece {
    /// Fresh piece at `anchor` in its base orientation.
    ///
    /// Does not consult the grid; the caller decides what an invalid spawn means.
    pub fn spawn(definition: Arc<TetrominoDefinition>, anchor: Cell, timing: PieceTiming) -> Self {
        let cells = definition.cells;
        Self {
            definition,
            anchor,
            rotation_index: 0,
            cells,
            timing,
            elapsed: 0.0,
            next_step_at: timing.step_interval,
            lock_timer: 0.0,
        }
    }

    pub fn definition(&self) -> &TetrominoDefinition {
        &self.definition
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn cells(&self) -> &Shape {
        &self.cells
    }

    pub fn lock_timer(&self) -> f32 {
        self.lock_timer
    }

    /// Absolute cells covered by the piece.
    pub fn footprint(&self) -> [Cell; 4] {
        self.cells.map(|offset| self.anchor + offset)
    }

    /// Move by `(dx, dy)` if the target is valid. A successful move resets
    /// the lock timer.
    pub fn translate<S: TileSurface>(&mut self, grid: &Grid<S>, dx: i32, dy: i32) -> bool {
        let target = self.anchor + Cell::new(dx, dy);
        if !grid.is_valid_position(&self.cells, target) {
            return false;
        }
        self.anchor = target;
        self.lock_timer = 0.0;
        true
    }

    /// Rotate a quarter turn, resolving collisions through the wall-kick table.
    ///
    /// On failure the rotation index and every offset are restored exactly.
    pub fn rotate<S: TileSurface>(&mut self, grid: &Grid<S>, direction: RotationDirection) -> bool {
        let definition = Arc::clone(&self.definition);
        let original_rotation = self.rotation_index;
        let original_cells = self.cells;
        let sign = direction.sign();

        self.rotation_index = wrap(original_rotation as i32 + sign, 0, ROTATION_STATES) as usize;
        for cell in &mut self.cells {
            *cell = rotate_offset(*cell, definition.pivot, sign);
        }

        let bucket = definition.wall_kicks.bucket_index(original_rotation, direction);
        for kick in definition.wall_kicks.bucket(bucket) {
            if self.translate(grid, kick.x, kick.y) {
                return true;
            }
        }

        self.rotation_index = original_rotation;
        self.cells = original_cells;
        false
    }

    /// Move down until blocked, then lock. Returns the number of rows dropped.
    pub fn hard_drop<S: TileSurface>(&mut self, grid: &mut Grid<S>) -> u32 {
        let mut distance = 0;
        while self.translate(grid, 0, -1) {
            distance += 1;
        }
        self.lock(grid);
        distance
    }

    /// Commit the footprint to the grid with the definition's tile.
    pub fn lock<S: TileSurface>(&self, grid: &mut Grid<S>) {
        grid.set_cells(&self.cells, self.anchor, self.definition.tile);
        debug!(
            kind = self.definition.kind.as_str(),
            x = self.anchor.x,
            y = self.anchor.y,
            rotation = self.rotation_index,
            "piece locked"
        );
    }

    /// True if the piece cannot move down one row.
    pub fn is_grounded<S: TileSurface>(&self, grid: &Grid<S>) -> bool {
        !grid.is_valid_position(&self.cells, self.anchor + Cell::new(0, -1))
    }

    /// Advance one frame.
    ///
    /// Erases the footprint, accumulates `delta` into the clocks, applies
    /// `commands` in order, runs the automatic step if it is due, then writes
    /// the footprint back. Commands after a hard drop are ignored, as the
    /// piece is gone by then.
    pub fn tick<S: TileSurface>(
        &mut self,
        grid: &mut Grid<S>,
        delta: f32,
        commands: &[Command],
    ) -> PieceState {
        grid.clear_cells(&self.cells, self.anchor);

        self.elapsed += delta;
        self.lock_timer += delta;

        for command in commands {
            match command {
                Command::MoveLeft => {
                    self.translate(grid, -1, 0);
                }
                Command::MoveRight => {
                    self.translate(grid, 1, 0);
                }
                Command::RotateCcw => {
                    self.rotate(grid, RotationDirection::CounterClockwise);
                }
                Command::RotateCw => {
                    self.rotate(grid, RotationDirection::Clockwise);
                }
                Command::HardDrop => {
                    self.hard_drop(grid);
                    return PieceState::Locked;
                }
            }
        }

        if self.elapsed >= self.next_step_at && self.step(grid) {
            self.lock(grid);
            return PieceState::Locked;
        }

        let state = if self.is_grounded(grid) {
            PieceState::Locking
        } else {
            PieceState::Falling
        };
        grid.set_cells(&self.cells, self.anchor, self.definition.tile);
        state
    }

    /// Automatic downward step. Returns true if the piece should lock.
    fn step<S: TileSurface>(&mut self, grid: &Grid<S>) -> bool {
        self.next_step_at = self.elapsed + self.timing.step_interval;
        self.translate(grid, 0, -1);
        self.lock_timer >= self.timing.lock_delay
    }
}
