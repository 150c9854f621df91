//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the core simulation, the input
//! mapping and the terminal renderer alike.
//!
//! # Coordinates
//!
//! The playfield is centered on the origin. With the default 10x20 board:
//!
//! - **Columns**: x in `-5..5` (left to right)
//! - **Rows**: y in `-10..10` (bottom to top, `y` grows upward)
//! - **Spawn anchor**: `(-1, 8)`, so the top row of a freshly spawned piece sits on row 9
//!
//! # Timing Defaults
//!
//! Timing values are in seconds (the driver passes real elapsed time per frame):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STEP_INTERVAL_SECS` | 1.0 | Time between automatic downward steps |
//! | `LOCK_DELAY_SECS` | 0.5 | Grace period before a grounded piece locks |
//! | `TICK_MS` | 16 | Driver frame period (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Command, TetrominoKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = TetrominoKind::from_str("t").unwrap();
//! assert_eq!(kind, TetrominoKind::T);
//!
//! let moved = Cell::new(1, 2) + Cell::new(-1, 0);
//! assert_eq!(moved, Cell::new(0, 2));
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Default spawn anchor (top-center of the default bounds)
pub const SPAWN_ANCHOR: Cell = Cell::new(-1, 8);

/// Seconds between automatic downward steps
pub const STEP_INTERVAL_SECS: f32 = 1.0;

/// Seconds a grounded piece may rest before it locks
pub const LOCK_DELAY_SECS: f32 = 0.5;

/// Driver frame period in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Number of rotation states a piece cycles through
pub const ROTATION_STATES: i32 = 4;

/// Minimum number of wall-kick buckets per shape (4 states x 2 directions)
pub const WALL_KICK_BUCKETS: usize = 8;

/// Integer grid coordinate.
///
/// Used both for offsets relative to a piece anchor and for absolute grid
/// positions. Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ZERO: Cell = Cell::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

/// The seven tetromino kinds
///
/// A closed set used purely as a lookup key into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoKind {
    /// All kinds in catalog order.
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::J,
        TetrominoKind::L,
        TetrominoKind::S,
        TetrominoKind::Z,
    ];

    /// Position of this kind within [`TetrominoKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            TetrominoKind::I => 0,
            TetrominoKind::O => 1,
            TetrominoKind::T => 2,
            TetrominoKind::J => 3,
            TetrominoKind::L => 4,
            TetrominoKind::S => 5,
            TetrominoKind::Z => 6,
        }
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::from_str("i"), Some(TetrominoKind::I));
    /// assert_eq!(TetrominoKind::from_str("Z"), Some(TetrominoKind::Z));
    /// assert_eq!(TetrominoKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoKind::I),
            "o" => Some(TetrominoKind::O),
            "t" => Some(TetrominoKind::T),
            "j" => Some(TetrominoKind::J),
            "l" => Some(TetrominoKind::L),
            "s" => Some(TetrominoKind::S),
            "z" => Some(TetrominoKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoKind::I => "i",
            TetrominoKind::O => "o",
            TetrominoKind::T => "t",
            TetrominoKind::J => "j",
            TetrominoKind::L => "l",
            TetrominoKind::S => "s",
            TetrominoKind::Z => "z",
        }
    }
}

/// Opaque tile identity carried by occupied cells.
///
/// Only the renderer looks at it; game logic treats every tile the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u8);

/// Discrete player commands, one per key-down edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Drop piece until blocked, then lock
    HardDrop,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotateccw" => Some(Command::RotateCcw),
            "rotatecw" => Some(Command::RotateCw),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCcw => "rotateCcw",
            Command::RotateCw => "rotateCw",
            Command::HardDrop => "hardDrop",
        }
    }
}

/// Direction of a 90° rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn sign(self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_reference_values() {
        assert_eq!(STEP_INTERVAL_SECS, 1.0);
        assert_eq!(LOCK_DELAY_SECS, 0.5);
        assert_eq!(WALL_KICK_BUCKETS, 8);
    }

    #[test]
    fn kind_index_matches_all_order() {
        for (i, kind) in TetrominoKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(TetrominoKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn command_strings_parse_back() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::RotateCcw,
            Command::RotateCw,
            Command::HardDrop,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn cell_serializes_as_pair() {
        let json = serde_json::to_string(&Cell::new(-1, 8)).unwrap();
        assert_eq!(json, "[-1,8]");
        let back: Cell = serde_json::from_str("[2,-3]").unwrap();
        assert_eq!(back, Cell::new(2, -3));
    }

    #[test]
    fn rotation_sign() {
        assert_eq!(RotationDirection::Clockwise.sign(), 1);
        assert_eq!(RotationDirection::CounterClockwise.sign(), -1);
    }
}
