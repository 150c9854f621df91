//! Core game logic - deterministic and free of I/O
//!
//! This crate contains the whole falling-block simulation. It has no
//! dependency on terminals, input devices or clocks: the driver passes
//! elapsed time and discrete commands into [`GameSession::tick`].
//!
//! # Module Structure
//!
//! - [`catalog`]: shape offsets, pivot conventions and wall-kick tables
//! - [`surface`]: the tile storage abstraction and its in-memory implementation
//! - [`grid`]: bounds, collision queries, footprint writes and row collapse
//! - [`piece`]: the active piece, rotation math and the lock/step state machine
//! - [`session`]: spawn, lock, line clear, respawn and game over
//! - [`config`]: startup configuration and validation
//! - [`rng`]: seeded piece selection
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameSession, SessionState};
//! use blockfall_core::types::{Command, TetrominoKind};
//!
//! let mut session = GameSession::new(&GameConfig::default()).unwrap();
//! session.start();
//! session.spawn_kind(TetrominoKind::O);
//!
//! session.tick(0.016, &[Command::MoveLeft, Command::HardDrop]);
//!
//! let event = session.take_last_event().unwrap();
//! assert_eq!(event.kind, TetrominoKind::O);
//! assert_eq!(event.rows_cleared, 0);
//! assert_eq!(session.state(), SessionState::Playing);
//! ```

pub mod catalog;
pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod session;
pub mod surface;

pub use blockfall_types as types;

pub use catalog::{
    Catalog, CatalogError, CatalogSpec, Pivot, Shape, TetrominoDefinition, WallKickTable, MAX_OFFSET,
};
pub use config::{ConfigError, GameConfig};
pub use grid::{Bounds, Grid};
pub use piece::{rotate_offset, wrap, ActivePiece, PieceState, PieceTiming};
pub use rng::SimpleRng;
pub use session::{GameSession, LockEvent, SessionState};
pub use surface::{MemorySurface, TileSurface};
