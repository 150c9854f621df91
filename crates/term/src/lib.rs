//! Terminal rendering for the playfield.
//!
//! The core treats rendering as a side-effect mirror of the grid: each frame
//! the driver asks [`BoardView`] to turn the grid into styled glyph rows, and
//! [`TerminalRenderer`] flushes them to the terminal.

pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use renderer::{encode_frame_into, TerminalRenderer};
pub use view::{tile_color, BoardView, Frame, Glyph, Rgb};
