//! Terminal input module (core-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and buffers one
//! command per key-down edge until the next tick. The core never sees raw
//! key state.

pub mod buffer;
pub mod map;

pub use blockfall_types as types;

pub use buffer::CommandBuffer;
pub use map::{map_key, should_quit, should_restart};
