//! Key-down edge buffering.
//!
//! Collects at most one command per key press between ticks. Holding a key
//! does not produce more commands: terminals either report auto-repeat as
//! `Repeat` events or re-send `Press` for a held key, and both are absorbed
//! until the key is released.
//!
//! Terminals without release events never report the release, so a held key
//! is forgotten after it has been silent for `key_release_timeout_ms`.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::Command;

/// Commands kept between two ticks; extra presses in the same frame are dropped.
pub const MAX_PENDING: usize = 16;

const MAX_HELD: usize = 8;

// Longer than the typical OS auto-repeat delay (~500ms) so a held key stays held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    code: KeyCode,
    idle_ms: u32,
}

#[derive(Debug, Clone)]
pub struct CommandBuffer {
    pending: ArrayVec<Command, MAX_PENDING>,
    held: ArrayVec<HeldKey, MAX_HELD>,
    key_release_timeout_ms: u32,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            pending: ArrayVec::new(),
            held: ArrayVec::new(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Feed one terminal key event. Returns the command queued, if any.
    pub fn handle_event(&mut self, key: KeyEvent) -> Option<Command> {
        match key.kind {
            KeyEventKind::Press => {
                if let Some(held) = self.held.iter_mut().find(|h| h.code == key.code) {
                    held.idle_ms = 0;
                    return None;
                }
                let command = map_key(key)?;
                // Evict the oldest held key so the newest press is always tracked.
                if self.held.is_full() {
                    self.held.remove(0);
                }
                self.held.push(HeldKey {
                    code: key.code,
                    idle_ms: 0,
                });
                self.pending.try_push(command).ok()?;
                Some(command)
            }
            KeyEventKind::Repeat => {
                if let Some(held) = self.held.iter_mut().find(|h| h.code == key.code) {
                    held.idle_ms = 0;
                }
                None
            }
            KeyEventKind::Release => {
                self.held.retain(|h| h.code != key.code);
                None
            }
        }
    }

    /// Age held keys by `elapsed_ms`, forgetting those silent past the timeout.
    pub fn update(&mut self, elapsed_ms: u32) {
        let timeout = self.key_release_timeout_ms;
        for held in self.held.iter_mut() {
            held.idle_ms = held.idle_ms.saturating_add(elapsed_ms);
        }
        self.held.retain(|h| h.idle_ms <= timeout);
    }

    /// Take the commands collected since the last call, in arrival order.
    pub fn drain(&mut self) -> ArrayVec<Command, MAX_PENDING> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}
