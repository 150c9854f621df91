//! Game session - spawn, tick, lock, line clear, respawn, game over
//!
//! The session owns the grid and the active piece and lends the grid to the
//! piece for every operation. Nothing advances unless the driver calls
//! [`GameSession::tick`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::piece::{ActivePiece, PieceState, PieceTiming};
use crate::rng::SimpleRng;
use crate::surface::{MemorySurface, TileSurface};
use crate::types::{Cell, Command, TetrominoKind};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, `start` not called yet.
    Ready,
    Playing,
    /// Terminal: a piece could not spawn. The grid has been cleared.
    GameOver,
}

/// Emitted each time a piece locks (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: TetrominoKind,
    pub rows_cleared: usize,
}

#[derive(Debug)]
pub struct GameSession<S: TileSurface = MemorySurface> {
    catalog: Catalog,
    grid: Grid<S>,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    spawn_anchor: Cell,
    timing: PieceTiming,
    state: SessionState,
    last_event: Option<LockEvent>,
}

impl GameSession<MemorySurface> {
    /// Validate `config` and build an in-memory session.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let surface = MemorySurface::new(config.bounds());
        Self::with_surface(config, surface)
    }
}

impl Default for GameSession<MemorySurface> {
    fn default() -> Self {
        let config = GameConfig::default();
        let bounds = config.bounds();
        Self::from_parts(
            &config,
            Catalog::standard(),
            Grid::with_surface(bounds, MemorySurface::new(bounds)),
        )
    }
}

impl<S: TileSurface> GameSession<S> {
    /// Validate `config` and build a session over a caller-provided surface.
    pub fn with_surface(config: &GameConfig, surface: S) -> Result<Self, ConfigError> {
        let catalog = config.validate()?;
        let grid = Grid::with_surface(config.bounds(), surface);
        Ok(Self::from_parts(config, catalog, grid))
    }

    fn from_parts(config: &GameConfig, catalog: Catalog, grid: Grid<S>) -> Self {
        Self {
            catalog,
            grid,
            active: None,
            rng: SimpleRng::new(config.seed),
            spawn_anchor: config.spawn_anchor,
            timing: config.timing(),
            state: SessionState::Ready,
            last_event: None,
        }
    }

    /// Clear the grid and spawn the first piece.
    ///
    /// Also restarts a session that reached game over.
    pub fn start(&mut self) {
        self.grid.reset();
        self.active = None;
        self.last_event = None;
        self.state = SessionState::Playing;
        info!(
            width = self.grid.bounds().width,
            height = self.grid.bounds().height,
            "session started"
        );
        self.spawn_next();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    /// Direct grid access for drivers and test setups.
    ///
    /// The active piece's footprint is written into the grid between ticks.
    pub fn grid_mut(&mut self) -> &mut Grid<S> {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Draw a random kind and spawn it.
    pub fn spawn_next(&mut self) -> bool {
        let kind = self.rng.next_kind();
        self.spawn_kind(kind)
    }

    /// Replace the active piece with a fresh `kind` at the spawn anchor.
    ///
    /// If the spawn footprint is blocked the session ends: the grid is
    /// cleared and no piece remains. Returns whether a piece was spawned.
    pub fn spawn_kind(&mut self, kind: TetrominoKind) -> bool {
        if let Some(old) = self.active.take() {
            self.grid.clear_cells(old.cells(), old.anchor());
        }

        let definition = Arc::clone(self.catalog.definition_for(kind));
        let piece = ActivePiece::spawn(definition, self.spawn_anchor, self.timing);

        if !self.grid.is_valid_position(piece.cells(), piece.anchor()) {
            self.game_over();
            return false;
        }

        self.grid
            .set_cells(piece.cells(), piece.anchor(), piece.definition().tile);
        debug!(kind = kind.as_str(), "piece spawned");
        self.active = Some(piece);
        self.state = SessionState::Playing;
        true
    }

    /// Advance one frame with the commands collected since the last tick.
    ///
    /// Returns the active piece's state, or `None` when not playing.
    pub fn tick(&mut self, delta: f32, commands: &[Command]) -> Option<PieceState> {
        if self.state != SessionState::Playing {
            return None;
        }
        let mut piece = self.active.take()?;

        let outcome = piece.tick(&mut self.grid, delta, commands);
        if outcome == PieceState::Locked {
            self.on_lock(piece.definition().kind);
        } else {
            self.active = Some(piece);
        }
        Some(outcome)
    }

    fn on_lock(&mut self, kind: TetrominoKind) {
        let rows_cleared = self.grid.clear_full_rows();
        self.last_event = Some(LockEvent { kind, rows_cleared });
        self.spawn_next();
    }

    fn game_over(&mut self) {
        self.grid.reset();
        self.active = None;
        self.state = SessionState::GameOver;
        info!("game over");
    }
}
