//! Terminal runner (default binary).
//!
//! Polls crossterm for key events, ticks the session at a fixed frame rate
//! with the real elapsed time, and redraws the board after every frame.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use blockfall::core::{GameConfig, GameSession};
use blockfall::input::{should_quit, should_restart, CommandBuffer};
use blockfall::term::{BoardView, TerminalRenderer};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config();
    let mut session = GameSession::new(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only when `BLOCKFALL_LOG` is set; the terminal belongs to the board.
fn init_logging() -> Result<()> {
    let Ok(filter) = std::env::var("BLOCKFALL_LOG") else {
        return Ok(());
    };
    let path = std::env::var("BLOCKFALL_LOG_FILE").unwrap_or_else(|_| "blockfall.log".to_string());
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config() -> GameConfig {
    let Ok(path) = std::env::var("BLOCKFALL_CONFIG") else {
        return GameConfig::default();
    };
    match GameConfig::from_path(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!(%path, error = %err, "config rejected, using defaults");
            GameConfig::default()
        }
    }
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    session.start();

    let view = BoardView;
    let mut commands = CommandBuffer::new();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        term.draw(view.render(session.grid(), session.state()))?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if session.is_game_over() && should_restart(key) {
                            session.start();
                            continue;
                        }
                    }
                    commands.handle_event(key);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let pending = commands.drain();
            session.tick(elapsed.as_secs_f32(), &pending);
            commands.update(elapsed.as_millis() as u32);
        }
    }
}
