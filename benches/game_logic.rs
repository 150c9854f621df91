use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{ActivePiece, Catalog, GameSession, Grid, PieceTiming};
use blockfall::types::{Cell, Command, RotationDirection, TetrominoKind, TileId};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::default();
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.start();
            }
            session.tick(black_box(0.016), &[]);
        })
    });
}

fn bench_row_collapse(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::default();
            for y in -10..-6 {
                for x in -5..5 {
                    grid.fill(Cell::new(x, y), TileId(1));
                }
            }
            grid.fill(Cell::new(0, -6), TileId(2));
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let grid = Grid::default();
    let catalog = Catalog::standard();
    let mut piece = ActivePiece::spawn(
        Arc::clone(catalog.definition_for(TetrominoKind::T)),
        Cell::new(-4, 0),
        PieceTiming::default(),
    );

    // Pressed against the wall so most rotations walk the kick list.
    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            black_box(piece.rotate(&grid, RotationDirection::Clockwise));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = GameSession::default();
    session.start();

    c.bench_function("hard_drop_and_respawn", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.start();
            }
            session.tick(0.016, black_box(&[Command::HardDrop]));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_row_collapse,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
