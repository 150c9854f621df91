//! Property tests - wrap range, rotation closure and rotate/revert stability

use std::sync::Arc;

use proptest::prelude::*;

use blockfall::core::{rotate_offset, wrap, ActivePiece, Catalog, Grid, PieceTiming};
use blockfall::types::{Cell, RotationDirection, TetrominoKind};

fn kind_strategy() -> impl Strategy<Value = TetrominoKind> {
    (0usize..7).prop_map(|i| TetrominoKind::ALL[i])
}

fn direction_strategy() -> impl Strategy<Value = RotationDirection> {
    prop_oneof![
        Just(RotationDirection::Clockwise),
        Just(RotationDirection::CounterClockwise),
    ]
}

fn opposite(direction: RotationDirection) -> RotationDirection {
    match direction {
        RotationDirection::Clockwise => RotationDirection::CounterClockwise,
        RotationDirection::CounterClockwise => RotationDirection::Clockwise,
    }
}

proptest! {
    #[test]
    fn wrap_stays_in_range(value in -10_000i32..10_000, min in -50i32..50, span in 1i32..20) {
        let max = min + span;
        let wrapped = wrap(value, min, max);
        prop_assert!(wrapped >= min && wrapped < max);
        prop_assert_eq!((wrapped - value).rem_euclid(span), 0);
    }

    #[test]
    fn rotations_keep_four_distinct_cells(
        kind in kind_strategy(),
        turns in prop::collection::vec(direction_strategy(), 0..12),
    ) {
        let catalog = Catalog::standard();
        let def = catalog.definition_for(kind);
        let mut cells = def.cells;
        for direction in turns {
            cells = cells.map(|c| rotate_offset(c, def.pivot, direction.sign()));
            for (i, cell) in cells.iter().enumerate() {
                prop_assert!(!cells[..i].contains(cell));
            }
        }
    }

    #[test]
    fn four_quarter_turns_are_identity(kind in kind_strategy(), direction in direction_strategy()) {
        let catalog = Catalog::standard();
        let def = catalog.definition_for(kind);
        let mut cells = def.cells;
        for _ in 0..4 {
            cells = cells.map(|c| rotate_offset(c, def.pivot, direction.sign()));
        }
        prop_assert_eq!(cells, def.cells);
    }

    #[test]
    fn rotate_then_revert_in_open_space(
        kind in kind_strategy(),
        x in -3i32..3,
        y in -8i32..8,
        turns in prop::collection::vec(direction_strategy(), 1..8),
    ) {
        let grid = Grid::default();
        let catalog = Catalog::standard();
        let mut piece = ActivePiece::spawn(
            Arc::clone(catalog.definition_for(kind)),
            Cell::new(x, y),
            PieceTiming::default(),
        );
        let start = (*piece.cells(), piece.anchor(), piece.rotation_index());

        for &direction in &turns {
            prop_assert!(piece.rotate(&grid, direction));
        }
        for &direction in turns.iter().rev() {
            prop_assert!(piece.rotate(&grid, opposite(direction)));
        }
        prop_assert_eq!((*piece.cells(), piece.anchor(), piece.rotation_index()), start);
    }
}
