//! Catalog module - tetromino shapes and wall-kick tables
//!
//! Each kind owns four base cell offsets and an ordered table of wall-kick
//! buckets. Bucket order is the rotation transition order
//! `0->1, 1->0, 1->2, 2->1, 2->3, 3->2, 3->0, 0->3`, which is what
//! [`WallKickTable::bucket_index`] produces from the pre-rotation index.
//!
//! Two pivot conventions exist: I and O rotate about a cell corner
//! (half-integer pivot, rounded up), every other kind rotates about a cell
//! center (rounded to nearest). See [`Pivot`].
//!
//! A catalog is either the built-in standard table or loaded from a
//! [`CatalogSpec`]; loading validates the whole table up front so a malformed
//! shape is rejected before any session starts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::piece::wrap;
use crate::types::{Cell, RotationDirection, TetrominoKind, TileId, WALL_KICK_BUCKETS};

/// Base shape of a piece - 4 cell offsets from the anchor
pub type Shape = [Cell; 4];

/// Rotation pivot convention for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// Pivot at a cell corner: offsets are shifted by half a cell, rotated, then rounded up.
    Corner,
    /// Pivot at a cell center: offsets are rotated and rounded to nearest.
    Center,
}

impl Pivot {
    pub fn for_kind(kind: TetrominoKind) -> Self {
        match kind {
            TetrominoKind::I | TetrominoKind::O => Pivot::Corner,
            _ => Pivot::Center,
        }
    }
}

/// Ordered wall-kick candidates, grouped by rotation transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallKickTable {
    buckets: Vec<Vec<Cell>>,
}

impl WallKickTable {
    fn from_rows(rows: &[[Cell; 5]]) -> Self {
        Self {
            buckets: rows.iter().map(|row| row.to_vec()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket for a rotation starting at `rotation_index`.
    ///
    /// `rotation_index * 2`, minus one for counter-clockwise, wrapped into the
    /// table's bucket range.
    pub fn bucket_index(&self, rotation_index: usize, direction: RotationDirection) -> usize {
        let mut index = rotation_index as i32 * 2;
        if direction.sign() < 0 {
            index -= 1;
        }
        wrap(index, 0, self.buckets.len() as i32) as usize
    }

    /// Candidate translations of one bucket, in the order they are tried.
    pub fn bucket(&self, index: usize) -> &[Cell] {
        self.buckets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = &[Cell]> {
        self.buckets.iter().map(Vec::as_slice)
    }
}

/// Immutable per-kind data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetrominoDefinition {
    pub kind: TetrominoKind,
    pub tile: TileId,
    pub cells: Shape,
    pub pivot: Pivot,
    pub wall_kicks: WallKickTable,
}

/// Contract violations found while loading a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no shape defined for {0:?}")]
    MissingShape(TetrominoKind),
    #[error("shape {0:?} is defined more than once")]
    DuplicateShape(TetrominoKind),
    #[error("shape {kind:?} has {count} cells, expected 4")]
    CellCount { kind: TetrominoKind, count: usize },
    #[error("shape {kind:?} repeats cell ({x}, {y})")]
    DuplicateCell { kind: TetrominoKind, x: i32, y: i32 },
    #[error("shape {kind:?} has {found} wall-kick buckets, expected at least 8")]
    MissingBuckets { kind: TetrominoKind, found: usize },
    #[error("shape {kind:?} wall-kick bucket {bucket} has no (0, 0) candidate")]
    NoNeutralKick { kind: TetrominoKind, bucket: usize },
    #[error("shape {kind:?} offset ({x}, {y}) is out of range, expected at most 64 cells")]
    OffsetOutOfRange { kind: TetrominoKind, x: i32, y: i32 },
}

/// Largest coordinate magnitude allowed for a cell offset or kick.
///
/// Keeps `anchor + offset + kick` far from `i32` overflow on any board.
pub const MAX_OFFSET: i32 = 64;

fn check_offset(kind: TetrominoKind, cell: Cell) -> Result<(), CatalogError> {
    let limit = MAX_OFFSET.unsigned_abs();
    if cell.x.unsigned_abs() > limit || cell.y.unsigned_abs() > limit {
        return Err(CatalogError::OffsetOutOfRange {
            kind,
            x: cell.x,
            y: cell.y,
        });
    }
    Ok(())
}

/// Serializable form of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub kind: TetrominoKind,
    #[serde(default)]
    pub tile: Option<TileId>,
    pub cells: Vec<Cell>,
    pub wall_kicks: Vec<Vec<Cell>>,
}

/// Serializable catalog table, as found in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSpec {
    pub shapes: Vec<ShapeSpec>,
}

impl CatalogSpec {
    /// The standard table in serializable form.
    pub fn standard() -> Self {
        Catalog::standard().to_spec()
    }
}

/// Lookup from kind to definition. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: [Arc<TetrominoDefinition>; 7],
}

impl Catalog {
    /// Built-in shapes and SRS-style kick tables.
    pub fn standard() -> Self {
        let definitions = TetrominoKind::ALL.map(|kind| {
            let (cells, kicks): (Shape, &[[Cell; 5]; 8]) = match kind {
                TetrominoKind::I => (I_CELLS, &WALL_KICKS_I),
                TetrominoKind::O => (O_CELLS, &WALL_KICKS_JLOSTZ),
                TetrominoKind::T => (T_CELLS, &WALL_KICKS_JLOSTZ),
                TetrominoKind::J => (J_CELLS, &WALL_KICKS_JLOSTZ),
                TetrominoKind::L => (L_CELLS, &WALL_KICKS_JLOSTZ),
                TetrominoKind::S => (S_CELLS, &WALL_KICKS_JLOSTZ),
                TetrominoKind::Z => (Z_CELLS, &WALL_KICKS_JLOSTZ),
            };
            Arc::new(TetrominoDefinition {
                kind,
                tile: standard_tile(kind),
                cells,
                pivot: Pivot::for_kind(kind),
                wall_kicks: WallKickTable::from_rows(&kicks[..]),
            })
        });
        Self { definitions }
    }

    /// Validate and build a catalog from its serialized form.
    pub fn from_spec(spec: &CatalogSpec) -> Result<Self, CatalogError> {
        let mut slots: [Option<Arc<TetrominoDefinition>>; 7] = Default::default();

        for shape in &spec.shapes {
            let slot = &mut slots[shape.kind.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateShape(shape.kind));
            }
            *slot = Some(Arc::new(validate_shape(shape)?));
        }

        let mut definitions = Vec::with_capacity(7);
        for kind in TetrominoKind::ALL {
            let definition = slots[kind.index()]
                .take()
                .ok_or(CatalogError::MissingShape(kind))?;
            definitions.push(definition);
        }

        let definitions: [Arc<TetrominoDefinition>; 7] = definitions
            .try_into()
            .map_err(|_| CatalogError::MissingShape(TetrominoKind::I))?;
        Ok(Self { definitions })
    }

    /// Definition for `kind`. Total over the closed set of kinds.
    pub fn definition_for(&self, kind: TetrominoKind) -> &Arc<TetrominoDefinition> {
        &self.definitions[kind.index()]
    }

    pub fn to_spec(&self) -> CatalogSpec {
        CatalogSpec {
            shapes: self
                .definitions
                .iter()
                .map(|def| ShapeSpec {
                    kind: def.kind,
                    tile: Some(def.tile),
                    cells: def.cells.to_vec(),
                    wall_kicks: def.wall_kicks.buckets().map(<[Cell]>::to_vec).collect(),
                })
                .collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_tile(kind: TetrominoKind) -> TileId {
    TileId(kind.index() as u8 + 1)
}

fn validate_shape(shape: &ShapeSpec) -> Result<TetrominoDefinition, CatalogError> {
    let kind = shape.kind;

    let cells: Shape = shape
        .cells
        .as_slice()
        .try_into()
        .map_err(|_| CatalogError::CellCount {
            kind,
            count: shape.cells.len(),
        })?;

    for (i, cell) in cells.iter().enumerate() {
        check_offset(kind, *cell)?;
        if cells[..i].contains(cell) {
            return Err(CatalogError::DuplicateCell {
                kind,
                x: cell.x,
                y: cell.y,
            });
        }
    }

    if shape.wall_kicks.len() < WALL_KICK_BUCKETS {
        return Err(CatalogError::MissingBuckets {
            kind,
            found: shape.wall_kicks.len(),
        });
    }

    for (bucket, candidates) in shape.wall_kicks.iter().enumerate() {
        if !candidates.contains(&Cell::ZERO) {
            return Err(CatalogError::NoNeutralKick { kind, bucket });
        }
        for &kick in candidates {
            check_offset(kind, kick)?;
        }
    }

    Ok(TetrominoDefinition {
        kind,
        tile: shape.tile.unwrap_or_else(|| standard_tile(kind)),
        cells,
        pivot: Pivot::for_kind(kind),
        wall_kicks: WallKickTable {
            buckets: shape.wall_kicks.clone(),
        },
    })
}

const fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

const I_CELLS: Shape = [c(-1, 1), c(0, 1), c(1, 1), c(2, 1)];
const O_CELLS: Shape = [c(0, 1), c(1, 1), c(0, 0), c(1, 0)];
const T_CELLS: Shape = [c(0, 1), c(-1, 0), c(0, 0), c(1, 0)];
const J_CELLS: Shape = [c(-1, 1), c(-1, 0), c(0, 0), c(1, 0)];
const L_CELLS: Shape = [c(1, 1), c(-1, 0), c(0, 0), c(1, 0)];
const S_CELLS: Shape = [c(0, 1), c(1, 1), c(-1, 0), c(0, 0)];
const Z_CELLS: Shape = [c(-1, 1), c(0, 1), c(0, 0), c(1, 0)];

/// I kicks (bucket order 0->1, 1->0, 1->2, 2->1, 2->3, 3->2, 3->0, 0->3)
const WALL_KICKS_I: [[Cell; 5]; 8] = [
    [c(0, 0), c(-2, 0), c(1, 0), c(-2, -1), c(1, 2)],
    [c(0, 0), c(2, 0), c(-1, 0), c(2, 1), c(-1, -2)],
    [c(0, 0), c(-1, 0), c(2, 0), c(-1, 2), c(2, -1)],
    [c(0, 0), c(1, 0), c(-2, 0), c(1, -2), c(-2, 1)],
    [c(0, 0), c(2, 0), c(-1, 0), c(2, 1), c(-1, -2)],
    [c(0, 0), c(-2, 0), c(1, 0), c(-2, -1), c(1, 2)],
    [c(0, 0), c(1, 0), c(-2, 0), c(1, -2), c(-2, 1)],
    [c(0, 0), c(-1, 0), c(2, 0), c(-1, 2), c(2, -1)],
];

/// Shared by J, L, O, S, T, Z
const WALL_KICKS_JLOSTZ: [[Cell; 5]; 8] = [
    [c(0, 0), c(-1, 0), c(-1, 1), c(0, -2), c(-1, -2)],
    [c(0, 0), c(1, 0), c(1, -1), c(0, 2), c(1, 2)],
    [c(0, 0), c(1, 0), c(1, -1), c(0, 2), c(1, 2)],
    [c(0, 0), c(-1, 0), c(-1, 1), c(0, -2), c(-1, -2)],
    [c(0, 0), c(1, 0), c(1, 1), c(0, -2), c(1, -2)],
    [c(0, 0), c(-1, 0), c(-1, -1), c(0, 2), c(-1, 2)],
    [c(0, 0), c(-1, 0), c(-1, -1), c(0, 2), c(-1, 2)],
    [c(0, 0), c(1, 0), c(1, 1), c(0, -2), c(1, -2)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_roundtrips_through_validation() {
        let spec = CatalogSpec::standard();
        let catalog = Catalog::from_spec(&spec).expect("standard table is valid");
        for kind in TetrominoKind::ALL {
            assert_eq!(
                **catalog.definition_for(kind),
                **Catalog::standard().definition_for(kind)
            );
        }
    }

    #[test]
    fn pivot_convention_per_kind() {
        assert_eq!(Pivot::for_kind(TetrominoKind::I), Pivot::Corner);
        assert_eq!(Pivot::for_kind(TetrominoKind::O), Pivot::Corner);
        for kind in [
            TetrominoKind::T,
            TetrominoKind::J,
            TetrominoKind::L,
            TetrominoKind::S,
            TetrominoKind::Z,
        ] {
            assert_eq!(Pivot::for_kind(kind), Pivot::Center);
        }
    }

    #[test]
    fn bucket_index_wraps_negative() {
        let table = Catalog::standard()
            .definition_for(TetrominoKind::T)
            .wall_kicks
            .clone();
        assert_eq!(table.bucket_index(0, RotationDirection::Clockwise), 0);
        assert_eq!(table.bucket_index(0, RotationDirection::CounterClockwise), 7);
        assert_eq!(table.bucket_index(1, RotationDirection::CounterClockwise), 1);
        assert_eq!(table.bucket_index(3, RotationDirection::Clockwise), 6);
    }

    #[test]
    fn rejects_three_cell_shape() {
        let mut spec = CatalogSpec::standard();
        spec.shapes[2].cells.pop();
        assert_eq!(
            Catalog::from_spec(&spec).unwrap_err(),
            CatalogError::CellCount {
                kind: TetrominoKind::T,
                count: 3
            }
        );
    }

    #[test]
    fn rejects_missing_buckets() {
        let mut spec = CatalogSpec::standard();
        spec.shapes[0].wall_kicks.truncate(6);
        assert_eq!(
            Catalog::from_spec(&spec).unwrap_err(),
            CatalogError::MissingBuckets {
                kind: TetrominoKind::I,
                found: 6
            }
        );
    }

    #[test]
    fn rejects_bucket_without_neutral_kick() {
        let mut spec = CatalogSpec::standard();
        spec.shapes[5].wall_kicks[3].retain(|k| *k != Cell::ZERO);
        assert_eq!(
            Catalog::from_spec(&spec).unwrap_err(),
            CatalogError::NoNeutralKick {
                kind: TetrominoKind::S,
                bucket: 3
            }
        );
    }

    #[test]
    fn rejects_offsets_past_the_limit() {
        let mut spec = CatalogSpec::standard();
        spec.shapes[4].cells[1] = Cell::new(0, MAX_OFFSET + 1);
        assert_eq!(
            Catalog::from_spec(&spec).unwrap_err(),
            CatalogError::OffsetOutOfRange {
                kind: TetrominoKind::L,
                x: 0,
                y: MAX_OFFSET + 1
            }
        );

        let mut spec = CatalogSpec::standard();
        spec.shapes[4].wall_kicks[2].push(Cell::new(-MAX_OFFSET, MAX_OFFSET));
        assert!(Catalog::from_spec(&spec).is_ok());
    }

    #[test]
    fn rejects_missing_and_duplicate_kinds() {
        let mut spec = CatalogSpec::standard();
        spec.shapes.retain(|s| s.kind != TetrominoKind::L);
        assert_eq!(
            Catalog::from_spec(&spec).unwrap_err(),
            CatalogError::MissingShape(TetrominoKind::L)
        );

        let mut spec = CatalogSpec::standard();
        let extra = spec.shapes[1].clone();
        spec.shapes.push(extra);
        assert_eq!(
            Catalog::from_spec(&spec).unwrap_err(),
            CatalogError::DuplicateShape(TetrominoKind::O)
        );
    }
}
