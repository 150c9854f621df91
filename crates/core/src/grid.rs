//! Grid module - the playfield
//!
//! The grid is a bounded rectangle centered on the origin, with occupancy
//! stored in a [`TileSurface`]. It answers collision queries, writes and
//! erases piece footprints, and collapses full rows.
//!
//! Coordinates: `x` grows to the right, `y` grows upward. For the default
//! 10x20 board, columns are `-5..5` and rows are `-10..10`.

use tracing::debug;

use crate::surface::{MemorySurface, TileSurface};
use crate::types::{Cell, TileId};

/// Axis-aligned rectangle; `x_max`/`y_max` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x_min: i32,
    pub y_min: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Rectangle of `width x height` with its origin at `(-width / 2, -height / 2)`.
    pub fn centered(width: i32, height: i32) -> Self {
        Self {
            x_min: -width / 2,
            y_min: -height / 2,
            width,
            height,
        }
    }

    pub fn x_max(&self) -> i32 {
        self.x_min + self.width
    }

    pub fn y_max(&self) -> i32 {
        self.y_min + self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x_min && cell.x < self.x_max() && cell.y >= self.y_min && cell.y < self.y_max()
    }
}

/// The playfield.
///
/// Invariant: the surface never holds a tile outside `bounds`.
#[derive(Debug, Clone)]
pub struct Grid<S: TileSurface = MemorySurface> {
    bounds: Bounds,
    surface: S,
}

impl Grid<MemorySurface> {
    /// Create an empty in-memory grid of `width x height`.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Bounds::centered(width, height);
        Self {
            bounds,
            surface: MemorySurface::new(bounds),
        }
    }
}

impl<S: TileSurface> Grid<S> {
    /// Wrap an existing surface. The surface is cleared.
    pub fn with_surface(bounds: Bounds, mut surface: S) -> Self {
        surface.clear_all_tiles();
        Self { bounds, surface }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// True iff every `anchor + offset` is inside bounds and unoccupied.
    pub fn is_valid_position(&self, cells: &[Cell], anchor: Cell) -> bool {
        cells.iter().all(|&offset| {
            let cell = anchor + offset;
            self.bounds.contains(cell) && !self.surface.has_tile(cell)
        })
    }

    /// Write a footprint as occupied.
    ///
    /// Precondition: the footprint was validated with [`Grid::is_valid_position`].
    /// Occupied cells are silently overwritten.
    pub fn set_cells(&mut self, cells: &[Cell], anchor: Cell, tile: TileId) {
        for &offset in cells {
            self.surface.set_tile(anchor + offset, tile);
        }
    }

    /// Erase a footprint.
    pub fn clear_cells(&mut self, cells: &[Cell], anchor: Cell) {
        for &offset in cells {
            self.surface.clear_tile(anchor + offset);
        }
    }

    /// Write a single tile. Returns false if `cell` is out of bounds.
    pub fn fill(&mut self, cell: Cell, tile: TileId) -> bool {
        if !self.bounds.contains(cell) {
            return false;
        }
        self.surface.set_tile(cell, tile);
        true
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.bounds.contains(cell) && self.surface.has_tile(cell)
    }

    pub fn tile(&self, cell: Cell) -> Option<TileId> {
        if !self.bounds.contains(cell) {
            return None;
        }
        self.surface.get_tile(cell)
    }

    /// Check if every column of `row` is occupied
    pub fn is_row_full(&self, row: i32) -> bool {
        if row < self.bounds.y_min || row >= self.bounds.y_max() {
            return false;
        }
        (self.bounds.x_min..self.bounds.x_max()).all(|x| self.surface.has_tile(Cell::new(x, row)))
    }

    /// Collapse every full row and return how many were removed.
    ///
    /// Rows are scanned bottom-up. After a collapse the same row index is
    /// tested again, since the row above has just shifted into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.bounds.y_min;

        while row < self.bounds.y_max() {
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        if cleared > 0 {
            debug!(rows = cleared, "collapsed full rows");
        }
        cleared
    }

    /// Clear `row`, then shift every row above it down by one.
    fn collapse_row(&mut self, row: i32) {
        let (x_min, x_max, y_max) = (self.bounds.x_min, self.bounds.x_max(), self.bounds.y_max());

        for x in x_min..x_max {
            self.surface.clear_tile(Cell::new(x, row));
        }

        for y in row..y_max {
            for x in x_min..x_max {
                let above = if y + 1 < y_max {
                    self.surface.get_tile(Cell::new(x, y + 1))
                } else {
                    None
                };
                let cell = Cell::new(x, y);
                match above {
                    Some(tile) => self.surface.set_tile(cell, tile),
                    None => self.surface.clear_tile(cell),
                }
            }
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        let b = self.bounds;
        (b.y_min..b.y_max())
            .flat_map(|y| (b.x_min..b.x_max()).map(move |x| Cell::new(x, y)))
            .filter(|&cell| self.surface.has_tile(cell))
            .count()
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.surface.clear_all_tiles();
    }
}

impl Default for Grid<MemorySurface> {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
