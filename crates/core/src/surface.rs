//! Tile surface - the storage the grid reads and writes occupancy through
//!
//! A renderer-backed tilemap and a plain in-memory buffer both satisfy
//! [`TileSurface`]. The grid never touches cells outside its bounds, so a
//! surface only has to store the bounded rectangle.

use crate::grid::Bounds;
use crate::types::{Cell, TileId};

/// Abstract grid surface.
pub trait TileSurface {
    fn set_tile(&mut self, cell: Cell, tile: TileId);

    fn clear_tile(&mut self, cell: Cell);

    fn get_tile(&self, cell: Cell) -> Option<TileId>;

    fn has_tile(&self, cell: Cell) -> bool {
        self.get_tile(cell).is_some()
    }

    /// Remove every tile.
    fn clear_all_tiles(&mut self);
}

/// In-memory surface over a fixed rectangle.
///
/// Flat row-major storage, bottom row first. Reads outside the rectangle
/// return `None`, writes outside it are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    bounds: Bounds,
    tiles: Vec<Option<TileId>>,
}

impl MemorySurface {
    pub fn new(bounds: Bounds) -> Self {
        let len = (bounds.width.max(0) as usize) * (bounds.height.max(0) as usize);
        Self {
            bounds,
            tiles: vec![None; len],
        }
    }

    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.bounds.contains(cell) {
            return None;
        }
        let col = (cell.x - self.bounds.x_min) as usize;
        let row = (cell.y - self.bounds.y_min) as usize;
        Some(row * self.bounds.width as usize + col)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Raw tiles, bottom row first.
    pub fn tiles(&self) -> &[Option<TileId>] {
        &self.tiles
    }
}

impl TileSurface for MemorySurface {
    fn set_tile(&mut self, cell: Cell, tile: TileId) {
        if let Some(idx) = self.index(cell) {
            self.tiles[idx] = Some(tile);
        }
    }

    fn clear_tile(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            self.tiles[idx] = None;
        }
    }

    fn get_tile(&self, cell: Cell) -> Option<TileId> {
        self.index(cell).and_then(|idx| self.tiles[idx])
    }

    fn clear_all_tiles(&mut self) {
        self.tiles.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major_from_bottom_left() {
        let surface = MemorySurface::new(Bounds::centered(10, 20));
        assert_eq!(surface.index(Cell::new(-5, -10)), Some(0));
        assert_eq!(surface.index(Cell::new(4, -10)), Some(9));
        assert_eq!(surface.index(Cell::new(-5, -9)), Some(10));
        assert_eq!(surface.index(Cell::new(4, 9)), Some(199));
        assert_eq!(surface.index(Cell::new(5, 0)), None);
        assert_eq!(surface.index(Cell::new(0, 10)), None);
        assert_eq!(surface.index(Cell::new(-6, 0)), None);
    }

    #[test]
    fn writes_outside_bounds_are_ignored() {
        let mut surface = MemorySurface::new(Bounds::centered(4, 4));
        surface.set_tile(Cell::new(10, 10), TileId(3));
        assert!(surface.tiles().iter().all(Option::is_none));
        assert_eq!(surface.get_tile(Cell::new(10, 10)), None);
    }

    #[test]
    fn set_get_clear() {
        let mut surface = MemorySurface::new(Bounds::centered(4, 4));
        surface.set_tile(Cell::new(0, 0), TileId(7));
        assert!(surface.has_tile(Cell::new(0, 0)));
        assert_eq!(surface.get_tile(Cell::new(0, 0)), Some(TileId(7)));
        surface.clear_tile(Cell::new(0, 0));
        assert!(!surface.has_tile(Cell::new(0, 0)));

        surface.set_tile(Cell::new(1, 1), TileId(2));
        surface.clear_all_tiles();
        assert!(surface.tiles().iter().all(Option::is_none));
    }
}
