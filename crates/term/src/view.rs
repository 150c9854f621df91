//! Grid -> glyph rows.

use crate::core::{Grid, SessionState, TileSurface};
use crate::types::{Cell, TileId};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single styled terminal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

const BACKGROUND: Rgb = Rgb::new(30, 30, 40);
const BORDER: Rgb = Rgb::new(90, 90, 100);
const TEXT: Rgb = Rgb::new(220, 220, 220);

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: TEXT,
            bg: Rgb::new(0, 0, 0),
        }
    }
}

/// Rows of glyphs, top row first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub rows: Vec<Vec<Glyph>>,
}

impl Frame {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Characters of one row, without styling.
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }
}

/// Color for a tile id. Ids 1..=7 follow the standard catalog order.
pub fn tile_color(tile: TileId) -> Rgb {
    match tile.0 {
        1 => Rgb::new(80, 220, 220),  // I
        2 => Rgb::new(240, 220, 80),  // O
        3 => Rgb::new(200, 120, 220), // T
        4 => Rgb::new(80, 120, 220),  // J
        5 => Rgb::new(255, 165, 0),   // L
        6 => Rgb::new(100, 220, 120), // S
        7 => Rgb::new(220, 80, 80),   // Z
        _ => Rgb::new(180, 180, 180),
    }
}

/// Draws the bordered playfield, two characters per cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardView;

impl BoardView {
    pub fn render<S: TileSurface>(&self, grid: &Grid<S>, state: SessionState) -> Frame {
        let bounds = grid.bounds();
        let border = |ch| Glyph {
            ch,
            fg: BORDER,
            bg: BACKGROUND,
        };

        let mut rows = Vec::with_capacity(bounds.height as usize + 3);
        let inner = bounds.width as usize * 2;

        rows.push(edge_row('┌', '┐', inner, border));
        for y in (bounds.y_min..bounds.y_max()).rev() {
            let mut row = Vec::with_capacity(inner + 2);
            row.push(border('│'));
            for x in bounds.x_min..bounds.x_max() {
                let glyph = match grid.tile(Cell::new(x, y)) {
                    Some(tile) => Glyph {
                        ch: '█',
                        fg: tile_color(tile),
                        bg: BACKGROUND,
                    },
                    None => Glyph {
                        ch: ' ',
                        fg: TEXT,
                        bg: BACKGROUND,
                    },
                };
                row.push(glyph);
                row.push(glyph);
            }
            row.push(border('│'));
            rows.push(row);
        }
        rows.push(edge_row('└', '┘', inner, border));

        let status = match state {
            SessionState::Ready => "",
            SessionState::Playing => "Esc quit",
            SessionState::GameOver => "GAME OVER - r restart",
        };
        rows.push(status.chars().map(|ch| Glyph { ch, ..Glyph::default() }).collect());

        Frame { rows }
    }
}

fn edge_row(left: char, right: char, inner: usize, border: impl Fn(char) -> Glyph) -> Vec<Glyph> {
    let mut row = Vec::with_capacity(inner + 2);
    row.push(border(left));
    row.extend(std::iter::repeat(border('─')).take(inner));
    row.push(border(right));
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_border_and_blank_interior() {
        let grid = Grid::new(4, 3);
        let frame = BoardView.render(&grid, SessionState::Playing);

        // top edge + 3 rows + bottom edge + status
        assert_eq!(frame.height(), 6);
        assert_eq!(frame.row_text(0), "┌────────┐");
        assert_eq!(frame.row_text(1), "│        │");
        assert_eq!(frame.row_text(4), "└────────┘");
        assert_eq!(frame.row_text(5), "Esc quit");
    }

    #[test]
    fn top_row_is_drawn_first() {
        let mut grid = Grid::new(4, 4);
        let b = grid.bounds();
        grid.fill(Cell::new(b.x_min, b.y_max() - 1), TileId(2));
        grid.fill(Cell::new(b.x_max() - 1, b.y_min), TileId(7));

        let frame = BoardView.render(&grid, SessionState::Playing);
        assert_eq!(frame.row_text(1), "│██      │");
        assert_eq!(frame.row_text(4), "│      ██│");
        assert_eq!(frame.rows[1][1].fg, tile_color(TileId(2)));
        assert_eq!(frame.rows[4][7].fg, tile_color(TileId(7)));
    }

    #[test]
    fn game_over_status_line() {
        let grid = Grid::new(4, 4);
        let frame = BoardView.render(&grid, SessionState::GameOver);
        assert_eq!(frame.row_text(frame.height() - 1), "GAME OVER - r restart");
    }
}
