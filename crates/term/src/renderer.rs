//! TerminalRenderer: flushes a [`Frame`] to a real terminal.
//!
//! The first frame (and any frame whose size changed) is a full redraw.
//! After that only runs of changed glyphs are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::view::{Frame, Glyph, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: Frame) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if same_shape(prev, &frame) => encode_diff_into(prev, &frame, &mut self.buf)?,
            _ => encode_frame_into(&frame, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(frame);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_frame_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(Rgb, Rgb)> = None;
    for (y, row) in frame.rows.iter().enumerate() {
        for glyph in row {
            apply_style_into(out, glyph, &mut current)?;
            out.queue(Print(glyph.ch))?;
        }
        if y + 1 < frame.rows.len() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

fn encode_diff_into(prev: &Frame, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<(Rgb, Rgb)> = None;
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x as u16, y as u16))?;
        for glyph in &next.rows[y][x..x + len] {
            apply_style_into(out, glyph, &mut current)?;
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    })?;
    out.queue(ResetColor)?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, glyph: &Glyph, current: &mut Option<(Rgb, Rgb)>) -> Result<()> {
    if *current != Some((glyph.fg, glyph.bg)) {
        out.queue(SetForegroundColor(rgb_to_color(glyph.fg)))?;
        out.queue(SetBackgroundColor(rgb_to_color(glyph.bg)))?;
        *current = Some((glyph.fg, glyph.bg));
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn same_shape(a: &Frame, b: &Frame) -> bool {
    a.rows.len() == b.rows.len() && a.rows.iter().zip(&b.rows).all(|(x, y)| x.len() == y.len())
}

// Callers guarantee both frames have the same shape.
fn for_each_changed_run(
    prev: &Frame,
    next: &Frame,
    mut f: impl FnMut(usize, usize, usize) -> Result<()>,
) -> Result<()> {
    for (y, (a, b)) in prev.rows.iter().zip(&next.rows).enumerate() {
        let mut x = 0;
        while x < b.len() {
            if a[x] == b[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < b.len() && a[x] != b[x] {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}
