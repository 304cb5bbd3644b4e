//! Crossterm-backed display
//!
//! Draw calls are queued into a buffered writer and flushed once per frame in
//! `present`, so the terminal only sees whole frames.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{QueueableCommand, queue};

use super::Display;
use crate::sim::Glyph;

/// Character drawn for each glyph
pub fn glyph_char(glyph: Glyph) -> char {
    match glyph {
        Glyph::Diamond => '◆',
        Glyph::VerticalLine => '│',
        Glyph::HorizontalLine => '─',
        Glyph::TopTee => '┬',
        Glyph::BottomTee => '┴',
        Glyph::Checkerboard => '▒',
    }
}

pub struct TerminalDisplay<W: Write> {
    out: BufWriter<W>,
    rows: u16,
    cols: u16,
}

impl<W: Write> TerminalDisplay<W> {
    /// Display over a `rows` x `cols` grid
    pub fn new(out: W, rows: u16, cols: u16) -> Self {
        Self {
            out: BufWriter::new(out),
            rows,
            cols,
        }
    }

    /// Grid cell for (row, col), or `None` if it is off screen
    fn cell(&self, row: i32, col: i32) -> Option<(u16, u16)> {
        let row = u16::try_from(row).ok().filter(|r| *r < self.rows)?;
        let col = u16::try_from(col).ok().filter(|c| *c < self.cols)?;
        Some((row, col))
    }

    fn put(&mut self, row: i32, col: i32, ch: char) -> io::Result<()> {
        if let Some((row, col)) = self.cell(row, col) {
            queue!(self.out, MoveTo(col, row), Print(ch))?;
        }
        Ok(())
    }

    fn horizontal_run(&mut self, row: u16) -> io::Result<()> {
        let line: String =
            std::iter::repeat_n(glyph_char(Glyph::HorizontalLine), self.cols as usize).collect();
        queue!(self.out, MoveTo(0, row), Print(line))
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn draw_text(&mut self, row: i32, col: i32, text: &str) -> io::Result<()> {
        let Some((row, col)) = self.cell(row, col) else {
            return Ok(());
        };
        let room = (self.cols - col) as usize;
        let text: String = text.chars().take(room).collect();
        queue!(self.out, MoveTo(col, row), Print(text))
    }

    fn draw_border(&mut self) -> io::Result<()> {
        if self.rows < 2 || self.cols < 2 {
            return Ok(());
        }
        let (bottom, right) = (self.rows - 1, self.cols - 1);
        self.horizontal_run(0)?;
        self.horizontal_run(bottom)?;
        for row in 1..bottom {
            self.put(row.into(), 0, glyph_char(Glyph::VerticalLine))?;
            self.put(row.into(), right.into(), glyph_char(Glyph::VerticalLine))?;
        }
        self.put(0, 0, '┌')?;
        self.put(0, right.into(), '┐')?;
        self.put(bottom.into(), 0, '└')?;
        self.put(bottom.into(), right.into(), '┘')
    }

    fn draw_vertical_line(
        &mut self,
        row: i32,
        col: i32,
        glyph: Glyph,
        length: i32,
    ) -> io::Result<()> {
        let ch = glyph_char(glyph);
        for offset in 0..length.max(0) {
            self.put(row + offset, col, ch)?;
        }
        Ok(())
    }

    fn draw_char(&mut self, row: i32, col: i32, glyph: Glyph) -> io::Result<()> {
        self.put(row, col, glyph_char(glyph))
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(display: TerminalDisplay<Vec<u8>>) -> String {
        let bytes = display.out.into_inner().unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_draw_char_emits_glyph() {
        let mut display = TerminalDisplay::new(Vec::new(), 24, 80);
        display.draw_char(5, 41, Glyph::Diamond).unwrap();
        display.present().unwrap();
        assert!(frame(display).contains('◆'));
    }

    #[test]
    fn test_off_screen_is_skipped() {
        let mut display = TerminalDisplay::new(Vec::new(), 24, 80);
        display.draw_char(-1, 3, Glyph::Diamond).unwrap();
        display.draw_char(24, 3, Glyph::Diamond).unwrap();
        display.draw_char(3, 80, Glyph::Diamond).unwrap();
        display.draw_text(3, 200, "12").unwrap();
        display.present().unwrap();
        assert!(frame(display).is_empty());
    }

    #[test]
    fn test_text_is_truncated_at_edge() {
        let mut display = TerminalDisplay::new(Vec::new(), 24, 10);
        display.draw_text(1, 8, "vx = 1.00").unwrap();
        display.present().unwrap();
        let out = frame(display);
        assert!(out.contains("vx"));
        assert!(!out.contains("vx ="));
    }

    #[test]
    fn test_vertical_line_length() {
        let mut display = TerminalDisplay::new(Vec::new(), 24, 80);
        display
            .draw_vertical_line(9, 3, Glyph::Checkerboard, 6)
            .unwrap();
        display.present().unwrap();
        assert_eq!(frame(display).matches('▒').count(), 6);
    }
}
