/* text_surface.rs
 *
 * Copyright 2023 Romeo Calota
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

use std::io::Write;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::panel::{FrameSink, Surface, SurfaceError};

const GLYPH_SIZE: i32 = 8;
const COLUMNS: usize = (SCREEN_WIDTH / GLYPH_SIZE) as usize;
const ROWS: usize = (SCREEN_HEIGHT / GLYPH_SIZE) as usize;

/// Boxes brighter than this are drawn with a shade character instead of blanks.
const SHADE_LUMA_THRESHOLD: u32 = 64;
const SHADE: char = '░';

/// Character-cell rendition of the 320x240 framebuffer, one cell per 8x8 glyph.
#[derive(Debug, Clone)]
pub struct TextSurface {
    cells: [[char; COLUMNS]; ROWS],
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface {
    pub fn new() -> Self {
        Self {
            cells: [[' '; COLUMNS]; ROWS],
        }
    }

    pub fn columns(&self) -> usize {
        COLUMNS
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    /// Text of one character row with trailing blanks removed.
    pub fn line(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_owned())
            .unwrap_or_default()
    }

    fn luma(color: u32) -> u32 {
        let r = (color >> 24) & 0xFF;
        let g = (color >> 16) & 0xFF;
        let b = (color >> 8) & 0xFF;

        (r * 299 + g * 587 + b * 114) / 1000
    }
}

impl Surface for TextSurface {
    fn fill_screen(&mut self, _color: u32) {
        self.cells = [[' '; COLUMNS]; ROWS];
    }

    fn draw_box(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        let fill = if Self::luma(color) > SHADE_LUMA_THRESHOLD {
            SHADE
        } else {
            ' '
        };

        let col_start = (x.max(0) / GLYPH_SIZE) as usize;
        let col_end = (((x + width).max(0) + GLYPH_SIZE - 1) / GLYPH_SIZE) as usize;
        let row_start = (y.max(0) / GLYPH_SIZE) as usize;
        let row_end = (((y + height).max(0) + GLYPH_SIZE - 1) / GLYPH_SIZE) as usize;

        for row in self.cells.iter_mut().take(row_end).skip(row_start) {
            for cell in row.iter_mut().take(col_end).skip(col_start) {
                *cell = fill;
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        if x < 0 || y < 0 {
            return;
        }

        let Some(row) = self.cells.get_mut((y / GLYPH_SIZE) as usize) else {
            return;
        };

        let col = (x / GLYPH_SIZE) as usize;
        for (cell, c) in row.iter_mut().skip(col).zip(text.chars()) {
            *cell = c;
        }
    }
}

impl std::fmt::Display for TextSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..ROWS {
            writeln!(f, "{}", self.line(row))?;
        }

        Ok(())
    }
}

/// Keeps a copy of the most recently presented frame.
#[derive(Debug, Default)]
pub struct LastFrame {
    frame: Option<TextSurface>,
    presented: u32,
}

impl LastFrame {
    pub fn frame(&self) -> Option<&TextSurface> {
        self.frame.as_ref()
    }

    pub fn presented(&self) -> u32 {
        self.presented
    }
}

impl FrameSink<TextSurface> for LastFrame {
    fn present(&mut self, surface: &TextSurface) -> Result<(), SurfaceError> {
        self.frame = Some(surface.clone());
        self.presented = self.presented.saturating_add(1);
        Ok(())
    }
}

/// Streams every `interval`-th presented frame to a writer.
pub struct WriterSink<W: Write> {
    writer: W,
    interval: u32,
    presented: u32,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, interval: u32) -> Self {
        Self {
            writer,
            interval: interval.max(1),
            presented: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink<TextSurface> for WriterSink<W> {
    fn present(&mut self, surface: &TextSurface) -> Result<(), SurfaceError> {
        self.presented = self.presented.wrapping_add(1);
        if self.presented % self.interval != 0 {
            return Ok(());
        }

        writeln!(self.writer, "--- frame {} ---", self.presented)?;
        write!(self.writer, "{}", surface)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lands_on_glyph_cells() {
        let mut surface = TextSurface::new();
        surface.draw_text(10, 8, "N64");
        surface.draw_text(20, 63, "row");

        assert_eq!(surface.line(1), " N64");
        assert_eq!(surface.line(7), "  row");
    }

    #[test]
    fn text_is_clipped() {
        let mut surface = TextSurface::new();
        surface.draw_text(312, 0, "abc");
        surface.draw_text(0, 400, "gone");
        surface.draw_text(-8, 0, "gone");

        assert_eq!(surface.line(0), format!("{}a", " ".repeat(COLUMNS - 1)));
        assert_eq!(surface.to_string().lines().count(), ROWS);
    }

    #[test]
    fn bright_boxes_are_shaded() {
        let mut surface = TextSurface::new();
        surface.draw_box(0, 0, 16, 8, 0x4A4A6AFF);
        surface.draw_box(16, 0, 16, 8, 0x2D2D44FF);
        surface.draw_text(0, 0, "A");

        assert_eq!(surface.line(0), format!("A{}", SHADE));
    }

    #[test]
    fn fill_clears_everything() {
        let mut surface = TextSurface::new();
        surface.draw_text(0, 0, "text");
        surface.fill_screen(0);
        assert!(surface.to_string().trim().is_empty());
    }

    #[test]
    fn writer_sink_honours_interval() {
        let surface = TextSurface::new();
        let mut sink = WriterSink::new(Vec::new(), 2);

        for _ in 0..4 {
            sink.present(&surface).unwrap();
        }

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("--- frame 2 ---"));
        assert!(output.contains("--- frame 4 ---"));
        assert!(!output.contains("--- frame 1 ---"));
    }

    #[test]
    fn last_frame_keeps_copy() {
        let mut surface = TextSurface::new();
        let mut sink = LastFrame::default();

        surface.draw_text(0, 0, "first");
        sink.present(&surface).unwrap();
        surface.draw_text(0, 0, "later");

        assert_eq!(sink.frame().unwrap().line(0), "first");
        assert_eq!(sink.presented(), 1);
    }
}
