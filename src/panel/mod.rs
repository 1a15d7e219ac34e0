/* panel/mod.rs
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

use std::fmt::Write;

use thiserror::Error;

use crate::config::{
    COLOR_BACKGROUND, COLOR_BAR, COLOR_TAB_ACTIVE, SCREEN_WIDTH, STATUS_HINT, TITLE,
};
use crate::identity::SystemIdentity;
use crate::input::Tab;
use crate::measurements::SystemMeasurements;
use crate::ArrayString;

mod cpu;
mod memory;
mod rcp;
mod video;

const CONTENT_TOP: i32 = 50;
const HEADING_X: i32 = 15;
const ROW_X: i32 = 20;
const LINE_HEIGHT: i32 = 11;
const HEADING_SPACING: i32 = 2;
const SECTION_SPACING: i32 = 3;
/// Keeps the longest row inside 40 columns of the 8x8 font.
const LABEL_WIDTH: usize = 16;

const TAB_X: i32 = 10;
const TAB_Y: i32 = 28;
const TAB_STRIDE: i32 = 70;
const TAB_WIDTH: i32 = 65;
const TAB_HEIGHT: i32 = 18;
const TAB_LABEL_INSET: i32 = 5;

const TITLE_BAR_HEIGHT: i32 = 25;
const STATUS_BAR_Y: i32 = 225;
const STATUS_BAR_HEIGHT: i32 = 15;

/// Drawing primitives of a locked framebuffer.
pub trait Surface {
    fn fill_screen(&mut self, color: u32);

    fn draw_box(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32);

    fn draw_text(&mut self, x: i32, y: i32, text: &str);
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to present frame: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a finished frame goes once everything has been drawn on it.
pub trait FrameSink<S: ?Sized> {
    fn present(&mut self, surface: &S) -> Result<(), SurfaceError>;
}

/// Draws the complete panel: title bar, tab strip, the contents of `tab` and the status bar.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    tab: Tab,
    measurements: &SystemMeasurements,
    identity: &SystemIdentity,
) {
    surface.fill_screen(COLOR_BACKGROUND);

    surface.draw_box(0, 0, SCREEN_WIDTH, TITLE_BAR_HEIGHT, COLOR_BAR);
    surface.draw_text(10, 8, TITLE);

    for (i, t) in Tab::ALL.iter().enumerate() {
        let x = TAB_X + i as i32 * TAB_STRIDE;
        let color = if *t == tab { COLOR_TAB_ACTIVE } else { COLOR_BAR };

        surface.draw_box(x, TAB_Y, TAB_WIDTH, TAB_HEIGHT, color);
        surface.draw_text(x + TAB_LABEL_INSET, TAB_Y + TAB_LABEL_INSET, t.name());
    }

    let mut rows = Rows::new(surface);
    match tab {
        Tab::Cpu => cpu::draw(&mut rows, measurements, identity),
        Tab::Memory => memory::draw(&mut rows, measurements, identity),
        Tab::Rcp => rcp::draw(&mut rows, identity),
        Tab::Video => video::draw(&mut rows, measurements, identity),
    }

    surface.draw_box(0, STATUS_BAR_Y, SCREEN_WIDTH, STATUS_BAR_HEIGHT, COLOR_BAR);
    surface.draw_text(10, STATUS_BAR_Y + 4, STATUS_HINT);
}

/// Lays out headed sections of `label : value` rows from the top of the content area down.
struct Rows<'a, S: ?Sized> {
    surface: &'a mut S,
    y: i32,
    first_section: bool,
}

impl<'a, S: Surface + ?Sized> Rows<'a, S> {
    fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            y: CONTENT_TOP,
            first_section: true,
        }
    }

    fn section(&mut self, title: &str) {
        if !self.first_section {
            self.y += SECTION_SPACING;
        }
        self.first_section = false;

        self.surface.draw_text(HEADING_X, self.y, title);
        self.y += LINE_HEIGHT + HEADING_SPACING;
    }

    fn row(&mut self, label: &str, value: &str) {
        let mut buffer = ArrayString::new();
        // Overlong rows are cut at the buffer capacity
        let _ = write!(buffer, "{:<width$} : {}", label, value, width = LABEL_WIDTH);

        self.surface.draw_text(ROW_X, self.y, &buffer);
        self.y += LINE_HEIGHT;
    }

    fn row_fmt(&mut self, label: &str, value: std::fmt::Arguments<'_>) {
        let mut buffer = ArrayString::new();
        let _ = buffer.write_fmt(value);
        self.row(label, &buffer);
    }

    fn row_mhz(&mut self, label: &str, value: Option<f32>) {
        match value {
            Some(mhz) => self.row_fmt(label, format_args!("{:.2} MHz", mhz)),
            None => self.row(label, "--"),
        }
    }
}
