/* config.rs
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

use static_assertions::const_assert;

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal VR4300 clock, used to seed the frequency reading before the first window closes.
pub const NOMINAL_CPU_FREQ_MHZ: f32 = 93.75;
/// The COP0 Count register ticks once every two processor cycles.
pub const COUNT_TO_CPU_CYCLES: u64 = 2;

pub const CPU_FREQ_WINDOW_FRAMES: u32 = 5;
pub const FPS_WINDOW_FRAMES: u32 = 60;
pub const BANDWIDTH_WINDOW_FRAMES: u32 = 30;

pub const BANDWIDTH_TEST_BYTES: usize = 4096;
pub const BANDWIDTH_TEST_WORDS: usize = BANDWIDTH_TEST_BYTES / core::mem::size_of::<u32>();
/// Shown until the first bandwidth window completes.
pub const BANDWIDTH_PLACEHOLDER_MBPS: u32 = 500;

/// Data cache line size of the VR4300.
pub const DCACHE_LINE_BYTES: usize = 16;

pub const SCREEN_WIDTH: i32 = 320;
pub const SCREEN_HEIGHT: i32 = 240;

pub const COLOR_BACKGROUND: u32 = 0x1A1A2EFF;
pub const COLOR_BAR: u32 = 0x2D2D44FF;
pub const COLOR_TAB_ACTIVE: u32 = 0x4A4A6AFF;

pub const TITLE: &str = "N64-Z - Nintendo 64 System Info";
pub const STATUS_HINT: &str = "L/R: Switch Tab | START: Exit";

const_assert!(BANDWIDTH_TEST_BYTES % DCACHE_LINE_BYTES == 0);
const_assert!(CPU_FREQ_WINDOW_FRAMES > 0);
