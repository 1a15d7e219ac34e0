/* hardware/simulated.rs
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

use std::cell::Cell;

use super::{CycleClock, HardwarePort, TvStandard};
use crate::config::DCACHE_LINE_BYTES;

/// Count ticks per frame of a retail NTSC console (46.875 MHz / 60).
pub const NTSC_COUNTS_PER_FRAME: u32 = 781_250;

const NTSC_HALF_LINES: u32 = 525;
const PAL_HALF_LINES: u32 = 625;
/// Scanout moves this many half-lines between two samples, so successive frames see
/// different raster positions.
const VI_DRIFT_PER_FRAME: u32 = 97;

/// Hardware port backed by plain memory, for running the panel off-target.
///
/// The counter only moves when the owner calls [`SimulatedPort::step_frame`] or
/// [`SimulatedPort::advance`], or when an uncached copy is charged against it.
#[derive(Debug)]
pub struct SimulatedPort {
    counter: Cell<u32>,
    counts_per_frame: u32,
    copy_cost_counts: u32,
    half_line: u32,

    processor_id: u32,
    rcp_version: u32,
    memory_size_bytes: u32,
    tv_standard: TvStandard,

    uncached_copies: u32,
    lines_invalidated: usize,
}

impl SimulatedPort {
    pub fn new(counts_per_frame: u32) -> Self {
        Self {
            counter: Cell::new(0),
            counts_per_frame,
            copy_cost_counts: 0,
            half_line: 0,

            processor_id: 0x0000_0B01,
            rcp_version: 0x0202_0102,
            memory_size_bytes: 4 * 1024 * 1024,
            tv_standard: TvStandard::Ntsc,

            uncached_copies: 0,
            lines_invalidated: 0,
        }
    }

    pub fn with_start_count(self, count: u32) -> Self {
        self.counter.set(count);
        self
    }

    /// Counter ticks charged for each uncached copy.
    pub fn with_copy_cost(mut self, counts: u32) -> Self {
        self.copy_cost_counts = counts;
        self
    }

    pub fn with_processor_id(mut self, prid: u32) -> Self {
        self.processor_id = prid;
        self
    }

    pub fn with_rcp_version(mut self, version: u32) -> Self {
        self.rcp_version = version;
        self
    }

    pub fn with_memory_size_bytes(mut self, bytes: u32) -> Self {
        self.memory_size_bytes = bytes;
        self
    }

    pub fn with_tv_standard(mut self, tv_standard: TvStandard) -> Self {
        self.tv_standard = tv_standard;
        self
    }

    /// Moves time forward by one video frame.
    pub fn step_frame(&mut self) {
        self.advance(self.counts_per_frame);

        let half_lines = match self.tv_standard {
            TvStandard::Pal => PAL_HALF_LINES,
            _ => NTSC_HALF_LINES,
        };
        self.half_line = (self.half_line + VI_DRIFT_PER_FRAME) % half_lines;
    }

    pub fn advance(&self, counts: u32) {
        self.counter.set(self.counter.get().wrapping_add(counts));
    }

    pub fn uncached_copies(&self) -> u32 {
        self.uncached_copies
    }

    pub fn lines_invalidated(&self) -> usize {
        self.lines_invalidated
    }
}

impl CycleClock for SimulatedPort {
    fn read_cycles(&self) -> u32 {
        self.counter.get()
    }
}

impl HardwarePort for SimulatedPort {
    fn processor_id(&self) -> u32 {
        self.processor_id
    }

    fn rcp_version(&self) -> u32 {
        self.rcp_version
    }

    fn vi_current(&self) -> u32 {
        // Bit 0 is the field bit on interlaced modes; progressive output leaves it clear
        self.half_line << 1
    }

    fn memory_size_bytes(&self) -> u32 {
        self.memory_size_bytes
    }

    fn tv_standard(&self) -> TvStandard {
        self.tv_standard
    }

    fn writeback_invalidate(&mut self, buffer: &[u32]) {
        let bytes = core::mem::size_of_val(buffer);
        self.lines_invalidated += bytes.div_ceil(DCACHE_LINE_BYTES);
    }

    fn copy_uncached(&mut self, src: &[u32], dst: &mut [u32]) {
        let len = src.len().min(dst.len());
        dst[..len].copy_from_slice(&src[..len]);

        self.uncached_copies += 1;
        self.advance(self.copy_cost_counts);
    }

    fn wait_for_frame(&mut self) {
        self.step_frame();
    }
}
