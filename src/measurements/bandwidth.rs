/* measurements/bandwidth.rs
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

use super::{seconds_for_cycles, SystemMeasurements};
use crate::config::{BANDWIDTH_TEST_BYTES, BANDWIDTH_TEST_WORDS, BANDWIDTH_WINDOW_FRAMES};
use crate::hardware::{cpu_cycles_between, HardwarePort};

#[repr(C, align(16))]
struct ProbeBuffer([u32; BANDWIDTH_TEST_WORDS]);

impl ProbeBuffer {
    fn zeroed() -> Box<Self> {
        Box::new(Self([0; BANDWIDTH_TEST_WORDS]))
    }
}

/// Times an uncached 4 KiB copy to approximate RDRAM throughput.
///
/// The buffers are owned here and only touched through `&mut self`, so two probes can never
/// run over the same memory at once.
pub struct BandwidthSampler {
    last_measure_frame: u32,
    src: Box<ProbeBuffer>,
    dst: Box<ProbeBuffer>,
}

impl Default for BandwidthSampler {
    fn default() -> Self {
        Self {
            last_measure_frame: 0,
            src: ProbeBuffer::zeroed(),
            dst: ProbeBuffer::zeroed(),
        }
    }
}

impl std::fmt::Debug for BandwidthSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BandwidthSampler")
            .field("last_measure_frame", &self.last_measure_frame)
            .finish_non_exhaustive()
    }
}

impl BandwidthSampler {
    pub fn last_measure_frame(&self) -> u32 {
        self.last_measure_frame
    }

    pub fn sample<P: HardwarePort + ?Sized>(
        &mut self,
        port: &mut P,
        measurements: &mut SystemMeasurements,
    ) {
        if measurements
            .frames_counted
            .wrapping_sub(self.last_measure_frame)
            < BANDWIDTH_WINDOW_FRAMES
        {
            return;
        }
        self.last_measure_frame = measurements.frames_counted;

        for (i, word) in self.src.0.iter_mut().enumerate() {
            *word = i as u32;
        }

        port.writeback_invalidate(&self.src.0);
        port.writeback_invalidate(&self.dst.0);

        let count_start = port.read_cycles();
        port.copy_uncached(&self.src.0, &mut self.dst.0);
        let count_end = port.read_cycles();

        let cpu_cycles = cpu_cycles_between(count_start, count_end);
        let Some(seconds) = seconds_for_cycles(cpu_cycles, measurements.cpu_freq_current) else {
            crate::info!(
                "N64Z::Bandwidth",
                "Skipping bandwidth update, no usable clock estimate ({:.2} MHz, {} cycles)",
                measurements.cpu_freq_current,
                cpu_cycles
            );
            return;
        };

        let bytes_per_second = BANDWIDTH_TEST_BYTES as f32 / seconds;
        measurements.rdram_bandwidth = (bytes_per_second / (1024. * 1024.)) as u32;

        crate::debug!(
            "N64Z::Bandwidth",
            "Copied {} bytes in {} cycles, {} MB/s",
            BANDWIDTH_TEST_BYTES,
            cpu_cycles,
            measurements.rdram_bandwidth
        );
    }
}
