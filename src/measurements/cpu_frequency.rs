/* measurements/cpu_frequency.rs
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

use super::SystemMeasurements;
use crate::config::CPU_FREQ_WINDOW_FRAMES;
use crate::hardware::{cpu_cycles_between, CycleClock};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum CpuPhase {
    #[default]
    Idle,
    Measuring {
        start_count: u32,
        start_frame: u32,
    },
}

/// Estimates the processor clock from the Count register over a short multi-frame window.
///
/// Every frame either opens a window (`Idle`) or checks whether the open one has spanned
/// enough frames to be closed and published (`Measuring`).
#[derive(Debug, Default)]
pub struct CpuFrequencySampler {
    phase: CpuPhase,
}

impl CpuFrequencySampler {
    pub fn phase(&self) -> CpuPhase {
        self.phase
    }

    pub fn sample<C: CycleClock + ?Sized>(
        &mut self,
        clock: &C,
        measurements: &mut SystemMeasurements,
        refresh_rate: f32,
    ) {
        let now = clock.read_cycles();

        let (start_count, start_frame) = match self.phase {
            CpuPhase::Idle => {
                self.phase = CpuPhase::Measuring {
                    start_count: now,
                    start_frame: measurements.frames_counted,
                };
                return;
            }
            CpuPhase::Measuring {
                start_count,
                start_frame,
            } => (start_count, start_frame),
        };

        let frames_elapsed = measurements.frames_counted.wrapping_sub(start_frame);
        if frames_elapsed < CPU_FREQ_WINDOW_FRAMES {
            return;
        }

        let cpu_cycles = cpu_cycles_between(start_count, now);
        let cycles_per_frame = cpu_cycles / frames_elapsed as u64;
        let freq_mhz = (cpu_cycles as f32 / frames_elapsed as f32) * refresh_rate / 1_000_000.;

        measurements.record_cpu_frequency(
            freq_mhz,
            u32::try_from(cycles_per_frame).unwrap_or(u32::MAX),
        );

        crate::debug!(
            "N64Z::CpuFrequency",
            "Window closed after {} frames: {} cycles, {:.2} MHz",
            frames_elapsed,
            cpu_cycles,
            freq_mhz
        );

        self.phase = CpuPhase::Idle;
    }
}
