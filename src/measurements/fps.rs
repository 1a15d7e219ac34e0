/* measurements/fps.rs
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
use crate::config::FPS_WINDOW_FRAMES;
use crate::hardware::{cpu_cycles_between, CycleClock};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum FpsBaseline {
    /// Nothing captured yet; the first window is skipped to keep startup out of the average.
    #[default]
    Pending,
    Taken {
        frame: u32,
        count: u32,
    },
}

#[derive(Debug, Default)]
pub struct FpsSampler {
    baseline: FpsBaseline,
}

impl FpsSampler {
    pub fn baseline(&self) -> FpsBaseline {
        self.baseline
    }

    pub fn sample<C: CycleClock + ?Sized>(
        &mut self,
        clock: &C,
        measurements: &mut SystemMeasurements,
    ) {
        let (frame, count) = match self.baseline {
            FpsBaseline::Pending => {
                if measurements.frames_counted >= FPS_WINDOW_FRAMES {
                    self.baseline = FpsBaseline::Taken {
                        frame: measurements.frames_counted,
                        count: clock.read_cycles(),
                    };
                }
                return;
            }
            FpsBaseline::Taken { frame, count } => (frame, count),
        };

        let frames_elapsed = measurements.frames_counted.wrapping_sub(frame);
        if frames_elapsed < FPS_WINDOW_FRAMES {
            return;
        }

        let now = clock.read_cycles();
        let cpu_cycles = cpu_cycles_between(count, now);

        match seconds_for_cycles(cpu_cycles, measurements.cpu_freq_current) {
            Some(seconds) => measurements.actual_fps = frames_elapsed as f32 / seconds,
            None => crate::info!(
                "N64Z::Fps",
                "Skipping frame rate update, no usable clock estimate ({:.2} MHz, {} cycles)",
                measurements.cpu_freq_current,
                cpu_cycles
            ),
        }

        self.baseline = FpsBaseline::Taken {
            frame: measurements.frames_counted,
            count: now,
        };
    }
}
