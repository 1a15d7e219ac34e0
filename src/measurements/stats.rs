/* measurements/stats.rs
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

use serde::Serialize;

/// Minimum, maximum and mean of every sample seen since startup.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct RunningStats {
    min: Option<f32>,
    max: Option<f32>,
    sum: f64,
    samples: u32,
}

impl RunningStats {
    pub fn record(&mut self, value: f32) {
        // A zero minimum counts as "no floor yet", the first real reading replaces it
        self.min = match self.min {
            Some(min) if min > 0. && min <= value => Some(min),
            _ => Some(value),
        };
        self.max = match self.max {
            Some(max) if max >= value => Some(max),
            _ => Some(value),
        };

        self.sum += value as f64;
        self.samples = self.samples.saturating_add(1);
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    pub fn average(&self) -> Option<f32> {
        if self.samples == 0 {
            return None;
        }

        Some((self.sum / self.samples as f64) as f32)
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}
