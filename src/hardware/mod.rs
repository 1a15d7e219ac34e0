/* hardware/mod.rs
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

use crate::config::COUNT_TO_CPU_CYCLES;

pub use simulated::{SimulatedPort, NTSC_COUNTS_PER_FRAME};

#[cfg(target_arch = "mips")]
pub use n64::N64Port;

#[cfg(target_arch = "mips")]
mod n64;
mod simulated;

/// Source of the free-running COP0 Count register.
pub trait CycleClock {
    /// Current counter value. Wraps at 2^32 and ticks once per two processor cycles, so deltas
    /// must be taken with `wrapping_sub`.
    fn read_cycles(&self) -> u32;
}

/// Processor cycles elapsed between two Count readings.
///
/// The subtraction wraps, so a window that straddles the counter overflowing still yields the
/// short forward distance. The conversion to processor cycles is done in 64 bits.
#[inline]
pub fn cpu_cycles_between(start: u32, end: u32) -> u64 {
    end.wrapping_sub(start) as u64 * COUNT_TO_CPU_CYCLES
}

/// Provides an interface for reading the console's hardware registers.
///
/// Register reads are assumed to always succeed, so nothing here is fallible.
pub trait HardwarePort: CycleClock {
    /// COP0 PRId register.
    fn processor_id(&self) -> u32;

    /// MI_VERSION register of the Reality Co-Processor.
    fn rcp_version(&self) -> u32;

    /// Raw VI_CURRENT register. Bits 1..=10 hold the line being scanned out.
    fn vi_current(&self) -> u32;

    /// Installed RDRAM as reported by the boot code.
    fn memory_size_bytes(&self) -> u32;

    fn tv_standard(&self) -> TvStandard;

    /// Write back and invalidate every data cache line that covers `buffer`.
    fn writeback_invalidate(&mut self, buffer: &[u32]);

    /// Copy `src` into `dst` word by word through the uncached memory segment, so the copy
    /// hits RDRAM directly.
    fn copy_uncached(&mut self, src: &[u32], dst: &mut [u32]);

    /// Block until the next vertical retrace, where the display would hand out a new buffer.
    fn wait_for_frame(&mut self);
}

/// Video standard the console booted in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TvStandard {
    Pal,
    Ntsc,
    Mpal,
    Unknown(u32),
}

impl TvStandard {
    /// Decodes the boot-time `osTvType` word.
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => TvStandard::Pal,
            1 => TvStandard::Ntsc,
            2 => TvStandard::Mpal,
            other => TvStandard::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TvStandard::Pal => "PAL",
            TvStandard::Ntsc => "NTSC",
            TvStandard::Mpal => "MPAL",
            TvStandard::Unknown(_) => "Unknown",
        }
    }

    /// Nominal refresh rate in Hz; unrecognized standards are treated as 60 Hz.
    pub fn refresh_rate(&self) -> f32 {
        match self {
            TvStandard::Pal => 50.,
            _ => 60.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_delta_across_wrap() {
        assert_eq!(cpu_cycles_between(100, 350), 500);
        assert_eq!(cpu_cycles_between(u32::MAX - 9, 10), 40);
        assert_eq!(cpu_cycles_between(7, 7), 0);
    }

    #[test]
    fn cycle_delta_does_not_overflow() {
        assert_eq!(cpu_cycles_between(0, u32::MAX), u32::MAX as u64 * 2);
    }

    #[test]
    fn tv_standard_from_boot_word() {
        assert_eq!(TvStandard::from_raw(0), TvStandard::Pal);
        assert_eq!(TvStandard::from_raw(1), TvStandard::Ntsc);
        assert_eq!(TvStandard::from_raw(2), TvStandard::Mpal);
        assert_eq!(TvStandard::from_raw(7), TvStandard::Unknown(7));
    }

    #[test]
    fn refresh_rate_per_standard() {
        assert_eq!(TvStandard::Pal.refresh_rate(), 50.);
        assert_eq!(TvStandard::Ntsc.refresh_rate(), 60.);
        assert_eq!(TvStandard::Mpal.refresh_rate(), 60.);
        assert_eq!(TvStandard::Unknown(9).refresh_rate(), 60.);
        assert_eq!(TvStandard::Unknown(9).name(), "Unknown");
    }
}
