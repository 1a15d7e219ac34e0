/* hardware/n64.rs
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

use core::arch::asm;
use core::ptr::{read_volatile, write_volatile};

use super::{CycleClock, HardwarePort, TvStandard};
use crate::config::DCACHE_LINE_BYTES;

const MI_VERSION_REG: usize = 0xA430_0004;
const VI_CURRENT_REG: usize = 0xA440_0004;

/// Written by the IPL3 boot code.
const OS_TV_TYPE: usize = 0x8000_0300;
const OS_MEM_SIZE: usize = 0x8000_0318;

/// KSEG0 (cached) and KSEG1 (uncached) alias the same physical memory.
const KSEG1_OFFSET: usize = 0x2000_0000;

/// Hit_Writeback_Invalidate_D
const CACHE_OP_HIT_WB_INV_D: u32 = 0x15;

/// Direct register access on a VR4300 running in kernel mode.
pub struct N64Port;

impl N64Port {
    /// # Safety
    ///
    /// Must only be constructed on real hardware (or an accurate emulator), with the CPU in
    /// kernel mode so COP0 and the KSEG1 segment are reachable.
    pub unsafe fn new() -> Self {
        Self
    }

    #[inline]
    fn mmio_read(address: usize) -> u32 {
        unsafe { read_volatile(address as *const u32) }
    }
}

impl CycleClock for N64Port {
    #[inline]
    fn read_cycles(&self) -> u32 {
        let count: u32;
        unsafe {
            asm!("mfc0 {}, $9", out(reg) count, options(nomem, nostack));
        }
        count
    }
}

impl HardwarePort for N64Port {
    fn processor_id(&self) -> u32 {
        let prid: u32;
        unsafe {
            asm!("mfc0 {}, $15", out(reg) prid, options(nomem, nostack));
        }
        prid
    }

    fn rcp_version(&self) -> u32 {
        Self::mmio_read(MI_VERSION_REG)
    }

    fn vi_current(&self) -> u32 {
        Self::mmio_read(VI_CURRENT_REG)
    }

    fn memory_size_bytes(&self) -> u32 {
        Self::mmio_read(OS_MEM_SIZE)
    }

    fn tv_standard(&self) -> TvStandard {
        TvStandard::from_raw(Self::mmio_read(OS_TV_TYPE))
    }

    fn writeback_invalidate(&mut self, buffer: &[u32]) {
        let start = buffer.as_ptr() as usize & !(DCACHE_LINE_BYTES - 1);
        let end = buffer.as_ptr() as usize + core::mem::size_of_val(buffer);

        for line in (start..end).step_by(DCACHE_LINE_BYTES) {
            unsafe {
                asm!(
                    "cache {op}, 0({addr})",
                    op = const CACHE_OP_HIT_WB_INV_D,
                    addr = in(reg) line,
                    options(nostack),
                );
            }
        }
    }

    fn copy_uncached(&mut self, src: &[u32], dst: &mut [u32]) {
        let len = src.len().min(dst.len());
        let src = (src.as_ptr() as usize | KSEG1_OFFSET) as *const u32;
        let dst = (dst.as_mut_ptr() as usize | KSEG1_OFFSET) as *mut u32;

        for i in 0..len {
            unsafe {
                write_volatile(dst.add(i), read_volatile(src.add(i)));
            }
        }
    }

    fn wait_for_frame(&mut self) {
        // The half-line counter drops back towards zero once scanout restarts at the top
        let mut previous = self.vi_current() & 0x7FE;
        loop {
            let current = self.vi_current() & 0x7FE;
            if current < previous {
                break;
            }
            previous = current;
        }
    }
}
