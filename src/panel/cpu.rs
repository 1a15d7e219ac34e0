/* panel/cpu.rs
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

use super::{Rows, Surface};
use crate::identity::{processor_revision, SystemIdentity};
use crate::measurements::SystemMeasurements;

pub(super) fn draw<S: Surface + ?Sized>(
    rows: &mut Rows<'_, S>,
    measurements: &SystemMeasurements,
    identity: &SystemIdentity,
) {
    rows.section("Processor");
    rows.row("Name", "MIPS VR4300i");
    rows.row("Revision", &processor_revision(identity.processor_id));
    rows.row_fmt("Code Name", format_args!("0x{:08X}", identity.processor_id));
    rows.row("Instruction Set", "MIPS III (64-bit)");
    rows.row("L1 Cache", "16 KB I / 8 KB D");

    rows.section("Clocks (Real-Time)");
    rows.row_mhz("Core Speed", Some(measurements.cpu_freq_current()));
    rows.row_fmt(
        "Cycles/Frame",
        format_args!("{}", measurements.cpu_cycles_per_frame()),
    );
    rows.row("Multiplier", "x1.0");

    rows.section("Frequency Range");
    rows.row_mhz("Min", measurements.cpu_freq_min());
    rows.row_mhz("Max", measurements.cpu_freq_max());
    rows.row_mhz("Avg", measurements.cpu_freq_average());
}
