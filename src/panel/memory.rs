/* panel/memory.rs
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
use crate::identity::SystemIdentity;
use crate::measurements::SystemMeasurements;

pub(super) fn draw<S: Surface + ?Sized>(
    rows: &mut Rows<'_, S>,
    measurements: &SystemMeasurements,
    identity: &SystemIdentity,
) {
    let expansion_pak = identity.has_expansion_pak();

    rows.section("General");
    rows.row("Type", "Rambus DRAM");
    rows.row_fmt("Size", format_args!("{} MB", identity.memory_mb));
    rows.row("Expansion Pak", if expansion_pak { "Yes" } else { "No" });

    rows.section("Timings (Real-Time)");
    rows.row("Frequency", "250 MHz");
    rows.row_fmt(
        "Bandwidth",
        format_args!("{} MB/s", measurements.rdram_bandwidth()),
    );
    rows.row("Bus Width", "9-bit");
    rows.row("Theoretical Max", "562 MB/s");

    rows.section("Physical Memory");
    rows.row("Base RDRAM", "0x000000-0x3FFFFF");
    if expansion_pak {
        rows.row("Expansion", "0x400000-0x7FFFFF");
    }
    rows.row("MMIO Start", "0x04000000");
}
