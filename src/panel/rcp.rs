/* panel/rcp.rs
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

const RCP_CLOCK: &str = "62.5 MHz";

pub(super) fn draw<S: Surface + ?Sized>(rows: &mut Rows<'_, S>, identity: &SystemIdentity) {
    rows.section("Reality Co-Processor");
    rows.row_fmt("Version", format_args!("0x{:08X}", identity.rcp_version));
    rows.row("Clock", RCP_CLOCK);

    rows.section("RSP (Reality Signal Processor)");
    rows.row("Type", "Vector Processor");
    rows.row("Clock", RCP_CLOCK);
    rows.row("DMEM", "4 KBytes");
    rows.row("IMEM", "4 KBytes");
    rows.row("Vector Unit", "32 x 128-bit regs");

    rows.section("RDP (Reality Display Processor)");
    rows.row("Type", "Rasterizer");
    rows.row("Clock", RCP_CLOCK);
    rows.row("TMEM", "4 KBytes");
    rows.row("Fill Rate", "~100 Mpixels/s");
    rows.row("Texture Formats", "Multiple");
}
