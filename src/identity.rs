/* identity.rs
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

use crate::hardware::{HardwarePort, TvStandard};
use crate::ArrayString;

const EXPANSION_PAK_MB: u32 = 8;

/// Maps the revision byte of a PRId value to a human readable revision.
///
/// Only the low 8 bits take part; the implementation number above them is ignored.
pub fn resolve_revision(prid: u32) -> &'static str {
    match (prid & 0xFF) as u8 {
        0x00 => "Rev 1.0",
        0x01 => "Rev 2.0",
        0x02 => "Rev 3.0",
        _ => "Unknown",
    }
}

/// Revision string as shown on the CPU tab, e.g. `VR4300 Rev 2.0`.
pub fn processor_revision(prid: u32) -> ArrayString {
    use std::fmt::Write;

    let mut result = ArrayString::new();
    // Capacity is far larger than the longest revision string
    let _ = write!(result, "VR4300 {}", resolve_revision(prid));
    result
}

/// Information that does not change while the console is powered on.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SystemIdentity {
    pub processor_id: u32,
    pub rcp_version: u32,
    pub memory_mb: u32,
    pub tv_standard: TvStandard,
}

impl SystemIdentity {
    pub fn probe<P: HardwarePort + ?Sized>(port: &P) -> Self {
        let result = Self {
            processor_id: port.processor_id(),
            rcp_version: port.rcp_version(),
            memory_mb: port.memory_size_bytes() / (1024 * 1024),
            tv_standard: port.tv_standard(),
        };

        if let TvStandard::Unknown(raw) = result.tv_standard {
            crate::warning!(
                "N64Z::Identity",
                "Unrecognized TV type {}, assuming 60 Hz timing",
                raw
            );
        }
        if resolve_revision(result.processor_id) == "Unknown" {
            crate::warning!(
                "N64Z::Identity",
                "Unrecognized processor revision in PRId {:#010X}",
                result.processor_id
            );
        }

        result
    }

    pub fn has_expansion_pak(&self) -> bool {
        self.memory_mb == EXPANSION_PAK_MB
    }
}
