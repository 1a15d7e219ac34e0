/* panel/video.rs
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
    rows.section("Video Interface");
    rows.row("TV System", identity.tv_standard.name());
    rows.row_fmt(
        "Refresh Rate",
        format_args!("{:.1} Hz", identity.tv_standard.refresh_rate()),
    );

    rows.section("Current Mode");
    rows.row("Resolution", "320 x 240");
    rows.row("Color Depth", "32-bit RGBA");
    rows.row("Pixel Format", "RGBA 8888");

    rows.section("Real-Time Status");
    rows.row_fmt(
        "Current Scanline",
        format_args!("{}", measurements.current_scanline()),
    );
    rows.row_fmt(
        "Actual FPS",
        format_args!("{:.1} fps", measurements.actual_fps()),
    );
    rows.row_fmt(
        "Frame Count",
        format_args!("{}", measurements.frames_counted()),
    );
}
