/* lib.rs
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

#![cfg_attr(target_arch = "mips", feature(asm_experimental_arch))]

pub use driver::{run, ExitReason, LoopOutcome, Session};
pub use hardware::{CycleClock, HardwarePort, SimulatedPort, TvStandard};
pub use identity::{processor_revision, resolve_revision, SystemIdentity};
pub use input::{
    ButtonsPressed, InputSource, Navigation, ScriptError, ScriptedInput, Tab, TabNavigator,
};
pub use measurements::{MeasurementEngine, RunningStats, SystemMeasurements};
pub use panel::{render_frame, FrameSink, Surface, SurfaceError};
pub use text_surface::TextSurface;

pub mod config;
pub mod driver;
pub mod hardware;
pub mod identity;
pub mod input;
pub mod logging;
pub mod measurements;
pub mod panel;
pub mod text_surface;

/// Fixed-capacity string used for formatting panel rows without allocating per frame.
pub type ArrayString = arrayvec::ArrayString<128>;
