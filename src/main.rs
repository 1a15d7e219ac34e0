/* main.rs
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

use std::io::Write;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use n64z::driver::{self, LoopOutcome, Session};
use n64z::hardware::NTSC_COUNTS_PER_FRAME;
use n64z::text_surface::{LastFrame, WriterSink};
use n64z::{
    config, HardwarePort, MeasurementEngine, ScriptedInput, SimulatedPort, SystemIdentity,
    SystemMeasurements, Tab, TabNavigator, TextSurface, TvStandard,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum TvArg {
    Ntsc,
    Pal,
    Mpal,
}

impl From<TvArg> for TvStandard {
    fn from(value: TvArg) -> Self {
        match value {
            TvArg::Ntsc => TvStandard::Ntsc,
            TvArg::Pal => TvStandard::Pal,
            TvArg::Mpal => TvStandard::Mpal,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum TabArg {
    Cpu,
    Memory,
    Rcp,
    Video,
}

impl From<TabArg> for Tab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Cpu => Tab::Cpu,
            TabArg::Memory => Tab::Memory,
            TabArg::Rcp => Tab::Rcp,
            TabArg::Video => Tab::Video,
        }
    }
}

/// Runs the N64 system information panel against a simulated console.
#[derive(Debug, Parser)]
#[command(name = "n64z", version, about)]
struct Args {
    /// Stop after this many frames; 0 runs until a scripted START
    #[arg(long, default_value_t = 600)]
    frames: u32,

    #[arg(long, value_enum, default_value_t = TvArg::Ntsc)]
    tv: TvArg,

    /// COP0 Count ticks per frame, twice this is the simulated CPU cycles per frame
    #[arg(long, default_value_t = NTSC_COUNTS_PER_FRAME)]
    counts_per_frame: u32,

    /// Initial Count register value
    #[arg(long, default_value_t = 0)]
    start_count: u32,

    /// Count ticks charged for every uncached 4 KiB copy
    #[arg(long, default_value_t = 1000)]
    copy_cost: u32,

    /// Installed RDRAM, 4 or 8 with the Expansion Pak
    #[arg(long, default_value_t = 4)]
    memory_mb: u32,

    /// Scripted button press, FRAME=BUTTON[+BUTTON] with L, R, CL, CR or START
    #[arg(long = "press", value_name = "FRAME=BUTTONS")]
    presses: Vec<String>,

    #[arg(long, value_enum, default_value_t = TabArg::Cpu)]
    tab: TabArg,

    /// Print every Nth frame while running instead of only the last one
    #[arg(long)]
    stream_every: Option<u32>,

    /// Print identity and measurements as JSON after the run
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    identity: &'a SystemIdentity,
    revision: &'a str,
    measurements: &'a SystemMeasurements,
    outcome: &'a LoopOutcome,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let frame_limit = (args.frames > 0).then_some(args.frames);
    let input = ScriptedInput::parse(args.presses.iter().map(String::as_str))
        .context("Failed to parse scripted input")?;
    if frame_limit.is_none() && !input.has_exit() {
        anyhow::bail!("--frames 0 needs a scripted START press, or the loop never ends");
    }

    let memory_bytes = args
        .memory_mb
        .checked_mul(1024 * 1024)
        .context("Memory size does not fit the 32-bit osMemSize word")?;
    let port = SimulatedPort::new(args.counts_per_frame)
        .with_start_count(args.start_count)
        .with_copy_cost(args.copy_cost)
        .with_memory_size_bytes(memory_bytes)
        .with_tv_standard(args.tv.into());

    let identity = SystemIdentity::probe(&port);
    let tv_standard = port.tv_standard();

    n64z::message!(
        "N64Z::Main",
        "{} {} on {} ({}), {} MB RDRAM",
        config::PKG_NAME,
        config::VERSION,
        n64z::processor_revision(identity.processor_id),
        tv_standard.name(),
        identity.memory_mb
    );

    let mut engine = MeasurementEngine::new(port, tv_standard);
    let mut measurements = SystemMeasurements::new(tv_standard);
    let mut navigator = TabNavigator::new(args.tab.into());
    let mut input = input;
    let mut surface = TextSurface::new();

    let outcome = match args.stream_every {
        Some(interval) => {
            let mut sink = WriterSink::new(std::io::stdout().lock(), interval);
            driver::run(
                Session {
                    engine: &mut engine,
                    measurements: &mut measurements,
                    identity: &identity,
                    navigator: &mut navigator,
                    input: &mut input,
                    surface: &mut surface,
                    sink: &mut sink,
                },
                frame_limit,
            )
            .context("Failed to stream frames")?
        }
        None => {
            let mut sink = LastFrame::default();
            let outcome = driver::run(
                Session {
                    engine: &mut engine,
                    measurements: &mut measurements,
                    identity: &identity,
                    navigator: &mut navigator,
                    input: &mut input,
                    surface: &mut surface,
                    sink: &mut sink,
                },
                frame_limit,
            )
            .context("Failed to present frame")?;

            if let Some(frame) = sink.frame() {
                print!("{}", frame);
            }
            outcome
        }
    };

    if args.json {
        let revision = n64z::processor_revision(identity.processor_id);
        let snapshot = Snapshot {
            identity: &identity,
            revision: revision.as_str(),
            measurements: &measurements,
            outcome: &outcome,
        };

        let json =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        writeln!(std::io::stdout(), "{}", json).context("Failed to write snapshot")?;
    }

    Ok(())
}
