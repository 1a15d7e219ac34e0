/* measurements/mod.rs
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

pub use bandwidth::BandwidthSampler;
pub use cpu_frequency::{CpuFrequencySampler, CpuPhase};
pub use fps::{FpsBaseline, FpsSampler};
pub use stats::RunningStats;

use crate::config::{
    BANDWIDTH_PLACEHOLDER_MBPS, BANDWIDTH_WINDOW_FRAMES, FPS_WINDOW_FRAMES, NOMINAL_CPU_FREQ_MHZ,
};
use crate::hardware::{HardwarePort, TvStandard};

mod bandwidth;
mod cpu_frequency;
mod fps;
mod stats;

/// Everything the panel shows that changes while running.
///
/// Only [`MeasurementEngine::advance_frame`] writes to this; everyone else gets a shared
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMeasurements {
    cpu_freq_current: f32,
    cpu_freq: RunningStats,
    cpu_cycles_per_frame: u32,

    rdram_bandwidth: u32,

    current_scanline: u32,
    actual_fps: f32,

    frames_counted: u32,
}

impl SystemMeasurements {
    /// Readings before any window has closed: the nominal clock, a bandwidth estimate and the
    /// refresh rate of `tv_standard`.
    pub fn new(tv_standard: TvStandard) -> Self {
        Self {
            cpu_freq_current: NOMINAL_CPU_FREQ_MHZ,
            cpu_freq: RunningStats::default(),
            cpu_cycles_per_frame: 0,

            rdram_bandwidth: BANDWIDTH_PLACEHOLDER_MBPS,

            current_scanline: 0,
            actual_fps: tv_standard.refresh_rate(),

            frames_counted: 0,
        }
    }

    pub fn cpu_freq_current(&self) -> f32 {
        self.cpu_freq_current
    }

    /// `None` until the first frequency window closes.
    pub fn cpu_freq_min(&self) -> Option<f32> {
        self.cpu_freq.min()
    }

    pub fn cpu_freq_max(&self) -> Option<f32> {
        self.cpu_freq.max()
    }

    pub fn cpu_freq_average(&self) -> Option<f32> {
        self.cpu_freq.average()
    }

    pub fn cpu_freq_stats(&self) -> &RunningStats {
        &self.cpu_freq
    }

    pub fn cpu_cycles_per_frame(&self) -> u32 {
        self.cpu_cycles_per_frame
    }

    /// MB/s
    pub fn rdram_bandwidth(&self) -> u32 {
        self.rdram_bandwidth
    }

    pub fn current_scanline(&self) -> u32 {
        self.current_scanline
    }

    pub fn actual_fps(&self) -> f32 {
        self.actual_fps
    }

    pub fn frames_counted(&self) -> u32 {
        self.frames_counted
    }

    fn record_cpu_frequency(&mut self, freq_mhz: f32, cycles_per_frame: u32) {
        self.cpu_freq_current = freq_mhz;
        self.cpu_cycles_per_frame = cycles_per_frame;
        self.cpu_freq.record(freq_mhz);
    }
}

/// Wall time taken by `cpu_cycles` at the current clock estimate.
///
/// Returns `None` unless both the estimate and the resulting duration are positive, so
/// callers never divide by zero or by a reading that isn't available yet.
fn seconds_for_cycles(cpu_cycles: u64, cpu_freq_mhz: f32) -> Option<f32> {
    if cpu_freq_mhz.is_nan() || cpu_freq_mhz <= 0. {
        return None;
    }

    let seconds = cpu_cycles as f32 / (cpu_freq_mhz * 1_000_000.);
    (seconds > 0.).then_some(seconds)
}

/// Extracts the half-line counter from VI_CURRENT.
fn scanline_from_vi(vi_current: u32) -> u32 {
    (vi_current >> 1) & 0x3FF
}

/// Drives the samplers, once per rendered frame.
///
/// The CPU frequency and scanline samplers run on every frame, the frame rate every
/// [`FPS_WINDOW_FRAMES`] and the bandwidth probe every [`BANDWIDTH_WINDOW_FRAMES`].
pub struct MeasurementEngine<P: HardwarePort> {
    port: P,
    refresh_rate: f32,

    cpu_frequency: CpuFrequencySampler,
    bandwidth: BandwidthSampler,
    fps: FpsSampler,
}

impl<P: HardwarePort> MeasurementEngine<P> {
    pub fn new(port: P, tv_standard: TvStandard) -> Self {
        Self {
            port,
            refresh_rate: tv_standard.refresh_rate(),

            cpu_frequency: CpuFrequencySampler::default(),
            bandwidth: BandwidthSampler::default(),
            fps: FpsSampler::default(),
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn cpu_frequency_sampler(&self) -> &CpuFrequencySampler {
        &self.cpu_frequency
    }

    pub fn fps_sampler(&self) -> &FpsSampler {
        &self.fps
    }

    pub fn bandwidth_sampler(&self) -> &BandwidthSampler {
        &self.bandwidth
    }

    pub fn advance_frame(&mut self, measurements: &mut SystemMeasurements) {
        // Wraps after ~2.2 years at 60 Hz; every window check uses wrapping deltas
        measurements.frames_counted = measurements.frames_counted.wrapping_add(1);

        self.cpu_frequency
            .sample(&self.port, measurements, self.refresh_rate);
        measurements.current_scanline = scanline_from_vi(self.port.vi_current());

        if measurements.frames_counted % FPS_WINDOW_FRAMES == 0 {
            self.fps.sample(&self.port, measurements);
        }

        if measurements.frames_counted % BANDWIDTH_WINDOW_FRAMES == 0 {
            self.bandwidth.sample(&mut self.port, measurements);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::SimulatedPort;

    fn engine(port: SimulatedPort, tv_standard: TvStandard) -> MeasurementEngine<SimulatedPort> {
        MeasurementEngine::new(port.with_tv_standard(tv_standard), tv_standard)
    }

    fn run_frames(
        engine: &mut MeasurementEngine<SimulatedPort>,
        measurements: &mut SystemMeasurements,
        frames: u32,
    ) {
        for _ in 0..frames {
            engine.port_mut().step_frame();
            engine.advance_frame(measurements);
        }
    }

    #[test]
    fn scanline_bit_layout() {
        assert_eq!(scanline_from_vi(0), 0);
        assert_eq!(scanline_from_vi(0x1FF << 1), 0x1FF);
        assert_eq!(scanline_from_vi(0x3FF << 1 | 1), 0x3FF);
        assert_eq!(scanline_from_vi(0xFFFF_FFFF), 0x3FF);
    }

    #[test]
    fn seconds_guard() {
        assert_eq!(seconds_for_cycles(1000, 0.), None);
        assert_eq!(seconds_for_cycles(1000, -5.), None);
        assert_eq!(seconds_for_cycles(1000, f32::NAN), None);
        assert_eq!(seconds_for_cycles(0, 93.75), None);
        assert!((seconds_for_cycles(93_750_000, 93.75).unwrap() - 1.).abs() < 1e-6);
    }

    #[test]
    fn fresh_state() {
        let measurements = SystemMeasurements::new(TvStandard::Ntsc);
        assert_eq!(measurements.cpu_freq_current(), 93.75);
        assert_eq!(measurements.cpu_freq_min(), None);
        assert_eq!(measurements.rdram_bandwidth(), 500);
        assert_eq!(measurements.actual_fps(), 60.);
        assert_eq!(measurements.frames_counted(), 0);
    }

    #[test]
    fn first_frequency_window_matches_injected_rate() {
        let mut engine = engine(SimulatedPort::new(800_000), TvStandard::Ntsc);
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);

        run_frames(&mut engine, &mut measurements, 5);
        assert_eq!(measurements.cpu_freq_min(), None);

        run_frames(&mut engine, &mut measurements, 1);
        assert!((measurements.cpu_freq_current() - 96.).abs() < 0.01);
        assert_eq!(measurements.cpu_freq_min(), Some(measurements.cpu_freq_current()));
        assert_eq!(measurements.cpu_freq_max(), Some(measurements.cpu_freq_current()));
    }

    #[test]
    fn frame_rate_matches_injected_timing() {
        // 93.75 MHz on a PAL console
        let mut engine = engine(SimulatedPort::new(937_500), TvStandard::Pal);
        let mut measurements = SystemMeasurements::new(TvStandard::Pal);

        run_frames(&mut engine, &mut measurements, 119);
        assert_eq!(measurements.actual_fps(), 50.);

        run_frames(&mut engine, &mut measurements, 1);
        assert!((measurements.cpu_freq_current() - 93.75).abs() < 0.01);
        assert!((measurements.actual_fps() - 50.).abs() < 0.01);
    }

    #[test]
    fn frame_rate_tracks_slow_frames() {
        let mut engine = engine(SimulatedPort::new(781_250), TvStandard::Ntsc);
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);

        run_frames(&mut engine, &mut measurements, 60);

        // The next 60 frames take twice as long. The extra time is added between a frequency
        // window closing (multiples of six) and the next one opening, so the clock estimate
        // stays put
        for _ in 0..60 {
            engine.port_mut().step_frame();
            if measurements.frames_counted() % 6 == 0 {
                engine.port_mut().advance(781_250 * 6);
            }
            engine.advance_frame(&mut measurements);
        }

        assert!((measurements.actual_fps() - 30.).abs() < 1.);
    }

    #[test]
    fn bandwidth_cadence() {
        let mut engine = engine(
            SimulatedPort::new(781_250).with_copy_cost(1000),
            TvStandard::Ntsc,
        );
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);

        run_frames(&mut engine, &mut measurements, 29);
        assert_eq!(engine.port().uncached_copies(), 0);
        assert_eq!(measurements.rdram_bandwidth(), 500);

        run_frames(&mut engine, &mut measurements, 1);
        assert_eq!(engine.port().uncached_copies(), 1);
        assert_eq!(measurements.rdram_bandwidth(), 183);
        assert_eq!(engine.bandwidth_sampler().last_measure_frame(), 30);

        run_frames(&mut engine, &mut measurements, 29);
        assert_eq!(engine.port().uncached_copies(), 1);

        run_frames(&mut engine, &mut measurements, 1);
        assert_eq!(engine.port().uncached_copies(), 2);
    }

    #[test]
    fn stalled_clock_leaves_derived_rates_alone() {
        let mut engine = engine(SimulatedPort::new(0).with_copy_cost(1000), TvStandard::Ntsc);
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);

        run_frames(&mut engine, &mut measurements, 130);

        assert_eq!(measurements.cpu_freq_current(), 0.);
        assert_eq!(measurements.rdram_bandwidth(), 500);
        assert_eq!(measurements.actual_fps(), 60.);
        assert!(engine.port().uncached_copies() > 0);
    }

    #[test]
    fn extrema_bracket_current_reading() {
        let mut engine = engine(SimulatedPort::new(781_250), TvStandard::Ntsc);
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);
        let mut jitter = 12345_u32;

        for _ in 0..600 {
            jitter = jitter.wrapping_mul(1_103_515_245).wrapping_add(12345);
            engine.port_mut().step_frame();
            engine.port_mut().advance((jitter >> 16) % 20_000);
            engine.advance_frame(&mut measurements);

            if let (Some(min), Some(max)) =
                (measurements.cpu_freq_min(), measurements.cpu_freq_max())
            {
                let current = measurements.cpu_freq_current();
                assert!(min <= current && current <= max);
            }
        }

        assert!(measurements.cpu_freq_min().unwrap() < measurements.cpu_freq_max().unwrap());
    }

    #[test]
    fn sixty_one_frames_from_fresh_state() {
        let mut engine = engine(SimulatedPort::new(800_000), TvStandard::Ntsc);
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);
        assert_eq!(measurements.cpu_freq_current(), 93.75);

        run_frames(&mut engine, &mut measurements, 61);

        assert_eq!(measurements.frames_counted(), 61);
        assert!(matches!(
            engine.fps_sampler().baseline(),
            FpsBaseline::Taken { frame: 60, .. }
        ));
        assert_eq!(measurements.actual_fps(), 60.);

        // Windows open on frames 1, 7, 13, ... and close five frames later
        assert_eq!(measurements.cpu_freq_stats().samples(), 10);
        assert!((measurements.cpu_freq_current() - 96.).abs() < 0.01);
        assert!(matches!(
            engine.cpu_frequency_sampler().phase(),
            CpuPhase::Measuring {
                start_frame: 61,
                ..
            }
        ));
    }
}
