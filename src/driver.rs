/* driver.rs
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

use crate::hardware::HardwarePort;
use crate::identity::SystemIdentity;
use crate::input::{InputSource, Navigation, Tab, TabNavigator};
use crate::measurements::{MeasurementEngine, SystemMeasurements};
use crate::panel::{render_frame, FrameSink, Surface, SurfaceError};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum ExitReason {
    /// START was pressed.
    ExitRequested,
    /// The caller-imposed frame budget ran out.
    FrameLimit,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct LoopOutcome {
    pub frames: u32,
    pub reason: ExitReason,
    pub tab: Tab,
}

/// Everything one iteration of the display loop touches.
pub struct Session<'a, P: HardwarePort, I, S, K> {
    pub engine: &'a mut MeasurementEngine<P>,
    pub measurements: &'a mut SystemMeasurements,
    pub identity: &'a SystemIdentity,
    pub navigator: &'a mut TabNavigator,
    pub input: &'a mut I,
    pub surface: &'a mut S,
    pub sink: &'a mut K,
}

/// Runs the display loop until START is pressed or `frame_limit` frames have been shown.
///
/// Each iteration measures first, then polls input, so an exit request is honoured before
/// anything else is drawn. Without a frame limit the loop only ends on START.
pub fn run<P, I, S, K>(
    session: Session<'_, P, I, S, K>,
    frame_limit: Option<u32>,
) -> Result<LoopOutcome, SurfaceError>
where
    P: HardwarePort,
    I: InputSource,
    S: Surface,
    K: FrameSink<S>,
{
    let Session {
        engine,
        measurements,
        identity,
        navigator,
        input,
        surface,
        sink,
    } = session;

    crate::message!(
        "N64Z::Driver",
        "Starting display loop on {} tab, frame limit {:?}",
        navigator.current().name(),
        frame_limit
    );

    let mut frames = 0_u32;
    let reason = loop {
        if frame_limit.is_some_and(|limit| frames >= limit) {
            break ExitReason::FrameLimit;
        }

        engine.advance_frame(measurements);

        let previous_tab = navigator.current();
        if navigator.apply(input.poll()) == Navigation::Exit {
            break ExitReason::ExitRequested;
        }
        if navigator.current() != previous_tab {
            crate::debug!(
                "N64Z::Driver",
                "Switched from {} to {} tab",
                previous_tab.name(),
                navigator.current().name()
            );
        }

        engine.port_mut().wait_for_frame();

        render_frame(surface, navigator.current(), measurements, identity);
        if let Err(e) = sink.present(surface) {
            crate::error!("N64Z::Driver", "Failed to present frame {}: {}", frames + 1, e);
            return Err(e);
        }

        frames += 1;
    };

    crate::message!(
        "N64Z::Driver",
        "Display loop finished after {} frames ({:?})",
        frames,
        reason
    );

    Ok(LoopOutcome {
        frames,
        reason,
        tab: navigator.current(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{SimulatedPort, TvStandard};
    use crate::input::{ButtonsPressed, ScriptedInput};
    use crate::text_surface::{LastFrame, TextSurface};

    struct Harness {
        engine: MeasurementEngine<SimulatedPort>,
        measurements: SystemMeasurements,
        identity: SystemIdentity,
        navigator: TabNavigator,
        surface: TextSurface,
        sink: LastFrame,
    }

    impl Harness {
        fn new() -> Self {
            let port = SimulatedPort::new(781_250).with_copy_cost(1000);
            let identity = SystemIdentity::probe(&port);

            Self {
                engine: MeasurementEngine::new(port, TvStandard::Ntsc),
                measurements: SystemMeasurements::new(TvStandard::Ntsc),
                identity,
                navigator: TabNavigator::default(),
                surface: TextSurface::new(),
                sink: LastFrame::default(),
            }
        }

        fn run(
            &mut self,
            input: &mut ScriptedInput,
            frame_limit: Option<u32>,
        ) -> Result<LoopOutcome, SurfaceError> {
            run(
                Session {
                    engine: &mut self.engine,
                    measurements: &mut self.measurements,
                    identity: &self.identity,
                    navigator: &mut self.navigator,
                    input,
                    surface: &mut self.surface,
                    sink: &mut self.sink,
                },
                frame_limit,
            )
        }
    }

    #[test]
    fn start_exits_before_drawing() {
        let mut harness = Harness::new();
        let mut input = ScriptedInput::parse(["10=START"]).unwrap();

        let outcome = harness.run(&mut input, Some(100)).unwrap();

        assert_eq!(outcome.reason, ExitReason::ExitRequested);
        assert_eq!(outcome.frames, 9);
        assert_eq!(harness.sink.presented(), 9);
        // The frame START was seen on was still measured
        assert_eq!(harness.measurements.frames_counted(), 10);
    }

    #[test]
    fn stops_at_frame_limit() {
        let mut harness = Harness::new();
        let mut input = ScriptedInput::new();

        let outcome = harness.run(&mut input, Some(90)).unwrap();

        assert_eq!(outcome.reason, ExitReason::FrameLimit);
        assert_eq!(outcome.frames, 90);
        assert_eq!(harness.measurements.frames_counted(), 90);
        // 781 250 counts per frame is exactly 93.75 MHz at 60 Hz
        assert_eq!(harness.measurements.cpu_freq_current(), 93.75);
        assert_eq!(harness.measurements.actual_fps(), 60.);
    }

    #[test]
    fn zero_limit_draws_nothing() {
        let mut harness = Harness::new();
        let outcome = harness.run(&mut ScriptedInput::new(), Some(0)).unwrap();

        assert_eq!(outcome.frames, 0);
        assert!(harness.sink.frame().is_none());
    }

    #[test]
    fn tab_switch_shows_in_frame() {
        let mut harness = Harness::new();
        let mut input = ScriptedInput::new()
            .press(
                3,
                ButtonsPressed {
                    r: true,
                    ..Default::default()
                },
            )
            .press(
                4,
                ButtonsPressed {
                    c_right: true,
                    ..Default::default()
                },
            )
            .press(
                5,
                ButtonsPressed {
                    c_right: true,
                    ..Default::default()
                },
            );

        let outcome = harness.run(&mut input, Some(5)).unwrap();

        assert_eq!(outcome.tab, Tab::Video);
        let frame = harness.sink.frame().unwrap().to_string();
        assert!(frame.contains("Video Interface"));
        assert!(!frame.contains("Reality Co-Processor"));
    }

    #[test]
    fn sink_errors_stop_the_loop() {
        struct Broken;

        impl FrameSink<TextSurface> for Broken {
            fn present(&mut self, _: &TextSurface) -> Result<(), SurfaceError> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into())
            }
        }

        let port = SimulatedPort::new(781_250);
        let identity = SystemIdentity::probe(&port);
        let mut engine = MeasurementEngine::new(port, TvStandard::Ntsc);
        let mut measurements = SystemMeasurements::new(TvStandard::Ntsc);
        let mut navigator = TabNavigator::default();
        let mut surface = TextSurface::new();

        let result = run(
            Session {
                engine: &mut engine,
                measurements: &mut measurements,
                identity: &identity,
                navigator: &mut navigator,
                input: &mut ScriptedInput::new(),
                surface: &mut surface,
                sink: &mut Broken,
            },
            Some(10),
        );

        assert!(matches!(result, Err(SurfaceError::Io(_))));
        assert_eq!(measurements.frames_counted(), 1);
    }
}
