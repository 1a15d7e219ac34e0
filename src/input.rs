/* input.rs
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

use std::collections::BTreeMap;

use serde::Serialize;
use static_assertions::const_assert_eq;
use thiserror::Error;

/// Buttons that went from released to pressed during the last frame, on the first controller.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ButtonsPressed {
    pub c_left: bool,
    pub c_right: bool,
    pub l: bool,
    pub r: bool,
    pub start: bool,
}

impl ButtonsPressed {
    pub fn previous_tab(&self) -> bool {
        self.c_left || self.l
    }

    pub fn next_tab(&self) -> bool {
        self.c_right || self.r
    }

    fn merge(&mut self, other: ButtonsPressed) {
        self.c_left |= other.c_left;
        self.c_right |= other.c_right;
        self.l |= other.l;
        self.r |= other.r;
        self.start |= other.start;
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Tab {
    #[default]
    Cpu,
    Memory,
    Rcp,
    Video,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Cpu, Tab::Memory, Tab::Rcp, Tab::Video];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Cpu => "CPU",
            Tab::Memory => "Memory",
            Tab::Rcp => "RCP",
            Tab::Video => "Video",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

const_assert_eq!(Tab::ALL.len(), Tab::Video as usize + 1);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Navigation {
    Continue,
    Exit,
}

/// Owns the tab selection and turns button presses into tab changes.
#[derive(Debug, Default)]
pub struct TabNavigator {
    current: Tab,
}

impl TabNavigator {
    pub fn new(initial: Tab) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Tab {
        self.current
    }

    pub fn apply(&mut self, buttons: ButtonsPressed) -> Navigation {
        if buttons.previous_tab() {
            self.current = self.current.previous();
        }
        if buttons.next_tab() {
            self.current = self.current.next();
        }

        if buttons.start {
            Navigation::Exit
        } else {
            Navigation::Continue
        }
    }
}

/// Per-frame controller poll.
pub trait InputSource {
    fn poll(&mut self) -> ButtonsPressed;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("event '{0}' is not of the form FRAME=BUTTON[+BUTTON...]")]
    MalformedEvent(String),
    #[error("invalid frame number '{0}'")]
    InvalidFrame(String),
    #[error("frame numbers start at 1, got 0")]
    FrameZero,
    #[error("unknown button '{0}', expected one of L, R, CL, CR, START")]
    UnknownButton(String),
}

/// Replays button presses on fixed frames, standing in for a controller off-target.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: BTreeMap<u32, ButtonsPressed>,
    frame: u32,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a press for the `frame`-th poll (1-based).
    pub fn press(mut self, frame: u32, buttons: ButtonsPressed) -> Self {
        self.events.entry(frame).or_default().merge(buttons);
        self
    }

    /// Parses events such as `120=R` or `300=CL+START`.
    pub fn parse<'a, I>(events: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut result = Self::new();

        for event in events {
            let (frame, buttons) = event
                .split_once('=')
                .ok_or_else(|| ScriptError::MalformedEvent(event.to_owned()))?;

            let frame = frame
                .trim()
                .parse::<u32>()
                .map_err(|_| ScriptError::InvalidFrame(frame.trim().to_owned()))?;
            if frame == 0 {
                return Err(ScriptError::FrameZero);
            }

            let mut pressed = ButtonsPressed::default();
            for button in buttons.split('+').map(str::trim) {
                match button.to_ascii_uppercase().as_str() {
                    "L" => pressed.l = true,
                    "R" => pressed.r = true,
                    "CL" => pressed.c_left = true,
                    "CR" => pressed.c_right = true,
                    "START" => pressed.start = true,
                    "" => return Err(ScriptError::MalformedEvent(event.to_owned())),
                    _ => return Err(ScriptError::UnknownButton(button.to_owned())),
                }
            }

            result = result.press(frame, pressed);
        }

        Ok(result)
    }

    pub fn has_exit(&self) -> bool {
        self.events.values().any(|buttons| buttons.start)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> ButtonsPressed {
        self.frame = self.frame.saturating_add(1);
        self.events.get(&self.frame).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: ButtonsPressed = ButtonsPressed {
        c_left: false,
        c_right: false,
        l: false,
        r: true,
        start: false,
    };

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(Tab::Video.next(), Tab::Cpu);
        assert_eq!(Tab::Cpu.previous(), Tab::Video);
        assert_eq!(Tab::Memory.next(), Tab::Rcp);
        assert_eq!(Tab::Rcp.previous(), Tab::Memory);
    }

    #[test]
    fn aliases_move_the_same_way() {
        let mut by_shoulder = TabNavigator::default();
        let mut by_c_button = TabNavigator::default();

        by_shoulder.apply(ButtonsPressed {
            l: true,
            ..Default::default()
        });
        by_c_button.apply(ButtonsPressed {
            c_left: true,
            ..Default::default()
        });
        assert_eq!(by_shoulder.current(), Tab::Video);
        assert_eq!(by_c_button.current(), Tab::Video);

        by_shoulder.apply(R);
        by_c_button.apply(ButtonsPressed {
            c_right: true,
            ..Default::default()
        });
        assert_eq!(by_shoulder.current(), Tab::Cpu);
        assert_eq!(by_c_button.current(), Tab::Cpu);
    }

    #[test]
    fn full_cycle_returns_home() {
        let mut navigator = TabNavigator::new(Tab::Rcp);
        for _ in 0..Tab::ALL.len() {
            assert_eq!(navigator.apply(R), Navigation::Continue);
        }
        assert_eq!(navigator.current(), Tab::Rcp);
    }

    #[test]
    fn start_exits() {
        let mut navigator = TabNavigator::default();
        let exit = navigator.apply(ButtonsPressed {
            start: true,
            ..Default::default()
        });
        assert_eq!(exit, Navigation::Exit);
        assert_eq!(navigator.current(), Tab::Cpu);
    }

    #[test]
    fn script_replays_on_frame() {
        let mut input = ScriptedInput::parse(["2=R", "3=cl+start"]).unwrap();
        assert!(input.has_exit());

        assert_eq!(input.poll(), ButtonsPressed::default());
        assert_eq!(input.poll(), R);
        assert_eq!(
            input.poll(),
            ButtonsPressed {
                c_left: true,
                start: true,
                ..Default::default()
            }
        );
        assert_eq!(input.poll(), ButtonsPressed::default());
    }

    #[test]
    fn script_merges_repeated_frames() {
        let mut input = ScriptedInput::parse(["1=L", "1=R"]).unwrap();
        let pressed = input.poll();
        assert!(pressed.l && pressed.r);
        assert!(!input.has_exit());
    }

    #[test]
    fn script_errors() {
        assert_eq!(
            ScriptedInput::parse(["R"]).unwrap_err(),
            ScriptError::MalformedEvent("R".to_owned())
        );
        assert_eq!(
            ScriptedInput::parse(["x=R"]).unwrap_err(),
            ScriptError::InvalidFrame("x".to_owned())
        );
        assert_eq!(
            ScriptedInput::parse(["0=R"]).unwrap_err(),
            ScriptError::FrameZero
        );
        assert_eq!(
            ScriptedInput::parse(["4=Z"]).unwrap_err(),
            ScriptError::UnknownButton("Z".to_owned())
        );
        assert_eq!(
            ScriptedInput::parse(["4=R+"]).unwrap_err(),
            ScriptError::MalformedEvent("4=R+".to_owned())
        );
    }
}
