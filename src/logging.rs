/* logging.rs
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

use lazy_static::lazy_static;

#[macro_export]
macro_rules! error {
    ($domain:literal, $($arg:tt)*) => {{
        $crate::logging::Logger::log($crate::logging::LogLevel::Error, $domain, format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! warning {
    ($domain:literal, $($arg:tt)*) => {{
        $crate::logging::Logger::log($crate::logging::LogLevel::Warning, $domain, format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! message {
    ($domain:literal, $($arg:tt)*) => {{
        $crate::logging::Logger::log($crate::logging::LogLevel::Message, $domain, format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! info {
    ($domain:literal, $($arg:tt)*) => {{
        $crate::logging::Logger::log($crate::logging::LogLevel::Info, $domain, format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! debug {
    ($domain:literal, $($arg:tt)*) => {{
        $crate::logging::Logger::log($crate::logging::LogLevel::Debug, $domain, format_args!($($arg)*));
    }}
}

macro_rules! now {
    () => {
        unsafe {
            let now = libc::time(std::ptr::null_mut());
            if now == -1 {
                std::mem::zeroed()
            } else {
                let mut tm: libc::tm = std::mem::zeroed();
                if libc::localtime_r(&now, &mut tm).is_null() {
                    std::mem::zeroed()
                } else {
                    tm
                }
            }
        }
    };
}

lazy_static! {
    static ref PID: u32 = unsafe { libc::getpid() } as _;
    static ref G_MESSAGES_DEBUG: Vec<std::sync::Arc<str>> = std::env::var("G_MESSAGES_DEBUG")
        .unwrap_or_default()
        .split(';')
        .filter(|s| !s.is_empty())
        .map(std::sync::Arc::<str>::from)
        .collect();
}

const F_COL_LIGHT_BLUE: &str = "\x1b[2;34m";
const F_RESET: &str = "\x1b[0m";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warning,
    Message,
    Info,
    Debug,
}

impl LogLevel {
    const fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Message => "MESSAGE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[1;31m",    /* red */
            LogLevel::Warning => "\x1b[1;33m",  /* yellow */
            LogLevel::Message => "\x1b[1;32m",  /* green */
            LogLevel::Info => "\x1b[1;32m",     /* green */
            LogLevel::Debug => "\x1b[1;32m",    /* green */
        }
    }

    /// Info and debug output is opt-in per domain through `G_MESSAGES_DEBUG`.
    const fn is_verbose(self) -> bool {
        matches!(self, LogLevel::Info | LogLevel::Debug)
    }
}

pub struct Logger;

impl Logger {
    pub fn log(level: LogLevel, domain: &str, args: std::fmt::Arguments<'_>) {
        if level.is_verbose() && !Self::domain_enabled(domain) {
            return;
        }

        let now: libc::tm = now!();
        let line = format!(
            "(n64z:{}): {}-{}{}{} **: {}{:02}:{:02}:{:02}.000{}: {}",
            *PID,
            domain,
            level.color(),
            level.name(),
            F_RESET,
            F_COL_LIGHT_BLUE,
            now.tm_hour,
            now.tm_min,
            now.tm_sec,
            F_RESET,
            args
        );

        // stdout carries the rendered panel and JSON snapshot
        eprintln!("{}", line);
    }

    fn domain_enabled(domain: &str) -> bool {
        G_MESSAGES_DEBUG
            .iter()
            .any(|d| d.as_ref() == domain || d.as_ref() == "all")
    }
}
