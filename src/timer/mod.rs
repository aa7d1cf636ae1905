// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Elapsed-time tracking.
//!
//! A [`Tracker`] records a begin and an end instant and reports the whole
//! seconds between them, either as a number or as a human-readable string.
//!
//! ```
//! use handykit::timer::Tracker;
//!
//! let mut tracker = Tracker::new();
//! tracker.begin();
//! // ... work being timed ...
//! tracker.end();
//!
//! println!("took {}", tracker.elapsed_string().unwrap());
//! ```
//!
//! Measuring is wall-clock only. The tracker knows nothing about what ran in
//! between, so it is no substitute for a profiler.

mod breakdown;

pub use breakdown::{Breakdown, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, format_elapsed};

use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};

use crate::error::{Endpoint, Error, Result};

/// Source of the current time for a [`Tracker`].
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// The operating system's real-time clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Stopwatch-style elapsed-time tracker.
///
/// One tracker serves one measurement at a time. Call [`reset`](Self::reset)
/// between measurements: [`begin`](Self::begin) alone leaves the previous end
/// instant in place.
#[derive(Debug, Clone, Default)]
pub struct Tracker<C: Clock = SystemClock> {
    clock: C,
    start: Option<SystemTime>,
    end: Option<SystemTime>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` between a begin and an end on a fresh tracker.
    pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Self) {
        let mut tracker = Self::new();
        tracker.begin();
        let result = f();
        tracker.end();
        (result, tracker)
    }
}

impl<C: Clock> Tracker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            start: None,
            end: None,
        }
    }

    /// Records the current instant as the start of the measurement.
    pub fn begin(&mut self) {
        self.start = Some(self.clock.now());
    }

    /// Records the current instant as the end of the measurement.
    pub fn end(&mut self) {
        self.end = Some(self.clock.now());
    }

    /// Forgets both recorded instants.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Wall-clock time at which the measurement began, if it has.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.start.map(DateTime::<Local>::from)
    }

    /// Wall-clock time at which the measurement ended, if it has.
    pub fn ended_at(&self) -> Option<DateTime<Local>> {
        self.end.map(DateTime::<Local>::from)
    }

    /// Full-precision time between begin and end.
    ///
    /// An end recorded before the begin saturates to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteMeasurement`] if either endpoint is missing.
    pub fn elapsed(&self) -> Result<Duration> {
        let (start, end) = self.endpoints()?;
        Ok(end.duration_since(start).unwrap_or(Duration::ZERO))
    }

    /// Whole seconds between begin and end, truncated toward zero.
    ///
    /// The value is negative when the end was recorded before the begin, which
    /// can happen if the system clock is adjusted mid-measurement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteMeasurement`] if either endpoint is missing.
    pub fn elapsed_seconds(&self) -> Result<i64> {
        let (start, end) = self.endpoints()?;
        let seconds = match end.duration_since(start) {
            Ok(forward) => whole_seconds(forward),
            Err(backward) => -whole_seconds(backward.duration()),
        };
        Ok(seconds)
    }

    /// Elapsed time as text, e.g. `1 Minutes,5 Seconds`.
    ///
    /// See [`Breakdown`] for the exact format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteMeasurement`] if either endpoint is missing.
    pub fn elapsed_string(&self) -> Result<String> {
        let seconds = self.elapsed_seconds()?;
        let seconds = u64::try_from(seconds).unwrap_or_else(|_| {
            log::warn!("end recorded {}s before begin, reporting zero", -seconds);
            0
        });
        Ok(format_elapsed(seconds))
    }

    fn endpoints(&self) -> Result<(SystemTime, SystemTime)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err(Error::IncompleteMeasurement { missing: Endpoint::Begin }),
            (Some(_), None) => Err(Error::IncompleteMeasurement { missing: Endpoint::End }),
        }
    }
}

fn whole_seconds(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
