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

//! Decomposition of a whole number of seconds into calendar-ish units.

use std::fmt;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_MINUTE: u64 = 60;

/// A duration split into days, hours, minutes and seconds.
///
/// The [`Display`](fmt::Display) form lists every non-zero unit in the order
/// days, hours, minutes, seconds, joined with a bare comma. Seconds are always
/// present, so an empty duration renders as `0 Seconds`. Unit labels are
/// plural regardless of value.
///
/// # Examples
///
/// ```
/// use handykit::timer::Breakdown;
///
/// assert_eq!(Breakdown::from_seconds(65).to_string(), "1 Minutes,5 Seconds");
/// assert_eq!(Breakdown::from_seconds(0).to_string(), "0 Seconds");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    pub fn from_seconds(total_seconds: u64) -> Self {
        let days = total_seconds / SECONDS_PER_DAY;
        let remaining = total_seconds % SECONDS_PER_DAY;

        let hours = remaining / SECONDS_PER_HOUR;
        let remaining = remaining % SECONDS_PER_HOUR;

        let minutes = remaining / SECONDS_PER_MINUTE;
        let seconds = remaining % SECONDS_PER_MINUTE;

        Self { days, hours, minutes, seconds }
    }

    /// Re-assembles the number of seconds this breakdown was built from.
    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    fn units(&self) -> [(&'static str, u64); 4] {
        [
            ("Days", self.days),
            ("Hours", self.hours),
            ("Minutes", self.minutes),
            ("Seconds", self.seconds),
        ]
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<String> = self
            .units()
            .iter()
            .filter(|(name, value)| *value != 0 || *name == "Seconds")
            .map(|(name, value)| format!("{} {}", value, name))
            .collect();

        f.write_str(&segments.join(","))
    }
}

/// Formats a whole number of seconds, e.g. `90061` as
/// `1 Days,1 Hours,1 Minutes,1 Seconds`.
pub fn format_elapsed(total_seconds: u64) -> String {
    Breakdown::from_seconds(total_seconds).to_string()
}
