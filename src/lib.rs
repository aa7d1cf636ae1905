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

//! # handykit
//!
//! Small conveniences for scripts and throwaway programs.
//!
//! * [`timer`]: a stopwatch that reports elapsed time as
//!   `1 Days,2 Hours,3 Minutes,4 Seconds`.
//! * [`files`]: list the files in a directory, normalise path separators,
//!   read creation times, and copy, move or rename files with errors that say
//!   what was wrong.
//! * [`picker`]: full-screen terminal pickers for a directory or a set of
//!   files.
//! * [`console`]: overwrite-the-current-line progress output and numbered
//!   list printing.
//!
//! Errors from every module are a single tagged [`Error`]; logging goes
//! through the `log` facade and is switched on with [`logging::init_logging`].

pub mod config;
pub mod console;
pub mod error;
pub mod files;
pub mod logging;
pub mod picker;
pub mod timer;
pub mod util;

mod theme;

#[cfg(test)]
mod testutil;

pub use error::{Endpoint, Error, FileOperation, Result};
pub use timer::Tracker;
