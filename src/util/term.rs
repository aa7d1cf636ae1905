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

//! Terminal emulator styling.
//!
//! Uses OSC (Operating System Command) escape sequences, which most modern
//! terminals (XTerm, iTerm2, Alacritty, Kitty) understand. Terminals that do
//! not simply ignore them.

use std::io::{self, Write};

/// Sets the terminal background colour with an OSC 11 sequence.
///
/// # Arguments
///
/// * `hex_color` - The colour as a CSS-style hex string, e.g. `"#1e1e1e"`.
pub(crate) fn set_terminal_bg(hex_color: &str) -> io::Result<()> {
    write_osc(&format!("\x1b]11;{}\x07", hex_color))
}

/// Reverts the background to the user's own setting (OSC 111).
///
/// Called when the picker hands the screen back.
pub(crate) fn reset_terminal_bg() -> io::Result<()> {
    write_osc("\x1b]111\x07")
}

fn write_osc(sequence: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(sequence.as_bytes())?;
    stdout.flush()
}
