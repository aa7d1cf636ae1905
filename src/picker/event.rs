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

//! Keyboard handling for the picker.
//!
//! Keys go to the filter line while it is being edited and to navigation
//! otherwise. See the table in the module docs of [`crate::picker`].

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tui_input::backend::crossterm::EventHandler;

use super::{PickMode, Picker};

impl Picker {
    /// Applies one key press.
    ///
    /// Check [`Picker::outcome`] afterwards to see whether the session ended.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.filter.editing {
            self.handle_filter_key(key);
            return;
        }

        match (key.code, self.mode) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => self.cancel(),

            // Navigation: Down / j, Up / k
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => self.next(),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => self.previous(),

            (KeyCode::Char('l'), _) | (KeyCode::Right, _) | (KeyCode::Enter, PickMode::Directory) => {
                self.open_selected();
            }
            (KeyCode::Enter, PickMode::Files) => {
                if !self.open_selected() {
                    self.choose_files();
                }
            }
            (KeyCode::Char('h'), _) | (KeyCode::Left, _) | (KeyCode::Backspace, _) => self.open_parent(),

            (KeyCode::Char('s'), PickMode::Directory) => self.choose_current_dir(),

            // Mark and step down so runs of files can be marked quickly.
            (KeyCode::Char(' '), PickMode::Files) => {
                self.toggle_mark();
                self.next();
            }

            (KeyCode::Char('/'), _) => self.filter.editing = true,
            (KeyCode::Char('.'), _) => self.toggle_hidden(),

            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.input.reset();
                self.filter.editing = false;
                self.refilter();
            }
            KeyCode::Enter => self.filter.editing = false,
            _ => {
                if self.filter.input.handle_event(&Event::Key(key)).is_some() {
                    self.refilter();
                }
            }
        }
    }
}
