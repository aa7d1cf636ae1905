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

//! Terminal lifecycle for a picker session.
//!
//! The session follows a strict setup-run-teardown pattern: raw mode and the
//! alternate screen are always given back, even when drawing or reading input
//! fails part way through.

use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    error::{Error, Result},
    picker::{Outcome, Picker, PickerOptions, render::draw_picker},
    theme::Theme,
    util,
};

type PickerTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Runs `picker` on the real terminal until it reaches an outcome.
pub(super) fn run(mut picker: Picker, options: &PickerOptions) -> Result<Outcome> {
    let theme = Theme::default();

    let mut terminal = setup_terminal(options, &theme)?;
    let res = event_loop(&mut terminal, &mut picker, &theme);
    restore_terminal(&mut terminal, options);

    let outcome = res?;
    log::debug!("picker finished: {:?}", outcome);
    Ok(outcome)
}

fn event_loop(terminal: &mut PickerTerminal, picker: &mut Picker, theme: &Theme) -> Result<Outcome> {
    loop {
        terminal.draw(|f| draw_picker(f, picker, theme))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                picker.handle_key(key);
            }
        }

        if *picker.outcome() != Outcome::Pending {
            return Ok(picker.outcome().clone());
        }
    }
}

/// Prepares the terminal: optional themed background, raw mode, alternate
/// screen.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered. Anything already changed is put back first.
fn setup_terminal(options: &PickerOptions, theme: &Theme) -> Result<PickerTerminal> {
    if options.themed_background {
        // Without this the area outside ratatui's cells keeps the old colour.
        util::term::set_terminal_bg(&Theme::to_hex(theme.background_colour))?;
    }

    let attempt = || -> io::Result<PickerTerminal> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout))
    };

    attempt().map_err(|e| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        if options.themed_background {
            util::term::reset_terminal_bg().ok();
        }
        Error::from(e)
    })
}

/// Restores the terminal to its original state.
///
/// Best-effort: failures are ignored, as there is nothing sensible left to do
/// with them during teardown.
fn restore_terminal(terminal: &mut PickerTerminal, options: &PickerOptions) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    if options.themed_background {
        util::term::reset_terminal_bg().ok();
    }
    terminal.show_cursor().ok();
}
