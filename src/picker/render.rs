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

//! Render the picker.
//!
//! The screen is a bordered listing of the current directory, a status line
//! (filter input, errors, or a summary) and a one-line key reminder.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    picker::{Entry, PickMode, Picker},
    theme::Theme,
};

pub(crate) fn draw_picker(f: &mut Frame, picker: &mut Picker, theme: &Theme) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_listing(f, outer[0], picker, theme);
    draw_status(f, outer[1], picker, theme);
    draw_help(f, outer[2], picker.mode, theme);
}

fn draw_listing(f: &mut Frame, area: Rect, picker: &mut Picker, theme: &Theme) {
    let items: Vec<ListItem> = picker
        .visible_entries()
        .map(|entry| ListItem::new(entry_line(picker, entry, theme)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour))
        .title(Line::styled(
            format!(" {} ", picker.title),
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::styled(
            format!(" {} ", picker.cwd.display()),
            Style::default().fg(theme.help_fg),
        ));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selection_bg).fg(theme.selection_fg))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut picker.list_state);
}

fn entry_line(picker: &Picker, entry: &Entry, theme: &Theme) -> Line<'static> {
    if entry.is_dir {
        return Line::from(Span::styled(
            format!("{}/", entry.name),
            Style::default().fg(theme.directory_fg).add_modifier(Modifier::BOLD),
        ));
    }

    match picker.mode {
        PickMode::Files if picker.is_marked(entry) => Line::from(Span::styled(
            format!("[x] {}", entry.name),
            Style::default().fg(theme.marked_fg),
        )),
        PickMode::Files => Line::from(Span::styled(
            format!("[ ] {}", entry.name),
            Style::default().fg(theme.file_fg),
        )),
        PickMode::Directory => Line::from(Span::styled(
            entry.name.clone(),
            Style::default().fg(theme.help_fg),
        )),
    }
}

fn draw_status(f: &mut Frame, area: Rect, picker: &Picker, theme: &Theme) {
    let base = Style::default().bg(theme.status_bar_colour);
    let filter = picker.filter.input.value();

    let (text, style) = if picker.filter.editing || !filter.is_empty() {
        (format!("/{}", filter), base.fg(theme.accent_colour))
    } else if let Some(message) = &picker.message {
        (message.clone(), base.fg(theme.error_fg))
    } else {
        let mut summary = format!("{} entries", picker.visible.len());
        if picker.mode == PickMode::Files {
            summary.push_str(&format!(", {} marked", picker.marked.len()));
        }
        (summary, base.fg(theme.help_fg))
    };

    f.render_widget(Paragraph::new(text).style(style), area);

    if picker.filter.editing {
        // One column for the leading '/'.
        let cursor_x = area.x + 1 + picker.filter.input.cursor() as u16;
        f.set_cursor_position((cursor_x, area.y));
    }
}

fn draw_help(f: &mut Frame, area: Rect, mode: PickMode, theme: &Theme) {
    let help = match mode {
        PickMode::Directory => "j/k move  l open  h up  s choose  / filter  . hidden  q cancel",
        PickMode::Files => "j/k move  l open  h up  space mark  enter choose  / filter  . hidden  q cancel",
    };

    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(theme.help_fg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::picker::tests::{options, sample_tree};

    fn screen(picker: &mut Picker) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| draw_picker(f, picker, &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn listing_shows_title_entries_and_marks() {
        let tree = sample_tree("render-files");
        let mut picker = Picker::new(PickMode::Files, "Pick inputs", &options(tree.path())).unwrap();
        picker.marked.insert(tree.path().join("b.txt"));

        let screen = screen(&mut picker);
        assert!(screen.contains("Pick inputs"));
        assert!(screen.contains(">> Docs/"));
        assert!(screen.contains("[ ] A.md"));
        assert!(screen.contains("[x] b.txt"));
        assert!(screen.contains("4 entries, 1 marked"));
    }

    #[test]
    fn filter_line_replaces_summary() {
        let tree = sample_tree("render-filter");
        let mut picker = Picker::new(PickMode::Directory, "Pick", &options(tree.path())).unwrap();
        picker.filter.editing = true;

        let screen = screen(&mut picker);
        assert!(!screen.contains("entries"));
        assert!(screen.contains("s choose"));
    }
}
