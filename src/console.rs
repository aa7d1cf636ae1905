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

//! Console print helpers.
//!
//! Every `print_*` function writes to standard output and has a `write_*`
//! twin that takes any [`Write`] instead.

use std::{
    fmt::Display,
    io::{self, Stdout, Write},
    time::Instant,
};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::util::format::format_time;

/// Replaces the current terminal line with `text`.
///
/// No newline is written, so the next call overwrites this one. Useful for
/// "3 of 10" style progress output.
pub fn print_progress_line(text: &str) -> io::Result<()> {
    write_progress_line(&mut io::stdout(), text)
}

pub fn write_progress_line<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(text))?;
    out.flush()
}

/// Counts completed steps on a single, repeatedly overwritten line.
///
/// ```no_run
/// use handykit::console::ProgressCounter;
///
/// let files = ["a", "b", "c"];
/// let mut progress = ProgressCounter::new(files.len());
/// for _file in files {
///     // ... process ...
///     progress.tick()?;
/// }
/// progress.finish()?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ProgressCounter<W: Write = Stdout> {
    out: W,
    done: usize,
    total: usize,
    started: Instant,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        Self::with_writer(io::stdout(), total)
    }
}

impl<W: Write> ProgressCounter<W> {
    pub fn with_writer(out: W, total: usize) -> Self {
        Self {
            out,
            done: 0,
            total,
            started: Instant::now(),
        }
    }

    pub fn done(&self) -> usize {
        self.done
    }

    /// Marks one more step as done and redraws the line as `<n> of <total>`
    /// followed by the time taken so far.
    pub fn tick(&mut self) -> io::Result<()> {
        self.done += 1;
        let text = format!(
            "{} of {} [{}]",
            self.done,
            self.total,
            format_time(self.started.elapsed().as_secs())
        );
        write_progress_line(&mut self.out, &text)
    }

    /// Ends the progress line so later output starts on a fresh one.
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Prints each item on its own line, optionally prefixed with its 1-based
/// position.
pub fn print_numbered<I>(items: I, with_numbers: bool) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: Display,
{
    write_numbered(&mut io::stdout().lock(), items, with_numbers)
}

/// Numbers are right-aligned to the widest one:
///
/// ```text
///  9. nine
/// 10. ten
/// ```
pub fn write_numbered<W, I>(out: &mut W, items: I, with_numbers: bool) -> io::Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    let items: Vec<I::Item> = items.into_iter().collect();
    let width = items.len().to_string().len();

    for (index, item) in items.iter().enumerate() {
        if with_numbers {
            writeln!(out, "{:>width$}. {}", index + 1, item)?;
        } else {
            writeln!(out, "{}", item)?;
        }
    }
    out.flush()
}

/// Prints `key: value` lines for each entry, in iteration order, optionally
/// numbered like [`print_numbered`].
pub fn print_numbered_map<I, K, V>(entries: I, with_numbers: bool) -> io::Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    write_numbered_map(&mut io::stdout().lock(), entries, with_numbers)
}

pub fn write_numbered_map<W, I, K, V>(out: &mut W, entries: I, with_numbers: bool) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let lines = entries
        .into_iter()
        .map(|(key, value)| format!("{}: {}", key, value));
    write_numbered(out, lines, with_numbers)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn written(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn progress_line_clears_then_prints() {
        let out = written(|buf| write_progress_line(buf, "2 of 5"));
        let clear = out.find("\x1b[2K").expect("line clear");
        assert!(out.ends_with("2 of 5"));
        assert!(clear < out.find("2 of 5").unwrap());
        assert!(!out.contains('\n'));
    }

    #[test]
    fn progress_counter_counts() {
        let mut progress = ProgressCounter::with_writer(Vec::new(), 3);
        progress.tick().unwrap();
        progress.tick().unwrap();
        assert_eq!(progress.done(), 2);

        let out = String::from_utf8(progress.finish().unwrap()).unwrap();
        assert!(out.contains("1 of 3 ["));
        assert!(out.contains("2 of 3 ["));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn numbered_list() {
        let out = written(|buf| write_numbered(buf, ["alpha", "beta"], true));
        assert_eq!(out, "1. alpha\n2. beta\n");
    }

    #[test]
    fn unnumbered_list() {
        let out = written(|buf| write_numbered(buf, vec![3, 1, 2], false));
        assert_eq!(out, "3\n1\n2\n");
    }

    #[test]
    fn numbers_are_right_aligned() {
        let items: Vec<String> = (1..=10).map(|n| format!("item{}", n)).collect();
        let out = written(|buf| write_numbered(buf, &items, true));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " 1. item1");
        assert_eq!(lines[9], "10. item10");
    }

    #[test]
    fn empty_list_writes_nothing() {
        let out = written(|buf| write_numbered(buf, Vec::<String>::new(), true));
        assert!(out.is_empty());
    }

    #[test]
    fn numbered_map_keeps_order() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);

        let out = written(|buf| write_numbered_map(buf, &map, true));
        assert_eq!(out, "1. a: 1\n2. b: 2\n");

        let out = written(|buf| write_numbered_map(buf, &map, false));
        assert_eq!(out, "a: 1\nb: 2\n");
    }
}
