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

//! Interactive terminal file and directory picker.
//!
//! [`pick_directory`] and [`pick_files`] take over the terminal with a
//! full-screen browser and block until the user confirms a choice or cancels.
//!
//! # Keys
//!
//! | Key                       | Action                                      |
//! |---------------------------|---------------------------------------------|
//! | `j` / `Down`              | next entry                                  |
//! | `k` / `Up`                | previous entry                              |
//! | `l` / `Right` / `Enter`   | open the selected directory                 |
//! | `h` / `Left` / `Backspace`| go to the parent directory                  |
//! | `s`                       | choose the current directory (directories)  |
//! | `Space`                   | mark or unmark the selected file (files)    |
//! | `Enter` on a file         | choose the marked files, or this one (files)|
//! | `/`                       | filter entries by name                      |
//! | `.`                       | show or hide dot-files                      |
//! | `q` / `Esc`               | cancel                                      |
//!
//! The browsing state ([`Picker`]) is independent of the terminal and is
//! driven one key at a time through [`Picker::handle_key`].

mod event;
mod render;
mod session;

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Component, Path, PathBuf},
};

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::{
    config::{self, AppConfig},
    error::{Error, FileOperation, Result},
    files::native_separators,
};

/// What the picker is choosing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    Directory,
    Files,
}

/// Where a picker session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Cancelled,
    Directory(PathBuf),
    Files(Vec<PathBuf>),
}

/// Settings for a picker session.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub start_dir: PathBuf,
    pub show_hidden: bool,
    pub themed_background: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PickerOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            start_dir: cfg
                .start_dir
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            show_hidden: cfg.show_hidden,
            themed_background: cfg.themed_background,
        }
    }
}

/// Lets the user choose a directory.
///
/// Returns `None` if the picker was cancelled. Session settings come from the
/// user configuration, see [`crate::config`].
///
/// # Errors
///
/// Returns an error if the start directory cannot be read or the terminal
/// cannot be driven.
pub fn pick_directory(title: &str) -> Result<Option<PathBuf>> {
    pick_directory_with(title, &PickerOptions::from(&config::load_config()))
}

pub fn pick_directory_with(title: &str, options: &PickerOptions) -> Result<Option<PathBuf>> {
    let picker = Picker::new(PickMode::Directory, title, options)?;
    match session::run(picker, options)? {
        Outcome::Directory(dir) => Ok(Some(native_separators(&dir))),
        _ => Ok(None),
    }
}

/// Lets the user choose one or more files.
///
/// Returns an empty vector if the picker was cancelled.
///
/// # Errors
///
/// Same as [`pick_directory`].
pub fn pick_files(title: &str) -> Result<Vec<PathBuf>> {
    pick_files_with(title, &PickerOptions::from(&config::load_config()))
}

pub fn pick_files_with(title: &str, options: &PickerOptions) -> Result<Vec<PathBuf>> {
    let picker = Picker::new(PickMode::Files, title, options)?;
    match session::run(picker, options)? {
        Outcome::Files(files) => Ok(files.iter().map(|f| native_separators(f)).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Absolute form of `dir` with `.` and `..` folded away, the way a shell's
/// `cd` treats them, so going up walks the tree the user sees.
fn clean_dir(dir: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(dir)?;
    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    Ok(cleaned)
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) is_dir: bool,
}

impl Entry {
    fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Name filter typed after `/`.
#[derive(Default)]
pub(crate) struct Filter {
    pub(crate) input: Input,
    pub(crate) editing: bool,
}

impl Filter {
    fn matches(&self, entry: &Entry) -> bool {
        let needle = self.input.value().trim().to_lowercase();
        needle.is_empty() || entry.name.to_lowercase().contains(&needle)
    }
}

/// Browsing state of one picker session.
pub struct Picker {
    pub(crate) mode: PickMode,
    pub(crate) title: String,
    pub(crate) cwd: PathBuf,

    pub(crate) entries: Vec<Entry>,
    pub(crate) visible: Vec<usize>,
    pub(crate) list_state: ListState,

    pub(crate) marked: BTreeSet<PathBuf>,
    pub(crate) show_hidden: bool,
    pub(crate) filter: Filter,

    pub(crate) message: Option<String>,
    pub(crate) outcome: Outcome,
}

impl Picker {
    /// Opens a picker on `options.start_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFileOperation`] if the start path is not a
    /// directory, or [`Error::Io`] if it cannot be read.
    pub fn new(mode: PickMode, title: &str, options: &PickerOptions) -> Result<Self> {
        let start = clean_dir(&options.start_dir).map_err(|e| Error::io(&options.start_dir, e))?;
        if !start.is_dir() {
            return Err(Error::invalid(
                FileOperation::List,
                start,
                "picker start path is not a directory",
            ));
        }

        let mut picker = Self {
            mode,
            title: title.to_string(),
            cwd: start.clone(),
            entries: Vec::new(),
            visible: Vec::new(),
            list_state: ListState::default(),
            marked: BTreeSet::new(),
            show_hidden: options.show_hidden,
            filter: Filter::default(),
            message: None,
            outcome: Outcome::Pending,
        };
        picker.entries = read_entries(&start)?;
        picker.refilter();
        Ok(picker)
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn current_dir(&self) -> &Path {
        &self.cwd
    }

    pub(crate) fn selected_entry(&self) -> Option<&Entry> {
        let index = self.list_state.selected()?;
        self.visible.get(index).map(|&i| &self.entries[i])
    }

    pub(crate) fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.visible.iter().map(|&i| &self.entries[i])
    }

    pub(crate) fn next(&mut self) {
        let len = self.visible.len();
        if len == 0 { return; }
        let i = match self.list_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub(crate) fn previous(&mut self) {
        let len = self.visible.len();
        if len == 0 { return; }
        let i = match self.list_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Opens the selected entry if it is a directory.
    pub(crate) fn open_selected(&mut self) -> bool {
        match self.selected_entry() {
            Some(entry) if entry.is_dir => {
                let path = entry.path.clone();
                self.change_dir(path, None);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn open_parent(&mut self) {
        let Some(parent) = self.cwd.parent().map(Path::to_path_buf) else {
            return;
        };
        let came_from = self.cwd.file_name().map(|n| n.to_string_lossy().into_owned());
        self.change_dir(parent, came_from);
    }

    /// Switches to `dir`, selecting the entry called `select` if present.
    ///
    /// An unreadable directory leaves the picker where it was and shows the
    /// error on the status line.
    fn change_dir(&mut self, dir: PathBuf, select: Option<String>) {
        let dir = match clean_dir(&dir) {
            Ok(cleaned) => cleaned,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };
        match read_entries(&dir) {
            Ok(entries) => {
                log::debug!("picker entered {}", dir.display());
                self.cwd = dir;
                self.entries = entries;
                self.message = None;
                self.filter = Filter::default();
                self.refilter();

                if let Some(name) = select {
                    let pos = self.visible_entries().position(|e| e.name == name);
                    if pos.is_some() {
                        self.list_state.select(pos);
                    }
                }
            }
            Err(e) => {
                log::warn!("picker could not open {}: {}", dir.display(), e);
                self.message = Some(e.to_string());
            }
        }
    }

    pub(crate) fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refilter();
    }

    pub(crate) fn toggle_mark(&mut self) {
        if self.mode != PickMode::Files {
            return;
        }
        if let Some(entry) = self.selected_entry().filter(|e| !e.is_dir) {
            let path = entry.path.clone();
            if !self.marked.remove(&path) {
                self.marked.insert(path);
            }
        }
    }

    pub(crate) fn is_marked(&self, entry: &Entry) -> bool {
        self.marked.contains(&entry.path)
    }

    pub(crate) fn choose_current_dir(&mut self) {
        if self.mode == PickMode::Directory {
            self.outcome = Outcome::Directory(self.cwd.clone());
        }
    }

    /// Finishes a file pick with the marked files, or the selected file when
    /// nothing is marked.
    pub(crate) fn choose_files(&mut self) {
        if self.mode != PickMode::Files {
            return;
        }
        let files: Vec<PathBuf> = if self.marked.is_empty() {
            self.selected_entry()
                .filter(|e| !e.is_dir)
                .map(|e| vec![e.path.clone()])
                .unwrap_or_default()
        } else {
            self.marked.iter().cloned().collect()
        };

        if !files.is_empty() {
            self.outcome = Outcome::Files(files);
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.outcome = Outcome::Cancelled;
    }

    /// Recomputes the visible rows after the filter or hidden toggle changed.
    pub(crate) fn refilter(&mut self) {
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.show_hidden || !e.is_hidden())
            .filter(|(_, e)| self.filter.matches(e))
            .map(|(i, _)| i)
            .collect();
        self.list_state.select((!self.visible.is_empty()).then_some(0));
    }
}

/// Reads `dir`, directories first, each group sorted ignoring case.
fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let read = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut entries: Vec<Entry> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let path = entry.path();
            Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: path.is_dir(),
                path,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScratchDir;

    pub(super) fn options(dir: &Path) -> PickerOptions {
        PickerOptions {
            start_dir: dir.to_path_buf(),
            show_hidden: false,
            themed_background: false,
        }
    }

    pub(super) fn sample_tree(label: &str) -> ScratchDir {
        let scratch = ScratchDir::new(label);
        scratch.dir("src");
        scratch.dir("Docs");
        scratch.file("b.txt", "b");
        scratch.file("A.md", "a");
        scratch.file(".hidden", "h");
        scratch.file("src/lib.rs", "");
        scratch
    }

    fn names(picker: &Picker) -> Vec<String> {
        picker.visible_entries().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn directories_first_then_files_ignoring_case() {
        let tree = sample_tree("picker-order");
        let picker = Picker::new(PickMode::Files, "t", &options(tree.path())).unwrap();
        assert_eq!(names(&picker), vec!["Docs", "src", "A.md", "b.txt"]);
        assert_eq!(picker.list_state.selected(), Some(0));
    }

    #[test]
    fn hidden_entries_toggle() {
        let tree = sample_tree("picker-hidden");
        let mut picker = Picker::new(PickMode::Files, "t", &options(tree.path())).unwrap();
        picker.toggle_hidden();
        assert!(names(&picker).contains(&".hidden".to_string()));
        picker.toggle_hidden();
        assert!(!names(&picker).contains(&".hidden".to_string()));
    }

    #[test]
    fn selection_wraps() {
        let tree = sample_tree("picker-wrap");
        let mut picker = Picker::new(PickMode::Files, "t", &options(tree.path())).unwrap();
        picker.previous();
        assert_eq!(picker.selected_entry().unwrap().name, "b.txt");
        picker.next();
        assert_eq!(picker.selected_entry().unwrap().name, "Docs");
    }

    #[test]
    fn open_and_return_reselects_directory() {
        let tree = sample_tree("picker-nav");
        let mut picker = Picker::new(PickMode::Files, "t", &options(tree.path())).unwrap();
        picker.next();
        assert!(picker.open_selected());
        assert!(picker.current_dir().ends_with("src"));
        assert_eq!(names(&picker), vec!["lib.rs"]);

        picker.open_parent();
        assert_eq!(picker.current_dir(), std::path::absolute(tree.path()).unwrap());
        assert_eq!(picker.selected_entry().unwrap().name, "src");
    }

    #[test]
    fn going_up_from_a_dotted_start_walks_the_tree() {
        let scratch = ScratchDir::new("picker-dotted");
        scratch.dir("a/b");
        scratch.dir("c");
        let root = std::path::absolute(scratch.path()).unwrap();

        let start = scratch.path().join("a/b/../../c");
        let mut picker = Picker::new(PickMode::Directory, "t", &options(&start)).unwrap();
        assert_eq!(picker.current_dir(), root.join("c"));

        picker.open_parent();
        assert_eq!(picker.current_dir(), root);
        assert_eq!(picker.selected_entry().unwrap().name, "c");

        picker.open_parent();
        assert_eq!(Some(picker.current_dir()), root.parent());
    }

    #[cfg(unix)]
    #[test]
    fn dot_components_are_folded() {
        let cleaned = clean_dir(Path::new("/srv/./data/../logs")).unwrap();
        assert_eq!(cleaned, PathBuf::from("/srv/logs"));
        assert_eq!(clean_dir(Path::new("/..")).unwrap(), PathBuf::from("/"));
    }

    #[cfg(unix)]
    #[test]
    fn chosen_file_with_backslash_keeps_its_name() {
        let scratch = ScratchDir::new("picker-backslash");
        let file = scratch.file("a\\b.txt", "x");

        let mut picker = Picker::new(PickMode::Files, "t", &options(scratch.path())).unwrap();
        picker.choose_files();
        let Outcome::Files(files) = picker.outcome().clone() else {
            panic!("expected a file pick, got {:?}", picker.outcome());
        };
        let returned: Vec<PathBuf> = files.iter().map(|f| native_separators(f)).collect();
        assert_eq!(returned, vec![std::path::absolute(&file).unwrap()]);
        assert!(returned[0].exists());
    }

    #[test]
    fn opening_a_file_does_nothing() {
        let tree = sample_tree("picker-open-file");
        let mut picker = Picker::new(PickMode::Files, "t", &options(tree.path())).unwrap();
        picker.next();
        picker.next();
        assert!(!picker.open_selected());
        assert_eq!(picker.outcome(), &Outcome::Pending);
    }

    #[test]
    fn start_path_must_be_a_directory() {
        let tree = sample_tree("picker-bad-start");
        let result = Picker::new(PickMode::Files, "t", &options(&tree.path().join("b.txt")));
        assert!(matches!(result, Err(Error::InvalidFileOperation { .. })));
    }

    #[test]
    fn options_follow_config() {
        let cfg = AppConfig {
            start_dir: Some("/tmp".into()),
            show_hidden: true,
            ..AppConfig::default()
        };
        let options = PickerOptions::from(&cfg);
        assert_eq!(options.start_dir, PathBuf::from("/tmp"));
        assert!(options.show_hidden);
        assert_eq!(PickerOptions::default().start_dir, PathBuf::from("."));
    }
}
