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

//! File-system helpers.
//!
//! Small conveniences around `std::fs` for scripts and throwaway programs:
//!
//! * listing the plain files in a directory (sub-directories excluded);
//! * rewriting path separators to a single convention;
//! * reading a file's creation time;
//! * copying, moving and renaming files with descriptive errors, see
//!   [`ops`].

mod ops;

pub use ops::{copy_file, move_file, rename_file};

use std::{
    path::{MAIN_SEPARATOR, Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Local};
use walkdir::WalkDir;

use crate::error::{Error, FileOperation, Result};

/// Returns the names of the regular files directly inside `dir`.
///
/// Sub-directories (and anything below them) are excluded. Names are sorted.
///
/// Names that are not valid UTF-8 are converted lossily, so they may not
/// match the file on disk. Use [`list_file_paths`] when exact names matter.
///
/// # Errors
///
/// Returns [`Error::InvalidFileOperation`] if `dir` is not a directory, or
/// [`Error::Io`] if it cannot be read.
pub fn list_files(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let names = file_entries(dir)?
        .into_iter()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    Ok(names)
}

/// Like [`list_files`], but yields each file joined onto `dir`.
pub fn list_file_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let paths = file_entries(dir)?
        .into_iter()
        .map(|entry| dir.join(entry.file_name()))
        .collect();
    Ok(paths)
}

fn file_entries(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    if !dir.is_dir() {
        return Err(Error::invalid(FileOperation::List, dir, "not a directory"));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::io(path, e.into())
        })?;

        // Follows symlinks so a link to a file still counts as a file.
        if entry.path().is_file() {
            files.push(entry);
        }
    }

    log::debug!("{} files in {}", files.len(), dir.display());
    Ok(files)
}

/// Rewrites every `/` and `\` in `path` to `separator`.
///
/// # Examples
///
/// ```
/// use handykit::files::normalize_separators;
///
/// assert_eq!(normalize_separators("C:/Users/me\\notes", '\\'), "C:\\Users\\me\\notes");
/// ```
pub fn normalize_separators(path: &str, separator: char) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { separator } else { c })
        .collect()
}

/// Rewrites every separator in `path` to the platform's native one.
///
/// This is a text transform: on Unix a `\` inside a file name is rewritten
/// too. Use [`native_separators`] for paths that name real files.
pub fn fix_separators(path: &str) -> String {
    normalize_separators(path, MAIN_SEPARATOR)
}

/// Rewrites only the characters that are separators on this platform to the
/// native one.
///
/// On Unix `/` is the only separator, so the path is returned as is and a
/// `\` in a file name survives. On Windows `/` becomes `\`. Paths that are
/// not valid UTF-8 are returned unchanged.
pub fn native_separators(path: &Path) -> PathBuf {
    if cfg!(windows) {
        if let Some(text) = path.to_str() {
            return PathBuf::from(fix_separators(text));
        }
    }
    path.to_path_buf()
}

/// Returns the creation (birth) time of the file at `path`, in local time.
///
/// # Errors
///
/// Returns [`Error::InvalidFileOperation`] if `path` is not a file, or
/// [`Error::Io`] if the metadata cannot be read or the platform does not
/// record creation times.
pub fn creation_time(path: impl AsRef<Path>) -> Result<DateTime<Local>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::invalid(FileOperation::CreationTime, path, "not a file"));
    }

    let created: SystemTime = path
        .metadata()
        .and_then(|meta| meta.created())
        .map_err(|e| Error::io(path, e))?;

    Ok(DateTime::<Local>::from(created))
}
