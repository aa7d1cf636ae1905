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

//! Copy, move and rename.
//!
//! All three check their arguments up front and fail with
//! [`Error::InvalidFileOperation`] before anything on disk changes:
//!
//! * the source must be an existing regular file;
//! * the destination must be an existing directory (copy and move);
//! * the target path must not exist yet, files are never overwritten.
//!
//! Each returns the path of the file it produced.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::{Error, FileOperation, Result};

/// Copies `source` into `destination_dir`, keeping its file name.
///
/// # Errors
///
/// Returns [`Error::InvalidFileOperation`] if an argument does not fit its
/// role, or [`Error::Io`] if the copy itself fails.
pub fn copy_file(source: impl AsRef<Path>, destination_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let op = FileOperation::Copy;
    let source = source.as_ref();
    let target = target_in_dir(op, source, destination_dir.as_ref())?;

    copy_whole(source, &target)?;

    log::info!("copied {} to {}", source.display(), target.display());
    Ok(target)
}

/// Moves `source` into `destination_dir`, keeping its file name.
///
/// A plain rename is tried first. When that fails (typically because the
/// destination is on another file system) the file is copied and the
/// original removed. If the original cannot be removed the copy is deleted
/// again, leaving things as they were.
///
/// # Errors
///
/// Returns [`Error::InvalidFileOperation`] if an argument does not fit its
/// role, or [`Error::Io`] if the move fails.
pub fn move_file(source: impl AsRef<Path>, destination_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let op = FileOperation::Move;
    let source = source.as_ref();
    let target = target_in_dir(op, source, destination_dir.as_ref())?;

    if let Err(e) = fs::rename(source, &target) {
        log::debug!("rename {} failed ({}), copying instead", source.display(), e);
        copy_then_remove(source, &target, |path| fs::remove_file(path))?;
    }

    log::info!("moved {} to {}", source.display(), target.display());
    Ok(target)
}

/// Renames `source` to `new_base_name`, keeping its directory and extension.
///
/// `rename_file("notes/draft.txt", "final")` produces `notes/final.txt`.
///
/// # Errors
///
/// Returns [`Error::InvalidFileOperation`] if `source` is not a file, the new
/// name is empty or contains a path separator, or the target already exists.
/// Returns [`Error::Io`] if the rename itself fails.
pub fn rename_file(source: impl AsRef<Path>, new_base_name: &str) -> Result<PathBuf> {
    let op = FileOperation::Rename;
    let source = source.as_ref();
    require_file(op, source)?;

    let new_base_name = new_base_name.trim();
    if new_base_name.is_empty() {
        return Err(Error::invalid(op, source, "new name is empty"));
    }
    if new_base_name.contains(['/', '\\']) {
        return Err(Error::invalid(
            op,
            source,
            format!("new name `{}` contains a path separator", new_base_name),
        ));
    }

    let file_name = match source.extension() {
        Some(ext) => format!("{}.{}", new_base_name, ext.to_string_lossy()),
        None => new_base_name.to_string(),
    };
    let target = source.with_file_name(file_name);
    require_vacant(op, &target)?;

    fs::rename(source, &target).map_err(|e| Error::io(source, e))?;

    log::info!("renamed {} to {}", source.display(), target.display());
    Ok(target)
}

/// Copies `source` to the vacant `target`, removing whatever was written if
/// the copy fails part-way.
fn copy_whole(source: &Path, target: &Path) -> Result<()> {
    discard_on_error(target, fs::copy(source, target))?;
    Ok(())
}

fn discard_on_error<T>(target: &Path, result: io::Result<T>) -> Result<T> {
    result.map_err(|e| {
        if let Err(cleanup) = fs::remove_file(target) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                log::warn!("could not remove partial copy {}: {}", target.display(), cleanup);
            }
        }
        Error::io(target, e)
    })
}

/// Copies `source` to `target`, then removes `source` with `remove`. If the
/// source cannot be removed the copy is deleted again.
fn copy_then_remove<F>(source: &Path, target: &Path, remove: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    copy_whole(source, target)?;
    if let Err(e) = remove(source) {
        if let Err(cleanup) = fs::remove_file(target) {
            log::warn!("could not remove copy {}: {}", target.display(), cleanup);
        }
        return Err(Error::io(source, e));
    }
    Ok(())
}

fn target_in_dir(op: FileOperation, source: &Path, destination_dir: &Path) -> Result<PathBuf> {
    require_file(op, source)?;

    if !destination_dir.is_dir() {
        return Err(Error::invalid(op, destination_dir, "destination is not a directory"));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| Error::invalid(op, source, "source has no file name"))?;

    let target = destination_dir.join(file_name);
    require_vacant(op, &target)?;
    Ok(target)
}

fn require_file(op: FileOperation, source: &Path) -> Result<()> {
    if source.is_file() {
        Ok(())
    } else if source.exists() {
        Err(Error::invalid(op, source, "source is not a file"))
    } else {
        Err(Error::invalid(op, source, "source does not exist"))
    }
}

fn require_vacant(op: FileOperation, target: &Path) -> Result<()> {
    if target.exists() {
        return Err(Error::invalid(op, target, "target already exists"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScratchDir;

    fn reason_of(err: Error) -> String {
        match err {
            Error::InvalidFileOperation { reason, .. } => reason,
            other => panic!("expected InvalidFileOperation, got {:?}", other),
        }
    }

    #[test]
    fn copy_keeps_source() {
        let scratch = ScratchDir::new("copy");
        let source = scratch.file("report.csv", "a,b\n");
        let dest = scratch.dir("out");

        let target = copy_file(&source, &dest).unwrap();
        assert_eq!(target, dest.join("report.csv"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "a,b\n");
        assert!(source.exists());
    }

    #[test]
    fn copy_rejects_missing_source() {
        let scratch = ScratchDir::new("copy-missing");
        let dest = scratch.dir("out");

        let err = copy_file(scratch.path().join("nope.txt"), &dest).unwrap_err();
        assert_eq!(reason_of(err), "source does not exist");
    }

    #[test]
    fn copy_rejects_directory_source() {
        let scratch = ScratchDir::new("copy-dir-source");
        let source = scratch.dir("folder");
        let dest = scratch.dir("out");

        let err = copy_file(&source, &dest).unwrap_err();
        assert_eq!(reason_of(err), "source is not a file");
    }

    #[test]
    fn copy_rejects_file_destination() {
        let scratch = ScratchDir::new("copy-file-dest");
        let source = scratch.file("a.txt", "a");
        let dest = scratch.file("b.txt", "b");

        let err = copy_file(&source, &dest).unwrap_err();
        assert_eq!(reason_of(err), "destination is not a directory");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "b");
    }

    #[test]
    fn copy_never_overwrites() {
        let scratch = ScratchDir::new("copy-exists");
        let source = scratch.file("a.txt", "new");
        let dest = scratch.dir("out");
        scratch.file("out/a.txt", "old");

        let err = copy_file(&source, &dest).unwrap_err();
        assert_eq!(reason_of(err), "target already exists");
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "old");
    }

    #[test]
    fn move_relocates_file() {
        let scratch = ScratchDir::new("move");
        let source = scratch.file("data.bin", "123");
        let dest = scratch.dir("archive");

        let target = move_file(&source, &dest).unwrap();
        assert_eq!(target, dest.join("data.bin"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(target).unwrap(), "123");
    }

    #[test]
    fn move_rejects_missing_destination() {
        let scratch = ScratchDir::new("move-no-dest");
        let source = scratch.file("data.bin", "123");

        let err = move_file(&source, scratch.path().join("missing")).unwrap_err();
        assert_eq!(reason_of(err), "destination is not a directory");
        assert!(source.exists());
    }

    #[test]
    fn copy_then_remove_moves_the_file() {
        let scratch = ScratchDir::new("move-fallback");
        let source = scratch.file("log.txt", "entries");
        let target = scratch.dir("elsewhere").join("log.txt");

        copy_then_remove(&source, &target, |path| fs::remove_file(path)).unwrap();
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "entries");
    }

    #[test]
    fn copy_is_undone_when_source_cannot_be_removed() {
        let scratch = ScratchDir::new("move-rollback");
        let source = scratch.file("log.txt", "entries");
        let target = scratch.dir("elsewhere").join("log.txt");

        let denied = |_: &Path| -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        };
        match copy_then_remove(&source, &target, denied) {
            Err(Error::Io { path, .. }) => assert_eq!(path, source),
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(source.exists());
        assert!(!target.exists());
    }

    #[test]
    fn failed_copy_leaves_no_partial_target() {
        let scratch = ScratchDir::new("copy-partial");
        let target = scratch.file("half.bin", "half written");

        let failed: io::Result<u64> = Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
        match discard_on_error(&target, failed) {
            Err(Error::Io { path, .. }) => assert_eq!(path, target),
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(!target.exists());
    }

    #[test]
    fn failed_copy_of_unreadable_source_creates_nothing() {
        let scratch = ScratchDir::new("copy-unreadable");
        let source = scratch.dir("not-a-file");
        let target = scratch.path().join("copy");

        assert!(matches!(copy_whole(&source, &target), Err(Error::Io { .. })));
        assert!(!target.exists());
    }

    #[test]
    fn rename_keeps_extension_and_directory() {
        let scratch = ScratchDir::new("rename");
        let source = scratch.file("draft.txt", "text");

        let target = rename_file(&source, "final").unwrap();
        assert_eq!(target, scratch.path().join("final.txt"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(target).unwrap(), "text");
    }

    #[test]
    fn rename_without_extension() {
        let scratch = ScratchDir::new("rename-bare");
        let source = scratch.file("Makefile", "all:");

        let target = rename_file(&source, "GNUmakefile").unwrap();
        assert_eq!(target, scratch.path().join("GNUmakefile"));
    }

    #[test]
    fn rename_rejects_bad_names() {
        let scratch = ScratchDir::new("rename-bad");
        let source = scratch.file("a.txt", "a");

        assert_eq!(reason_of(rename_file(&source, "  ").unwrap_err()), "new name is empty");
        let err = rename_file(&source, "sub/b").unwrap_err();
        assert!(reason_of(err).contains("path separator"));
        assert!(source.exists());
    }

    #[test]
    fn rename_never_overwrites() {
        let scratch = ScratchDir::new("rename-exists");
        let source = scratch.file("a.txt", "a");
        scratch.file("b.txt", "b");

        let err = rename_file(&source, "b").unwrap_err();
        assert_eq!(reason_of(err), "target already exists");
        assert_eq!(fs::read_to_string(scratch.path().join("b.txt")).unwrap(), "b");
    }
}
