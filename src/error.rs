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

//! Library error type.
//!
//! Every fallible operation in the crate returns [`Result`], whose error is a
//! tagged [`Error`] so callers can branch on what went wrong instead of
//! parsing a message.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// One of the two recorded endpoints of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Begin,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Begin => f.write_str("begin"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// The file mutation that was rejected or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    List,
    CreationTime,
    Copy,
    Move,
    Rename,
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileOperation::List => "list",
            FileOperation::CreationTime => "creation time",
            FileOperation::Copy => "copy",
            FileOperation::Move => "move",
            FileOperation::Rename => "rename",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// An elapsed-time query was made before both endpoints were recorded.
    #[error("measurement incomplete: `{missing}` has not been called since the last reset")]
    IncompleteMeasurement { missing: Endpoint },

    /// A path argument did not satisfy its expected file or directory role.
    ///
    /// Raised before anything on disk is touched.
    #[error("cannot {operation} {}: {reason}", path.display())]
    InvalidFileOperation {
        operation: FileOperation,
        path: PathBuf,
        reason: String,
    },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid(
        operation: FileOperation,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidFileOperation {
            operation,
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_measurement_names_missing_call() {
        let err = Error::IncompleteMeasurement { missing: Endpoint::End };
        assert!(err.to_string().contains("`end`"));
    }

    #[test]
    fn invalid_file_operation_mentions_path_and_reason() {
        let err = Error::invalid(FileOperation::Copy, "/tmp/nope.txt", "source is not a file");
        let msg = err.to_string();
        assert!(msg.starts_with("cannot copy /tmp/nope.txt"));
        assert!(msg.ends_with("source is not a file"));
    }
}
