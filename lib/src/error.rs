//! All kinds of errors in this crate.

use crate::cells::Coord;
use displaydoc::Display;
use std::{io, path::PathBuf};
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Cell at {0:?} is out of range.
    CoordOutOfRange(Coord),
    /// Cell index {0} is out of range.
    IndexOutOfRange(usize),
    /// Cannot compare a {0:?} grid with a {1:?} grid.
    DimensionMismatch((usize, usize), (usize, usize)),
    /// Width and height should be positive.
    NonPositiveError,
    /// A {0}x{1} grid is too large to allocate.
    TooLarge(usize, usize),
    /// File {0:?} already exists.
    FileExists(PathBuf),
    /// File {0:?} does not exist.
    FileNotFound(PathBuf),
    /// I/O error: {0}.
    IoError(#[from] io::Error),
    /// Malformed world file at line {line}: {reason}.
    ParseError {
        /// The 1-indexed line where parsing failed.
        line: usize,
        /// What went wrong.
        reason: String,
    },
    /// Backend is unavailable: {0}.
    BackendUnavailable(String),
}

impl Error {
    /// Whether the error is caused by a coordinate or an index outside the grid.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::CoordOutOfRange(_) | Error::IndexOutOfRange(_))
    }

    pub(crate) fn parse<S: ToString>(line: usize, reason: S) -> Self {
        Error::ParseError {
            line,
            reason: reason.to_string(),
        }
    }
}
