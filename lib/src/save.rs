//! Saves and loads worlds as plain text.
//!
//! A world file looks like this:
//!
//! ```plaintext
//! height = 8
//! width = 10
//! start = (0,1), (1,2), (2,0), (2,1), (2,2),
//! ```
//!
//! Each pair in `start` is the `(row, col)` of a living cell. All other
//! cells are dead. Lines with other keys are ignored.

use crate::{
    cells::{Coord, ALIVE},
    error::Error,
    grid::Grid,
    world::World,
};
use log::info;
use std::{
    fmt::{self, Display, Formatter},
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
    str::{self, FromStr},
};

/// The contents of a world file.
///
/// Only the dimensions and the living cells are saved. A loaded world
/// starts again at generation 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldFile {
    /// Height.
    pub height: isize,
    /// Width.
    pub width: isize,
    /// `(row, col)` of every living cell.
    pub start: Vec<Coord>,
}

impl WorldFile {
    /// Reads and parses a world file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::IoError(e),
        })?;
        let text = str::from_utf8(&bytes).map_err(|e| {
            let valid = &bytes[..e.valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            Error::parse(line, e)
        })?;
        text.parse()
    }

    /// Writes the world file to a new file.
    ///
    /// Fails with [`Error::FileExists`] if something is already there;
    /// existing files are never overwritten.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::FileExists(path.to_path_buf()),
                _ => Error::IoError(e),
            })?;
        file.write_all(self.to_string().as_bytes())?;
        info!("Saved {} living cells to {:?}.", self.start.len(), path);
        Ok(())
    }

    /// Builds the grid described by the file.
    pub fn to_grid(&self) -> Result<Grid, Error> {
        if self.height <= 0 || self.width <= 0 {
            return Err(Error::NonPositiveError);
        }
        let mut grid = Grid::new(self.height as usize, self.width as usize)?;
        for &coord in &self.start {
            grid.set(coord, ALIVE)?;
        }
        Ok(grid)
    }
}

impl From<&Grid> for WorldFile {
    fn from(grid: &Grid) -> Self {
        WorldFile {
            height: grid.height() as isize,
            width: grid.width() as isize,
            start: grid.alive_cells().collect(),
        }
    }
}

impl Display for WorldFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "height = {}", self.height)?;
        writeln!(f, "width = {}", self.width)?;
        write!(f, "start =")?;
        for (row, col) in &self.start {
            write!(f, " ({},{}),", row, col)?;
        }
        writeln!(f)
    }
}

/// Parses a comma separated list of `(row,col)` pairs.
/// A trailing comma is allowed.
fn parse_pairs(value: &str, line: usize) -> Result<Vec<Coord>, Error> {
    let mut pairs = Vec::new();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('(')
            .ok_or_else(|| Error::parse(line, format!("expected `(` at `{}`", rest)))?;
        let (pair, tail) = inner
            .split_once(')')
            .ok_or_else(|| Error::parse(line, "unclosed `(`"))?;
        let (row, col) = pair
            .split_once(',')
            .ok_or_else(|| Error::parse(line, format!("expected `row,col`, found `{}`", pair)))?;
        let row = row.trim().parse().map_err(|e| Error::parse(line, e))?;
        let col = col.trim().parse().map_err(|e| Error::parse(line, e))?;
        pairs.push((row, col));

        let tail = tail.trim_start();
        rest = match tail.strip_prefix(',') {
            Some(tail) => tail.trim_start(),
            None if tail.is_empty() => tail,
            None => {
                return Err(Error::parse(
                    line,
                    format!("expected `,` at `{}`", tail),
                ))
            }
        };
    }
    Ok(pairs)
}

fn parse_dimension(value: &str, key: &str, line: usize) -> Result<isize, Error> {
    let n: isize = value
        .trim()
        .parse()
        .map_err(|e| Error::parse(line, format!("invalid {}: {}", key, e)))?;
    if n <= 0 {
        return Err(Error::parse(line, format!("{} should be positive", key)));
    }
    Ok(n)
}

impl FromStr for WorldFile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut height = None;
        let mut width = None;
        let mut start = Vec::new();
        let mut lines = 0;

        for (i, text) in s.lines().enumerate() {
            let line = i + 1;
            lines = line;
            let (key, value) = match text.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };
            match key.trim() {
                "height" => height = Some((parse_dimension(value, "height", line)?, line)),
                "width" => width = Some((parse_dimension(value, "width", line)?, line)),
                "start" => start.extend(
                    parse_pairs(value, line)?
                        .into_iter()
                        .map(|coord| (line, coord)),
                ),
                _ => (),
            }
        }

        let (height, height_line) =
            height.ok_or_else(|| Error::parse(lines, "missing `height`"))?;
        let (width, width_line) = width.ok_or_else(|| Error::parse(lines, "missing `width`"))?;
        if Grid::cell_count(height as usize, width as usize).is_none() {
            return Err(Error::parse(
                height_line.max(width_line),
                format!("a {}x{} world is too large", height, width),
            ));
        }
        for &(line, (row, col)) in &start {
            if row < 0 || col < 0 || row >= height || col >= width {
                return Err(Error::parse(
                    line,
                    format!("cell {:?} is outside the {}x{} world", (row, col), height, width),
                ));
            }
        }

        Ok(WorldFile {
            height,
            width,
            start: start.into_iter().map(|(_, coord)| coord).collect(),
        })
    }
}

impl World {
    /// Saves the dimensions and the living cells of the world to a new file.
    ///
    /// Fails with [`Error::FileExists`] if the file already exists.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        WorldFile::from(&self.grid).write(path)
    }
}
