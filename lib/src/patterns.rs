//! Small patterns which can be stamped onto a grid.

use crate::{cells::ALIVE, grid::Grid};
use log::debug;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The patterns that can be inserted.
///
/// Each pattern is a fixed set of cells, given as `(row, col)` offsets
/// from the top-left corner of its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternKind {
    /// The [glider](https://conwaylife.com/wiki/Glider), moving towards
    /// the bottom right.
    ///
    /// ```plaintext
    /// .o.
    /// ..o
    /// ooo
    /// ```
    Glider,
    /// The [toad](https://conwaylife.com/wiki/Toad), a period 2 oscillator.
    ///
    /// ```plaintext
    /// ..o.
    /// o..o
    /// o..o
    /// .o..
    /// ```
    Toad,
    /// The [beacon](https://conwaylife.com/wiki/Beacon), a period 2 oscillator.
    ///
    /// ```plaintext
    /// oo..
    /// o...
    /// ...o
    /// ..oo
    /// ```
    Beacon,
    /// The [R-pentomino](https://conwaylife.com/wiki/R-pentomino),
    /// a methuselah.
    ///
    /// ```plaintext
    /// .oo
    /// oo.
    /// .o.
    /// ```
    Methuselah,
}

impl PatternKind {
    /// All pattern kinds.
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Glider,
        PatternKind::Toad,
        PatternKind::Beacon,
        PatternKind::Methuselah,
    ];

    /// The living cells of the pattern, relative to its anchor.
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            PatternKind::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            PatternKind::Toad => &[(0, 2), (1, 0), (1, 3), (2, 0), (2, 3), (3, 1)],
            PatternKind::Beacon => &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
            PatternKind::Methuselah => &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
        }
    }

    /// `(height, width)` of the bounding box.
    pub fn size(self) -> (usize, usize) {
        match self {
            PatternKind::Glider | PatternKind::Methuselah => (3, 3),
            PatternKind::Toad | PatternKind::Beacon => (4, 4),
        }
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glider" | "g" => Ok(PatternKind::Glider),
            "toad" | "t" => Ok(PatternKind::Toad),
            "beacon" | "b" => Ok(PatternKind::Beacon),
            "methuselah" | "m" => Ok(PatternKind::Methuselah),
            _ => Err(String::from("invalid PatternKind")),
        }
    }
}

impl Display for PatternKind {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            PatternKind::Glider => "glider",
            PatternKind::Toad => "toad",
            PatternKind::Beacon => "beacon",
            PatternKind::Methuselah => "methuselah",
        };
        write!(f, "{}", s)?;
        Ok(())
    }
}

impl Grid {
    /// Whether the bounding box of `kind` anchored at `(row, col)`
    /// fits in the grid without wrapping.
    pub fn fits(&self, kind: PatternKind, row: isize, col: isize) -> bool {
        let (height, width) = kind.size();
        row >= 0
            && col >= 0
            && row as usize + height <= self.height()
            && col as usize + width <= self.width()
    }

    /// Sets the cells of `kind` alive, with the top-left corner of its
    /// bounding box at `(row, col)`. Cells outside the pattern are left
    /// untouched.
    ///
    /// Patterns never wrap around the torus: if the bounding box does not fit,
    /// nothing is written and `false` is returned.
    pub fn insert(&mut self, kind: PatternKind, row: isize, col: isize) -> bool {
        if !self.fits(kind, row, col) {
            debug!("Rejected {} at {:?}: out of bounds.", kind, (row, col));
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        let width = self.width();
        let cells = self.cells_mut();
        for &(dr, dc) in kind.cells() {
            cells[(row + dr) * width + col + dc] = ALIVE;
        }
        true
    }
}
