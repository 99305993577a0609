//! The grid of cells.

use crate::{
    cells::{Coord, State, ALIVE, DEAD},
    error::Error,
};
use std::{
    fmt::{self, Display, Formatter, Write},
    mem,
};

/// A dense, row-major grid of `height × width` cells.
///
/// The cell at `(row, col)` lives at index `row * width + col`
/// of the flat buffer. Both accessors are bounds-checked and agree
/// with each other.
///
/// The grid has no notion of time; the generation counter lives in
/// [`World`](crate::World).
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<State>,
}

impl Grid {
    /// Creates a new grid with all cells dead.
    ///
    /// Returns [`Error::NonPositiveError`] if either dimension is zero,
    /// and [`Error::TooLarge`] if the cells cannot be allocated.
    pub fn new(height: usize, width: usize) -> Result<Self, Error> {
        Self::from_fn(height, width, |_, _| DEAD)
    }

    /// Creates a new grid, asking `f` for the state at each `(row, col)`.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Result<Self, Error>
    where
        F: FnMut(usize, usize) -> State,
    {
        if height == 0 || width == 0 {
            return Err(Error::NonPositiveError);
        }
        let len = Grid::cell_count(height, width).ok_or(Error::TooLarge(height, width))?;
        let mut cells: Vec<State> = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::TooLarge(height, width))?;
        for row in 0..height {
            for col in 0..width {
                cells.push(f(row, col));
            }
        }
        Ok(Grid {
            height,
            width,
            cells,
        })
    }

    /// Number of cells of a `height × width` grid, or `None` if the
    /// buffer would exceed the largest possible allocation.
    pub fn cell_count(height: usize, width: usize) -> Option<usize> {
        height
            .checked_mul(width)
            .filter(|&len| len <= isize::MAX as usize / mem::size_of::<State>())
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of cells, `height × width`.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The flat, row-major cell buffer.
    #[inline]
    pub fn cells(&self) -> &[State] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [State] {
        &mut self.cells
    }

    /// Converts a coordinate to a flat index.
    pub fn index_of(&self, (row, col): Coord) -> Result<usize, Error> {
        if row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width {
            Ok(row as usize * self.width + col as usize)
        } else {
            Err(Error::CoordOutOfRange((row, col)))
        }
    }

    /// Gets the state of the cell at `coord`.
    pub fn get(&self, coord: Coord) -> Result<State, Error> {
        let index = self.index_of(coord)?;
        Ok(self.cells[index])
    }

    /// Gets the state of the cell at a flat index.
    pub fn get_index(&self, index: usize) -> Result<State, Error> {
        self.cells
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange(index))
    }

    /// Sets the state of the cell at `coord`.
    pub fn set(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        let index = self.index_of(coord)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Sets the state of the cell at a flat index.
    pub fn set_index(&mut self, index: usize, state: State) -> Result<(), Error> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange(index))?;
        *cell = state;
        Ok(())
    }

    /// Number of living cells among the eight toroidal neighbors
    /// of `(row, col)`.
    ///
    /// The coordinates must be in range.
    #[inline]
    pub(crate) fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let (h, w) = (self.height, self.width);
        let up = (row + h - 1) % h;
        let down = (row + 1) % h;
        let left = (col + w - 1) % w;
        let right = (col + 1) % w;
        [
            (up, left),
            (up, col),
            (up, right),
            (row, left),
            (row, right),
            (down, left),
            (down, col),
            (down, right),
        ]
        .iter()
        .map(|&(r, c)| u8::from(self.cells[r * w + c]))
        .sum()
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|s| s.is_alive()).count()
    }

    /// Coordinates of all living cells, in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_alive())
            .map(move |(i, _)| ((i / width) as isize, (i % width) as isize))
    }
}

/// `clone_from` reuses the cell buffer.
impl Clone for Grid {
    fn clone(&self) -> Self {
        Grid {
            height: self.height,
            width: self.width,
            cells: self.cells.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.height = source.height;
        self.width = source.width;
        self.cells.clone_from(&source.cells);
    }
}

/// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &state in row {
                f.write_char(if state == ALIVE { 'o' } else { '.' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
