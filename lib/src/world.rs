//! The world.

use crate::{
    backend::TransitionBackend,
    cells::{Coord, State},
    config::Config,
    error::Error,
    grid::Grid,
    patterns::PatternKind,
};
use log::info;
use std::{
    fmt::{self, Debug, Display, Formatter},
    mem,
};

/// The world.
///
/// A grid of `height × width` cells on a torus, a generation counter,
/// and the backend that advances it.
///
/// A world is meant to be driven by one caller at a time; every method
/// runs to completion before returning.
pub struct World {
    /// World configuration.
    ///
    /// The width and height always match the grid.
    pub(crate) config: Config,

    /// The current generation.
    pub(crate) grid: Grid,

    /// The buffer the next generation is written to.
    ///
    /// It is swapped with [`grid`](#structfield.grid) after every step,
    /// so the current generation is never modified while it is being read.
    spare: Grid,

    /// Computes generations and compares grids.
    ///
    /// Its resources live as long as the world.
    pub(crate) backend: Box<dyn TransitionBackend>,

    /// Number of steps since the world was created or loaded.
    generation: u64,
}

impl World {
    /// Creates a world around an existing grid.
    pub(crate) fn with_grid(config: &Config, grid: Grid) -> Result<Self, Error> {
        let backend = config.init_backend()?;
        info!(
            "Created a {}x{} world with the {} backend.",
            grid.height(),
            grid.width(),
            backend.name()
        );
        Ok(World {
            config: Config {
                height: grid.height() as isize,
                width: grid.width() as isize,
                ..config.clone()
            },
            spare: grid.clone(),
            grid,
            backend,
            generation: 0,
        })
    }

    /// World configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// The current generation number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The grid of the current generation.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Advances the world by one generation.
    ///
    /// The new generation is computed from a consistent snapshot of the
    /// current one, and only becomes visible once it is complete.
    pub fn evolve(&mut self) {
        self.backend.step_into(&self.grid, &mut self.spare);
        mem::swap(&mut self.grid, &mut self.spare);
        self.generation += 1;
    }

    /// Gets the state of the cell at `(row, col)`.
    pub fn get_cell(&self, row: isize, col: isize) -> Result<State, Error> {
        self.grid.get((row, col))
    }

    /// Gets the state of the cell at a flat index `row * width + col`.
    pub fn get_cell_at(&self, index: usize) -> Result<State, Error> {
        self.grid.get_index(index)
    }

    /// Sets the state of the cell at `(row, col)`.
    ///
    /// The world is left unchanged if the coordinates are out of range.
    pub fn set_cell(&mut self, state: State, row: isize, col: isize) -> Result<(), Error> {
        self.grid.set((row, col), state)
    }

    /// Sets the state of the cell at a flat index `row * width + col`.
    ///
    /// The world is left unchanged if the index is out of range.
    pub fn set_cell_at(&mut self, state: State, index: usize) -> Result<(), Error> {
        self.grid.set_index(index, state)
    }

    /// Inserts a pattern with the top-left corner of its bounding box at
    /// `(row, col)`.
    ///
    /// Returns `false`, and changes nothing, if the pattern does not fit.
    pub fn insert(&mut self, kind: PatternKind, row: isize, col: isize) -> bool {
        self.grid.insert(kind, row, col)
    }

    /// Inserts a [glider](PatternKind::Glider).
    pub fn add_glider(&mut self, row: isize, col: isize) -> bool {
        self.insert(PatternKind::Glider, row, col)
    }

    /// Inserts a [toad](PatternKind::Toad).
    pub fn add_toad(&mut self, row: isize, col: isize) -> bool {
        self.insert(PatternKind::Toad, row, col)
    }

    /// Inserts a [beacon](PatternKind::Beacon).
    pub fn add_beacon(&mut self, row: isize, col: isize) -> bool {
        self.insert(PatternKind::Beacon, row, col)
    }

    /// Inserts a [methuselah](PatternKind::Methuselah).
    pub fn add_methuselah(&mut self, row: isize, col: isize) -> bool {
        self.insert(PatternKind::Methuselah, row, col)
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Coordinates of all living cells, in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.grid.alive_cells()
    }

    /// Compares two grids with the backend of this world.
    ///
    /// Returns [`Error::DimensionMismatch`] if their sizes differ.
    pub fn grids_equal(&self, a: &Grid, b: &Grid) -> Result<bool, Error> {
        self.backend.compare(a, b)
    }
}

impl Display for World {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.grid, f)
    }
}

impl Debug for World {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("height", &self.height())
            .field("width", &self.width())
            .field("generation", &self.generation)
            .field("backend", &self.backend.name())
            .field("population", &self.population())
            .finish()
    }
}
