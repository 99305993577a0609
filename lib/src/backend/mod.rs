//! Backends which compute the next generation and compare grids.
//!
//! Every backend implements [`TransitionBackend`] and must agree with
//! [`Scalar`], the reference implementation, cell for cell.

mod parallel;
mod scalar;
mod vectorized;

use crate::{
    cells::{State, ALIVE, DEAD},
    error::Error,
    grid::Grid,
};
use educe::Educe;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

pub use parallel::Parallel;
pub use scalar::Scalar;
pub use vectorized::Vectorized;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rule of Conway's Game of Life, `B3/S23`.
///
/// A cell with exactly 2 living neighbors keeps its state,
/// a cell with exactly 3 living neighbors becomes alive,
/// and every other cell dies.
#[inline]
pub fn next_state(state: State, live_neighbors: u8) -> State {
    match live_neighbors {
        2 => state,
        3 => ALIVE,
        _ => DEAD,
    }
}

/// A strategy for computing generations and comparing grids.
///
/// Implementations hold whatever resources they need (e.g. a thread pool)
/// for their whole lifetime, and release them on drop.
pub trait TransitionBackend: Send + Sync {
    /// A short name for logs and status lines.
    fn name(&self) -> &'static str;

    /// Computes the generation after `current` and writes it to `next`.
    ///
    /// `current` is never modified. Every cell of `next` is overwritten.
    ///
    /// # Panics
    ///
    /// Panics if the two grids have different dimensions.
    fn step_into(&self, current: &Grid, next: &mut Grid);

    /// Whether two cell buffers of the same length are identical.
    fn cells_equal(&self, a: &[State], b: &[State]) -> bool;

    /// Computes the generation after `current` into a new grid.
    fn step(&self, current: &Grid) -> Grid {
        let mut next = current.clone();
        self.step_into(current, &mut next);
        next
    }

    /// Whether two grids are identical, cell for cell.
    ///
    /// Returns [`Error::DimensionMismatch`] if the grids have different sizes.
    fn compare(&self, a: &Grid, b: &Grid) -> Result<bool, Error> {
        if a.dimensions() != b.dimensions() {
            return Err(Error::DimensionMismatch(a.dimensions(), b.dimensions()));
        }
        Ok(self.cells_equal(a.cells(), b.cells()))
    }
}

/// Which [`TransitionBackend`] a world uses.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Backend {
    /// [`Scalar`].
    #[educe(Default)]
    Scalar,
    /// [`Vectorized`].
    Vectorized,
    /// [`Parallel`].
    Parallel,
}

impl Backend {
    /// Initializes the backend.
    ///
    /// `threads` is only used by [`Backend::Parallel`]; `None` lets the
    /// thread pool choose.
    pub fn build(self, threads: Option<usize>) -> Result<Box<dyn TransitionBackend>, Error> {
        Ok(match self {
            Backend::Scalar => Box::new(Scalar),
            Backend::Vectorized => Box::new(Vectorized),
            Backend::Parallel => Box::new(Parallel::new(threads)?),
        })
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scalar" | "s" => Ok(Backend::Scalar),
            "vectorized" | "v" => Ok(Backend::Vectorized),
            "parallel" | "p" => Ok(Backend::Parallel),
            _ => Err(String::from("invalid Backend")),
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            Backend::Scalar => "scalar",
            Backend::Vectorized => "vectorized",
            Backend::Parallel => "parallel",
        };
        write!(f, "{}", s)?;
        Ok(())
    }
}
