//! World configuration.

use crate::{
    backend::{Backend, Scalar, TransitionBackend},
    error::Error,
    grid::Grid,
    save::WorldFile,
    world::World,
};
use educe::Educe;
use log::warn;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Height.
    #[educe(Default = 16)]
    pub height: isize,

    /// Width.
    #[educe(Default = 16)]
    pub width: isize,

    /// The backend that computes generations and compares grids.
    pub backend: Backend,

    /// Number of threads of the [`Parallel`](crate::backend::Parallel) backend.
    ///
    /// `None` means that the thread pool chooses by itself.
    pub threads: Option<usize>,

    /// Whether to use the [`Scalar`] backend when the chosen backend
    /// fails to initialize.
    ///
    /// When this is `false`, creating the world fails with
    /// [`Error::BackendUnavailable`] instead.
    pub fallback_to_scalar: bool,

    /// How many random placements [`World::randomize`] tries before giving up.
    ///
    /// `1` means a single attempt, which might not change the world.
    #[educe(Default = 1000)]
    pub max_randomize_attempts: u32,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(height: isize, width: isize) -> Self {
        Config {
            height,
            width,
            ..Config::default()
        }
    }

    /// Sets the backend.
    pub fn set_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the number of threads of the parallel backend.
    pub fn set_threads<T: Into<Option<usize>>>(mut self, threads: T) -> Self {
        self.threads = threads.into();
        self
    }

    /// Sets whether to fall back to the scalar backend.
    pub fn set_fallback_to_scalar(mut self, fallback_to_scalar: bool) -> Self {
        self.fallback_to_scalar = fallback_to_scalar;
        self
    }

    /// Sets the maximal number of attempts of [`World::randomize`].
    pub fn set_max_randomize_attempts(mut self, max_randomize_attempts: u32) -> Self {
        self.max_randomize_attempts = max_randomize_attempts;
        self
    }

    /// Initializes the backend, falling back to [`Scalar`] if allowed.
    pub(crate) fn init_backend(&self) -> Result<Box<dyn TransitionBackend>, Error> {
        match self.backend.build(self.threads) {
            Err(Error::BackendUnavailable(reason))
                if self.fallback_to_scalar && self.backend != Backend::Scalar =>
            {
                warn!(
                    "The {} backend is unavailable ({}). Falling back to the scalar backend.",
                    self.backend, reason
                );
                Ok(Box::new(Scalar))
            }
            result => result,
        }
    }

    /// Creates a new world with all cells dead.
    ///
    /// Returns an error if the width or the height is not positive,
    /// or if the backend is unavailable.
    pub fn world(&self) -> Result<World, Error> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::NonPositiveError);
        }
        let grid = Grid::new(self.height as usize, self.width as usize)?;
        World::with_grid(self, grid)
    }

    /// Creates a new world from a world file.
    ///
    /// The dimensions are read from the file; the other settings come from
    /// this configuration. The generation starts at 0.
    pub fn load_world<P: AsRef<Path>>(&self, path: P) -> Result<World, Error> {
        let grid = WorldFile::read(path)?.to_grid()?;
        World::with_grid(self, grid)
    }
}
