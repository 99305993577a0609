//! Detecting still lifes and period 2 oscillators.

use crate::world::World;
use log::debug;
use std::{
    mem,
    time::{Duration, Instant},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the world behaves in the next two generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stability {
    /// The next generation is the same as the current one.
    ///
    /// An empty world is a fixed point.
    FixedPoint,
    /// The world changes, and comes back after two generations.
    Period2,
    /// The world is not back after one or two generations.
    ///
    /// It might still be an oscillator of a higher period,
    /// or contain spaceships. Longer periods are not searched.
    Undetermined,
}

impl Stability {
    /// Whether the world is a fixed point or a period 2 oscillator.
    pub fn is_stable(self) -> bool {
        self != Stability::Undetermined
    }
}

/// The result of [`World::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Number of generations actually evolved.
    pub generations: u64,

    /// The generation since which the world repeats itself with
    /// period 1 or 2, if the run stopped for that reason.
    ///
    /// The world at this generation is the same as the world at the end
    /// of the run.
    pub stable_since: Option<u64>,

    /// Wall time spent in the run, including the observer.
    pub elapsed: Duration,
}

impl World {
    /// Classifies the current generation by looking two generations ahead.
    ///
    /// The look-ahead runs on copies; the world itself, including its
    /// generation counter, is not changed.
    pub fn is_stable(&self) -> Stability {
        let next = self.backend.step(&self.grid);
        if self.backend.cells_equal(self.grid.cells(), next.cells()) {
            return Stability::FixedPoint;
        }
        let after_next = self.backend.step(&next);
        if self
            .backend
            .cells_equal(self.grid.cells(), after_next.cells())
        {
            Stability::Period2
        } else {
            Stability::Undetermined
        }
    }

    /// Evolves the world by at most `generations` generations.
    ///
    /// Stops early once the current generation is the same as the one
    /// before it (a fixed point, caught after a single generation) or the
    /// one two generations before (a period 2 oscillator).
    pub fn run(&mut self, generations: u64) -> RunReport {
        self.run_with(generations, |_| ())
    }

    /// Same as [`run`](Self::run), but calls `observer` after every generation.
    pub fn run_with<F>(&mut self, generations: u64, mut observer: F) -> RunReport
    where
        F: FnMut(&World),
    {
        let start = Instant::now();
        // Only the last two generations are kept.
        let mut two_ago = self.grid.clone();
        let mut previous = self.grid.clone();
        let mut done = 0;
        let mut stable_since = None;

        while done < generations {
            mem::swap(&mut two_ago, &mut previous);
            previous.clone_from(&self.grid);
            self.evolve();
            done += 1;
            observer(self);

            let since = if self
                .backend
                .cells_equal(previous.cells(), self.grid.cells())
            {
                self.generation() - 1
            } else if done >= 2
                && self
                    .backend
                    .cells_equal(two_ago.cells(), self.grid.cells())
            {
                self.generation() - 2
            } else {
                continue;
            };
            debug!(
                "Stable since generation {}, stopping after {} generations.",
                since, done
            );
            stable_since = Some(since);
            break;
        }

        RunReport {
            generations: done,
            stable_since,
            elapsed: start.elapsed(),
        }
    }
}
