//! Inserting random patterns.

use crate::{patterns::PatternKind, world::World};
use log::trace;
use rand::{seq::SliceRandom, thread_rng, Rng};

/// Where [`World::randomize`] put a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// The pattern.
    pub kind: PatternKind,
    /// Row of the top-left corner of its bounding box.
    pub row: isize,
    /// Column of the top-left corner of its bounding box.
    pub col: isize,
}

impl World {
    /// Inserts a random pattern at a random position.
    ///
    /// See [`randomize_with`](Self::randomize_with).
    pub fn randomize(&mut self) -> Option<Placement> {
        self.randomize_with(&mut thread_rng())
    }

    /// Inserts a random pattern at a random position, using the given
    /// random number generator.
    ///
    /// The anchor is uniform over the whole grid and the pattern uniform over
    /// [`PatternKind::ALL`], so a pick near the edges might not fit.
    /// Picks are repeated until the world differs from how it was before
    /// the call, at most [`max_randomize_attempts`](crate::Config#structfield.max_randomize_attempts)
    /// times.
    ///
    /// Returns the placement that changed the world, or `None` if no attempt
    /// did. The latter is bound to happen on a world that is already full.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Placement> {
        let before = self.grid.clone();
        for attempt in 1..=self.config.max_randomize_attempts {
            let placement = Placement {
                kind: *PatternKind::ALL.choose(rng)?,
                row: rng.gen_range(0..self.height()) as isize,
                col: rng.gen_range(0..self.width()) as isize,
            };
            trace!("Randomize attempt {}: {:?}.", attempt, placement);
            if self.insert(placement.kind, placement.row, placement.col)
                && !self.backend.cells_equal(before.cells(), self.grid.cells())
            {
                return Some(placement);
            }
        }
        None
    }
}
