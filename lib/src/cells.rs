//! Cells in the cellular automaton.

use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// Only two values exist: [`DEAD`] and [`ALIVE`].
/// As a number, the state is `0` or `1`, which is how it is counted
/// in a neighborhood.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(u8);

/// The Dead state.
pub const DEAD: State = State(0);
/// The Alive state.
pub const ALIVE: State = State(1);

impl State {
    /// Whether the cell is alive.
    #[inline]
    pub fn is_alive(self) -> bool {
        self == ALIVE
    }
}

/// Flips the state.
impl Not for State {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            ALIVE => DEAD,
            _ => ALIVE,
        }
    }
}

impl From<bool> for State {
    #[inline]
    fn from(alive: bool) -> Self {
        State(alive as u8)
    }
}

impl From<State> for u8 {
    #[inline]
    fn from(state: State) -> Self {
        state.0
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed. The row grows downwards,
/// the column grows to the right.
///
/// Coordinates are signed so that out-of-range requests such as `(-1, 0)`
/// can be expressed and rejected.
pub type Coord = (isize, isize);
