//! The reference backend.

use super::{next_state, TransitionBackend};
use crate::{cells::State, grid::Grid};

/// Updates one cell at a time, reading its eight neighbors with
/// toroidal wrap-around.
///
/// This is the reference semantics the other backends are checked against.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar;

impl TransitionBackend for Scalar {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn step_into(&self, current: &Grid, next: &mut Grid) {
        assert_eq!(current.dimensions(), next.dimensions());
        let width = current.width();
        for (i, cell) in next.cells_mut().iter_mut().enumerate() {
            let (row, col) = (i / width, i % width);
            *cell = next_state(current.cells()[i], current.live_neighbors(row, col));
        }
    }

    fn cells_equal(&self, a: &[State], b: &[State]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
    }
}
