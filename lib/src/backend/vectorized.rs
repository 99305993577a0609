//! A bit-sliced backend.
//!
//! Each row is packed into 64-bit words, one bit per cell. The eight
//! neighbor planes of a row are the rows above, at and below it, shifted
//! one cell west and east with toroidal wrap-around. The planes are summed
//! with a 3-bit ripple counter, 64 cells at a time.
//!
//! Counting modulo 8 is enough: the only counts that matter are 2 and 3,
//! and a count of 8 wraps to 0, which kills the cell as it should.

use super::TransitionBackend;
use crate::{cells::State, grid::Grid};

/// Number of cells in a machine word.
const LANES: usize = u64::BITS as usize;

/// Updates 64 cells per machine word using bitwise arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vectorized;

/// Mask of the bits of the last word of a row that belong to the row.
#[inline]
fn last_mask(width: usize) -> u64 {
    match width % LANES {
        0 => !0,
        r => (1 << r) - 1,
    }
}

fn pack(row: &[State], words: &mut [u64]) {
    words.fill(0);
    for (i, &state) in row.iter().enumerate() {
        words[i / LANES] |= u64::from(u8::from(state)) << (i % LANES);
    }
}

fn unpack(words: &[u64], row: &mut [State]) {
    for (i, state) in row.iter_mut().enumerate() {
        *state = State::from((words[i / LANES] >> (i % LANES)) & 1 == 1);
    }
}

/// Bit `c` of the output is bit `c - 1` of the row: the western neighbor.
fn shift_west(row: &[u64], width: usize, out: &mut [u64]) {
    let last = width - 1;
    let wrap = (row[last / LANES] >> (last % LANES)) & 1;
    for k in 0..row.len() {
        let carry = if k == 0 { wrap } else { row[k - 1] >> (LANES - 1) };
        out[k] = (row[k] << 1) | carry;
    }
    out[last / LANES] &= last_mask(width);
}

/// Bit `c` of the output is bit `c + 1` of the row: the eastern neighbor.
fn shift_east(row: &[u64], width: usize, out: &mut [u64]) {
    let last = width - 1;
    for k in 0..row.len() {
        let carry = match row.get(k + 1) {
            Some(next) => next << (LANES - 1),
            None => 0,
        };
        out[k] = (row[k] >> 1) | carry;
    }
    out[last / LANES] |= (row[0] & 1) << (last % LANES);
}

impl TransitionBackend for Vectorized {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn step_into(&self, current: &Grid, next: &mut Grid) {
        assert_eq!(current.dimensions(), next.dimensions());
        let (height, width) = current.dimensions();
        let words = (width + LANES - 1) / LANES;

        let mut center = vec![0; height * words];
        let mut west = vec![0; height * words];
        let mut east = vec![0; height * words];
        for (row, cells) in current.cells().chunks(width).enumerate() {
            let plane = row * words..(row + 1) * words;
            pack(cells, &mut center[plane.clone()]);
            shift_west(&center[plane.clone()], width, &mut west[plane.clone()]);
            shift_east(&center[plane.clone()], width, &mut east[plane]);
        }

        let mut out = vec![0; words];
        for (row, cells) in next.cells_mut().chunks_mut(width).enumerate() {
            let up = (row + height - 1) % height * words;
            let down = (row + 1) % height * words;
            let here = row * words;
            for (k, word) in out.iter_mut().enumerate() {
                let planes = [
                    west[up + k],
                    center[up + k],
                    east[up + k],
                    west[here + k],
                    east[here + k],
                    west[down + k],
                    center[down + k],
                    east[down + k],
                ];
                let (mut b0, mut b1, mut b2) = (0u64, 0u64, 0u64);
                for plane in planes {
                    let c0 = b0 & plane;
                    b0 ^= plane;
                    let c1 = b1 & c0;
                    b1 ^= c0;
                    b2 ^= c1;
                }
                // Exactly 3, or exactly 2 and already alive.
                *word = b1 & !b2 & (b0 | center[here + k]);
            }
            unpack(&out, cells);
        }
    }

    fn cells_equal(&self, a: &[State], b: &[State]) -> bool {
        a.len() == b.len()
            && a
                .chunks(LANES)
                .zip(b.chunks(LANES))
                .all(|(x, y)| x == y)
    }
}
