//! A backend running on a [`rayon`] thread pool.

use super::{next_state, TransitionBackend};
use crate::{cells::State, error::Error, grid::Grid};
use log::info;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

/// Number of cells compared by one task.
const COMPARE_CHUNK: usize = 4096;

/// Updates rows in parallel on a thread pool owned by the backend.
///
/// The pool is created once, lives as long as the backend, and its
/// threads are joined when the backend is dropped.
pub struct Parallel {
    pool: ThreadPool,
}

impl Parallel {
    /// Starts a thread pool with the given number of threads.
    ///
    /// `None` lets rayon choose. `Some(0)` is rejected.
    pub fn new(threads: Option<usize>) -> Result<Self, Error> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("torus-life-{}", i));
        if let Some(threads) = threads {
            if threads == 0 {
                return Err(Error::BackendUnavailable(String::from(
                    "the thread pool needs at least one thread",
                )));
            }
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::BackendUnavailable(e.to_string()))?;
        info!(
            "Started a thread pool with {} threads.",
            pool.current_num_threads()
        );
        Ok(Parallel { pool })
    }

    /// Number of threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl TransitionBackend for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn step_into(&self, current: &Grid, next: &mut Grid) {
        assert_eq!(current.dimensions(), next.dimensions());
        let width = current.width();
        self.pool.install(|| {
            next.cells_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| {
                    let start = row * width;
                    for (col, cell) in out.iter_mut().enumerate() {
                        *cell = next_state(
                            current.cells()[start + col],
                            current.live_neighbors(row, col),
                        );
                    }
                })
        });
    }

    fn cells_equal(&self, a: &[State], b: &[State]) -> bool {
        a.len() == b.len()
            && self.pool.install(|| {
                a.par_chunks(COMPARE_CHUNK)
                    .zip(b.par_chunks(COMPARE_CHUNK))
                    .all(|(x, y)| x == y)
            })
    }
}
