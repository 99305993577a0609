//! __torus-life__ simulates [Conway's Game of Life](https://conwaylife.com/wiki/Conway%27s_Game_of_Life)
//! on a toroidal grid: the top edge wraps around to the bottom edge
//! and the left edge to the right edge.
//!
//! A [`World`] owns the grid, the generation counter and a
//! [`TransitionBackend`] that computes the next generation.
//! Three interchangeable backends are provided:
//!
//! * [`Backend::Scalar`]: the reference implementation, one cell at a time;
//! * [`Backend::Vectorized`]: a bit-sliced kernel which updates 64 cells
//!   per machine word;
//! * [`Backend::Parallel`]: a [`rayon`] thread pool owned by the world.
//!
//! All backends produce exactly the same result for the same grid.
//!
//! # Example
//!
//! ```rust
//! use torus_life_lib::{Config, PatternKind, Stability};
//!
//! # fn main() -> Result<(), torus_life_lib::Error> {
//! let mut world = Config::new(16, 16).world()?;
//! assert!(world.insert(PatternKind::Toad, 4, 4));
//! assert_eq!(world.is_stable(), Stability::Period2);
//!
//! world.evolve();
//! assert_eq!(world.generation(), 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docs_rs, feature(doc_cfg))]

pub mod backend;
mod cells;
mod config;
mod error;
mod grid;
mod patterns;
mod random;
mod save;
mod stability;
mod world;

pub use backend::{Backend, TransitionBackend};
pub use cells::{Coord, State, ALIVE, DEAD};
pub use config::Config;
pub use error::Error;
pub use grid::Grid;
pub use patterns::PatternKind;
pub use random::Placement;
pub use save::WorldFile;
pub use stability::{RunReport, Stability};
pub use world::World;
