use proptest::{collection::vec, prelude::*};
use torus_life_lib::{
    backend::{Parallel, Scalar, TransitionBackend, Vectorized},
    Grid, State, ALIVE, DEAD,
};

/// A literal transcription of the rule, one cell at a time.
fn reference(grid: &Grid) -> Grid {
    let (height, width) = grid.dimensions();
    let (h, w) = (height as isize, width as isize);
    Grid::from_fn(height, width, |row, col| {
        let (row, col) = (row as isize, col as isize);
        let mut sum = 0;
        for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr, dc) == (0, 0) {
                    continue;
                }
                let coord = ((row + dr + h) % h, (col + dc + w) % w);
                if grid.get(coord).unwrap() == ALIVE {
                    sum += 1;
                }
            }
        }
        match sum {
            2 => grid.get((row, col)).unwrap(),
            3 => ALIVE,
            _ => DEAD,
        }
    })
    .unwrap()
}

fn grid_from(height: usize, width: usize, cells: &[bool]) -> Grid {
    Grid::from_fn(height, width, |row, col| State::from(cells[row * width + col])).unwrap()
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..150).prop_flat_map(|(height, width)| {
        vec(any::<bool>(), height * width).prop_map(move |cells| grid_from(height, width, &cells))
    })
}

fn arb_grid_pair() -> impl Strategy<Value = (Grid, Grid)> {
    (1usize..8, 1usize..100).prop_flat_map(|(height, width)| {
        (
            vec(any::<bool>(), height * width),
            vec(any::<bool>(), height * width),
        )
            .prop_map(move |(a, b)| (grid_from(height, width, &a), grid_from(height, width, &b)))
    })
}

fn backends() -> Vec<Box<dyn TransitionBackend>> {
    vec![
        Box::new(Scalar),
        Box::new(Vectorized),
        Box::new(Parallel::new(Some(2)).unwrap()),
    ]
}

proptest! {
    #[test]
    fn scalar_matches_reference(grid in arb_grid()) {
        prop_assert_eq!(Scalar.step(&grid), reference(&grid));
    }

    #[test]
    fn vectorized_matches_scalar(grid in arb_grid()) {
        prop_assert_eq!(Vectorized.step(&grid), Scalar.step(&grid));
    }

    #[test]
    fn parallel_matches_scalar(grid in arb_grid()) {
        let parallel = Parallel::new(Some(3)).unwrap();
        prop_assert_eq!(parallel.step(&grid), Scalar.step(&grid));
    }

    #[test]
    fn compare_is_reflexive_and_symmetric((a, b) in arb_grid_pair()) {
        for backend in backends() {
            prop_assert!(backend.compare(&a, &a).unwrap());
            prop_assert_eq!(backend.compare(&a, &b).unwrap(), backend.compare(&b, &a).unwrap());
            prop_assert_eq!(backend.compare(&a, &b).unwrap(), a == b);
        }
    }
}

#[test]
fn survival_and_birth() {
    // A dead cell with 3 neighbors is born, a live cell with 2 survives,
    // a live cell with 4 dies.
    let cases: &[(&[(isize, isize)], (isize, isize), State)] = &[
        (&[(0, 0), (0, 1), (0, 2)], (1, 1), ALIVE),
        (&[(0, 0), (0, 1), (1, 1)], (1, 1), ALIVE),
        (&[(0, 0), (1, 1)], (1, 1), DEAD),
        (&[(0, 0), (0, 1), (0, 2), (2, 0), (1, 1)], (1, 1), DEAD),
        (&[(0, 0), (0, 1)], (1, 1), DEAD),
    ];
    for &(alive, cell, expected) in cases {
        let mut grid = Grid::new(6, 6).unwrap();
        for &coord in alive {
            grid.set(coord, ALIVE).unwrap();
        }
        for backend in backends() {
            assert_eq!(backend.step(&grid).get(cell).unwrap(), expected);
        }
    }
}

#[test]
fn full_neighborhood_dies() {
    // On a 3×3 torus every cell is a neighbor of every other one.
    let full = Grid::from_fn(3, 3, |_, _| ALIVE).unwrap();
    for backend in backends() {
        assert_eq!(backend.step(&full).population(), 0);
    }
}

#[test]
fn compare_finds_a_single_difference() {
    let a = Grid::new(3, 130).unwrap();
    let mut b = a.clone();
    b.set((2, 129), ALIVE).unwrap();
    for backend in backends() {
        assert!(!backend.compare(&a, &b).unwrap());
    }
}
