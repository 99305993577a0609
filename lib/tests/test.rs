use torus_life_lib::{Backend, Config, Error, Grid, ALIVE, DEAD};

type Result<T = ()> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn default() -> Result {
    let world = Config::default().world()?;
    assert_eq!((world.height(), world.width()), (16, 16));
    assert_eq!(world.generation(), 0);
    assert_eq!(world.population(), 0);
    assert_eq!(world.backend_name(), "scalar");
    Ok(())
}

#[test]
fn non_positive() {
    assert!(matches!(
        Config::new(0, 5).world(),
        Err(Error::NonPositiveError)
    ));
    assert!(matches!(
        Config::new(5, -1).world(),
        Err(Error::NonPositiveError)
    ));
    assert!(matches!(Grid::new(3, 0), Err(Error::NonPositiveError)));
}

#[test]
fn flat_and_2d_accessors_agree() -> Result {
    let mut world = Config::new(5, 7).world()?;
    world.set_cell(ALIVE, 2, 3)?;
    assert_eq!(world.get_cell_at(2 * 7 + 3)?, ALIVE);

    world.set_cell_at(ALIVE, 4 * 7 + 6)?;
    assert_eq!(world.get_cell(4, 6)?, ALIVE);

    world.set_cell(DEAD, 2, 3)?;
    assert_eq!(world.get_cell_at(17)?, DEAD);
    assert_eq!(world.alive_cells().collect::<Vec<_>>(), vec![(4, 6)]);
    Ok(())
}

#[test]
fn out_of_range() -> Result {
    let mut world = Config::new(4, 6).world()?;
    world.set_cell(ALIVE, 1, 1)?;

    assert!(matches!(
        world.get_cell(-1, 0),
        Err(Error::CoordOutOfRange((-1, 0)))
    ));
    assert!(matches!(
        world.get_cell(4, 0),
        Err(Error::CoordOutOfRange((4, 0)))
    ));
    assert!(matches!(
        world.get_cell(0, 6),
        Err(Error::CoordOutOfRange((0, 6)))
    ));
    assert!(matches!(
        world.get_cell_at(24),
        Err(Error::IndexOutOfRange(24))
    ));

    let error = world.set_cell(ALIVE, 0, -1).unwrap_err();
    assert!(error.is_out_of_range());
    let error = world.set_cell_at(ALIVE, 100).unwrap_err();
    assert!(error.is_out_of_range());
    assert_eq!(world.alive_cells().collect::<Vec<_>>(), vec![(1, 1)]);
    Ok(())
}

#[test]
fn generation_increases_by_one() -> Result {
    let mut world = Config::new(8, 8).world()?;
    world.add_glider(1, 1);
    for generation in 1..=5 {
        world.evolve();
        assert_eq!(world.generation(), generation);
    }
    Ok(())
}

#[test]
fn wrap_around_birth() -> Result {
    // The three cells are all neighbors of (0, 0) across the edges.
    let mut world = Config::new(5, 5).world()?;
    world.set_cell(ALIVE, 4, 4)?;
    world.set_cell(ALIVE, 4, 0)?;
    world.set_cell(ALIVE, 0, 4)?;
    world.evolve();
    assert_eq!(world.get_cell(0, 0)?, ALIVE);
    Ok(())
}

#[test]
fn blinker_across_the_edge() -> Result {
    let mut world = Config::new(5, 5).world()?;
    world.set_cell(ALIVE, 4, 2)?;
    world.set_cell(ALIVE, 0, 2)?;
    world.set_cell(ALIVE, 1, 2)?;
    world.evolve();
    assert_eq!(
        world.alive_cells().collect::<Vec<_>>(),
        vec![(0, 1), (0, 2), (0, 3)]
    );
    Ok(())
}

#[test]
fn backends_agree_over_many_generations() -> Result {
    // Widths around a word boundary of the vectorized backend.
    for &(height, width) in &[(20, 63), (20, 64), (17, 65), (12, 130)] {
        let mut worlds = Vec::new();
        for &backend in &[Backend::Scalar, Backend::Vectorized, Backend::Parallel] {
            let mut world = Config::new(height, width)
                .set_backend(backend)
                .set_threads(2)
                .world()?;
            world.add_glider(0, width - 3);
            world.add_methuselah(height / 2, width / 2);
            world.add_beacon(height - 4, 0);
            worlds.push(world);
        }
        for _ in 0..100 {
            for world in worlds.iter_mut() {
                world.evolve();
            }
            assert_eq!(worlds[0].grid(), worlds[1].grid());
            assert_eq!(worlds[0].grid(), worlds[2].grid());
        }
    }
    Ok(())
}

#[test]
fn backend_unavailable() -> Result {
    let config = Config::new(8, 8)
        .set_backend(Backend::Parallel)
        .set_threads(0);
    assert!(matches!(
        config.world(),
        Err(Error::BackendUnavailable(_))
    ));

    let world = config.set_fallback_to_scalar(true).world()?;
    assert_eq!(world.backend_name(), "scalar");
    Ok(())
}

#[test]
fn parallel_backend() -> Result {
    let world = Config::new(8, 8)
        .set_backend(Backend::Parallel)
        .set_threads(2)
        .world()?;
    assert_eq!(world.backend_name(), "parallel");
    Ok(())
}

#[test]
fn dimension_mismatch() -> Result {
    let world = Config::new(3, 3).world()?;
    let a = Grid::new(2, 2)?;
    let b = Grid::new(3, 2)?;
    assert!(matches!(
        world.grids_equal(&a, &b),
        Err(Error::DimensionMismatch((2, 2), (3, 2)))
    ));
    assert!(world.grids_equal(&a, &a.clone())?);
    Ok(())
}

#[test]
fn backend_names() {
    assert_eq!("vectorized".parse::<Backend>(), Ok(Backend::Vectorized));
    assert_eq!("p".parse::<Backend>(), Ok(Backend::Parallel));
    assert!("gpu".parse::<Backend>().is_err());
    assert_eq!(Backend::Scalar.to_string(), "scalar");
}

#[test]
fn display() -> Result {
    let mut world = Config::new(3, 4).world()?;
    world.set_cell(ALIVE, 1, 1)?;
    world.set_cell(ALIVE, 2, 3)?;
    assert_eq!(world.to_string(), "....\n.o..\n...o\n");
    Ok(())
}

#[test]
fn too_large() -> Result {
    assert!(matches!(
        Config::new(isize::MAX, 2).world(),
        Err(Error::TooLarge(_, 2))
    ));
    assert!(matches!(
        Grid::new(usize::MAX, usize::MAX),
        Err(Error::TooLarge(_, _))
    ));
    assert_eq!(Grid::cell_count(usize::MAX, 2), None);
    assert_eq!(Grid::cell_count(3, 5), Some(15));
    Ok(())
}
