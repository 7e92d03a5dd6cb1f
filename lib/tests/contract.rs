use rand::{rngs::StdRng, SeedableRng};
use rlifegame_lib::{
    patterns::{random_soup, ACORN, BLINKER, BLOCK},
    Config, EngineKind, Life, Snapshot,
};
use std::error::Error;

fn world(
    engine: EngineKind,
    width: i32,
    height: i32,
) -> Result<Box<dyn Life + Send>, Box<dyn Error>> {
    Ok(Config::new(width, height).set_engine(engine).world()?)
}

#[test]
fn set_is_idempotent() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut once = world(engine, 12, 12)?;
        let mut twice = world(engine, 12, 12)?;
        ACORN.place(once.as_mut(), (3, 6));
        ACORN.place(twice.as_mut(), (3, 6));
        ACORN.place(twice.as_mut(), (3, 6));
        twice.set((0, 0), false);
        for _ in 0..30 {
            assert_eq!(once.snapshot(), twice.snapshot(), "{}", engine);
            once.step();
            twice.step();
        }
    }
    Ok(())
}

#[test]
fn out_of_bounds_is_clipped() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut life = world(engine, 7, 5)?;
        for coord in [(-1, 0), (0, -1), (7, 0), (0, 5), (-100, 100), (i32::MAX, 2)] {
            life.set(coord, true);
            assert!(!life.get(coord), "{} at {:?}", engine, coord);
        }
        assert_eq!(life.population(), 0, "{}", engine);
        life.step();
        assert_eq!(life.population(), 0, "{}", engine);
    }
    Ok(())
}

#[test]
fn clear_kills_everything() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut life = world(engine, 16, 16)?;
        let mut rng = StdRng::seed_from_u64(7);
        random_soup(life.as_mut(), &mut rng, 0.5);
        life.step();
        life.clear();
        assert_eq!(life.population(), 0, "{}", engine);
        life.step();
        assert_eq!(life.population(), 0, "{}", engine);

        // Still consistent after a clear.
        BLINKER.place(life.as_mut(), (4, 4));
        life.step();
        assert_eq!(life.live_cells(), vec![(3, 3), (4, 3), (5, 3)], "{}", engine);
    }
    Ok(())
}

#[test]
fn render_matches_get() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut life = world(engine, 23, 17)?;
        let mut rng = StdRng::seed_from_u64(23);
        random_soup(life.as_mut(), &mut rng, 0.4);
        let mut snapshot = Snapshot::new(23, 17);
        for _ in 0..10 {
            life.step();
            life.render(&mut snapshot);
            for y in 0..17 {
                for x in 0..23 {
                    assert_eq!(snapshot.get((x, y)), life.get((x, y)), "{}", engine);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn blinker_oscillates() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut life = world(engine, 5, 5)?;
        BLINKER.place(life.as_mut(), (2, 3));
        let vertical = life.snapshot();
        life.step();
        let horizontal = life.snapshot();
        assert_ne!(vertical, horizontal, "{}", engine);
        assert_eq!(
            horizontal.plaintext(),
            ".....\n.....\n.ooo.\n.....\n.....\n",
            "{}",
            engine
        );
        for _ in 0..10 {
            life.step();
            assert_eq!(life.snapshot(), vertical, "{}", engine);
            life.step();
            assert_eq!(life.snapshot(), horizontal, "{}", engine);
        }
    }
    Ok(())
}

#[test]
fn block_is_still() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut life = world(engine, 6, 6)?;
        BLOCK.place(life.as_mut(), (0, 5));
        BLOCK.place(life.as_mut(), (4, 1));
        let before = life.snapshot();
        life.step_by(20);
        assert_eq!(life.snapshot(), before, "{}", engine);
    }
    Ok(())
}

#[test]
fn only_neighbors_of_changes_change() -> Result<(), Box<dyn Error>> {
    for engine in EngineKind::ALL {
        let mut life = world(engine, 30, 30)?;
        let mut rng = StdRng::seed_from_u64(42);
        random_soup(life.as_mut(), &mut rng, 0.3);
        let mut prev = life.snapshot();
        life.step();
        let mut curr = life.snapshot();
        for _ in 0..50 {
            life.step();
            let next = life.snapshot();
            let changed = prev.diff(&curr);
            for (x, y) in curr.diff(&next) {
                assert!(
                    changed
                        .iter()
                        .any(|&(cx, cy)| (cx - x).abs() <= 1 && (cy - y).abs() <= 1),
                    "{}: ({}, {}) changed without a changed neighbor",
                    engine,
                    x,
                    y
                );
            }
            prev = curr;
            curr = next;
        }
    }
    Ok(())
}
