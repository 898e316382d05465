use maze_explorer_core::{Cell, CellCoord, Direction, Grid, MoveOutcome, Phase, ViewportSize};
use maze_explorer_system_generation::{Config, Generator};
use maze_explorer_world::{query, World};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn assert_viewport_bounds(world: &World) {
    let grid = query::grid(world);
    let viewport = query::viewport(world);
    let size = viewport.size();

    assert!(
        viewport.offset_column() <= grid.columns().saturating_sub(size.columns()),
        "column offset {} escapes grid of {} columns",
        viewport.offset_column(),
        grid.columns()
    );
    assert!(
        viewport.offset_row() <= grid.rows().saturating_sub(size.rows()),
        "row offset {} escapes grid of {} rows",
        viewport.offset_row(),
        grid.rows()
    );
}

fn random_walk(world: &mut World, seed: u64, steps: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..steps {
        let direction = *Direction::ALL.choose(&mut rng).expect("four directions");
        let before = query::player(world);
        let target = query::grid(world).neighbor(before.position(), direction, 1);
        let target_cell = target.and_then(|target| query::grid(world).cell(target));

        let outcome = world.move_player(direction);
        let after = query::player(world);

        match outcome {
            MoveOutcome::Blocked => {
                assert!(target_cell.map_or(true, |cell| cell == Cell::Wall));
                assert_eq!(after, before, "blocked move changed state");
            }
            MoveOutcome::Ignored => {
                assert_eq!(before.phase(), Phase::Won);
                assert_eq!(after, before, "ignored move changed state");
            }
            MoveOutcome::Collected => {
                assert_eq!(target_cell, Some(Cell::Item));
                assert_eq!(after.score(), before.score() + 1);
            }
            MoveOutcome::Won => {
                assert_eq!(target_cell, Some(Cell::Exit));
                assert_eq!(after.phase(), Phase::Won);
            }
            MoveOutcome::Moved => {
                assert_eq!(after.score(), before.score());
                assert_eq!(after.phase(), Phase::Exploring);
            }
        }
        if outcome.moved() {
            assert_eq!(Some(after.position()), target);
        }

        assert_viewport_bounds(world);
        assert_ne!(
            query::grid(world).cell(after.position()),
            Some(Cell::Wall),
            "player stands inside a wall"
        );
    }
}

#[test]
fn random_walks_respect_movement_rules() {
    for seed in 0..6 {
        let grid = Generator::new(Config::new(31, 21, 25)).generate_seeded(seed);
        let mut world = World::with_viewport(grid, ViewportSize::new(11, 9));
        assert_viewport_bounds(&world);

        random_walk(&mut world, seed + 100, 4_000);

        let player = query::player(&world);
        assert!(player.score() <= player.total_items());
        assert_eq!(
            query::grid(&world).count(Cell::Item) + player.score(),
            player.total_items(),
            "collected items must disappear from the grid"
        );
    }
}

#[test]
fn load_counts_items_and_finds_spawn() {
    let grid = Generator::new(Config::new(21, 11, 7)).generate_seeded(8);
    let spawn = grid.find(Cell::Spawn).expect("spawn placed");

    let world = World::new(grid);
    let player = query::player(&world);

    assert_eq!(player.position(), spawn);
    assert_eq!(player.total_items(), 7);
    assert_eq!(player.score(), 0);
    assert_eq!(query::phase(&world), Phase::Exploring);
}

#[test]
fn smallest_maze_starts_on_the_shared_corner() {
    let grid = Generator::new(Config::new(3, 3, 10)).generate_seeded(3);
    assert_eq!(grid.count(Cell::Spawn), 0);
    assert_eq!(grid.find(Cell::Exit), Some(CellCoord::new(1, 1)));

    let mut world = World::new(grid.clone());
    let player = query::player(&world);
    assert_eq!(player.position(), CellCoord::new(1, 1));
    assert_eq!(player.total_items(), 0);
    assert_eq!(query::phase(&world), Phase::Exploring);

    for direction in Direction::ALL {
        assert_eq!(world.move_player(direction), MoveOutcome::Blocked);
    }
    assert_eq!(query::player(&world).position(), CellCoord::new(1, 1));
    assert_eq!(query::player(&world).score(), 0);
    assert_eq!(query::phase(&world), Phase::Exploring);
    assert_eq!(query::grid(&world), &grid);
}

/// Shortest route from `from` to `to` through passable cells.
fn route(grid: &Grid, from: CellCoord, to: CellCoord) -> Vec<Direction> {
    use std::collections::{HashMap, VecDeque};

    let mut came_from: HashMap<CellCoord, (CellCoord, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    while let Some(cell) = queue.pop_front() {
        if cell == to {
            break;
        }
        for direction in Direction::ALL {
            let Some(next) = grid.neighbor(cell, direction, 1) else {
                continue;
            };
            if next != from
                && grid.cell(next).is_some_and(Cell::is_passable)
                && !came_from.contains_key(&next)
            {
                let _ = came_from.insert(next, (cell, direction));
                queue.push_back(next);
            }
        }
    }

    let mut steps = Vec::new();
    let mut cursor = to;
    while cursor != from {
        let (previous, direction) = came_from[&cursor];
        steps.push(direction);
        cursor = previous;
    }
    steps.reverse();
    steps
}

#[test]
fn five_by_five_scenario() {
    let grid = Generator::new(Config::new(5, 5, 10)).generate_seeded(2024);
    let spawn = grid.find(Cell::Spawn).expect("spawn placed");
    let exit = grid.find(Cell::Exit).expect("exit placed");
    assert_ne!(spawn, exit);
    assert_eq!(grid.count(Cell::Item), 5, "min(10, remaining floor)");

    let mut world = World::new(grid.clone());

    // Walk into the nearest wall and keep pushing.
    let wall = Direction::ALL
        .into_iter()
        .find(|&direction| {
            grid.neighbor(spawn, direction, 1)
                .and_then(|cell| grid.cell(cell))
                == Some(Cell::Wall)
        })
        .expect("a dead end has three walls");
    for _ in 0..3 {
        assert_eq!(world.move_player(wall), MoveOutcome::Blocked);
        assert_eq!(query::player(&world).position(), spawn);
    }

    let path = route(&grid, spawn, exit);
    let (last, leading) = path.split_last().expect("exit differs from spawn");
    for &direction in leading {
        assert_ne!(world.move_player(direction), MoveOutcome::Won);
        assert_eq!(query::phase(&world), Phase::Exploring);
    }
    assert_eq!(world.move_player(*last), MoveOutcome::Won);
    assert_eq!(query::player(&world).position(), exit);
    assert_eq!(query::player(&world).score(), leading.len());

    for direction in Direction::ALL {
        assert_eq!(world.move_player(direction), MoveOutcome::Ignored);
    }
}

#[test]
fn render_state_matches_grid_window() {
    let grid = Generator::new(Config::default()).generate_seeded(17);
    let world = World::new(grid);
    let state = query::render_state(&world);
    let viewport = query::viewport(&world);

    assert_eq!((state.columns, state.rows), (19, 19));
    assert_eq!(state.origin, viewport.origin());
    for row in 0..state.rows {
        for column in 0..state.columns {
            let coord = CellCoord::new(state.origin.column() + column, state.origin.row() + row);
            assert_eq!(state.cell(column, row), query::grid(&world).cell(coord));
        }
    }

    let player = state.player.expect("player visible");
    let position = query::player(&world).position();
    assert_eq!(
        CellCoord::new(
            state.origin.column() + player.column(),
            state.origin.row() + player.row()
        ),
        position
    );
}
