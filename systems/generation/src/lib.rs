#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure maze generation system.
//!
//! Builds a perfect maze by carving a randomised spanning tree over the
//! odd-coordinate sub-lattice of an all-wall grid, then marks the spawn and
//! exit on two distinct dead ends and scatters a bounded number of items over
//! the remaining floor. Every step draws from a caller-supplied random source
//! so a seed fully determines the resulting [`Grid`].

use maze_explorer_core::{
    Cell, CellCoord, Direction, Grid, DEFAULT_MAX_ITEMS, DEFAULT_MAZE_COLUMNS, DEFAULT_MAZE_ROWS,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Smallest legal grid edge: a single open cell wrapped in walls.
const MIN_EDGE: u32 = 3;

/// Cell the carving walk starts from.
const CARVE_ORIGIN: CellCoord = CellCoord::new(1, 1);

/// Configuration parameters required to construct the generation system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    columns: u32,
    rows: u32,
    max_items: usize,
}

impl Config {
    /// Creates a new configuration. Dimensions are normalised at generation time.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, max_items: usize) -> Self {
        Self {
            columns,
            rows,
            max_items,
        }
    }

    /// Requested number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Requested number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Upper bound on the number of items placed.
    #[must_use]
    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    /// Returns the configuration with dimensions normalised to odd values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (columns, rows) = normalize_dimensions(self.columns, self.rows);
        Self {
            columns,
            rows,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAZE_COLUMNS, DEFAULT_MAZE_ROWS, DEFAULT_MAX_ITEMS)
    }
}

/// Spawn and exit locations chosen for a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Cell marked [`Cell::Spawn`].
    pub spawn: CellCoord,
    /// Cell marked [`Cell::Exit`].
    pub exit: CellCoord,
    /// Whether too few dead ends forced the fixed corner positions.
    pub fallback: bool,
}

/// Pure system that turns a configuration and a random source into a maze.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: Config,
}

impl Generator {
    /// Creates a new generator using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the generator was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Generates a maze drawing every random decision from `rng`.
    pub fn generate<R>(&self, rng: &mut R) -> Grid
    where
        R: Rng + ?Sized,
    {
        let normalized = self.config.normalized();
        if normalized != self.config {
            tracing::info!(
                requested_columns = self.config.columns(),
                requested_rows = self.config.rows(),
                columns = normalized.columns(),
                rows = normalized.rows(),
                "adjusted maze dimensions to odd values"
            );
        }

        generate(
            normalized.columns(),
            normalized.rows(),
            normalized.max_items(),
            rng,
        )
    }

    /// Generates a maze from a ChaCha stream seeded with `seed`.
    #[must_use]
    pub fn generate_seeded(&self, seed: u64) -> Grid {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}

/// Raises each dimension to the next odd value of at least three.
#[must_use]
pub fn normalize_dimensions(columns: u32, rows: u32) -> (u32, u32) {
    (normalize_edge(columns), normalize_edge(rows))
}

fn normalize_edge(edge: u32) -> u32 {
    let edge = edge.max(MIN_EDGE);
    if edge % 2 == 0 {
        edge.saturating_add(1)
    } else {
        edge
    }
}

/// Composes the generation pipeline: wall fill, carving, endpoint and item placement.
pub fn generate<R>(columns: u32, rows: u32, max_items: usize, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let (columns, rows) = normalize_dimensions(columns, rows);
    let mut grid = Grid::filled(columns, rows, Cell::Wall);

    carve(&mut grid, CARVE_ORIGIN, rng);
    let dead_ends = find_dead_ends(&grid);
    let endpoints = place_spawn_and_exit(&mut grid, &dead_ends, rng);
    let items = place_items(&mut grid, endpoints.spawn, endpoints.exit, rng, max_items);

    if endpoints.fallback {
        tracing::warn!(
            dead_ends = dead_ends.len(),
            "not enough dead ends for random endpoints, using fixed corners"
        );
    }
    tracing::debug!(
        columns,
        rows,
        dead_ends = dead_ends.len(),
        items,
        spawn = %endpoints.spawn,
        exit = %endpoints.exit,
        "generated maze"
    );

    grid
}

/// Pending work for one cell of the depth-first walk.
#[derive(Debug)]
struct Frame {
    cell: CellCoord,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R>(cell: CellCoord, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Carves a randomised spanning tree over the odd-coordinate cells reachable
/// from `start`, opening the connector between each pair of linked cells.
///
/// The walk keeps its own frame stack, so the depth is bounded by memory
/// rather than the call stack. Each frame shuffles its four directions once on
/// entry, which consumes the random source in the same order a recursive
/// backtracker would.
pub fn carve<R>(grid: &mut Grid, start: CellCoord, rng: &mut R)
where
    R: Rng + ?Sized,
{
    if !is_interior(grid, start) {
        return;
    }

    grid.set(start, Cell::Empty);
    let mut stack = vec![Frame::enter(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.directions.get(frame.next).copied() else {
            let _ = stack.pop();
            continue;
        };
        frame.next += 1;
        let from = frame.cell;

        let Some(target) = grid.neighbor(from, direction, 2) else {
            continue;
        };
        if !is_interior(grid, target) || grid.cell(target) != Some(Cell::Wall) {
            continue;
        }

        if let Some(connector) = grid.neighbor(from, direction, 1) {
            grid.set(connector, Cell::Empty);
        }
        grid.set(target, Cell::Empty);
        stack.push(Frame::enter(target, rng));
    }
}

/// Finds every open interior cell with exactly one open interior neighbour,
/// in row-major order.
#[must_use]
pub fn find_dead_ends(grid: &Grid) -> Vec<CellCoord> {
    grid.iter()
        .filter(|(coord, cell)| cell.is_passable() && is_interior(grid, *coord))
        .filter(|(coord, _)| open_interior_neighbors(grid, *coord) == 1)
        .map(|(coord, _)| coord)
        .collect()
}

/// Marks two distinct dead ends as spawn and exit.
///
/// With fewer than two dead ends the spawn goes to `(1, 1)` and the exit to the
/// opposite interior corner. In a 3×3 maze both corners coincide and the exit
/// overwrites the spawn.
pub fn place_spawn_and_exit<R>(grid: &mut Grid, dead_ends: &[CellCoord], rng: &mut R) -> Endpoints
where
    R: Rng + ?Sized,
{
    let chosen: Vec<CellCoord> = if dead_ends.len() >= 2 {
        dead_ends.choose_multiple(rng, 2).copied().collect()
    } else {
        Vec::new()
    };

    let endpoints = match chosen.as_slice() {
        [spawn, exit] => Endpoints {
            spawn: *spawn,
            exit: *exit,
            fallback: false,
        },
        _ => Endpoints {
            spawn: CARVE_ORIGIN,
            exit: CellCoord::new(
                grid.columns().saturating_sub(2),
                grid.rows().saturating_sub(2),
            ),
            fallback: true,
        },
    };

    grid.set(endpoints.spawn, Cell::Spawn);
    grid.set(endpoints.exit, Cell::Exit);
    endpoints
}

/// Turns up to `max_items` randomly sampled floor cells into items, never
/// touching the spawn or exit. Returns the number of items placed.
pub fn place_items<R>(
    grid: &mut Grid,
    spawn: CellCoord,
    exit: CellCoord,
    rng: &mut R,
    max_items: usize,
) -> usize
where
    R: Rng + ?Sized,
{
    let candidates: Vec<CellCoord> = grid
        .iter()
        .filter(|(coord, cell)| {
            *cell == Cell::Empty && *coord != spawn && *coord != exit && is_interior(grid, *coord)
        })
        .map(|(coord, _)| coord)
        .collect();

    let amount = max_items.min(candidates.len());
    let chosen: Vec<CellCoord> = candidates.choose_multiple(rng, amount).copied().collect();
    for cell in &chosen {
        grid.set(*cell, Cell::Item);
    }
    chosen.len()
}

fn is_interior(grid: &Grid, cell: CellCoord) -> bool {
    cell.column() >= 1
        && cell.row() >= 1
        && cell.column() + 1 < grid.columns()
        && cell.row() + 1 < grid.rows()
}

fn open_interior_neighbors(grid: &Grid, cell: CellCoord) -> usize {
    Direction::ALL
        .iter()
        .filter_map(|direction| grid.neighbor(cell, *direction, 1))
        .filter(|neighbor| is_interior(grid, *neighbor))
        .filter(|neighbor| grid.cell(*neighbor).is_some_and(Cell::is_passable))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(lines: &[&str]) -> Grid {
        let rows = lines
            .iter()
            .map(|line| {
                line.chars()
                    .map(|code| Cell::from_code(code).expect("known cell code"))
                    .collect()
            })
            .collect();
        Grid::from_rows(rows).expect("rectangular grid")
    }

    #[test]
    fn normalize_increments_even_dimensions() {
        assert_eq!(normalize_dimensions(70, 20), (71, 21));
        assert_eq!(normalize_dimensions(71, 21), (71, 21));
        assert_eq!(normalize_dimensions(2, 4), (3, 5));
    }

    #[test]
    fn normalize_raises_tiny_dimensions_to_minimum() {
        assert_eq!(normalize_dimensions(0, 1), (3, 3));
    }

    #[test]
    fn config_normalized_preserves_item_cap() {
        let config = Config::new(10, 6, 4).normalized();
        assert_eq!(config, Config::new(11, 7, 4));
    }

    #[test]
    fn carve_opens_every_odd_cell() {
        let mut grid = Grid::filled(9, 7, Cell::Wall);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        carve(&mut grid, CARVE_ORIGIN, &mut rng);

        for row in (1..7).step_by(2) {
            for column in (1..9).step_by(2) {
                assert_eq!(
                    grid.cell(CellCoord::new(column, row)),
                    Some(Cell::Empty),
                    "odd cell ({column}, {row}) left uncarved"
                );
            }
        }
        for column in 0..9 {
            assert_eq!(grid.cell(CellCoord::new(column, 0)), Some(Cell::Wall));
            assert_eq!(grid.cell(CellCoord::new(column, 6)), Some(Cell::Wall));
        }
    }

    #[test]
    fn carve_ignores_border_start() {
        let mut grid = Grid::filled(5, 5, Cell::Wall);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        carve(&mut grid, CellCoord::new(0, 0), &mut rng);
        assert_eq!(grid.count(Cell::Wall), 25);
    }

    #[test]
    fn dead_ends_have_single_open_neighbor() {
        let grid = grid_from(&[
            "#####", //
            "#   #", //
            "# ###", //
            "#   #", //
            "#####",
        ]);

        assert_eq!(
            find_dead_ends(&grid),
            vec![CellCoord::new(3, 1), CellCoord::new(3, 3)]
        );
    }

    #[test]
    fn isolated_cell_is_not_a_dead_end() {
        let grid = grid_from(&["###", "# #", "###"]);
        assert!(find_dead_ends(&grid).is_empty());
    }

    #[test]
    fn spawn_and_exit_fall_back_to_corners() {
        let mut grid = grid_from(&[
            "#######", //
            "#     #", //
            "#######",
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let endpoints = place_spawn_and_exit(&mut grid, &[CellCoord::new(5, 1)], &mut rng);

        assert!(endpoints.fallback);
        assert_eq!(endpoints.spawn, CellCoord::new(1, 1));
        assert_eq!(endpoints.exit, CellCoord::new(5, 1));
        assert_eq!(grid.cell(CellCoord::new(1, 1)), Some(Cell::Spawn));
        assert_eq!(grid.cell(CellCoord::new(5, 1)), Some(Cell::Exit));
    }

    #[test]
    fn spawn_and_exit_use_distinct_dead_ends() {
        let dead_ends = [
            CellCoord::new(1, 1),
            CellCoord::new(3, 1),
            CellCoord::new(1, 3),
        ];
        for seed in 0..32 {
            let mut grid = Grid::filled(5, 5, Cell::Empty);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let endpoints = place_spawn_and_exit(&mut grid, &dead_ends, &mut rng);

            assert!(!endpoints.fallback);
            assert_ne!(endpoints.spawn, endpoints.exit);
            assert!(dead_ends.contains(&endpoints.spawn));
            assert!(dead_ends.contains(&endpoints.exit));
        }
    }

    #[test]
    fn items_capped_by_available_floor() {
        let mut grid = grid_from(&[
            "#####", //
            "#S  #", //
            "#####",
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let placed = place_items(
            &mut grid,
            CellCoord::new(1, 1),
            CellCoord::new(3, 1),
            &mut rng,
            10,
        );

        assert_eq!(placed, 1);
        assert_eq!(grid.cell(CellCoord::new(2, 1)), Some(Cell::Item));
        assert_eq!(grid.cell(CellCoord::new(3, 1)), Some(Cell::Empty));
    }

    #[test]
    fn items_skip_when_no_floor_remains() {
        let mut grid = grid_from(&["###", "#S#", "###"]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let placed = place_items(
            &mut grid,
            CellCoord::new(1, 1),
            CellCoord::new(1, 1),
            &mut rng,
            10,
        );
        assert_eq!(placed, 0);
        assert_eq!(grid.count(Cell::Item), 0);
    }

    #[test]
    fn smallest_maze_falls_back_without_panicking() {
        let grid = Generator::new(Config::new(3, 3, 10)).generate_seeded(0);

        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cell(CellCoord::new(1, 1)), Some(Cell::Exit));
        assert_eq!(grid.count(Cell::Item), 0);
    }
}
