#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative exploration state for the maze explorer.
//!
//! The [`World`] owns the loaded [`Grid`] together with the player and the
//! scrolling viewport. Adapters drive it exclusively through
//! [`World::move_player`] and observe it through the [`query`] module.

use maze_explorer_core::{Cell, CellCoord, Direction, Grid, MoveOutcome, Phase, ViewportSize};

/// Where the player starts when the grid carries no spawn cell.
const SPAWN_FALLBACK: CellCoord = CellCoord::new(1, 1);

/// Player progress within the current grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    position: CellCoord,
    score: usize,
    total_items: usize,
    phase: Phase,
}

impl Player {
    fn spawn_on(grid: &Grid) -> Self {
        Self {
            position: grid.find(Cell::Spawn).unwrap_or(SPAWN_FALLBACK),
            score: 0,
            total_items: grid.count(Cell::Item),
            phase: Phase::Exploring,
        }
    }

    /// Cell the player currently stands on.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.position
    }

    /// Items collected so far.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Items present when the grid was loaded. Never recomputed.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Current session phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

/// Visible window over the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    offset_column: u32,
    offset_row: u32,
    size: ViewportSize,
}

impl Viewport {
    /// Centres a window of `size` on `position`, pinned inside the grid.
    #[must_use]
    pub fn centered_on(position: CellCoord, size: ViewportSize, grid: &Grid) -> Self {
        Self {
            offset_column: clamp_offset(position.column(), size.columns(), grid.columns()),
            offset_row: clamp_offset(position.row(), size.rows(), grid.rows()),
            size,
        }
    }

    /// Leftmost visible column.
    #[must_use]
    pub const fn offset_column(&self) -> u32 {
        self.offset_column
    }

    /// Topmost visible row.
    #[must_use]
    pub const fn offset_row(&self) -> u32 {
        self.offset_row
    }

    /// Grid coordinate shown in the upper-left corner.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        CellCoord::new(self.offset_column, self.offset_row)
    }

    /// Fixed window dimensions.
    #[must_use]
    pub const fn size(&self) -> ViewportSize {
        self.size
    }
}

fn clamp_offset(position: u32, window: u32, extent: u32) -> u32 {
    position
        .saturating_sub(window / 2)
        .min(extent.saturating_sub(window))
}

/// Represents the authoritative state of one exploration session.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    player: Player,
    viewport: Viewport,
}

impl World {
    /// Loads `grid` behind the default viewport.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_viewport(grid, ViewportSize::DEFAULT)
    }

    /// Loads `grid`, placing the player on its spawn cell.
    #[must_use]
    pub fn with_viewport(grid: Grid, size: ViewportSize) -> Self {
        let player = Player::spawn_on(&grid);
        let viewport = Viewport::centered_on(player.position, size, &grid);
        tracing::debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            spawn = %player.position,
            total_items = player.total_items,
            "loaded grid"
        );
        Self {
            grid,
            player,
            viewport,
        }
    }

    /// Discards the current session and loads `grid`, keeping the viewport size.
    pub fn replace_grid(&mut self, grid: Grid) {
        *self = Self::with_viewport(grid, self.viewport.size);
    }

    /// Attempts to move the player one cell toward `direction`.
    ///
    /// Blocked and post-win requests leave every piece of state untouched.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.player.phase == Phase::Won {
            return MoveOutcome::Ignored;
        }

        let Some(target) = self.grid.neighbor(self.player.position, direction, 1) else {
            tracing::trace!(?direction, "move blocked by grid edge");
            return MoveOutcome::Blocked;
        };
        let Some(content) = self.grid.cell(target).filter(|cell| cell.is_passable()) else {
            tracing::trace!(?direction, %target, "move blocked by wall");
            return MoveOutcome::Blocked;
        };

        self.player.position = target;
        let outcome = match content {
            Cell::Item => {
                self.player.score += 1;
                self.grid.set(target, Cell::Empty);
                tracing::info!(
                    score = self.player.score,
                    total_items = self.player.total_items,
                    "collected item"
                );
                MoveOutcome::Collected
            }
            Cell::Exit => {
                self.player.phase = Phase::Won;
                tracing::info!(
                    score = self.player.score,
                    total_items = self.player.total_items,
                    "reached the exit"
                );
                MoveOutcome::Won
            }
            _ => MoveOutcome::Moved,
        };

        self.recenter_viewport();
        outcome
    }

    /// Re-centres the viewport on the player, pinned to the grid's extent.
    pub fn recenter_viewport(&mut self) {
        self.viewport = Viewport::centered_on(self.player.position, self.viewport.size, &self.grid);
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_explorer_core::{Cell, CellCoord, Grid, Phase, RenderState};

    use super::{Player, Viewport, World};

    /// Provides read-only access to the grid as currently mutated by play.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures the player's progress.
    #[must_use]
    pub fn player(world: &World) -> Player {
        world.player
    }

    /// Captures the visible window.
    #[must_use]
    pub fn viewport(world: &World) -> Viewport {
        world.viewport
    }

    /// Reports the session phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.player.phase
    }

    /// Captures everything a presentation layer needs to draw a frame.
    #[must_use]
    pub fn render_state(world: &World) -> RenderState {
        let origin = world.viewport.origin();
        let size = world.viewport.size;
        let columns = size
            .columns()
            .min(world.grid.columns().saturating_sub(origin.column()));
        let rows = size
            .rows()
            .min(world.grid.rows().saturating_sub(origin.row()));

        let mut cells = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for column in 0..columns {
                let coord = CellCoord::new(origin.column() + column, origin.row() + row);
                cells.push(world.grid.cell(coord).unwrap_or(Cell::Wall));
            }
        }

        let position = world.player.position;
        let player = (position.column() >= origin.column()
            && position.row() >= origin.row()
            && position.column() - origin.column() < columns
            && position.row() - origin.row() < rows)
            .then(|| {
                CellCoord::new(
                    position.column() - origin.column(),
                    position.row() - origin.row(),
                )
            });

        RenderState {
            origin,
            columns,
            rows,
            cells,
            player,
            score: world.player.score,
            total_items: world.player.total_items,
            phase: world.player.phase,
        }
    }
}
