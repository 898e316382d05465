#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze explorer.
//!
//! This crate defines the vocabulary that connects the maze generator, the
//! authoritative exploration world, and the presentation adapters. The
//! generator produces a [`Grid`], the world takes ownership of it and answers
//! [`Direction`] requests with a [`MoveOutcome`], and adapters consume the
//! [`RenderState`] snapshot without ever touching the grid directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of grid columns used when callers do not specify a width.
pub const DEFAULT_MAZE_COLUMNS: u32 = 71;

/// Number of grid rows used when callers do not specify a height.
pub const DEFAULT_MAZE_ROWS: u32 = 21;

/// Upper bound on the number of collectible items placed in a maze.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Semantic content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Cell {
    /// Impassable rock.
    Wall,
    /// Open floor.
    Empty,
    /// Cell the player starts on.
    Spawn,
    /// Cell that ends the session once reached.
    Exit,
    /// Collectible that awards a point when stepped on.
    Item,
}

impl Cell {
    /// Every cell kind, in codec order.
    pub const ALL: [Cell; 5] = [Cell::Wall, Cell::Empty, Cell::Spawn, Cell::Exit, Cell::Item];

    /// Single-character code used by the persisted map format.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Empty => ' ',
            Self::Spawn => 'S',
            Self::Exit => 'E',
            Self::Item => '*',
        }
    }

    /// Decodes a persisted single-character code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '#' => Some(Self::Wall),
            ' ' => Some(Self::Empty),
            'S' => Some(Self::Spawn),
            'E' => Some(Self::Exit),
            '*' => Some(Self::Item),
            _ => None,
        }
    }

    /// Reports whether the player may stand on the cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

impl TryFrom<char> for Cell {
    type Error = CellCodeError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Cell::from_code(code).ok_or(CellCodeError(code))
    }
}

/// Raised when a character does not name any [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unknown cell code {0:?}")]
pub struct CellCodeError(pub char);

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step expressed as `(column delta, row delta)`.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by moving `steps` cells toward `direction`, if it does not
    /// underflow the coordinate space. Upper bounds are the grid's concern.
    #[must_use]
    pub fn offset(self, direction: Direction, steps: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = i64::from(self.column) + dx * i64::from(steps);
        let row = i64::from(self.row) + dy * i64::from(steps);
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        Some(CellCoord::new(column, row))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Progress of an exploration session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// The player is still looking for the exit.
    #[default]
    Exploring,
    /// The player reached the exit. Terminal.
    Won,
}

/// Result of a single movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The session already ended; nothing changed.
    Ignored,
    /// The target cell is a wall or lies outside the grid; nothing changed.
    Blocked,
    /// The player stepped onto an open cell.
    Moved,
    /// The player stepped onto an item and collected it.
    Collected,
    /// The player stepped onto the exit.
    Won,
}

impl MoveOutcome {
    /// Reports whether the player's position changed.
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved | Self::Collected | Self::Won)
    }
}

/// Dimensions of the visible window measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportSize {
    columns: u32,
    rows: u32,
}

impl ViewportSize {
    /// Window used when callers do not specify one.
    pub const DEFAULT: ViewportSize = ViewportSize::new(19, 19);

    /// Creates a viewport size. Zero dimensions are raised to one cell.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        let columns = if columns == 0 { 1 } else { columns };
        let rows = if rows == 0 { 1 } else { rows };
        Self { columns, rows }
    }

    /// Number of visible columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of visible rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors raised when assembling a [`Grid`] from nested rows.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// No rows, or a first row without cells.
    #[error("grid contains no cells")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The grid is too large to index with 32-bit coordinates.
    #[error("grid dimensions exceed the supported coordinate range")]
    TooLarge,
}

/// Largest row count whose `columns`-wide rows fit in one allocation index.
fn max_rows(columns: u32) -> u32 {
    let width = usize::try_from(columns).unwrap_or(usize::MAX).max(1);
    u32::try_from(usize::MAX / width).unwrap_or(u32::MAX)
}

/// Rectangular maze stored densely in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell holds `cell`.
    ///
    /// `rows` saturates at the largest count whose cells are addressable, so
    /// the reported dimensions always match the stored cells.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, cell: Cell) -> Self {
        let rows = rows.min(max_rows(columns));
        let width = usize::try_from(columns).unwrap_or(usize::MAX);
        let capacity = width.saturating_mul(usize::try_from(rows).unwrap_or(usize::MAX));
        Self {
            columns,
            rows,
            cells: vec![cell; capacity],
        }
    }

    /// Assembles a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(GridError::Empty);
        }

        let row_count = u32::try_from(rows.len()).map_err(|_| GridError::TooLarge)?;
        let columns = u32::try_from(expected).map_err(|_| GridError::TooLarge)?;

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: index,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            columns,
            rows: row_count,
            cells,
        })
    }

    /// Copies the grid out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells.chunks(width).map(<[Cell]>::to_vec).collect()
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the content of the cell, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the cell. Coordinates outside the grid are ignored.
    pub fn set(&mut self, cell: CellCoord, content: Cell) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = content;
            }
        }
    }

    /// Neighbour `steps` cells away toward `direction`, if inside the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction, steps: u32) -> Option<CellCoord> {
        cell.offset(direction, steps)
            .filter(|candidate| self.contains(*candidate))
    }

    /// Number of cells holding `content`.
    #[must_use]
    pub fn count(&self, content: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == content).count()
    }

    /// First cell holding `content`, scanning rows top to bottom.
    #[must_use]
    pub fn find(&self, content: Cell) -> Option<CellCoord> {
        self.iter()
            .find(|(_, cell)| *cell == content)
            .map(|(coord, _)| coord)
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let width = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index % width, index / width), *cell)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let line: String = row.into_iter().map(Cell::code).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Read-only snapshot of everything a presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderState {
    /// Grid coordinate shown in the window's upper-left corner.
    pub origin: CellCoord,
    /// Number of visible columns, clipped to the grid.
    pub columns: u32,
    /// Number of visible rows, clipped to the grid.
    pub rows: u32,
    /// Visible cells in row-major order, `columns * rows` long.
    pub cells: Vec<Cell>,
    /// Player position relative to `origin`, if inside the window.
    pub player: Option<CellCoord>,
    /// Items collected so far.
    pub score: usize,
    /// Items present when the grid was loaded.
    pub total_items: usize,
    /// Current session phase.
    pub phase: Phase,
}

impl RenderState {
    /// Visible cell at window-relative coordinates.
    #[must_use]
    pub fn cell(&self, column: u32, row: u32) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let offset = u64::from(row) * u64::from(self.columns) + u64::from(column);
        let index = usize::try_from(offset).ok()?;
        self.cells.get(index).copied()
    }
}
