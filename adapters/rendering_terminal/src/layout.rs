//! Placement of the bordered window and status lines on the terminal.

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Rows and columns kept free around the window for status lines.
pub const STATUS_RESERVE: u16 = 5;

/// Screen coordinates of the bordered map window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Column of the window's left border.
    pub x: u16,
    /// Row of the window's top border.
    pub y: u16,
    /// Window width including both borders.
    pub width: u16,
    /// Window height including both borders.
    pub height: u16,
}

impl Layout {
    /// Centres a window for `columns` by `rows` cells inside a terminal of
    /// `terminal_columns` by `terminal_rows`.
    ///
    /// Returns `None` when the terminal is smaller than [`minimum_size`].
    #[must_use]
    pub fn compute(
        columns: u32,
        rows: u32,
        terminal_columns: u16,
        terminal_rows: u16,
    ) -> Option<Self> {
        let (min_columns, min_rows) = minimum_size(columns, rows)?;
        if terminal_columns < min_columns || terminal_rows < min_rows {
            return None;
        }

        let width = min_columns - STATUS_RESERVE;
        let height = min_rows - STATUS_RESERVE;
        Some(Self {
            x: (terminal_columns - width) / 2,
            y: (terminal_rows - (height + STATUS_RESERVE)) / 2,
            width,
            height,
        })
    }

    /// Screen position of a window-relative cell.
    #[must_use]
    pub const fn cell_origin(&self, column: u16, row: u16) -> (u16, u16) {
        (self.x + 1 + column * CELL_WIDTH, self.y + 1 + row)
    }

    /// Screen row of the `line`-th status line below the window.
    #[must_use]
    pub const fn status_row(&self, line: u16) -> u16 {
        self.y + self.height + 1 + line
    }
}

/// Smallest terminal, as `(columns, rows)`, able to show the window and its status lines.
///
/// Returns `None` if the window cannot be addressed with terminal coordinates.
#[must_use]
pub fn minimum_size(columns: u32, rows: u32) -> Option<(u16, u16)> {
    let width = u16::try_from(columns)
        .ok()?
        .checked_mul(CELL_WIDTH)?
        .checked_add(2 + STATUS_RESERVE)?;
    let height = u16::try_from(rows).ok()?.checked_add(2 + STATUS_RESERVE)?;
    Some((width, height))
}
