#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for maze explorer adapters.

use anyhow::Result as AnyResult;
use maze_explorer_core::{Cell, CellCoord, Direction, Phase, RenderState, ViewportSize};
use std::{error::Error, fmt, time::Duration};

/// Semantic symbol occupying one slot of the visible window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Glyph {
    /// Slot outside the grid, shown when the grid is smaller than the window.
    #[default]
    Void,
    /// Impassable wall.
    Wall,
    /// Open floor.
    Floor,
    /// Cell the player started on.
    Spawn,
    /// The maze exit.
    Exit,
    /// Collectible item.
    Item,
    /// The player character.
    Player,
}

impl Glyph {
    /// Maps a grid cell to the glyph that represents it.
    #[must_use]
    pub const fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Wall => Self::Wall,
            Cell::Empty => Self::Floor,
            Cell::Spawn => Self::Spawn,
            Cell::Exit => Self::Exit,
            Cell::Item => Self::Item,
        }
    }

    /// Character used by text-based backends.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Void | Self::Floor => ' ',
            Self::Wall => '#',
            Self::Spawn => 'S',
            Self::Exit => 'E',
            Self::Item => '*',
            Self::Player => '@',
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the adapter detected a quit request. The backend stops after this frame.
    pub quit: bool,
}

/// Scene description of the visible window and the status lines beneath it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Window width in cells.
    pub columns: u32,
    /// Window height in cells.
    pub rows: u32,
    /// Glyphs in row-major order, `columns * rows` long, player already overlaid.
    pub glyphs: Vec<Glyph>,
    /// Player position relative to the window, if visible.
    pub player: Option<CellCoord>,
    /// Items collected so far.
    pub score: usize,
    /// Items present when the maze was loaded.
    pub total_items: usize,
    /// Current session phase.
    pub phase: Phase,
}

impl Scene {
    /// Creates an empty scene sized to the viewport.
    #[must_use]
    pub fn new(viewport: ViewportSize) -> Self {
        let slots = viewport.columns() as usize * viewport.rows() as usize;
        Self {
            columns: viewport.columns(),
            rows: viewport.rows(),
            glyphs: vec![Glyph::Void; slots],
            player: None,
            score: 0,
            total_items: 0,
            phase: Phase::Exploring,
        }
    }

    /// Builds a scene sized to `viewport` from the engine's render state.
    pub fn from_render_state(
        state: &RenderState,
        viewport: ViewportSize,
    ) -> Result<Self, RenderingError> {
        let mut scene = Self::new(viewport);
        scene.update(state)?;
        Ok(scene)
    }

    /// Overwrites the scene with a fresh render state.
    ///
    /// Slots the state does not cover are cleared to [`Glyph::Void`].
    pub fn update(&mut self, state: &RenderState) -> Result<(), RenderingError> {
        if state.columns > self.columns || state.rows > self.rows {
            return Err(RenderingError::WindowOverflow {
                columns: state.columns,
                rows: state.rows,
                window_columns: self.columns,
                window_rows: self.rows,
            });
        }

        for row in 0..self.rows {
            for column in 0..self.columns {
                let glyph = state
                    .cell(column, row)
                    .map_or(Glyph::Void, Glyph::from_cell);
                let index = self.index(column, row);
                self.glyphs[index] = glyph;
            }
        }
        let player = state
            .player
            .filter(|player| player.column() < state.columns && player.row() < state.rows);
        if let Some(player) = player {
            let index = self.index(player.column(), player.row());
            self.glyphs[index] = Glyph::Player;
        }

        self.player = player;
        self.score = state.score;
        self.total_items = state.total_items;
        self.phase = state.phase;
        Ok(())
    }

    /// Glyph at window-relative coordinates.
    #[must_use]
    pub fn glyph(&self, column: u32, row: u32) -> Option<Glyph> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.glyphs.get(self.index(column, row)).copied()
    }

    /// Iterates over the window one row at a time.
    pub fn glyph_rows(&self) -> impl Iterator<Item = &[Glyph]> + '_ {
        self.glyphs.chunks(self.columns.max(1) as usize)
    }

    /// Reports whether the player has reached the exit.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Progress line shown beneath the window.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!(
            "Score: {} / {} items collected",
            self.score, self.total_items
        )
    }

    /// Key reference shown beneath the score.
    #[must_use]
    pub const fn controls_line(&self) -> &'static str {
        "Q: quit | Arrows/WASD: move"
    }

    /// Banner shown once the session is won.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        self.is_won().then_some("VICTORY! Press 'Q' to quit.")
    }

    fn index(&self, column: u32, row: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title used by the terminal window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting maze explorer scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the time since the
    /// previous frame and the input captured for this frame, and may mutate
    /// the scene before it is drawn. Backends stop after delivering a frame
    /// whose input carries `quit`.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when building scenes.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The render state is larger than the scene's window.
    WindowOverflow {
        /// Columns supplied by the render state.
        columns: u32,
        /// Rows supplied by the render state.
        rows: u32,
        /// Columns available in the window.
        window_columns: u32,
        /// Rows available in the window.
        window_rows: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowOverflow {
                columns,
                rows,
                window_columns,
                window_rows,
            } => write!(
                f,
                "render state of {columns}x{rows} does not fit a {window_columns}x{window_rows} window"
            ),
        }
    }
}

impl Error for RenderingError {}
