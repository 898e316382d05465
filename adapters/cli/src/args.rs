use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments. Every value is optional so the settings file and
/// built-in defaults can fill whatever is left unset.
#[derive(Debug, Default, Parser)]
#[command(name = "maze-explorer", version, about = "Explore a randomly generated maze in the terminal")]
pub(crate) struct Args {
    /// Maze width in cells. Even values are rounded up to the next odd number.
    #[arg(long, value_name = "COLUMNS")]
    pub(crate) width: Option<u32>,

    /// Maze height in cells. Even values are rounded up to the next odd number.
    #[arg(long, value_name = "ROWS")]
    pub(crate) height: Option<u32>,

    /// Upper bound on items scattered through a generated maze.
    #[arg(long, value_name = "COUNT")]
    pub(crate) max_items: Option<usize>,

    /// Seed for maze generation. A random seed is drawn when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Generate and save a fresh maze even if one exists for these dimensions.
    #[arg(long)]
    pub(crate) new: bool,

    /// Directory holding saved maze files.
    #[arg(long, value_name = "DIR")]
    pub(crate) map_dir: Option<PathBuf>,

    /// Visible window width in cells.
    #[arg(long, value_name = "COLUMNS")]
    pub(crate) viewport_columns: Option<u32>,

    /// Visible window height in cells.
    #[arg(long, value_name = "ROWS")]
    pub(crate) viewport_rows: Option<u32>,

    /// Milliseconds to wait for a key press before redrawing.
    #[arg(long, value_name = "MILLIS")]
    pub(crate) poll_ms: Option<u64>,

    /// TOML settings file supplying defaults for the options above.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}
