//! Optional TOML settings file and the merge with command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use maze_explorer_core::{ViewportSize, DEFAULT_MAX_ITEMS, DEFAULT_MAZE_COLUMNS, DEFAULT_MAZE_ROWS};
use maze_explorer_rendering_terminal::DEFAULT_POLL_INTERVAL;
use maze_explorer_system_generation::Config;
use serde::Deserialize;

use crate::args::Args;

/// Defaults read from a settings file. Keys mirror the long command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Settings {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) max_items: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) map_dir: Option<PathBuf>,
    pub(crate) viewport_columns: Option<u32>,
    pub(crate) viewport_rows: Option<u32>,
    pub(crate) poll_ms: Option<u64>,
}

impl Settings {
    /// Reads and parses the settings file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Fully resolved launch options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LaunchConfig {
    pub(crate) generation: Config,
    pub(crate) seed: Option<u64>,
    pub(crate) fresh: bool,
    pub(crate) map_dir: PathBuf,
    pub(crate) viewport: ViewportSize,
    pub(crate) poll_interval: Duration,
}

/// Merges flags over settings over built-in defaults.
pub(crate) fn resolve(args: &Args, settings: Settings) -> LaunchConfig {
    let width = args.width.or(settings.width).unwrap_or(DEFAULT_MAZE_COLUMNS);
    let height = args.height.or(settings.height).unwrap_or(DEFAULT_MAZE_ROWS);
    let max_items = args
        .max_items
        .or(settings.max_items)
        .unwrap_or(DEFAULT_MAX_ITEMS);

    let viewport = ViewportSize::new(
        args.viewport_columns
            .or(settings.viewport_columns)
            .unwrap_or(ViewportSize::DEFAULT.columns()),
        args.viewport_rows
            .or(settings.viewport_rows)
            .unwrap_or(ViewportSize::DEFAULT.rows()),
    );

    let poll_interval = args
        .poll_ms
        .or(settings.poll_ms)
        .map_or(DEFAULT_POLL_INTERVAL, Duration::from_millis);

    LaunchConfig {
        generation: Config::new(width, height, max_items),
        seed: args.seed.or(settings.seed),
        fresh: args.new,
        map_dir: args
            .map_dir
            .clone()
            .or(settings.map_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        viewport,
        poll_interval,
    }
}
