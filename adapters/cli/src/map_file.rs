//! Saved maze files and the load-or-generate policy.
//!
//! A map is stored as a JSON array of rows, each row an array of
//! single-character cell codes, under a name derived from its dimensions.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maze_explorer_core::{Cell, Grid, GridError};
use maze_explorer_system_generation::{normalize_dimensions, Generator};
use thiserror::Error;

/// Errors raised while reading or writing a map file.
#[derive(Debug, Error)]
pub(crate) enum MapFileError {
    /// The file could not be read or written.
    #[error("map file I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The file is not a JSON array of string arrays.
    #[error("map file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The file holds no cells.
    #[error("map file contains no cells")]
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
    /// An entry is not one of the known cell codes.
    #[error("unknown cell code {code:?} at row {row}, column {column}")]
    UnknownCode {
        /// Zero-based row of the entry.
        row: usize,
        /// Zero-based column of the entry.
        column: usize,
        /// Entry as it appeared in the file.
        code: String,
    },
    /// The rows could not be assembled into a grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// File name used for a maze of the given dimensions.
pub(crate) fn file_name(columns: u32, rows: u32) -> String {
    format!("maze{columns}x{rows}.json")
}

/// Writes `grid` into `dir`, creating the directory if needed.
pub(crate) fn save(grid: &Grid, dir: &Path) -> Result<PathBuf, MapFileError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(grid.columns(), grid.rows()));
    let json = serde_json::to_string(&grid.to_rows())?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "saved maze");
    Ok(path)
}

/// Reads and validates the map file at `path`.
pub(crate) fn load(path: &Path) -> Result<Grid, MapFileError> {
    let text = fs::read_to_string(path)?;
    let raw: Vec<Vec<String>> = serde_json::from_str(&text)?;
    let grid = Grid::from_rows(decode_rows(raw)?)?;
    tracing::info!(
        path = %path.display(),
        columns = grid.columns(),
        rows = grid.rows(),
        "loaded maze"
    );
    Ok(grid)
}

fn decode_rows(raw: Vec<Vec<String>>) -> Result<Vec<Vec<Cell>>, MapFileError> {
    let expected = match raw.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(MapFileError::Empty),
    };

    raw.into_iter()
        .enumerate()
        .map(|(row, codes)| {
            if codes.len() != expected {
                return Err(MapFileError::Ragged {
                    row,
                    expected,
                    found: codes.len(),
                });
            }
            codes
                .into_iter()
                .enumerate()
                .map(|(column, code)| {
                    decode_code(&code).ok_or(MapFileError::UnknownCode { row, column, code })
                })
                .collect()
        })
        .collect()
}

fn decode_code(code: &str) -> Option<Cell> {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => Cell::from_code(single),
        _ => None,
    }
}

/// How the maze handed to the session was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MapOrigin {
    /// Read from an existing file.
    Loaded,
    /// Generated on request.
    Generated,
    /// Generated because the existing file was missing or unreadable.
    Replaced,
}

/// Maze ready for play together with where it came from.
#[derive(Debug)]
pub(crate) struct PreparedMap {
    pub(crate) grid: Grid,
    pub(crate) path: PathBuf,
    pub(crate) origin: MapOrigin,
}

/// Loads the saved maze for the generator's dimensions, or generates and saves one.
///
/// `fresh` skips loading. A missing or malformed file falls back to
/// generation. Failing to save a generated maze is logged and play continues.
pub(crate) fn load_or_generate(
    dir: &Path,
    generator: &Generator,
    seed: u64,
    fresh: bool,
) -> PreparedMap {
    let config = generator.config();
    let (columns, rows) = normalize_dimensions(config.columns(), config.rows());
    let path = dir.join(file_name(columns, rows));

    let origin = if fresh {
        MapOrigin::Generated
    } else {
        match load(&path) {
            Ok(grid) => {
                return PreparedMap {
                    grid,
                    path,
                    origin: MapOrigin::Loaded,
                }
            }
            Err(MapFileError::Io(error)) if error.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no saved maze found; generating a new one");
                MapOrigin::Replaced
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "saved maze is unusable; generating a new one");
                MapOrigin::Replaced
            }
        }
    };

    tracing::info!(columns, rows, seed, "generating maze");
    let grid = generator.generate_seeded(seed);
    let path = match save(&grid, dir) {
        Ok(saved) => saved,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to save generated maze");
            path
        }
    };

    PreparedMap { grid, path, origin }
}
