//! Error handling for the tether-probe crate.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for probe operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// The scenario file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The scenario is not valid RON for the expected shape.
    #[error("Failed to parse scenario: {0}")]
    Scenario(#[from] ron::error::SpannedError),
    /// Placement failed.
    #[error("Placement error: {0}")]
    Placement(#[from] tether::Error),
    /// Result serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The `rules` subcommand was run on a scenario without rules.
    #[error("Scenario has no `rules` section")]
    MissingRules,
}

impl Error {
    /// Helper to wrap a read failure with its path.
    pub fn read<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
