//! Error types for the scaffolder.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::scaffold::MAX_DAY_COUNT;

/// Scaffolder error type.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The configured day count falls outside `1..=MAX_DAY_COUNT`.
    #[error("day count must be between 1 and {max}, got {0}", max = MAX_DAY_COUNT)]
    DayCount(u32),

    /// An input file could not be created.
    #[error("creating input file {}", .path.display())]
    Input {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// A stub source file could not be written.
    #[error("writing stub file {}", .path.display())]
    Stub {
        /// Path of the stub file.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// The registration table could not be written to its sink.
    #[error("writing registration table: {0}")]
    Output(#[from] io::Error),
}

/// Result type alias using `ScaffoldError`.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
