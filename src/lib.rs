//! Scaffolding for numbered puzzle-day projects.
//!
//! This crate provides:
//! - The scaffolder writing `input/NN.txt` and `src/dayNN.rs` per day
//! - The registration table mapping each day to its `run` function
//! - Configuration loading, XDG path resolution and schema generation

pub mod config;
pub mod error;
pub mod paths;
pub mod scaffold;
pub mod schema;

pub use config::{AppConfig, LogLevel, LoggingConfig, ScaffoldConfig};
pub use error::{Result, ScaffoldError};
pub use paths::AppPaths;
pub use scaffold::{Day, DayArtifacts, ScaffoldReport, Scaffolder, days};
pub use schema::{generate_example_config, generate_schema};

/// Application name used for config directories and environment prefix.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Project URL embedded in the generated schema.
pub const REPO_URL: &str = "https://github.com/byteowlz/aoc-scaffold";

/// Returns the environment variable prefix for this application.
#[must_use]
pub fn env_prefix() -> String {
    APP_NAME
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
