//! Configuration types and loading for the scaffolder.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::env_prefix;
use crate::paths::expand_str_path;
use crate::scaffold::{DEFAULT_DAY_COUNT, DEFAULT_INPUT_DIR, DEFAULT_SRC_DIR, DEFAULT_STUB_TEMPLATE};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(
    title = "Scaffolder Configuration",
    description = "Main configuration for aoc-scaffold"
)]
pub struct AppConfig {
    /// JSON Schema reference for editor support.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub schema: Option<String>,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Day range, target directories and stub body.
    pub scaffold: ScaffoldConfig,
}

impl AppConfig {
    /// Load configuration from `config_file` and the environment.
    ///
    /// A missing file yields the defaults. Nothing is written to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load_from_path(config_file: &Path) -> Result<Self> {
        let env_prefix = env_prefix();
        let built = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("scaffold.day_count", i64::from(DEFAULT_DAY_COUNT))?
            .set_default("scaffold.input_dir", DEFAULT_INPUT_DIR)?
            .set_default("scaffold.src_dir", DEFAULT_SRC_DIR)?
            .set_default("scaffold.stub_template", DEFAULT_STUB_TEMPLATE)?
            .add_source(
                File::from(config_file)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(env_prefix.as_str())
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = built.try_deserialize()?;

        if let Some(ref file) = config.logging.file {
            let expanded = expand_str_path(file)?;
            config.logging.file = Some(expanded.display().to_string());
        }

        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(description = "Logging configuration")]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace).
    #[schemars(default = "default_log_level")]
    pub level: LogLevel,

    /// Optional path for log file output. Supports ~ and environment variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Log level enumeration for schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only emit error-level messages.
    Error,
    /// Emit warnings and errors.
    Warn,
    /// Emit informational messages and above (default).
    #[default]
    Info,
    /// Emit debug diagnostics and above.
    Debug,
    /// Emit all messages including fine-grained traces.
    Trace,
}

impl LogLevel {
    /// The matching `log` filter.
    #[must_use]
    pub const fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

const fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// What gets scaffolded and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(description = "Day range, target directories and stub body")]
pub struct ScaffoldConfig {
    /// Number of days to generate, starting at 1 (default: 25).
    #[schemars(range(min = 1, max = 99))]
    pub day_count: u32,

    /// Directory receiving the empty `NN.txt` input files. Must already exist.
    pub input_dir: String,

    /// Directory receiving the `dayNN.rs` stub modules. Must already exist.
    pub src_dir: String,

    /// Literal contents of every stub module.
    pub stub_template: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            day_count: DEFAULT_DAY_COUNT,
            input_dir: DEFAULT_INPUT_DIR.to_string(),
            src_dir: DEFAULT_SRC_DIR.to_string(),
            stub_template: DEFAULT_STUB_TEMPLATE.to_string(),
        }
    }
}
