//! XDG-compliant config discovery and resolution of the scaffold directories.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::schema::generate_example_config;
use crate::{APP_NAME, AppConfig};

/// Resolved locations of the config file and the scaffold targets.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Config file in use.
    pub config_file: PathBuf,
    /// Directory receiving the input files.
    pub input_dir: PathBuf,
    /// Directory receiving the stub modules.
    pub src_dir: PathBuf,
}

impl AppPaths {
    /// Discover application paths, optionally overriding the config file location.
    ///
    /// Scaffold directories start at their defaults until
    /// [`Self::apply_overrides`] runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be expanded or no config
    /// directory can be determined.
    pub fn discover(override_path: Option<PathBuf>) -> Result<Self> {
        let config_file = match override_path {
            Some(path) => {
                let expanded = expand_path(path)?;
                if expanded.is_dir() {
                    expanded.join("config.toml")
                } else {
                    expanded
                }
            }
            None => default_config_dir()?.join("config.toml"),
        };

        if config_file.parent().is_none() {
            return Err(anyhow!("invalid config file path: {}", config_file.display()));
        }

        let defaults = AppConfig::default();
        Ok(Self {
            config_file,
            input_dir: PathBuf::from(defaults.scaffold.input_dir),
            src_dir: PathBuf::from(defaults.scaffold.src_dir),
        })
    }

    /// Take the scaffold directories from configuration.
    ///
    /// Relative results stay relative to the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory references an unset variable.
    pub fn apply_overrides(mut self, cfg: &AppConfig) -> Result<Self> {
        self.input_dir = expand_str_path(&cfg.scaffold.input_dir)?;
        self.src_dir = expand_str_path(&cfg.scaffold.src_dir)?;
        Ok(self)
    }
}

impl std::fmt::Display for AppPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "config: {}, input: {}, src: {}",
            self.config_file.display(),
            self.input_dir.display(),
            self.src_dir.display()
        )
    }
}

/// Expand a `PathBuf`, resolving ~ and environment variables.
///
/// # Errors
///
/// Returns an error if the path references an unset variable.
pub fn expand_path(path: PathBuf) -> Result<PathBuf> {
    if let Some(text) = path.to_str() {
        expand_str_path(text)
    } else {
        Ok(path)
    }
}

/// Expand a string path, resolving ~ and environment variables.
///
/// # Errors
///
/// Returns an error if the path references an unset variable.
pub fn expand_str_path(text: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(text).context("expanding path")?;
    Ok(PathBuf::from(expanded.to_string()))
}

/// Get the default configuration directory (`XDG_CONFIG_HOME` or fallback).
///
/// # Errors
///
/// Returns an error if neither XDG nor a home directory is available.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        let mut path = PathBuf::from(dir);
        path.push(APP_NAME);
        return Ok(path);
    }

    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine configuration directory"))
}

/// Write the default configuration file to the specified path.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }

    let mut body = default_config_header(path);
    body.push_str(&generate_example_config(APP_NAME)?);
    fs::write(path, body).with_context(|| format!("writing config file to {}", path.display()))
}

fn default_config_header(path: &Path) -> String {
    let mut buffer = String::new();
    buffer.push_str("# Configuration for ");
    buffer.push_str(APP_NAME);
    buffer.push('\n');
    buffer.push_str("# File: ");
    buffer.push_str(&path.display().to_string());
    buffer.push('\n');
    buffer.push('\n');
    buffer
}
