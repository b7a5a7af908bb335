//! core::config
//!
//! Discovery and loading of per-application secret definitions.
//!
//! # Overview
//!
//! Every `*.yaml` / `*.yml` file in the configuration directory describes one
//! application. Files are loaded independently: a file that cannot be read
//! or parsed produces a [`ConfigWarning`] and the rest of the batch still
//! loads. Whether an empty result is fatal is the caller's decision.
//!
//! # Location
//!
//! The directory is [`DEFAULT_CONFIG_DIR`], relative to the working
//! directory. It is not configurable.
//!
//! # Example
//!
//! ```no_run
//! use kryptos::core::config;
//! use std::path::Path;
//!
//! let result = config::load_dir(Path::new("configs")).unwrap();
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("{} applications", result.apps.len());
//! ```

pub mod schema;

pub use schema::{parse_config, ConfigDocument, SchemaError};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::types::AppConfig;

/// Configuration directory, relative to the working directory.
pub const DEFAULT_CONFIG_DIR: &str = "configs";

/// File extensions recognized as configuration documents.
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to list config directory '{path}': {source}")]
    ListError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError { path: PathBuf, source: SchemaError },
}

impl ConfigError {
    /// The file or directory the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::ListError { path, .. }
            | ConfigError::ReadError { path, .. }
            | ConfigError::ParseError { path, .. } => path,
        }
    }
}

/// A file that was skipped while loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The file that failed.
    pub path: PathBuf,
    /// Why it failed.
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not load {}: {}", self.path.display(), self.message)
    }
}

/// Result of loading a configuration directory.
#[derive(Debug, Default)]
pub struct ConfigLoadResult {
    /// Successfully parsed applications, in file-name order.
    pub apps: Vec<AppConfig>,
    /// One entry per skipped file.
    pub warnings: Vec<ConfigWarning>,
}

/// List configuration files in `dir`, sorted by file name.
///
/// Only regular files with a recognized extension are returned.
///
/// # Errors
///
/// Returns `ConfigError::ListError` if the directory cannot be read.
pub fn list_config_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let list_error = |source| ConfigError::ListError {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        let recognized = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext));
        if recognized && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse a single configuration file.
///
/// # Errors
///
/// Returns `ConfigError::ReadError` or `ConfigError::ParseError`.
pub fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load every configuration file in `dir`.
///
/// Per-file failures become warnings; only a directory that cannot be
/// listed is an error.
///
/// # Errors
///
/// Returns `ConfigError::ListError` if the directory cannot be read.
pub fn load_dir(dir: &Path) -> Result<ConfigLoadResult, ConfigError> {
    let mut result = ConfigLoadResult::default();

    for path in list_config_files(dir)? {
        match load_file(&path) {
            Ok(app) => {
                debug!(
                    path = %path.display(),
                    app = %app.app_name,
                    secrets = app.secrets.len(),
                    "loaded config"
                );
                result.apps.push(app);
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "skipping config");
                let message = match err {
                    ConfigError::ParseError { source, .. } => source.to_string(),
                    ConfigError::ReadError { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                result.warnings.push(ConfigWarning { path, message });
            }
        }
    }

    Ok(result)
}
