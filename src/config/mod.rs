//! Configuration management for pagination defaults and booklet behavior.
//!
//! Settings live in `config.toml`; the bot token comes from the environment
//! (see `main.rs`) and is never part of the configuration file. A missing
//! configuration file is not an error; the built-in defaults apply.

/// Settings structures and their `config.toml` deserialization
pub mod settings;

pub use settings::{AppConfig, BookletSettings, PaginationSettings};

use crate::errors::{Error, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Loads and validates configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] when the file cannot be read, is not valid
/// TOML, or fails validation (e.g. decoration longer than the page budget).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| {
        Error::config(format!("Failed to read config file {path_ref:?}: {e}"))
    })?;
    let config: AppConfig = toml::from_str(&contents).map_err(|e| {
        Error::config(format!(
            "Failed to parse TOML from config file {path_ref:?}: {e}"
        ))
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads the application configuration from `FLIPBOOK_CONFIG` (falling back
/// to [`DEFAULT_CONFIG_PATH`]), or the built-in defaults when no file exists.
///
/// # Errors
/// Returns [`Error::Config`] only for a file that exists but cannot be
/// loaded; a missing file logs a warning and yields defaults.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("FLIPBOOK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    if !Path::new(&path).exists() {
        warn!(%path, "config file not found, using built-in defaults");
        return Ok(AppConfig::default());
    }
    let config = load_config(&path)?;
    info!(%path, "configuration loaded");
    Ok(config)
}
