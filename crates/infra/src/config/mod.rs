//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. If no file is found either, uses built-in defaults
//!
//! Configuration is never a startup blocker; the defaults always work.
//!
//! ## Environment Variables
//! - `FOCUSTIDE_DB_PATH`: Database file path (required for env loading)
//! - `FOCUSTIDE_FOCUS_MINUTES`: Seed focus session length
//! - `FOCUSTIDE_SHORT_BREAK_MINUTES`: Seed short break length
//! - `FOCUSTIDE_LONG_BREAK_MINUTES`: Seed long break length
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./focustide.toml` or `./focustide.json`
//! 2. `./config.toml` or `./config.json`
//! 3. The same names in the parent directory

use std::path::{Path, PathBuf};

use focustide_domain::{AppConfig, FocusTideError, Result};

/// Load configuration with automatic fallback strategy
///
/// Environment first, then file probing, then defaults. Failures along
/// the way are logged at debug level; this function always succeeds.
pub fn load() -> AppConfig {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(env_err) => {
            tracing::debug!(error = ?env_err, "Failed to load from environment, trying file");
            match load_from_file(None) {
                Ok(config) => config,
                Err(file_err) => {
                    tracing::debug!(error = ?file_err, "No config file; using defaults");
                    AppConfig::default()
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `FocusTideError::Config` if `FOCUSTIDE_DB_PATH` is missing or
/// any optional variable has an invalid value.
pub fn load_from_env() -> Result<AppConfig> {
    let db_path = env_var("FOCUSTIDE_DB_PATH")?;

    let mut config = AppConfig::default();
    config.database.path = db_path;
    if let Some(minutes) = env_minutes("FOCUSTIDE_FOCUS_MINUTES")? {
        config.timer.focus_minutes = minutes;
    }
    if let Some(minutes) = env_minutes("FOCUSTIDE_SHORT_BREAK_MINUTES")? {
        config.timer.short_break_minutes = minutes;
    }
    if let Some(minutes) = env_minutes("FOCUSTIDE_LONG_BREAK_MINUTES")? {
        config.timer.long_break_minutes = minutes;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports TOML and
/// JSON formats (detected by file extension).
///
/// # Errors
/// Returns `FocusTideError::Config` if the file is missing or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FocusTideError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FocusTideError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FocusTideError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, dispatching on extension.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(contents)
            .map_err(|e| FocusTideError::Config(format!("Invalid TOML config: {e}"))),
        Some("json") => serde_json::from_str(contents)
            .map_err(|e| FocusTideError::Config(format!("Invalid JSON config: {e}"))),
        other => Err(FocusTideError::Config(format!(
            "Unsupported config format: {}",
            other.unwrap_or("<none>")
        ))),
    }
}

/// Probe the standard config file locations.
fn probe_config_paths() -> Option<PathBuf> {
    let candidates = [
        "focustide.toml",
        "focustide.json",
        "config.toml",
        "config.json",
        "../focustide.toml",
        "../focustide.json",
        "../config.toml",
        "../config.json",
    ];

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| FocusTideError::Config(format!("Missing environment variable: {name}")))
}

fn env_minutes(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(raw) => {
            let minutes = raw
                .parse::<u32>()
                .map_err(|e| FocusTideError::Config(format!("Invalid value for {name}: {e}")))?;
            if minutes == 0 {
                return Err(FocusTideError::Config(format!("{name} must be positive")));
            }
            Ok(Some(minutes))
        }
        Err(_) => Ok(None),
    }
}
