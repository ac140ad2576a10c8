//! Configuration file loading with precedence handling.

use super::theme::{RgbValue, Theme, ThemeSection};
use super::Backend;
use crate::source::TextEncoding;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "LINESEL_CONFIG";
/// Environment variable overriding the input encoding.
pub const ENCODING_ENV_VAR: &str = "LINESEL_ENCODING";
/// Environment variable overriding the rendering backend.
pub const BACKEND_ENV_VAR: &str = "LINESEL_BACKEND";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An RGB value or colour setting is malformed.
    #[error("Invalid color for {key}: {reason}")]
    InvalidColor {
        /// Dotted config key, e.g. `rgb.RED`.
        key: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// A theme role names a colour that is neither standard nor under `[rgb]`.
    #[error("Unknown color '{name}' for {key}")]
    UnknownColor {
        /// Dotted config key, e.g. `theme.highlight_fg`.
        key: String,
        /// The colour name that did not resolve.
        name: String,
    },

    /// Unsupported input encoding name.
    #[error("Unknown encoding '{0}' (expected utf-8, ascii or latin-1)")]
    InvalidEncoding(String),

    /// Unsupported backend name.
    #[error("Unknown backend '{0}' (expected fullscreen or inline)")]
    InvalidBackend(String),

    /// A numeric setting is out of range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Config key.
        key: String,
        /// What is wrong with the value.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/linesel/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Input encoding name (e.g., "utf-8", "latin-1").
    #[serde(default)]
    pub encoding: Option<String>,

    /// Strip colour escapes from input lines.
    #[serde(default)]
    pub strip_ansi: Option<bool>,

    /// Count all matches for the status row.
    #[serde(default)]
    pub extended_status: Option<bool>,

    /// Let Tab finish the selection.
    #[serde(default)]
    pub tab_exits: Option<bool>,

    /// Rendering backend ("fullscreen" or "inline").
    #[serde(default)]
    pub backend: Option<String>,

    /// Height of the inline viewport in rows.
    #[serde(default)]
    pub inline_height: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Colour roles.
    #[serde(default)]
    pub theme: Option<ThemeSection>,

    /// Named RGB colours.
    #[serde(default)]
    pub rgb: Option<HashMap<String, RgbValue>>,

    /// Font size of the windowed frontend. Accepted so shared config files
    /// load; the terminal has no use for it.
    #[serde(default)]
    pub gui_font_size: Option<toml::Value>,

    /// Window size of the windowed frontend. Accepted and ignored like
    /// `gui_font_size`.
    #[serde(default)]
    pub gui_size: Option<toml::Value>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Input encoding.
    pub encoding: TextEncoding,
    /// Strip colour escapes from input.
    pub strip_ansi: bool,
    /// Count all matches for the status row.
    pub extended_status: bool,
    /// Tab finishes the selection.
    pub tab_exits: bool,
    /// Rendering backend.
    pub backend: Backend,
    /// Inline viewport height.
    pub inline_height: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Colour theme.
    pub theme: Theme,
}

/// Default inline viewport height: the query and status rows plus ten candidates.
pub const DEFAULT_INLINE_HEIGHT: u16 = 12;

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            strip_ansi: false,
            extended_status: false,
            tab_exits: false,
            backend: Backend::default(),
            inline_height: DEFAULT_INLINE_HEIGHT,
            log_file_path: default_log_path(),
            theme: Theme::default(),
        }
    }
}

/// Command-line settings that override every other source.
///
/// Flags are only applied when set; a missing flag never turns a config
/// value off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--encoding`.
    pub encoding: Option<String>,
    /// `--backend`.
    pub backend: Option<String>,
    /// `--tab`.
    pub tab_exits: bool,
    /// `--extended-status`.
    pub extended_status: bool,
    /// `--strip-ansi`.
    pub strip_ansi: bool,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/linesel/linesel.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("linesel").join("linesel.log")
    } else {
        PathBuf::from("linesel.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/linesel/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linesel").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LINESEL_CONFIG` environment variable
/// 3. Default path `~/.config/linesel/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns error for unknown encoding or backend names, a zero inline
/// height, or an invalid theme.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let encoding = match config.encoding.as_deref() {
        Some(name) => parse_encoding(name)?,
        None => defaults.encoding,
    };
    let backend = match config.backend.as_deref() {
        Some(name) => parse_backend(name)?,
        None => defaults.backend,
    };
    let inline_height = match config.inline_height {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                key: "inline_height".to_string(),
                reason: "must be at least 1".to_string(),
            })
        }
        Some(height) => height,
        None => defaults.inline_height,
    };

    Ok(ResolvedConfig {
        encoding,
        strip_ansi: config.strip_ansi.unwrap_or(defaults.strip_ansi),
        extended_status: config.extended_status.unwrap_or(defaults.extended_status),
        tab_exits: config.tab_exits.unwrap_or(defaults.tab_exits),
        backend,
        inline_height,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        theme: Theme::from_sections(config.theme.as_ref(), config.rgb.as_ref())?,
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LINESEL_ENCODING`: Override input encoding
/// - `LINESEL_BACKEND`: Override rendering backend
///
/// # Errors
///
/// Returns error if a variable is set to an unknown name.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(encoding) = std::env::var(ENCODING_ENV_VAR) {
        config.encoding = parse_encoding(&encoding)?;
    }

    if let Ok(backend) = std::env::var(BACKEND_ENV_VAR) {
        config.backend = parse_backend(&backend)?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns error if `--encoding` or `--backend` names are unknown.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(encoding) = &overrides.encoding {
        config.encoding = parse_encoding(encoding)?;
    }

    if let Some(backend) = &overrides.backend {
        config.backend = parse_backend(backend)?;
    }

    config.tab_exits |= overrides.tab_exits;
    config.extended_status |= overrides.extended_status;
    config.strip_ansi |= overrides.strip_ansi;

    Ok(config)
}

fn parse_encoding(name: &str) -> Result<TextEncoding, ConfigError> {
    TextEncoding::from_name(name).ok_or_else(|| ConfigError::InvalidEncoding(name.to_string()))
}

fn parse_backend(name: &str) -> Result<Backend, ConfigError> {
    Backend::from_name(name).ok_or_else(|| ConfigError::InvalidBackend(name.to_string()))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
