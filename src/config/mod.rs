//! Configuration module.
//!
//! Settings resolve in layers: defaults, then the TOML config file, then
//! environment variables, then command-line flags.

pub mod keybindings;
pub mod loader;
pub mod theme;

use std::fmt;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};
pub use theme::{ColorMode, Rgb, RgbValue, Theme, ThemeSection};

/// Where the selector draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Alternate screen covering the whole terminal.
    #[default]
    Fullscreen,
    /// Fixed-height viewport below the cursor; scrollback stays visible.
    Inline,
}

impl Backend {
    /// Look up a backend by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fullscreen" => Some(Self::Fullscreen),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }

    /// Name as written in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fullscreen => "fullscreen",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
