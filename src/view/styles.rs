//! Style roles resolved to ratatui styles.
//!
//! The controller tags spans with a [`StyleRole`]; the terminal surface looks
//! the role up in a [`Palette`] built from the theme at startup.

use super::surface::StyleRole;
use ratatui::style::{Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// One ratatui style per [`StyleRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Plain text.
    pub default: Style,
    /// Matched characters.
    pub highlight: Style,
    /// The highlighted candidate row.
    pub selected: Style,
    /// The status row.
    pub status: Style,
}

impl Palette {
    /// Colourless palette used when colours are disabled.
    ///
    /// Roles stay distinguishable through modifiers alone.
    pub fn monochrome() -> Self {
        Self {
            default: Style::default(),
            highlight: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            status: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
        }
    }

    /// Pick the theme palette or the monochrome one.
    pub fn for_color_config(themed: Palette, config: ColorConfig) -> Self {
        if config.colors_enabled() {
            themed
        } else {
            Self::monochrome()
        }
    }

    /// Style painted for `role`.
    pub fn style_for(&self, role: StyleRole) -> Style {
        match role {
            StyleRole::Default => self.default,
            StyleRole::Highlight => self.highlight,
            StyleRole::Selected => self.selected,
            StyleRole::Status => self.status,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        crate::config::Theme::default().palette()
    }
}

// ===== Tests =====
