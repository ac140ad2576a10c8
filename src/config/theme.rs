//! Colour theme: named RGB colours and the roles that use them.

use super::loader::ConfigError;
use crate::view::styles::Palette;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const BACKGROUND: &str = "BACKGROUND";
const FOREGROUND: &str = "FOREGROUND";

/// Solarized light, the default palette.
const DEFAULT_RGB: [(&str, Rgb); 10] = [
    (BACKGROUND, Rgb::new(253, 246, 227)),
    (FOREGROUND, Rgb::new(101, 123, 131)),
    ("BLACK", Rgb::new(7, 54, 66)),
    ("BLUE", Rgb::new(38, 139, 210)),
    ("CYAN", Rgb::new(42, 161, 152)),
    ("GREEN", Rgb::new(133, 153, 0)),
    ("MAGENTA", Rgb::new(211, 54, 130)),
    ("RED", Rgb::new(220, 50, 47)),
    ("WHITE", Rgb::new(238, 232, 213)),
    ("YELLOW", Rgb::new(181, 137, 0)),
];

// ===== TOML sections =====

/// `[theme]` section of the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeSection {
    /// Colour name for matched characters.
    #[serde(default)]
    pub highlight_fg: Option<String>,
    /// Background behind matched characters.
    #[serde(default)]
    pub highlight_bg: Option<String>,
    /// Colour name for the selected row.
    #[serde(default)]
    pub selection_fg: Option<String>,
    /// Background of the selected row.
    #[serde(default)]
    pub selection_bg: Option<String>,
    /// `"ansi"` or `"rgb"`.
    #[serde(default)]
    pub color_mode: Option<String>,
}

/// A value under `[rgb]`: `[r, g, b]` or `"r, g, b"`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RgbValue {
    /// `[r, g, b]`
    List(Vec<i64>),
    /// `"r, g, b"`
    Text(String),
}

// ===== Rgb =====

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Validate a config value. `key` names the value in error messages.
    pub fn parse(key: &str, value: &RgbValue) -> Result<Self, ConfigError> {
        let components = match value {
            RgbValue::List(items) => items.clone(),
            RgbValue::Text(text) => text
                .split(',')
                .map(|part| {
                    part.trim().parse::<i64>().map_err(|_| ConfigError::InvalidColor {
                        key: key.to_string(),
                        reason: format!("'{}' is not an integer", part.trim()),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let [r, g, b] = components.as_slice() else {
            return Err(ConfigError::InvalidColor {
                key: key.to_string(),
                reason: format!(
                    "Expected 3 integers but got {} for {}",
                    components.len(),
                    key
                ),
            });
        };

        let component = |value: i64| {
            u8::try_from(value).map_err(|_| ConfigError::InvalidColor {
                key: key.to_string(),
                reason: format!("component {value} is outside 0-255"),
            })
        };

        Ok(Self::new(component(*r)?, component(*g)?, component(*b)?))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

// ===== ColorMode =====

/// How colour names become terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Standard names use the terminal's own ANSI palette.
    #[default]
    Ansi,
    /// Every name uses its `[rgb]` value.
    Rgb,
}

impl ColorMode {
    /// Parse `"ansi"` or `"rgb"`, ignoring case and surrounding spaces.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ansi" => Some(Self::Ansi),
            "rgb" | "truecolor" => Some(Self::Rgb),
            _ => None,
        }
    }
}

// ===== Theme =====

/// Resolved theme.
///
/// # Invariants
///
/// Colour names are uppercase and every role name resolves, so
/// [`Theme::palette`] cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    highlight_fg: String,
    highlight_bg: String,
    selection_fg: String,
    selection_bg: String,
    color_mode: ColorMode,
    rgb: BTreeMap<String, Rgb>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            highlight_fg: "RED".to_string(),
            highlight_bg: BACKGROUND.to_string(),
            selection_fg: "WHITE".to_string(),
            selection_bg: "GREEN".to_string(),
            color_mode: ColorMode::default(),
            rgb: DEFAULT_RGB
                .iter()
                .map(|(name, rgb)| (name.to_string(), *rgb))
                .collect(),
        }
    }
}

impl Theme {
    /// Apply the `[theme]` and `[rgb]` sections on top of the defaults.
    ///
    /// # Errors
    ///
    /// `InvalidColor` for malformed RGB values or an unknown colour mode,
    /// `UnknownColor` for a role naming a colour that does not resolve.
    pub fn from_sections(
        theme: Option<&ThemeSection>,
        rgb: Option<&HashMap<String, RgbValue>>,
    ) -> Result<Self, ConfigError> {
        let mut resolved = Self::default();

        if let Some(rgb) = rgb {
            for (name, value) in rgb {
                let color = Rgb::parse(&format!("rgb.{name}"), value)?;
                resolved.rgb.insert(name.to_uppercase(), color);
            }
        }

        if let Some(section) = theme {
            let roles = [
                (&section.highlight_fg, &mut resolved.highlight_fg),
                (&section.highlight_bg, &mut resolved.highlight_bg),
                (&section.selection_fg, &mut resolved.selection_fg),
                (&section.selection_bg, &mut resolved.selection_bg),
            ];
            for (value, slot) in roles {
                if let Some(name) = value {
                    *slot = name.trim().to_uppercase();
                }
            }

            if let Some(mode) = &section.color_mode {
                resolved.color_mode =
                    ColorMode::from_name(mode).ok_or_else(|| ConfigError::InvalidColor {
                        key: "theme.color_mode".to_string(),
                        reason: format!("unknown color mode '{mode}' (expected ansi or rgb)"),
                    })?;
            }
        }

        resolved.validate()?;
        Ok(resolved)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in self.roles() {
            if self.resolve(name).is_none() {
                return Err(ConfigError::UnknownColor {
                    key: key.to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn roles(&self) -> [(&'static str, &str); 4] {
        [
            ("theme.highlight_fg", &self.highlight_fg),
            ("theme.highlight_bg", &self.highlight_bg),
            ("theme.selection_fg", &self.selection_fg),
            ("theme.selection_bg", &self.selection_bg),
        ]
    }

    /// How colour names are resolved.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// RGB value defined for `name`, if any.
    pub fn rgb(&self, name: &str) -> Option<Rgb> {
        self.rgb.get(&name.to_uppercase()).copied()
    }

    /// Terminal colour for a colour name.
    pub fn resolve(&self, name: &str) -> Option<Color> {
        let name = name.to_uppercase();
        if self.color_mode == ColorMode::Ansi {
            if let Some(color) = ansi_color(&name) {
                return Some(color);
            }
        }
        self.rgb.get(&name).copied().map(Color::from)
    }

    /// Styles for every role.
    pub fn palette(&self) -> Palette {
        let color = |name: &str| self.resolve(name).unwrap_or(Color::Reset);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        Palette {
            default: Style::default(),
            highlight: bold
                .fg(color(&self.highlight_fg))
                .bg(color(&self.highlight_bg)),
            selected: bold
                .fg(color(&self.selection_fg))
                .bg(color(&self.selection_bg)),
            status: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
        }
    }
}

/// ANSI colour for a standard name.
///
/// `BACKGROUND` and `FOREGROUND` are the terminal defaults. `WHITE` is ANSI 7,
/// which ratatui calls `Gray`.
fn ansi_color(name: &str) -> Option<Color> {
    let color = match name {
        BACKGROUND | FOREGROUND => Color::Reset,
        "BLACK" => Color::Black,
        "RED" => Color::Red,
        "GREEN" => Color::Green,
        "YELLOW" => Color::Yellow,
        "BLUE" => Color::Blue,
        "MAGENTA" => Color::Magenta,
        "CYAN" => Color::Cyan,
        "WHITE" => Color::Gray,
        _ => return None,
    };
    Some(color)
}
