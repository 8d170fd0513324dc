//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents, either built in (compiled from `themes/`) or
//! loaded from a user file.
//!
//! # Built-in Themes
//!
//! - `popcorn`: Dark theme with violet accents (default)
//! - `catppuccin-mocha`: Dark theme with warm tones
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#dee2e6"
//! header_bg = "#6741d9"        # optional
//! selection_fg = "#dee2e6"
//! selection_bg = "#7950f2"
//! text_normal = "#dee2e6"
//! text_dim = "#adb5bd"
//! border = "#495057"
//! search_bar_border = "#7950f2"
//! match_highlight_fg = "#212529"
//! match_highlight_bg = "#fcc419"
//! star_fg = "#fcc419"
//! error_fg = "#fa5252"
//! accent_fg = "#7950f2"
//! ```

use crate::domain::error::{PopcornError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "popcorn";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Colors as hex strings, e.g. `"#dee2e6"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Cursor row in the active list.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, years, secondary info.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Characters of a title matching the query.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Filled rating stars and the top-rated marker.
    pub star_fg: String,
    /// Inline error messages.
    pub error_fg: String,
    /// Panel titles, the open-movie marker and the add hint.
    pub accent_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "popcorn" => include_str!("../../themes/popcorn.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PopcornError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| PopcornError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| PopcornError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; white on anything malformed.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn italic() -> &'static str {
        "\u{001b}[3m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `popcorn` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in popcorn theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        for name in ["popcorn", "catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("nope").is_none());
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("bogus"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trip_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        std::fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(PopcornError::Theme(_))
        ));
    }
}
