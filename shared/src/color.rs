use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnnotatorError;

/// Hex suffix appended to a shape color for translucent fills.
pub const FILL_ALPHA_SUFFIX: &str = "20";

pub const DEFAULT_PALETTE: [&str; 5] = ["#ffffff", "#ff0000", "#00ff00", "#ffff00", "#00bfff"];

/// Opaque RGB color. Always renders as a 7 character `#rrggbb` string.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }

    /// Text color that stays readable on top of this color.
    pub fn contrast_text(&self) -> Color {
        if self.is_light() {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    pub fn fill_style(&self) -> String {
        format!("{self}{FILL_ALPHA_SUFFIX}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = AnnotatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || AnnotatorError::InvalidColor(value.to_string());
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = AnnotatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| hex.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_lowercase_hex() {
        let color: Color = "#FF8000".parse().unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
        assert_eq!(color.to_string(), "#ff8000");
    }

    #[test]
    fn rejects_malformed_colors() {
        for value in ["ff0000", "#ff00", "#ff00000", "#gg0000", "", "#ff000080"] {
            assert!(value.parse::<Color>().is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn fill_style_appends_alpha() {
        assert_eq!(Color::rgb(255, 0, 0).fill_style(), "#ff000020");
    }

    #[test]
    fn contrast_text_follows_luminance() {
        assert_eq!(Color::WHITE.contrast_text(), Color::BLACK);
        assert_eq!(Color::rgb(0xff, 0xff, 0).contrast_text(), Color::BLACK);
        assert_eq!(Color::rgb(0xff, 0, 0).contrast_text(), Color::WHITE);
        assert_eq!(Color::rgb(0, 0x80, 0).contrast_text(), Color::WHITE);
    }

    #[test]
    fn default_palette_is_complete() {
        assert_eq!(default_palette().len(), DEFAULT_PALETTE.len());
    }
}
