//! Tag colors
//!
//! Tags pick from a closed set of six colors. Each maps to one fixed
//! ANSI foreground escape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TagError;

/// ANSI reset sequence appended after every colored span
pub const RESET: &str = "\x1b[0m";

/// Color of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// Every color, in display order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Returns the lowercase name used on the command line and on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }

    /// Returns the ANSI escape that switches the foreground to this color
    pub fn ansi(&self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            // Terminals have no orange; bright yellow is the closest
            Color::Orange => "\x1b[93m",
            Color::Yellow => "\x1b[33m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Purple => "\x1b[35m",
        }
    }

    /// Wraps text in this color followed by a reset
    pub fn paint(&self, text: &str) -> String {
        format!("{}{}{}", self.ansi(), text, RESET)
    }

    /// Comma-separated list of valid names, for error messages
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Color::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| TagError::InvalidColor(s.to_string()))
    }
}
