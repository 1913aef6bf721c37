//! Note colors accepted by `--color`.
//!
//! Names match case-insensitively, aliases resolve to their canonical color and
//! any unambiguous prefix is accepted (`"pu"` is purple, `"b"` is ambiguous).

use crate::error::{IdeaseedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Brown,
    DarkBlue,
    Gray,
    Green,
    Orange,
    Pink,
    Purple,
    Red,
    Teal,
    #[default]
    White,
    Yellow,
}

const COLORS: [(&str, Color); 12] = [
    ("blue", Color::Blue),
    ("brown", Color::Brown),
    ("darkblue", Color::DarkBlue),
    ("gray", Color::Gray),
    ("green", Color::Green),
    ("orange", Color::Orange),
    ("pink", Color::Pink),
    ("purple", Color::Purple),
    ("red", Color::Red),
    ("teal", Color::Teal),
    ("white", Color::White),
    ("yellow", Color::Yellow),
];

const ALIASES: [(&str, Color); 4] = [
    ("cyan", Color::Teal),
    ("indigo", Color::DarkBlue),
    ("grey", Color::Gray),
    ("magenta", Color::Purple),
];

impl Color {
    pub fn name(self) -> &'static str {
        COLORS
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(name, _)| *name)
            .unwrap_or("white")
    }

    /// Every accepted spelling, canonical names first.
    pub fn valid_names() -> Vec<&'static str> {
        COLORS
            .iter()
            .chain(ALIASES.iter())
            .map(|(name, _)| *name)
            .collect()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = IdeaseedError;

    fn from_str(input: &str) -> Result<Self> {
        let wanted = input.trim().to_lowercase();
        let all = || COLORS.iter().chain(ALIASES.iter());

        if let Some((_, color)) = all().find(|(name, _)| *name == wanted) {
            return Ok(*color);
        }

        let mut candidates: Vec<Color> = Vec::new();
        if !wanted.is_empty() {
            for (name, color) in all() {
                if name.starts_with(&wanted) && !candidates.contains(color) {
                    candidates.push(*color);
                }
            }
        }

        match candidates.as_slice() {
            [color] => Ok(*color),
            [] => Err(IdeaseedError::usage(format!(
                "Unknown color {input:?} for --color. Valid colors are: {}",
                Color::valid_names().join(", ")
            ))),
            many => Err(IdeaseedError::usage(format!(
                "Ambiguous color {input:?} for --color, it could mean one of: {}",
                many.iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_match_case_insensitively() {
        assert_eq!("Purple".parse::<Color>().unwrap(), Color::Purple);
        assert_eq!("DARKBLUE".parse::<Color>().unwrap(), Color::DarkBlue);
    }

    #[test]
    fn aliases_resolve_to_canonical_color() {
        assert_eq!("cyan".parse::<Color>().unwrap(), Color::Teal);
        assert_eq!("Grey".parse::<Color>().unwrap(), Color::Gray);
        assert_eq!("magenta".parse::<Color>().unwrap(), Color::Purple);
    }

    #[test]
    fn unique_prefix_expands() {
        assert_eq!("pu".parse::<Color>().unwrap(), Color::Purple);
        assert_eq!("y".parse::<Color>().unwrap(), Color::Yellow);
        // "d" only prefixes darkblue
        assert_eq!("d".parse::<Color>().unwrap(), Color::DarkBlue);
    }

    #[test]
    fn prefix_shared_by_alias_and_target_is_not_ambiguous() {
        // "gr" prefixes gray, green and grey; grey is gray
        let err = "gr".parse::<Color>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("gray"));
        assert!(message.contains("green"));
        assert!(!message.contains("grey"));
    }

    #[test]
    fn unknown_color_lists_valid_names() {
        let err = "ultraviolet".parse::<Color>().unwrap_err();
        assert!(err.is_usage());
        let message = err.to_string();
        assert!(message.contains("teal"));
        assert!(message.contains("cyan"));
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::default(), Color::White);
        assert_eq!(Color::White.to_string(), "white");
    }
}
