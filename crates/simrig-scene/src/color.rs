//! Named colors for primitive shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Fixed palette of display colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// (1, 0, 0)
    Red,
    /// (0, 1, 0)
    Green,
    /// (0, 0, 1)
    Blue,
    /// (1, 0.647, 0)
    Orange,
    /// (1, 1, 0)
    Yellow,
    /// (0.5, 0, 0.5)
    Purple,
    /// (1, 1, 1)
    White,
    /// (0, 0, 0)
    Black,
    /// (0.5, 0.5, 0.5)
    Gray,
    /// (0, 1, 1)
    Cyan,
    /// (1, 0, 1)
    Magenta,
}

impl Color {
    /// Every color in the palette.
    pub const ALL: [Color; 11] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::Purple,
        Color::White,
        Color::Black,
        Color::Gray,
        Color::Cyan,
        Color::Magenta,
    ];

    /// Normalized `[r, g, b]` components.
    pub fn rgb(self) -> [f64; 3] {
        match self {
            Color::Red => [1.0, 0.0, 0.0],
            Color::Green => [0.0, 1.0, 0.0],
            Color::Blue => [0.0, 0.0, 1.0],
            Color::Orange => [1.0, 0.647, 0.0],
            Color::Yellow => [1.0, 1.0, 0.0],
            Color::Purple => [0.5, 0.0, 0.5],
            Color::White => [1.0, 1.0, 1.0],
            Color::Black => [0.0, 0.0, 0.0],
            Color::Gray => [0.5, 0.5, 0.5],
            Color::Cyan => [0.0, 1.0, 1.0],
            Color::Magenta => [1.0, 0.0, 1.0],
        }
    }

    /// Lowercase name, as used in config files.
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::White => "white",
            Color::Black => "black",
            Color::Gray => "gray",
            Color::Cyan => "cyan",
            Color::Magenta => "magenta",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = SceneError;

    /// Exact lowercase names only, the same set config files accept.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SceneError::UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_in_unit_range() {
        for color in Color::ALL {
            assert!(color.rgb().iter().all(|c| (0.0..=1.0).contains(c)), "{color}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("orange".parse::<Color>().unwrap().rgb(), [1.0, 0.647, 0.0]);
        for color in Color::ALL {
            assert_eq!(color.name().parse::<Color>().unwrap(), color);
        }
        assert!(matches!(
            "teal".parse::<Color>(),
            Err(SceneError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_parse_matches_serde() {
        for name in ["Orange", "RED", " green"] {
            assert!(matches!(
                name.parse::<Color>(),
                Err(SceneError::UnknownColor(_))
            ));
            assert!(toml::Value::String(name.to_string())
                .try_into::<Color>()
                .is_err());
        }
        let from_serde: Color = toml::Value::String("purple".to_string()).try_into().unwrap();
        assert_eq!(from_serde, "purple".parse::<Color>().unwrap());
    }
}
