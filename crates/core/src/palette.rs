//! Symbolic color names used by categories, and their RGB values.
//!
//! Only the presentation layer resolves colors. Aggregation works on
//! category names and never looks at these values.

use serde::{Deserialize, Serialize};

/// A named color a category can be tagged with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Orange,
    Blue,
    Purple,
    Red,
    Pink,
    Green,
    Yellow,
    Indigo,
    Teal,
    Cyan,
    Lime,
    Emerald,
    #[default]
    Gray,
}

impl ColorTag {
    /// Every tag, in the order a color picker shows them.
    pub const ALL: [ColorTag; 13] = [
        ColorTag::Orange,
        ColorTag::Blue,
        ColorTag::Purple,
        ColorTag::Red,
        ColorTag::Pink,
        ColorTag::Green,
        ColorTag::Yellow,
        ColorTag::Indigo,
        ColorTag::Teal,
        ColorTag::Cyan,
        ColorTag::Lime,
        ColorTag::Emerald,
        ColorTag::Gray,
    ];

    /// `#rrggbb` value for rendering.
    pub fn hex(self) -> &'static str {
        match self {
            ColorTag::Orange => "#f97316",
            ColorTag::Blue => "#3b82f6",
            ColorTag::Purple => "#a855f7",
            ColorTag::Red => "#ef4444",
            ColorTag::Pink => "#ec4899",
            ColorTag::Green => "#22c55e",
            ColorTag::Yellow => "#eab308",
            ColorTag::Indigo => "#6366f1",
            ColorTag::Teal => "#14b8a6",
            ColorTag::Cyan => "#06b6d4",
            ColorTag::Lime => "#84cc16",
            ColorTag::Emerald => "#10b981",
            ColorTag::Gray => "#6b7280",
        }
    }

    /// RGB components of [`ColorTag::hex`].
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    /// Parse a tag from its lowercase name (e.g. `"emerald"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|tag| tag.to_string() == lower)
    }
}

impl std::fmt::Display for ColorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorTag::Orange => "orange",
            ColorTag::Blue => "blue",
            ColorTag::Purple => "purple",
            ColorTag::Red => "red",
            ColorTag::Pink => "pink",
            ColorTag::Green => "green",
            ColorTag::Yellow => "yellow",
            ColorTag::Indigo => "indigo",
            ColorTag::Teal => "teal",
            ColorTag::Cyan => "cyan",
            ColorTag::Lime => "lime",
            ColorTag::Emerald => "emerald",
            ColorTag::Gray => "gray",
        };
        write!(f, "{name}")
    }
}
