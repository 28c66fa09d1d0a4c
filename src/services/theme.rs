//! Page themes and their palettes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Colors a public page renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Page background.
    pub bg: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Accent color for buttons and links.
    pub primary: &'static str,
}

/// The selectable page themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Default,
    /// Dark theme.
    Dark,
    /// Blue tint.
    Blue,
    /// Green tint.
    Green,
}

impl Theme {
    /// All themes, in picker order.
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Dark, Theme::Blue, Theme::Green];

    /// Theme name as stored on the profile.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// The theme's colors.
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Default => Palette { bg: "white", text: "black", primary: "#3b82f6" },
            Self::Dark => Palette { bg: "#111", text: "white", primary: "#60a5fa" },
            Self::Blue => Palette { bg: "#eff6ff", text: "#1e3a8a", primary: "#2563eb" },
            Self::Green => Palette { bg: "#f0fdf4", text: "#166534", primary: "#22c55e" },
        }
    }

    /// Theme for a stored value; unknown or missing values fall back to
    /// [`Theme::Default`].
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| format!("Unknown theme {s:?}"))
    }
}
