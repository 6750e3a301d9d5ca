//! The tri-state theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's theme choice.
///
/// `Auto` defers to the platform's color scheme and is never persisted:
/// clearing the preference and choosing `Auto` are the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemePreference {
    /// Cycle order used by the toggle control.
    pub const ORDER: [ThemePreference; 3] = [
        ThemePreference::Auto,
        ThemePreference::Light,
        ThemePreference::Dark,
    ];

    /// Returns the lowercase name used in storage, attributes and labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Auto => "auto",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Returns the preference after this one in [`ThemePreference::ORDER`].
    pub fn next(self) -> Self {
        // A value missing from ORDER counts as Auto.
        let idx = Self::ORDER.iter().position(|&t| t == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    /// Whether this preference is written to storage.
    pub fn is_persisted(self) -> bool {
        self != ThemePreference::Auto
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}', expected auto, light or dark")]
pub struct ParseThemeError(pub String);

impl FromStr for ThemePreference {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ThemePreference::Auto),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}
