//! Theme preference types and the transition table.
//!
//! A [`ThemePreference`] is what the user picked; a [`ResolvedTheme`] is what
//! actually gets rendered after "system" has been collapsed against the OS
//! colour-scheme signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User-selected theme mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [Self::Light, Self::Dark, Self::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Strict parse; `None` for anything that is not a known mode.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }

    /// Lenient parse used for persisted and externally supplied values.
    /// Unknown strings fall back to `System`.
    pub fn parse(s: &str) -> Self {
        Self::from_name(s).unwrap_or_default()
    }

    /// Next mode on a toggle click: light -> dark -> system -> light.
    pub fn cycle(self) -> Self {
        cycle_theme(Some(self))
    }

    /// Collapse to a concrete theme. `os_prefers_dark` is only consulted for
    /// `System`.
    pub fn resolve(self, os_prefers_dark: bool) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System if os_prefers_dark => ResolvedTheme::Dark,
            ThemePreference::System => ResolvedTheme::Light,
        }
    }

    pub fn follows_os(&self) -> bool {
        matches!(self, ThemePreference::System)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The transition table. `None` stands for "nothing stored yet" and is
/// treated like any other non light/dark input.
pub fn cycle_theme(current: Option<ThemePreference>) -> ThemePreference {
    match current {
        Some(ThemePreference::Light) => ThemePreference::Dark,
        Some(ThemePreference::Dark) => ThemePreference::System,
        _ => ThemePreference::Light,
    }
}

/// Concrete rendering mode written to the styling hook. Never "system".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    /// Icon shown while this theme is rendered
    pub fn icon(&self) -> Icon {
        match self {
            ResolvedTheme::Light => Icon::Sun,
            ResolvedTheme::Dark => Icon::Moon,
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two icons inside the theme toggle button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Sun,
    Moon,
}

impl Icon {
    pub const BOTH: [Icon; 2] = [Icon::Sun, Icon::Moon];
}
