//! Color channels: the named color roles every theme defines

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Shade key -> CSS color string, in declaration order
pub type Palette = IndexMap<String, String>;

/// Named color role within a theme
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Primary,
    Secondary,
    Neutral,
    Success,
    Warning,
    Error,
    Background,
    Text,
    Border,
}

impl Channel {
    /// Every required channel, in canonical order
    pub const ALL: [Channel; 9] = [
        Channel::Primary,
        Channel::Secondary,
        Channel::Neutral,
        Channel::Success,
        Channel::Warning,
        Channel::Error,
        Channel::Background,
        Channel::Text,
        Channel::Border,
    ];

    /// Stable key used in configuration documents and variable names
    pub fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Neutral => "neutral",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Background => "background",
            Self::Text => "text",
            Self::Border => "border",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Channel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL.into_iter().find(|c| c.key() == s).ok_or(())
    }
}
