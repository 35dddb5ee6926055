//! Theme data model
//!
//! A [`Theme`] is a named bundle of color channels plus mode/category
//! metadata. Themes are plain data: they are loaded once into the
//! [`ThemeRegistry`](crate::ThemeRegistry) and never mutated afterwards.

use crate::tokens::palette::{to_palette, NEUTRAL};
use crate::tokens::{Channel, Palette};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

/// Rendering polarity of a theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The opposite mode
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Mode matching an OS "prefers dark" signal
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme mode `{other}` (expected light or dark)")),
        }
    }
}

/// Catalog grouping of a theme
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeCategory {
    /// The named celestial palettes
    Celestial,
    /// Plain light/dark defaults
    #[default]
    Default,
    /// Any other tag from a custom catalog
    Custom(String),
}

impl ThemeCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Celestial => "celestial",
            Self::Default => "default",
            Self::Custom(tag) => tag,
        }
    }
}

impl From<String> for ThemeCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "celestial" => Self::Celestial,
            "default" => Self::Default,
            _ => Self::Custom(tag),
        }
    }
}

impl From<&str> for ThemeCategory {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<ThemeCategory> for String {
    fn from(category: ThemeCategory) -> Self {
        category.as_str().to_string()
    }
}

impl Display for ThemeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn neutral_fallback() -> &'static Palette {
    static FALLBACK: OnceLock<Palette> = OnceLock::new();
    FALLBACK.get_or_init(|| to_palette(NEUTRAL))
}

/// Channel name -> shade palette.
///
/// Holds exactly what the configuration document declared. Reading a
/// required [`Channel`] that was never declared yields the neutral palette
/// instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorBundle {
    palettes: IndexMap<String, Palette>,
}

impl ColorBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style channel insertion
    pub fn with_channel(mut self, channel: Channel, palette: Palette) -> Self {
        self.insert(channel.key(), palette);
        self
    }

    /// Insert or replace a palette by raw name
    pub fn insert(&mut self, name: impl Into<String>, palette: Palette) {
        self.palettes.insert(name.into(), palette);
    }

    /// Palette for a channel, or the neutral fallback if undeclared
    pub fn channel(&self, channel: Channel) -> &Palette {
        self.palettes
            .get(channel.key())
            .unwrap_or_else(|| neutral_fallback())
    }

    /// Whether the document declared this channel
    pub fn declares(&self, channel: Channel) -> bool {
        self.palettes.contains_key(channel.key())
    }

    /// Required channels the document left out
    pub fn missing_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| !self.declares(*c))
            .collect()
    }

    /// Every required channel with its (possibly fallback) palette
    pub fn channels(&self) -> impl Iterator<Item = (Channel, &Palette)> {
        Channel::ALL.into_iter().map(move |c| (c, self.channel(c)))
    }

    /// Palettes declared beyond the required channels, in document order
    pub fn extra_palettes(&self) -> impl Iterator<Item = (&str, &Palette)> {
        self.palettes
            .iter()
            .filter(|(name, _)| name.parse::<Channel>().is_err())
            .map(|(name, palette)| (name.as_str(), palette))
    }

    /// A single shade, looking through the channel fallback
    pub fn color(&self, channel: Channel, shade: &str) -> Option<&str> {
        self.channel(channel).get(shade).map(String::as_str)
    }

    /// Resolve a dotted `palette.shade` path against declared palettes
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let (palette, shade) = path.split_once('.')?;
        if let Ok(channel) = palette.parse::<Channel>() {
            return self.color(channel, shade);
        }
        self.palettes
            .get(palette)
            .and_then(|p| p.get(shade))
            .map(String::as_str)
    }
}

/// A named bundle of color channels plus mode/category metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub mode: ThemeMode,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ThemeCategory,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub colors: ColorBundle,
}

impl Theme {
    pub fn new(name: impl Into<String>, mode: ThemeMode) -> Self {
        Self {
            name: name.into(),
            mode,
            description: String::new(),
            category: ThemeCategory::Default,
            featured: false,
            colors: ColorBundle::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<ThemeCategory>) -> Self {
        self.category = category.into();
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn colors(mut self, colors: ColorBundle) -> Self {
        self.colors = colors;
        self
    }

    /// Preferred pick when resolving a theme for a mode
    pub fn is_featured_celestial(&self) -> bool {
        self.featured && self.category == ThemeCategory::Celestial
    }
}
