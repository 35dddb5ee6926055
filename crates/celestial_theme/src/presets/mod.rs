//! Built-in theme catalog.

use crate::error::ConfigLoadError;
use crate::registry::ThemeRegistry;
use std::fmt::{Display, Formatter};

/// The built-in catalog document, in the native JSON format
pub const BUILTIN_CATALOG: &str = include_str!("themes.json");

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Dark violet celestial theme.
    StarlitNight,
    /// Dark fuchsia celestial theme.
    NebulaDream,
    /// Light sky-blue celestial theme, the configured default.
    CelestialOcean,
    /// Light orange celestial theme.
    SolarFlare,
    /// Neutral light theme.
    DefaultLight,
    /// Neutral dark theme.
    DefaultDark,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::StarlitNight => "starlit-night",
            Self::NebulaDream => "nebula-dream",
            Self::CelestialOcean => "celestial-ocean",
            Self::SolarFlare => "solar-flare",
            Self::DefaultLight => "default-light",
            Self::DefaultDark => "default-dark",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::StarlitNight => "Starlit Night",
            Self::NebulaDream => "Nebula Dream",
            Self::CelestialOcean => "Celestial Ocean",
            Self::SolarFlare => "Solar Flare",
            Self::DefaultLight => "Default Light",
            Self::DefaultDark => "Default Dark",
        }
    }

    /// Full preset list, in catalog order.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 6] = [
            ThemePreset::StarlitNight,
            ThemePreset::NebulaDream,
            ThemePreset::CelestialOcean,
            ThemePreset::SolarFlare,
            ThemePreset::DefaultLight,
            ThemePreset::DefaultDark,
        ];
        &PRESETS
    }

    /// Look a preset up by its id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl ThemeRegistry {
    /// Registry holding the built-in catalog
    pub fn builtin() -> Result<Self, ConfigLoadError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }
}
