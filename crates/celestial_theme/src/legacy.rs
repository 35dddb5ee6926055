//! Adapter for code written against the older single-theme interface.
//!
//! The old interface knew only a mode and a flat token set. [`LegacyTheme`]
//! answers those questions from a [`ThemeManager`] and forwards its commands
//! to it; the manager stays the only owner of state.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::manager::ThemeManager;
use crate::theme::{ColorBundle, Theme, ThemeMode};
use crate::tokens::{ScaleGroup, ScaleTokens};

/// Color returned by [`LegacyTheme::get_color`] for unknown paths
pub const MISSING_COLOR: &str = "#000000";

/// Styling backend the old configuration named
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Tailwind,
    Scss,
    Material,
    Css,
}

/// Mode request accepted by [`LegacyTheme::set_mode`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegacyMode {
    Light,
    Dark,
    /// Follow the OS signal
    Auto,
}

impl FromStr for LegacyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            other => other.parse::<ThemeMode>().map(|mode| match mode {
                ThemeMode::Light => Self::Light,
                ThemeMode::Dark => Self::Dark,
            }),
        }
    }
}

/// Responsive breakpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// Minimum viewport width
    pub fn min_width(self) -> &'static str {
        match self {
            Self::Xs => "0px",
            Self::Sm => "640px",
            Self::Md => "768px",
            Self::Lg => "1024px",
            Self::Xl => "1280px",
        }
    }
}

impl Display for Breakpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        })
    }
}

/// Old-style flat theme description
#[derive(Clone, Debug, PartialEq)]
pub struct LegacyThemeConfig {
    pub framework: Framework,
    pub mode: ThemeMode,
    pub theme_id: String,
    pub colors: ColorBundle,
    pub tokens: ScaleTokens,
}

impl LegacyThemeConfig {
    pub fn from_theme(id: &str, theme: &Theme) -> Self {
        Self {
            framework: Framework::default(),
            mode: theme.mode,
            theme_id: id.to_string(),
            colors: theme.colors.clone(),
            tokens: ScaleTokens::for_mode(theme.mode),
        }
    }
}

/// Old interface over a shared [`ThemeManager`]
#[derive(Clone, Debug)]
pub struct LegacyTheme {
    manager: Arc<ThemeManager>,
}

impl LegacyTheme {
    pub fn new(manager: Arc<ThemeManager>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Arc<ThemeManager> {
        &self.manager
    }

    /// Snapshot of the active theme in the old shape
    pub fn config(&self) -> LegacyThemeConfig {
        LegacyThemeConfig::from_theme(&self.manager.current_id(), &self.manager.current())
    }

    pub fn is_dark(&self) -> bool {
        self.manager.is_dark()
    }

    pub fn toggle_theme(&self) -> Result<(), ThemeError> {
        self.manager.toggle_mode()
    }

    /// `Light`/`Dark` select the first featured theme of that mode (else any
    /// theme of it); `Auto` goes back to following the OS.
    pub fn set_mode(&self, mode: LegacyMode) -> Result<(), ThemeError> {
        let mode = match mode {
            LegacyMode::Auto => return self.manager.reset_to_system_preference(),
            LegacyMode::Light => ThemeMode::Light,
            LegacyMode::Dark => ThemeMode::Dark,
        };

        let registry = self.manager.registry();
        let id = registry
            .featured()
            .find(|(_, theme)| theme.mode == mode)
            .map(|(id, _)| id)
            .or_else(|| registry.best_for_mode(mode))
            .ok_or(ThemeError::NoThemeForMode(mode))?;
        self.manager.set_theme(id)
    }

    /// Color at a dotted `channel.shade` path, [`MISSING_COLOR`] if absent
    pub fn get_color(&self, path: &str) -> String {
        self.manager
            .current()
            .colors
            .lookup(path)
            .unwrap_or(MISSING_COLOR)
            .to_string()
    }

    /// Scale token value, empty if absent
    pub fn get_token(&self, group: ScaleGroup, key: &str) -> String {
        ScaleTokens::for_mode(self.manager.current().mode)
            .get(group, key)
            .unwrap_or_default()
            .to_string()
    }

    pub fn breakpoint(&self, size: Breakpoint) -> &'static str {
        size.min_width()
    }
}
