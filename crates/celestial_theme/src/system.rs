//! OS color-scheme preference
//!
//! The manager reads the "prefers dark" signal once at construction through a
//! [`ColorSchemeSource`]; later changes are pushed in by the host through
//! [`ThemeManager::on_system_scheme_changed`](crate::ThemeManager::on_system_scheme_changed).

use std::env;

use crate::theme::ThemeMode;

/// Override for detection, `light` or `dark`
pub const SCHEME_ENV_VAR: &str = "CELESTIAL_COLOR_SCHEME";

/// Read-only "prefers dark" signal
pub trait ColorSchemeSource: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// A fixed mode, for tests and hosts that already know the answer
impl ColorSchemeSource for ThemeMode {
    fn prefers_dark(&self) -> bool {
        self.is_dark()
    }
}

/// Detects from the process environment on every read
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvScheme;

impl ColorSchemeSource for EnvScheme {
    fn prefers_dark(&self) -> bool {
        detect_system_color_scheme().is_dark()
    }
}

/// Best-effort detection from environment hints.
///
/// Checked in order: [`SCHEME_ENV_VAR`], a `:dark` suffix on `GTK_THEME`,
/// and the background index in `COLORFGBG`. Defaults to light.
pub fn detect_system_color_scheme() -> ThemeMode {
    scheme_from_hints(
        env::var(SCHEME_ENV_VAR).ok().as_deref(),
        env::var("GTK_THEME").ok().as_deref(),
        env::var("COLORFGBG").ok().as_deref(),
    )
}

fn scheme_from_hints(
    explicit: Option<&str>,
    gtk_theme: Option<&str>,
    colorfgbg: Option<&str>,
) -> ThemeMode {
    if let Some(mode) = explicit.and_then(|v| v.trim().to_ascii_lowercase().parse().ok()) {
        return mode;
    }

    if let Some(gtk) = gtk_theme {
        if gtk.to_ascii_lowercase().ends_with(":dark") {
            return ThemeMode::Dark;
        }
    }

    // "fg;bg" or "fg;other;bg": ANSI background 0-6 and 8 are dark
    if let Some(bg) = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
    {
        return ThemeMode::from_prefers_dark(bg <= 6 || bg == 8);
    }

    ThemeMode::Light
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        assert_eq!(
            scheme_from_hints(Some("Dark"), Some("Adwaita"), Some("0;15")),
            ThemeMode::Dark
        );
        assert_eq!(
            scheme_from_hints(Some("light"), Some("Adwaita:dark"), None),
            ThemeMode::Light
        );
    }

    #[test]
    fn gtk_and_terminal_hints() {
        assert_eq!(scheme_from_hints(None, Some("Adwaita:dark"), None), ThemeMode::Dark);
        assert_eq!(scheme_from_hints(None, None, Some("15;0")), ThemeMode::Dark);
        assert_eq!(scheme_from_hints(None, None, Some("0;default;15")), ThemeMode::Light);
        assert_eq!(scheme_from_hints(None, None, Some("garbage")), ThemeMode::Light);
        assert_eq!(scheme_from_hints(None, None, None), ThemeMode::Light);
    }
}
