//! CSS custom property synthesis
//!
//! Deterministic projection from a [`Theme`] into a flat, ordered mapping of
//! variable name to value. Color variables are named
//! `--cui-color-{channel}-{shade}`; every declared shade of every channel is
//! emitted, required channels first in canonical order, then any extra
//! palettes the document declared.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::derived::derived_variables;
use crate::theme::{Theme, ThemeMode};
use crate::tokens::{ScaleGroup, ScaleTokens};

/// Leading segment of every variable this crate emits
pub const VARIABLE_PREFIX: &str = "--cui";

/// Joins name segments
pub const SEPARATOR: char = '-';

/// `--cui-color-{palette}-{shade}`
pub fn color_variable(palette: &str, shade: &str) -> String {
    format!("{VARIABLE_PREFIX}{SEPARATOR}color{SEPARATOR}{palette}{SEPARATOR}{shade}")
}

/// Ordered variable name -> value mapping
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssVariables {
    vars: IndexMap<String, String>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Insert unless the name is already present
    pub fn insert_missing(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a CSS rule, e.g. `:root { --cui-color-primary-500: #0ea5e9; }`
    pub fn to_css_block(&self, selector: &str) -> String {
        let mut out = String::with_capacity(32 + self.vars.len() * 40);
        let _ = writeln!(out, "{selector} {{");
        for (name, value) in &self.vars {
            let _ = writeln!(out, "  {name}: {value};");
        }
        out.push_str("}\n");
        out
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.vars
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CssVariables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Color variables for every channel/shade pair of a theme.
pub fn to_variables(theme: &Theme) -> CssVariables {
    let mut vars = CssVariables::new();

    for (channel, palette) in theme.colors.channels() {
        for (shade, value) in palette {
            vars.insert(color_variable(channel.key(), shade), value.clone());
        }
    }

    for (name, palette) in theme.colors.extra_palettes() {
        for (shade, value) in palette {
            vars.insert(color_variable(name, shade), value.clone());
        }
    }

    vars
}

/// `--cui-{group}-{key}` for every scale token of a mode
pub fn scale_variables(mode: ThemeMode) -> CssVariables {
    let tokens = ScaleTokens::for_mode(mode);
    let mut vars = CssVariables::new();
    for group in ScaleGroup::ALL {
        for (key, value) in tokens.group(group) {
            vars.insert(
                format!("{VARIABLE_PREFIX}{SEPARATOR}{}{SEPARATOR}{key}", group.prefix()),
                value,
            );
        }
    }
    vars
}

/// What [`synthesize`] emits beyond the declared color shades
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Opacity, tone and state variants derived from each channel's base shade
    pub derived: bool,
    /// Spacing, typography, radius, shadow and transition tokens
    pub scale: bool,
}

impl SynthesisOptions {
    /// Declared shades only
    pub const COLORS: SynthesisOptions = SynthesisOptions {
        derived: false,
        scale: false,
    };

    /// Everything
    pub const FULL: SynthesisOptions = SynthesisOptions {
        derived: true,
        scale: true,
    };
}

/// Full variable set for a theme. Declared shades always win over derived
/// names that happen to collide with them.
pub fn synthesize(theme: &Theme, options: SynthesisOptions) -> CssVariables {
    let mut vars = to_variables(theme);

    if options.derived {
        for (name, value) in derived_variables(theme).iter() {
            vars.insert_missing(name, value);
        }
    }

    if options.scale {
        for (name, value) in scale_variables(theme.mode).iter() {
            vars.insert_missing(name, value);
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorBundle;
    use crate::tokens::{Channel, Palette};
    use pretty_assertions::assert_eq;

    fn palette(rows: &[(&str, &str)]) -> Palette {
        rows.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample() -> Theme {
        let mut colors = ColorBundle::new()
            .with_channel(Channel::Primary, palette(&[("400", "#38bdf8"), ("500", "#0ea5e9")]))
            .with_channel(Channel::Background, palette(&[("base", "#ffffff")]));
        colors.insert("surface", palette(&[("raised", "#f8fafc")]));
        Theme::new("Sample", ThemeMode::Light).colors(colors)
    }

    #[test]
    fn names_join_prefix_channel_and_shade() {
        assert_eq!(color_variable("primary", "500"), "--cui-color-primary-500");
    }

    #[test]
    fn emits_declared_fallback_and_extra_palettes() {
        let vars = to_variables(&sample());
        assert_eq!(vars.get("--cui-color-primary-400"), Some("#38bdf8"));
        assert_eq!(vars.get("--cui-color-background-base"), Some("#ffffff"));
        assert_eq!(vars.get("--cui-color-surface-raised"), Some("#f8fafc"));
        // Undeclared channels come from the neutral palette
        assert_eq!(vars.get("--cui-color-border-500"), Some("#525252"));
        assert_eq!(vars.get("--cui-color-text-0"), Some("#ffffff"));
    }

    #[test]
    fn order_is_canonical() {
        let vars = to_variables(&sample());
        let first: Vec<&str> = vars.iter().map(|(k, _)| k).take(2).collect();
        assert_eq!(first, vec!["--cui-color-primary-400", "--cui-color-primary-500"]);
        assert_eq!(vars.iter().last().map(|(k, _)| k), Some("--cui-color-surface-raised"));
    }

    #[test]
    fn css_block_rendering() {
        let vars: CssVariables = [("--cui-color-primary-500", "#0ea5e9")].into_iter().collect();
        assert_eq!(
            vars.to_css_block(":root"),
            ":root {\n  --cui-color-primary-500: #0ea5e9;\n}\n"
        );
    }

    #[test]
    fn scale_tokens_are_opt_in() {
        let theme = sample();
        let colors_only = synthesize(&theme, SynthesisOptions::COLORS);
        assert!(!colors_only.contains("--cui-spacing-4"));

        let full = synthesize(&theme, SynthesisOptions::FULL);
        assert_eq!(full.get("--cui-spacing-4"), Some("1rem"));
        assert_eq!(full.get("--cui-font-weight-bold"), Some("700"));
        assert!(full.contains("--cui-color-primary-state-hover"));
        assert_eq!(full.get("--cui-color-primary-500"), Some("#0ea5e9"));
    }
}
