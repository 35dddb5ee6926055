//! Base color palettes and semantic light/dark token tables
//!
//! Purely data: palette name and shade key to color string. Themes reference
//! these through their own color bundles; the tables here back the neutral
//! fallback, the semantic token variables, and custom palette overrides.

use super::channel::Palette;
use super::color::Rgb;
use crate::theme::ThemeMode;
use indexmap::IndexMap;

/// A static shade table
pub type ShadeTable = &'static [(&'static str, &'static str)];

pub const PRIMARY: ShadeTable = &[
    ("25", "#f0f9ff"),
    ("50", "#e0f2fe"),
    ("100", "#bae6fd"),
    ("200", "#7dd3fc"),
    ("300", "#38bdf8"),
    ("400", "#0ea5e9"),
    ("500", "#0284c7"),
    ("600", "#0369a1"),
    ("700", "#075985"),
    ("800", "#0c4a6e"),
    ("900", "#082f49"),
    ("950", "#0c1821"),
];

pub const SECONDARY: ShadeTable = &[
    ("25", "#f8fafc"),
    ("50", "#f1f5f9"),
    ("100", "#e2e8f0"),
    ("200", "#cbd5e1"),
    ("300", "#94a3b8"),
    ("400", "#64748b"),
    ("500", "#475569"),
    ("600", "#334155"),
    ("700", "#1e293b"),
    ("800", "#0f172a"),
    ("900", "#020617"),
    ("950", "#010409"),
];

pub const NEUTRAL: ShadeTable = &[
    ("0", "#ffffff"),
    ("25", "#fafafa"),
    ("50", "#f5f5f5"),
    ("100", "#e5e5e5"),
    ("200", "#d4d4d4"),
    ("300", "#a3a3a3"),
    ("400", "#737373"),
    ("500", "#525252"),
    ("600", "#404040"),
    ("700", "#262626"),
    ("800", "#171717"),
    ("900", "#0a0a0a"),
    ("950", "#050505"),
];

pub const SUCCESS: ShadeTable = &[
    ("25", "#f0fdf4"),
    ("50", "#dcfce7"),
    ("100", "#bbf7d0"),
    ("200", "#86efac"),
    ("300", "#4ade80"),
    ("400", "#22c55e"),
    ("500", "#16a34a"),
    ("600", "#15803d"),
    ("700", "#166534"),
    ("800", "#14532d"),
    ("900", "#052e16"),
    ("950", "#021c0e"),
];

pub const WARNING: ShadeTable = &[
    ("25", "#fffbeb"),
    ("50", "#fef3c7"),
    ("100", "#fde68a"),
    ("200", "#fcd34d"),
    ("300", "#fbbf24"),
    ("400", "#f59e0b"),
    ("500", "#d97706"),
    ("600", "#b45309"),
    ("700", "#92400e"),
    ("800", "#78350f"),
    ("900", "#451a03"),
    ("950", "#2d0a02"),
];

pub const ERROR: ShadeTable = &[
    ("25", "#fef2f2"),
    ("50", "#fee2e2"),
    ("100", "#fecaca"),
    ("200", "#fca5a5"),
    ("300", "#f87171"),
    ("400", "#ef4444"),
    ("500", "#dc2626"),
    ("600", "#b91c1c"),
    ("700", "#991b1b"),
    ("800", "#7f1d1d"),
    ("900", "#450a0a"),
    ("950", "#2d0505"),
];

pub const INFO: ShadeTable = &[
    ("25", "#f0f9ff"),
    ("50", "#e0f2fe"),
    ("100", "#bae6fd"),
    ("200", "#7dd3fc"),
    ("300", "#38bdf8"),
    ("400", "#0ea5e9"),
    ("500", "#0284c7"),
    ("600", "#0369a1"),
    ("700", "#075985"),
    ("800", "#0c4a6e"),
    ("900", "#082f49"),
    ("950", "#0c1821"),
];

/// Base palette names, in catalog order
pub const PALETTE_NAMES: [&str; 7] = [
    "primary",
    "secondary",
    "neutral",
    "success",
    "warning",
    "error",
    "info",
];

/// Look up a base palette by name
pub fn palette(name: &str) -> Option<ShadeTable> {
    match name {
        "primary" => Some(PRIMARY),
        "secondary" => Some(SECONDARY),
        "neutral" => Some(NEUTRAL),
        "success" => Some(SUCCESS),
        "warning" => Some(WARNING),
        "error" => Some(ERROR),
        "info" => Some(INFO),
        _ => None,
    }
}

fn shade(table: ShadeTable, key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// The color every failed lookup degrades to
pub const FALLBACK_COLOR: &str = "#525252";

/// Color for a palette shade, falling back to neutral 500
pub fn color_value(palette_name: &str, shade_key: &str) -> &'static str {
    palette(palette_name)
        .and_then(|table| shade(table, shade_key))
        .unwrap_or(FALLBACK_COLOR)
}

/// Owned copy of a static table
pub fn to_palette(table: ShadeTable) -> Palette {
    table
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// Semantic keys map onto (palette, shade) references

const LIGHT_BACKGROUND: &[(&str, &str, &str)] = &[
    ("base", "neutral", "0"),
    ("surface", "neutral", "0"),
    ("muted", "neutral", "50"),
    ("hover", "neutral", "100"),
    ("active", "neutral", "200"),
    ("disabled", "neutral", "100"),
    ("inverse", "neutral", "900"),
];

const LIGHT_TEXT: &[(&str, &str, &str)] = &[
    ("primary", "neutral", "900"),
    ("secondary", "neutral", "600"),
    ("muted", "neutral", "400"),
    ("disabled", "neutral", "300"),
    ("inverse", "neutral", "0"),
    ("link", "primary", "500"),
    ("linkHover", "primary", "600"),
];

const LIGHT_BORDER: &[(&str, &str, &str)] = &[
    ("base", "neutral", "200"),
    ("light", "neutral", "100"),
    ("strong", "neutral", "300"),
    ("focus", "primary", "400"),
    ("error", "error", "300"),
    ("success", "success", "300"),
    ("warning", "warning", "300"),
];

const DARK_BACKGROUND: &[(&str, &str, &str)] = &[
    ("base", "neutral", "900"),
    ("surface", "neutral", "800"),
    ("muted", "neutral", "700"),
    ("hover", "neutral", "700"),
    ("active", "neutral", "600"),
    ("disabled", "neutral", "800"),
    ("inverse", "neutral", "0"),
];

const DARK_TEXT: &[(&str, &str, &str)] = &[
    ("primary", "neutral", "50"),
    ("secondary", "neutral", "300"),
    ("muted", "neutral", "400"),
    ("disabled", "neutral", "600"),
    ("inverse", "neutral", "900"),
    ("link", "primary", "300"),
    ("linkHover", "primary", "200"),
];

const DARK_BORDER: &[(&str, &str, &str)] = &[
    ("base", "neutral", "700"),
    ("light", "neutral", "800"),
    ("strong", "neutral", "600"),
    ("focus", "primary", "400"),
    ("error", "error", "500"),
    ("success", "success", "500"),
    ("warning", "warning", "500"),
];

fn semantic_table(category: &str, mode: ThemeMode) -> Option<&'static [(&'static str, &'static str, &'static str)]> {
    match (category, mode) {
        ("background", ThemeMode::Light) => Some(LIGHT_BACKGROUND),
        ("text", ThemeMode::Light) => Some(LIGHT_TEXT),
        ("border", ThemeMode::Light) => Some(LIGHT_BORDER),
        ("background", ThemeMode::Dark) => Some(DARK_BACKGROUND),
        ("text", ThemeMode::Dark) => Some(DARK_TEXT),
        ("border", ThemeMode::Dark) => Some(DARK_BORDER),
        _ => None,
    }
}

/// Semantic color for a mode.
///
/// `category` is either a semantic group (`background`, `text`, `border`) or a
/// base palette name, in which case `key` is a shade. Unknown lookups return
/// neutral 500.
pub fn semantic_color(category: &str, key: &str, mode: ThemeMode) -> &'static str {
    if let Some(table) = semantic_table(category, mode) {
        return table
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, p, s)| color_value(p, s))
            .unwrap_or(FALLBACK_COLOR);
    }
    color_value(category, key)
}

/// `--cui-color-{category}-{key}` for every semantic key and palette shade
pub fn semantic_css_variables(mode: ThemeMode) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();

    for category in ["background", "text", "border"] {
        if let Some(table) = semantic_table(category, mode) {
            for (key, palette_name, shade_key) in table {
                vars.insert(
                    format!("--cui-color-{category}-{key}"),
                    color_value(palette_name, shade_key).to_string(),
                );
            }
        }
    }

    for name in PALETTE_NAMES {
        if let Some(table) = palette(name) {
            for (key, value) in table {
                vars.insert(format!("--cui-color-{name}-{key}"), value.to_string());
            }
        }
    }

    vars
}

/// Owned base palettes keyed by name, with per-shade overrides merged in
pub fn custom_palette_set(overrides: &IndexMap<String, Palette>) -> IndexMap<String, Palette> {
    PALETTE_NAMES
        .iter()
        .filter_map(|name| palette(name).map(|table| (*name, table)))
        .map(|(name, table)| {
            let mut merged = to_palette(table);
            if let Some(extra) = overrides.get(name) {
                for (k, v) in extra {
                    merged.insert(k.clone(), v.clone());
                }
            }
            (name.to_string(), merged)
        })
        .collect()
}

/// Which text polarity reads best on `background`.
///
/// Returns [`ThemeMode::Dark`] when dark text should be used (light
/// backgrounds), [`ThemeMode::Light`] otherwise. Unparseable colors are
/// treated as dark backgrounds.
pub fn contrast_mode(background: &str) -> ThemeMode {
    match Rgb::parse(background) {
        Some(c) if c.relative_luminance() > 0.179 => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_value_falls_back_to_neutral_500() {
        assert_eq!(color_value("primary", "400"), "#0ea5e9");
        assert_eq!(color_value("primary", "12"), FALLBACK_COLOR);
        assert_eq!(color_value("mauve", "400"), FALLBACK_COLOR);
        assert_eq!(color_value("neutral", "500"), FALLBACK_COLOR);
    }

    #[test]
    fn semantic_colors_follow_mode() {
        assert_eq!(semantic_color("background", "base", ThemeMode::Light), "#ffffff");
        assert_eq!(semantic_color("background", "base", ThemeMode::Dark), "#0a0a0a");
        assert_eq!(semantic_color("text", "link", ThemeMode::Dark), "#38bdf8");
        assert_eq!(semantic_color("success", "400", ThemeMode::Dark), "#22c55e");
        assert_eq!(semantic_color("text", "nope", ThemeMode::Light), FALLBACK_COLOR);
    }

    #[test]
    fn semantic_variables_cover_palettes() {
        let vars = semantic_css_variables(ThemeMode::Light);
        assert_eq!(vars["--cui-color-border-focus"], "#0ea5e9");
        assert_eq!(vars["--cui-color-info-950"], "#0c1821");
        assert_eq!(vars["--cui-color-neutral-0"], "#ffffff");
    }

    #[test]
    fn overrides_merge_per_shade() {
        let mut overrides = IndexMap::new();
        let mut primary = Palette::new();
        primary.insert("400".into(), "#ff5500".into());
        overrides.insert("primary".to_string(), primary);

        let set = custom_palette_set(&overrides);
        assert_eq!(set["primary"]["400"], "#ff5500");
        assert_eq!(set["primary"]["500"], "#0284c7");
        assert_eq!(set["error"]["400"], "#ef4444");
    }

    #[test]
    fn contrast_prefers_dark_text_on_light() {
        assert_eq!(contrast_mode("#ffffff"), ThemeMode::Dark);
        assert_eq!(contrast_mode("#0a0a0a"), ThemeMode::Light);
        assert_eq!(contrast_mode("var(--x)"), ThemeMode::Light);
    }
}
