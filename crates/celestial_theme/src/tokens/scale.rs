//! Non-color scale tokens: spacing, typography, radii, shadows, transitions

use crate::theme::ThemeMode;
use indexmap::IndexMap;

/// Token group, one per `--cui-{prefix}-{key}` variable family
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ScaleGroup {
    Spacing,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    Radius,
    Shadow,
    Transition,
}

impl ScaleGroup {
    pub const ALL: [ScaleGroup; 8] = [
        ScaleGroup::Spacing,
        ScaleGroup::FontFamily,
        ScaleGroup::FontSize,
        ScaleGroup::FontWeight,
        ScaleGroup::LineHeight,
        ScaleGroup::Radius,
        ScaleGroup::Shadow,
        ScaleGroup::Transition,
    ];

    /// Variable name segment
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Spacing => "spacing",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontWeight => "font-weight",
            Self::LineHeight => "line-height",
            Self::Radius => "radius",
            Self::Shadow => "shadow",
            Self::Transition => "transition",
        }
    }
}

/// One layer of a box shadow, always black with the given alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowLayer {
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub alpha: f32,
    pub inset: bool,
}

impl ShadowLayer {
    pub const fn new(offset_y: f32, blur: f32, spread: f32, alpha: f32) -> Self {
        Self {
            offset_y,
            blur,
            spread,
            alpha,
            inset: false,
        }
    }

    pub const fn inset(mut self) -> Self {
        self.inset = true;
        self
    }

    fn to_css(self) -> String {
        let px = |v: f32| {
            if v == 0.0 {
                "0".to_string()
            } else {
                format!("{v}px")
            }
        };
        format!(
            "{}0 {} {} {} rgb(0 0 0 / {})",
            if self.inset { "inset " } else { "" },
            px(self.offset_y),
            px(self.blur),
            px(self.spread),
            self.alpha
        )
    }
}

fn shadow_css(layers: &[ShadowLayer]) -> String {
    layers
        .iter()
        .map(|l| l.to_css())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shadow ramp for a mode; dark surfaces need heavier shadows to read
fn shadows(mode: ThemeMode) -> [(&'static str, String); 8] {
    let k = match mode {
        ThemeMode::Light => 1.0,
        ThemeMode::Dark => 3.0,
    };
    let a = |alpha: f32| ((alpha * k * 100.0).round() / 100.0).min(1.0);
    [
        ("xs", shadow_css(&[ShadowLayer::new(1.0, 2.0, 0.0, a(0.05))])),
        (
            "sm",
            shadow_css(&[
                ShadowLayer::new(1.0, 3.0, 0.0, a(0.1)),
                ShadowLayer::new(1.0, 2.0, -1.0, a(0.1)),
            ]),
        ),
        (
            "base",
            shadow_css(&[
                ShadowLayer::new(4.0, 6.0, -1.0, a(0.1)),
                ShadowLayer::new(2.0, 4.0, -2.0, a(0.1)),
            ]),
        ),
        (
            "md",
            shadow_css(&[
                ShadowLayer::new(10.0, 15.0, -3.0, a(0.1)),
                ShadowLayer::new(4.0, 6.0, -4.0, a(0.1)),
            ]),
        ),
        (
            "lg",
            shadow_css(&[
                ShadowLayer::new(20.0, 25.0, -5.0, a(0.1)),
                ShadowLayer::new(8.0, 10.0, -6.0, a(0.1)),
            ]),
        ),
        ("xl", shadow_css(&[ShadowLayer::new(25.0, 50.0, -12.0, a(0.25))])),
        ("2xl", shadow_css(&[ShadowLayer::new(50.0, 100.0, -25.0, a(0.25))])),
        (
            "inner",
            shadow_css(&[ShadowLayer::new(2.0, 4.0, 0.0, a(0.05)).inset()]),
        ),
    ]
}

const SPACING: &[(&str, &str)] = &[
    ("0", "0"),
    ("1", "0.25rem"),
    ("2", "0.5rem"),
    ("3", "0.75rem"),
    ("4", "1rem"),
    ("5", "1.25rem"),
    ("6", "1.5rem"),
    ("8", "2rem"),
    ("10", "2.5rem"),
    ("12", "3rem"),
    ("16", "4rem"),
    ("20", "5rem"),
    ("24", "6rem"),
    ("32", "8rem"),
    ("40", "10rem"),
    ("48", "12rem"),
    ("56", "14rem"),
    ("64", "16rem"),
];

const FONT_FAMILY: &[(&str, &str)] = &[
    (
        "sans",
        "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif",
    ),
    (
        "mono",
        "\"SFMono-Regular\", Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace",
    ),
    ("serif", "Georgia, \"Times New Roman\", serif"),
];

const FONT_SIZE: &[(&str, &str)] = &[
    ("xs", "0.75rem"),
    ("sm", "0.875rem"),
    ("base", "1rem"),
    ("lg", "1.125rem"),
    ("xl", "1.25rem"),
    ("2xl", "1.5rem"),
    ("3xl", "1.875rem"),
    ("4xl", "2.25rem"),
    ("5xl", "3rem"),
    ("6xl", "3.75rem"),
];

const FONT_WEIGHT: &[(&str, &str)] = &[
    ("thin", "100"),
    ("light", "300"),
    ("normal", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("extrabold", "800"),
    ("black", "900"),
];

const LINE_HEIGHT: &[(&str, &str)] = &[
    ("tight", "1.25"),
    ("snug", "1.375"),
    ("normal", "1.5"),
    ("relaxed", "1.625"),
    ("loose", "2"),
];

const RADIUS: &[(&str, &str)] = &[
    ("none", "0"),
    ("xs", "0.125rem"),
    ("sm", "0.25rem"),
    ("base", "0.375rem"),
    ("md", "0.5rem"),
    ("lg", "0.75rem"),
    ("xl", "1rem"),
    ("2xl", "1.5rem"),
    ("3xl", "2rem"),
    ("full", "9999px"),
];

const TRANSITION: &[(&str, &str)] = &[
    ("fast", "150ms cubic-bezier(0.4, 0, 0.2, 1)"),
    ("base", "200ms cubic-bezier(0.4, 0, 0.2, 1)"),
    ("slow", "300ms cubic-bezier(0.4, 0, 0.2, 1)"),
    ("slower", "500ms cubic-bezier(0.4, 0, 0.2, 1)"),
];

/// Complete set of scale tokens for one mode
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleTokens {
    groups: IndexMap<ScaleGroup, IndexMap<String, String>>,
}

impl ScaleTokens {
    /// Scale tokens for a color mode (only shadows differ between modes)
    pub fn for_mode(mode: ThemeMode) -> Self {
        let table = |rows: &[(&str, &str)]| -> IndexMap<String, String> {
            rows.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        let mut groups = IndexMap::new();
        groups.insert(ScaleGroup::Spacing, table(SPACING));
        groups.insert(ScaleGroup::FontFamily, table(FONT_FAMILY));
        groups.insert(ScaleGroup::FontSize, table(FONT_SIZE));
        groups.insert(ScaleGroup::FontWeight, table(FONT_WEIGHT));
        groups.insert(ScaleGroup::LineHeight, table(LINE_HEIGHT));
        groups.insert(ScaleGroup::Radius, table(RADIUS));
        groups.insert(
            ScaleGroup::Shadow,
            shadows(mode)
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        );
        groups.insert(ScaleGroup::Transition, table(TRANSITION));
        Self { groups }
    }

    /// Get a token value by group and key
    pub fn get(&self, group: ScaleGroup, key: &str) -> Option<&str> {
        self.groups
            .get(&group)
            .and_then(|g| g.get(key))
            .map(String::as_str)
    }

    /// All tokens of one group, in declaration order
    pub fn group(&self, group: ScaleGroup) -> impl Iterator<Item = (&str, &str)> {
        self.groups
            .get(&group)
            .into_iter()
            .flat_map(|g| g.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl Default for ScaleTokens {
    fn default() -> Self {
        Self::for_mode(ThemeMode::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_shadows_match_reference_strings() {
        let tokens = ScaleTokens::for_mode(ThemeMode::Light);
        assert_eq!(
            tokens.get(ScaleGroup::Shadow, "xs"),
            Some("0 1px 2px 0 rgb(0 0 0 / 0.05)")
        );
        assert_eq!(
            tokens.get(ScaleGroup::Shadow, "sm"),
            Some("0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)")
        );
        assert_eq!(
            tokens.get(ScaleGroup::Shadow, "inner"),
            Some("inset 0 2px 4px 0 rgb(0 0 0 / 0.05)")
        );
    }

    #[test]
    fn dark_shadows_are_heavier() {
        let tokens = ScaleTokens::for_mode(ThemeMode::Dark);
        assert_eq!(
            tokens.get(ScaleGroup::Shadow, "xs"),
            Some("0 1px 2px 0 rgb(0 0 0 / 0.15)")
        );
        assert_eq!(tokens.get(ScaleGroup::Spacing, "4"), Some("1rem"));
    }

    #[test]
    fn groups_iterate_in_order() {
        let tokens = ScaleTokens::default();
        let keys: Vec<&str> = tokens.group(ScaleGroup::LineHeight).map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["tight", "snug", "normal", "relaxed", "loose"]);
    }
}
