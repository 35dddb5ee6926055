//! Derived design-system variables
//!
//! From each channel's base shade, generate:
//! - opacity variants: `--cui-color-{channel}-alpha-{pct}` as `rgba(...)`
//! - tone variants: `--cui-color-{channel}-tone-{light|lighter|dark|darker}`
//! - state variants: `--cui-color-{channel}-state-{hover|active|focus|disabled}`
//!
//! Base colors that are not plain hex/rgb are passed through unchanged for
//! every variant.

use crate::css::{color_variable, CssVariables};
use crate::theme::{Theme, ThemeMode};
use crate::tokens::{Palette, Rgb};

/// Opacity steps, in percent
pub const OPACITY_STEPS: [u8; 10] = [5, 10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Tone name -> brightness adjustment
pub const TONES: [(&str, i16); 4] = [("light", 20), ("lighter", 40), ("dark", -20), ("darker", -40)];

/// Shade keys tried, in order, when picking a channel's base color
const BASE_SHADES: [&str; 4] = ["500", "400", "base", "primary"];

/// Base color of a palette: the first of the preferred shade keys, else the
/// first declared shade.
pub fn base_color(palette: &Palette) -> Option<&str> {
    BASE_SHADES
        .iter()
        .find_map(|k| palette.get(*k))
        .or_else(|| palette.values().next())
        .map(String::as_str)
}

#[derive(Clone, Copy)]
enum Variant {
    Tone(i16),
    Alpha(f32),
}

/// State name -> variant, per mode. Hover/active move away from the
/// background: darker on light themes, lighter on dark ones.
fn states(mode: ThemeMode) -> [(&'static str, Variant); 4] {
    let dir: i16 = match mode {
        ThemeMode::Light => -1,
        ThemeMode::Dark => 1,
    };
    [
        ("hover", Variant::Tone(10 * dir)),
        ("active", Variant::Tone(20 * dir)),
        ("focus", Variant::Alpha(0.25)),
        ("disabled", Variant::Alpha(0.5)),
    ]
}

fn render(base: &str, parsed: Option<Rgb>, variant: Variant) -> String {
    match (parsed, variant) {
        (Some(c), Variant::Tone(amount)) => c.adjust_brightness(amount).to_string(),
        (Some(c), Variant::Alpha(alpha)) => c.rgba(alpha),
        (None, _) => base.to_string(),
    }
}

/// Derived variables for every required channel of a theme
pub fn derived_variables(theme: &Theme) -> CssVariables {
    let mut vars = CssVariables::new();

    for (channel, palette) in theme.colors.channels() {
        let Some(base) = base_color(palette) else {
            continue;
        };
        let parsed = Rgb::parse(base);
        let name = |suffix: String| color_variable(channel.key(), &suffix);

        for pct in OPACITY_STEPS {
            vars.insert(
                name(format!("alpha-{pct}")),
                render(base, parsed, Variant::Alpha(pct as f32 / 100.0)),
            );
        }

        for (tone, amount) in TONES {
            vars.insert(
                name(format!("tone-{tone}")),
                render(base, parsed, Variant::Tone(amount)),
            );
        }

        for (state, variant) in states(theme.mode) {
            vars.insert(name(format!("state-{state}")), render(base, parsed, variant));
        }
    }

    vars
}
