use celestial_theme::{
    synthesize, to_variables, Channel, SynthesisOptions, ThemeCategory, ThemeMode, ThemePreset,
    ThemeRegistry,
};

#[test]
fn preset_catalog_contains_expected_presets() {
    let registry = ThemeRegistry::builtin().unwrap();
    let ids: Vec<&str> = registry.ids().collect();
    let presets: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    assert_eq!(ids, presets);
    assert_eq!(ids.len(), 6);
}

#[test]
fn preset_names_match_catalog() {
    let registry = ThemeRegistry::builtin().unwrap();
    for preset in ThemePreset::all() {
        let theme = registry.get(preset.id()).unwrap();
        assert_eq!(
            theme.name,
            preset.display_name(),
            "Preset {:?} should carry its display name",
            preset
        );
    }
}

#[test]
fn every_builtin_theme_declares_every_channel() {
    let registry = ThemeRegistry::builtin().unwrap();
    for (id, theme) in registry.all() {
        assert!(
            theme.colors.missing_channels().is_empty(),
            "Theme {} is missing {:?}",
            id,
            theme.colors.missing_channels()
        );
    }
}

#[test]
fn featured_celestial_themes_exist_for_both_modes() {
    let registry = ThemeRegistry::builtin().unwrap();
    assert_eq!(registry.best_for_mode(ThemeMode::Light), Some("celestial-ocean"));
    assert_eq!(registry.best_for_mode(ThemeMode::Dark), Some("starlit-night"));
    assert_eq!(registry.by_category(&ThemeCategory::Celestial).count(), 4);
    assert_eq!(registry.featured().count(), 4);
}

#[test]
fn variables_cover_every_declared_shade() {
    let registry = ThemeRegistry::builtin().unwrap();
    for (id, theme) in registry.all() {
        let vars = to_variables(theme);
        for channel in Channel::ALL {
            for (shade, value) in theme.colors.channel(channel) {
                let name = format!("--cui-color-{}-{}", channel.key(), shade);
                assert_eq!(
                    vars.get(&name),
                    Some(value.as_str()),
                    "Theme {} should emit {}",
                    id,
                    name
                );
            }
        }
    }
}

#[test]
fn full_synthesis_keeps_declared_values() {
    let registry = ThemeRegistry::builtin().unwrap();
    let ocean = registry.get("celestial-ocean").unwrap();
    let colors = synthesize(ocean, SynthesisOptions::COLORS);
    let full = synthesize(ocean, SynthesisOptions::FULL);

    assert!(full.len() > colors.len());
    for (name, value) in colors.iter() {
        assert_eq!(full.get(name), Some(value));
    }
    assert_eq!(full.get("--cui-radius-md"), Some("0.5rem"));
}

#[test]
fn catalog_reserializes_to_an_equal_registry() {
    let registry = ThemeRegistry::builtin().unwrap();
    let again = ThemeRegistry::from_json_str(&registry.to_json().unwrap()).unwrap();
    let ids: Vec<&str> = again.ids().collect();
    assert_eq!(ids, registry.ids().collect::<Vec<_>>());
    for (id, theme) in registry.all() {
        assert_eq!(again.get(id).unwrap().as_ref(), theme.as_ref());
    }
}
