use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use celestial_theme::{
    to_variables, DocumentRoot, FileStore, ManagerConfig, MemoryStore, NullStore,
    PreferenceStore, SelectionSource, Theme, ThemeCategory, ThemeError, ThemeManager, ThemeMode,
    ThemeRegistry, DEFAULT_STORAGE_KEY,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn two_theme_registry() -> ThemeRegistry {
    ThemeRegistry::from_themes([
        (
            "a",
            Theme::new("A", ThemeMode::Light)
                .category(ThemeCategory::Celestial)
                .featured(true),
        ),
        (
            "b",
            Theme::new("B", ThemeMode::Dark)
                .category(ThemeCategory::Celestial)
                .featured(true),
        ),
    ])
    .unwrap()
}

fn manager_with(store: Arc<MemoryStore>, system: ThemeMode) -> ThemeManager {
    ThemeManager::builder(two_theme_registry())
        .config(ManagerConfig::default().default_theme("a"))
        .store(store)
        .system(system)
        .build()
        .unwrap()
}

/// Records every `(id, mode)` a subscriber sees
fn recorder(manager: &ThemeManager) -> (Arc<Mutex<Vec<(String, ThemeMode)>>>, celestial_theme::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let sub = manager.subscribe(move |id, theme| {
        sink.lock().unwrap().push((id.to_string(), theme.mode));
    });
    (seen, sub)
}

#[test]
fn toggle_scenario() {
    let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
    assert_eq!(manager.current_id(), "a");

    manager.toggle_mode().unwrap();
    assert_eq!(manager.current_id(), "b");

    manager.toggle_mode().unwrap();
    assert_eq!(manager.current_id(), "a");
}

#[test]
fn persisted_choice_beats_os_signal() {
    let store = Arc::new(MemoryStore::with_value(DEFAULT_STORAGE_KEY, "b"));
    let manager = manager_with(store, ThemeMode::Light);

    assert_eq!(manager.current_id(), "b");
    assert!(!manager.is_following_system());
    assert_eq!(manager.selection_source(), SelectionSource::Manual);
}

#[test]
fn stale_persisted_choice_is_ignored() {
    let store = Arc::new(MemoryStore::with_value(DEFAULT_STORAGE_KEY, "retired-theme"));
    let manager = manager_with(store, ThemeMode::Dark);

    assert_eq!(manager.current_id(), "b");
    assert!(manager.is_following_system());
}

#[test]
fn unavailable_storage_degrades_to_no_preference() {
    let manager = ThemeManager::builder(two_theme_registry())
        .store(NullStore)
        .system(ThemeMode::Dark)
        .build()
        .unwrap();
    assert_eq!(manager.current_id(), "b");

    manager.set_theme("a").unwrap();
    assert_eq!(manager.current_id(), "a");
    assert!(!manager.is_following_system());
    manager.reset_to_system_preference().unwrap();
    assert_eq!(manager.current_id(), "b");
}

#[test]
fn unknown_theme_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let manager = manager_with(store.clone(), ThemeMode::Light);
    let (seen, _sub) = recorder(&manager);

    assert_eq!(
        manager.set_theme("missing"),
        Err(ThemeError::UnknownTheme("missing".into()))
    );
    assert_eq!(manager.current_id(), "a");
    assert!(manager.is_following_system());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(store.get(DEFAULT_STORAGE_KEY), None);
}

#[test]
fn set_theme_notifies_each_subscriber_once() {
    let store = Arc::new(MemoryStore::new());
    let manager = manager_with(store.clone(), ThemeMode::Light);
    let (first, _a) = recorder(&manager);
    let (second, _b) = recorder(&manager);

    manager.set_theme("b").unwrap();

    assert_eq!(manager.current_id(), "b");
    assert!(!manager.is_following_system());
    assert_eq!(*first.lock().unwrap(), vec![("b".to_string(), ThemeMode::Dark)]);
    assert_eq!(*second.lock().unwrap(), vec![("b".to_string(), ThemeMode::Dark)]);
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).as_deref(), Some("b"));
}

#[test]
fn reselecting_active_theme_still_notifies() {
    let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
    let (seen, _sub) = recorder(&manager);

    manager.set_theme("a").unwrap();
    manager.set_theme("a").unwrap();
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn document_is_applied_before_subscribers_run() {
    let root = DocumentRoot::shared();
    let manager = ThemeManager::builder(two_theme_registry())
        .system(ThemeMode::Light)
        .document(root.clone())
        .build()
        .unwrap();
    assert!(root.lock().unwrap().has_class("cui-light"));
    assert!(root.lock().unwrap().has_class("cui-theme-a"));

    let observed = Arc::new(Mutex::new(None));
    let (seen_root, sink) = (root.clone(), observed.clone());
    let _sub = manager.subscribe(move |id, _| {
        let root = seen_root.lock().unwrap();
        *sink.lock().unwrap() = Some((id.to_string(), root.has_class(&format!("cui-theme-{id}"))));
    });

    manager.set_theme("b").unwrap();
    assert_eq!(*observed.lock().unwrap(), Some(("b".to_string(), true)));
    let root = root.lock().unwrap();
    assert!(root.has_class("cui-dark"));
    assert!(!root.has_class("cui-light"));
    assert!(!root.has_class("cui-theme-a"));
}

#[test]
fn os_changes_follow_only_without_manual_choice() {
    let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
    let (seen, _sub) = recorder(&manager);

    manager.on_system_scheme_changed(true);
    assert_eq!(manager.current_id(), "b");

    manager.set_theme("a").unwrap();
    manager.on_system_scheme_changed(false);
    manager.on_system_scheme_changed(true);
    assert_eq!(manager.current_id(), "a");
    assert!(manager.system_prefers_dark());
    assert!(!manager.current_matches_system());

    manager.reset_to_system_preference().unwrap();
    assert_eq!(manager.current_id(), "b");
    assert!(manager.is_following_system());

    manager.on_system_scheme_changed(false);
    assert_eq!(manager.current_id(), "a");
    assert_eq!(seen.lock().unwrap().len(), 4);
}

#[test]
fn reset_clears_persisted_choice() {
    let store = Arc::new(MemoryStore::new());
    let manager = manager_with(store.clone(), ThemeMode::Light);
    manager.set_theme("b").unwrap();
    assert!(store.get(DEFAULT_STORAGE_KEY).is_some());

    manager.reset_to_system_preference().unwrap();
    assert_eq!(store.get(DEFAULT_STORAGE_KEY), None);
    assert_eq!(manager.current_id(), "a");
}

#[test]
fn reset_without_theme_for_os_mode_still_follows_system() {
    let store = Arc::new(MemoryStore::new());
    let manager = ThemeManager::builder(
        ThemeRegistry::from_themes([("only", Theme::new("Only", ThemeMode::Light))]).unwrap(),
    )
    .store(store.clone())
    .system(ThemeMode::Dark)
    .build()
    .unwrap();

    manager.set_theme("only").unwrap();
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).as_deref(), Some("only"));
    assert!(!manager.is_following_system());

    assert_eq!(
        manager.reset_to_system_preference(),
        Err(ThemeError::NoThemeForMode(ThemeMode::Dark))
    );
    assert_eq!(store.get(DEFAULT_STORAGE_KEY), None);
    assert!(manager.is_following_system());
    assert_eq!(manager.selection_source(), SelectionSource::SystemFollowing);
    assert_eq!(manager.current_id(), "only");
}

#[test]
fn detection_off_ignores_os_changes() {
    let manager = ThemeManager::builder(two_theme_registry())
        .config(ManagerConfig::default().auto_detect(false).default_theme("a"))
        .system(ThemeMode::Dark)
        .build()
        .unwrap();
    assert_eq!(manager.current_id(), "a");

    manager.on_system_scheme_changed(true);
    assert_eq!(manager.current_id(), "a");
    assert!(manager.system_prefers_dark());
}

#[test]
fn persistence_off_still_tracks_selection() {
    let store = Arc::new(MemoryStore::with_value(DEFAULT_STORAGE_KEY, "b"));
    let manager = ThemeManager::builder(two_theme_registry())
        .config(ManagerConfig::default().persist(false))
        .store(store.clone())
        .system(ThemeMode::Light)
        .build()
        .unwrap();
    assert_eq!(manager.current_id(), "a");

    manager.set_theme("b").unwrap();
    assert_eq!(manager.current_id(), "b");
    assert!(!manager.is_following_system());

    store.remove(DEFAULT_STORAGE_KEY).unwrap();
    manager.set_theme("a").unwrap();
    assert_eq!(store.get(DEFAULT_STORAGE_KEY), None);
}

#[test]
fn toggle_without_opposite_mode_is_a_no_op() {
    let registry = ThemeRegistry::from_themes([("only", Theme::new("Only", ThemeMode::Light))])
        .unwrap();
    let manager = ThemeManager::builder(registry)
        .system(ThemeMode::Dark)
        .build()
        .unwrap();
    let (seen, _sub) = recorder(&manager);

    assert_eq!(manager.current_id(), "only");
    assert_eq!(
        manager.toggle_mode(),
        Err(ThemeError::NoThemeForMode(ThemeMode::Dark))
    );
    assert_eq!(manager.current_id(), "only");
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn unsubscribed_callback_hears_nothing_more() {
    let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
    let (gone, sub) = recorder(&manager);
    let (kept, _keep) = recorder(&manager);

    manager.set_theme("b").unwrap();
    sub.unsubscribe();
    sub.unsubscribe();
    manager.set_theme("a").unwrap();

    assert_eq!(gone.lock().unwrap().len(), 1);
    assert_eq!(kept.lock().unwrap().len(), 2);
    assert_eq!(manager.subscriber_count(), 1);
}

#[test]
fn subscriber_may_call_back_into_manager() {
    let manager = Arc::new(manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light));
    let hits = Arc::new(AtomicUsize::new(0));

    let (m, h) = (Arc::downgrade(&manager), hits.clone());
    let _sub = manager.subscribe(move |id, _| {
        h.fetch_add(1, Ordering::SeqCst);
        if let Some(m) = m.upgrade() {
            assert_eq!(m.current_id(), id);
            if id == "b" {
                m.set_theme("a").unwrap();
            }
        }
    });

    manager.set_theme("b").unwrap();
    assert_eq!(manager.current_id(), "a");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn panicking_subscriber_is_contained() {
    let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
    let _bad = manager.subscribe(|_, _| panic!("subscriber failure"));
    let (seen, _sub) = recorder(&manager);

    manager.set_theme("b").unwrap();
    assert_eq!(manager.current_id(), "b");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn preview_leaves_selection_alone() {
    let root = DocumentRoot::shared();
    let store = Arc::new(MemoryStore::new());
    let manager = ThemeManager::builder(two_theme_registry())
        .store(store.clone())
        .system(ThemeMode::Light)
        .document(root.clone())
        .build()
        .unwrap();
    let (seen, _sub) = recorder(&manager);

    manager.preview_theme("b").unwrap();
    assert!(root.lock().unwrap().has_class("cui-theme-b"));
    assert_eq!(manager.current_id(), "a");
    assert_eq!(manager.previewing().as_deref(), Some("b"));

    manager.end_preview();
    assert!(root.lock().unwrap().has_class("cui-theme-a"));
    assert_eq!(manager.previewing(), None);

    manager.preview_theme("b").unwrap();
    manager.commit_preview().unwrap();
    assert_eq!(manager.current_id(), "b");
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).as_deref(), Some("b"));
    assert_eq!(seen.lock().unwrap().len(), 1);

    assert!(manager.preview_theme("nope").is_err());
}

#[test]
fn shutdown_detaches_everything() {
    let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
    let (seen, _sub) = recorder(&manager);

    manager.shutdown();
    assert_eq!(manager.subscriber_count(), 0);

    manager.on_system_scheme_changed(true);
    assert_eq!(manager.current_id(), "a");
    assert!(!manager.system_prefers_dark());

    manager.set_theme("b").unwrap();
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn file_backed_choice_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let first = ThemeManager::builder(ThemeRegistry::builtin().unwrap())
        .store(FileStore::new(&path))
        .system(ThemeMode::Light)
        .build()
        .unwrap();
    assert_eq!(first.current_id(), "celestial-ocean");
    first.set_theme("nebula-dream").unwrap();
    drop(first);

    let second = ThemeManager::builder(ThemeRegistry::builtin().unwrap())
        .store(FileStore::new(&path))
        .system(ThemeMode::Light)
        .build()
        .unwrap();
    assert_eq!(second.current_id(), "nebula-dream");
    assert!(!second.is_following_system());
    assert!(second.is_current("nebula-dream"));
}

#[test]
fn choice_saved_over_corrupt_file_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, r#"{"cui-theme-preference": "nebula-d"#).unwrap();

    let first = ThemeManager::builder(ThemeRegistry::builtin().unwrap())
        .store(FileStore::new(&path))
        .system(ThemeMode::Light)
        .build()
        .unwrap();
    assert!(first.is_following_system());
    first.set_theme("nebula-dream").unwrap();
    drop(first);

    let second = ThemeManager::builder(ThemeRegistry::builtin().unwrap())
        .store(FileStore::new(&path))
        .system(ThemeMode::Light)
        .build()
        .unwrap();
    assert_eq!(second.current_id(), "nebula-dream");
    assert!(!second.is_following_system());
}

#[test]
fn builtin_manager_variables_match_current_theme() {
    let manager = ThemeManager::builder(ThemeRegistry::builtin().unwrap())
        .system(ThemeMode::Dark)
        .build()
        .unwrap();
    assert_eq!(manager.current_id(), "starlit-night");
    assert_eq!(manager.variables(), to_variables(&manager.current()));
}

proptest! {
    #[test]
    fn variables_are_deterministic_and_total(
        shades in prop::collection::vec(("[a-z0-9]{1,4}", "#[0-9a-f]{6}"), 1..12)
    ) {
        let palette: celestial_theme::Palette = shades.into_iter().collect();
        let theme = Theme::new("Generated", ThemeMode::Light).colors(
            celestial_theme::ColorBundle::new()
                .with_channel(celestial_theme::Channel::Primary, palette.clone()),
        );

        let first = to_variables(&theme);
        prop_assert_eq!(&first, &to_variables(&theme));
        for (shade, value) in &palette {
            let name = format!("--cui-color-primary-{shade}");
            prop_assert_eq!(first.get(&name), Some(value.as_str()));
        }
    }

    #[test]
    fn current_id_always_resolves(ops in prop::collection::vec(0u8..6, 0..24)) {
        let manager = manager_with(Arc::new(MemoryStore::new()), ThemeMode::Light);
        for op in ops {
            let _ = match op {
                0 => manager.set_theme("a"),
                1 => manager.set_theme("b"),
                2 => manager.set_theme("unknown"),
                3 => manager.toggle_mode(),
                4 => manager.reset_to_system_preference(),
                _ => {
                    manager.on_system_scheme_changed(!manager.system_prefers_dark());
                    Ok(())
                }
            };
            prop_assert!(manager.registry().contains(&manager.current_id()));
            prop_assert_eq!(manager.current().name.to_lowercase(), manager.current_id());
        }
    }
}
