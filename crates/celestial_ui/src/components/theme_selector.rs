//! Theme picker over a [`ThemeManager`]
//!
//! Renders one preview card per catalog theme, optionally grouped by mode,
//! plus mode and system-preference controls. Every action goes through the
//! manager, so the picker never holds its own notion of the active theme.

use std::sync::Arc;

use celestial_theme::{Channel, Theme, ThemeCategory, ThemeError, ThemeManager, ThemeMode};

use crate::component::{Component, Size};
use crate::components::button::{Button, ButtonConfig, ButtonVariant};
use crate::components::card::card;
use crate::markup::{div, el, Element};

/// Which part of the catalog is listed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    Celestial,
    Default,
    All,
}

impl CategoryFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::Celestial => "Celestial",
            Self::Default => "Default",
            Self::All => "All",
        }
    }

    fn accepts(self, category: &ThemeCategory) -> bool {
        match self {
            Self::Celestial => *category == ThemeCategory::Celestial,
            Self::Default => *category == ThemeCategory::Default,
            Self::All => true,
        }
    }
}

/// Shade 400 if present, else 500
fn accent(theme: &Theme, channel: Channel) -> String {
    theme
        .colors
        .color(channel, "400")
        .or_else(|| theme.colors.color(channel, "500"))
        .unwrap_or_default()
        .to_string()
}

fn swatch(theme: &Theme, channel: Channel, shade: &str) -> String {
    theme.colors.color(channel, shade).unwrap_or_default().to_string()
}

/// Preview card for one theme
pub fn theme_preview(id: &str, theme: &Theme, active: bool) -> Element {
    let mode_icon = if theme.mode.is_dark() { "moon" } else { "sun" };

    let colors = div()
        .class("theme-preview-colors")
        .child(
            div()
                .class("theme-preview-color theme-preview-color--primary")
                .style("background-color", accent(theme, Channel::Primary)),
        )
        .child(
            div()
                .class("theme-preview-color theme-preview-color--secondary")
                .style("background-color", accent(theme, Channel::Secondary)),
        )
        .child(
            div()
                .class("theme-preview-color theme-preview-color--accent")
                .style("background-color", accent(theme, Channel::Success)),
        );

    let header = div().class("theme-preview-header").child(colors).child(
        div()
            .class(format!("theme-mode-indicator theme-mode-indicator--{}", theme.mode.as_str()))
            .child(crate::components::icon::icon(mode_icon).render()),
    );

    let mut name = el("h3").class("theme-preview-name").child(theme.name.as_str());
    if theme.featured {
        name = name.child(el("span").class("theme-featured-badge").child("featured"));
    }
    let details = div()
        .class("theme-preview-details")
        .child(name)
        .child(el("p").class("theme-preview-description").child(theme.description.as_str()))
        .child_opt(active.then(|| {
            div()
                .class("theme-preview-status")
                .child(el("span").class("theme-active-indicator").child("Active"))
        }));

    let mockup = div().class("theme-preview-mockup").child(
        div()
            .class("mockup-background")
            .style("background-color", swatch(theme, Channel::Background, "base"))
            .child(
                div()
                    .class("mockup-surface")
                    .style("background-color", swatch(theme, Channel::Background, "surface"))
                    .child(
                        div()
                            .class("mockup-primary")
                            .style("background-color", swatch(theme, Channel::Primary, "500")),
                    )
                    .child(
                        div()
                            .class("mockup-text mockup-text--primary")
                            .style("background-color", swatch(theme, Channel::Text, "primary")),
                    )
                    .child(
                        div()
                            .class("mockup-text mockup-text--secondary")
                            .style("background-color", swatch(theme, Channel::Text, "secondary")),
                    ),
            ),
    );

    card()
        .class_name(if active {
            "theme-preview theme-preview--active"
        } else {
            "theme-preview"
        })
        .elevation(if active { 3 } else { 1 })
        .hoverable(true)
        .clickable(true)
        .style("--preview-primary", accent(theme, Channel::Primary))
        .style("--preview-secondary", accent(theme, Channel::Secondary))
        .style("--preview-background", swatch(theme, Channel::Background, "base"))
        .style("--preview-surface", swatch(theme, Channel::Background, "surface"))
        .style("--preview-text", swatch(theme, Channel::Text, "primary"))
        .style("--preview-muted", swatch(theme, Channel::Text, "muted"))
        .style("--preview-border", swatch(theme, Channel::Border, "base"))
        .child(header)
        .child(div().class("theme-preview-content").child(mockup).child(details))
        .render()
        .attr("data-theme-id", id)
}

/// Theme selector component
#[derive(Clone, Debug)]
pub struct ThemeSelector {
    manager: Arc<ThemeManager>,
    category: CategoryFilter,
    show_only_featured: bool,
    group_by_mode: bool,
    show_system_preference: bool,
}

impl ThemeSelector {
    pub fn new(manager: Arc<ThemeManager>) -> Self {
        Self {
            manager,
            category: CategoryFilter::default(),
            show_only_featured: false,
            group_by_mode: true,
            show_system_preference: true,
        }
    }

    pub fn show_only_featured(mut self, featured: bool) -> Self {
        self.show_only_featured = featured;
        self
    }

    pub fn group_by_mode(mut self, group: bool) -> Self {
        self.group_by_mode = group;
        self
    }

    pub fn show_system_preference(mut self, show: bool) -> Self {
        self.show_system_preference = show;
        self
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Themes listed under the current filter, in catalog order
    pub fn themes_to_show(&self) -> Vec<(String, Arc<Theme>)> {
        self.manager
            .registry()
            .all()
            .filter(|(_, t)| {
                if self.show_only_featured {
                    t.featured
                } else {
                    self.category.accepts(&t.category)
                }
            })
            .map(|(id, t)| (id.to_string(), Arc::clone(t)))
            .collect()
    }

    pub fn select(&self, id: &str) -> Result<(), ThemeError> {
        self.manager.set_theme(id)
    }

    pub fn toggle_mode(&self) -> Result<(), ThemeError> {
        self.manager.toggle_mode()
    }

    pub fn use_system(&self) -> Result<(), ThemeError> {
        self.manager.reset_to_system_preference()
    }

    fn grid(&self, themes: &[(String, Arc<Theme>)]) -> Element {
        div().class("theme-grid").children(
            themes
                .iter()
                .map(|(id, t)| theme_preview(id, t, self.manager.is_current(id))),
        )
    }

    fn group(&self, mode: ThemeMode, themes: &[(String, Arc<Theme>)]) -> Option<Element> {
        let of_mode: Vec<_> = themes.iter().filter(|(_, t)| t.mode == mode).cloned().collect();
        if of_mode.is_empty() {
            return None;
        }
        let title = if mode.is_dark() { "Dark Themes" } else { "Light Themes" };
        Some(
            div()
                .class("theme-group")
                .attr("data-mode", mode.as_str())
                .child(
                    el("h3")
                        .class("theme-group-title")
                        .child(title)
                        .child(el("span").class("theme-count").child(format!("({})", of_mode.len()))),
                )
                .child(self.grid(&of_mode)),
        )
    }

    fn controls(&self) -> Element {
        let mut controls = div().class("theme-selector-controls");

        if !self.show_only_featured {
            let filters = [CategoryFilter::Celestial, CategoryFilter::Default, CategoryFilter::All]
                .into_iter()
                .map(|filter| {
                    let variant = if filter == self.category {
                        ButtonVariant::Primary
                    } else {
                        ButtonVariant::Ghost
                    };
                    Button::with_config(ButtonConfig::new(filter.label()).variant(variant).size(Size::Sm))
                        .render()
                });
            controls = controls.child(div().class("theme-category-filter").children(filters));
        }

        let mode_icon = if self.manager.system_prefers_dark() { "sun" } else { "moon" };
        let mut actions = div().class("theme-quick-actions").child(
            Button::with_config(
                ButtonConfig::new("Switch Mode")
                    .variant(ButtonVariant::Ghost)
                    .size(Size::Sm)
                    .left_icon(mode_icon),
            )
            .render(),
        );
        if self.show_system_preference {
            let following = self.manager.is_following_system();
            let label = if following { "Following System" } else { "Use System" };
            actions = actions.child(
                Button::with_config(
                    ButtonConfig::new(label)
                        .variant(if following {
                            ButtonVariant::Primary
                        } else {
                            ButtonVariant::Outline
                        })
                        .size(Size::Sm)
                        .left_icon("sync")
                        .disabled(following && self.manager.current_matches_system()),
                )
                .render(),
            );
        }
        controls.child(actions)
    }

    fn system_status(&self) -> Element {
        let dark = self.manager.system_prefers_dark();
        let mut info = div().class("system-status-info").child(
            el("span")
                .class("system-status-label")
                .child(format!("System Preference: {} Mode", if dark { "Dark" } else { "Light" })),
        );
        if !self.manager.is_following_system() {
            info = info.child(
                el("span")
                    .class("system-status-note")
                    .child("You have manually selected a theme"),
            );
        }
        let mismatch = (!self.manager.current_matches_system()).then(|| {
            div().class("system-status-mismatch").child(
                el("span")
                    .class("status-warning")
                    .child("Current theme doesn't match system preference"),
            )
        });

        card()
            .class_name("theme-system-status")
            .child(div().class("system-status-content").child(info).child_opt(mismatch))
            .render()
    }
}

impl Component for ThemeSelector {
    const NAME: &'static str = "theme-selector";

    fn render(&self) -> Element {
        let themes = self.themes_to_show();

        let content = if self.group_by_mode {
            div()
                .class("theme-groups")
                .child_opt(self.group(ThemeMode::Light, &themes))
                .child_opt(self.group(ThemeMode::Dark, &themes))
        } else {
            self.grid(&themes)
        };

        div()
            .class("theme-selector")
            .attr("data-current-theme", self.manager.current_id())
            .child(
                div()
                    .class("theme-selector-header")
                    .child(
                        div()
                            .class("theme-selector-title")
                            .child(el("h2").child("Choose Your Theme")),
                    )
                    .child(self.controls()),
            )
            .child_opt(self.show_system_preference.then(|| self.system_status()))
            .child(div().class("theme-selector-content").child(content))
    }
}
