//! Instance-scoped style sheets.
//!
//! Each mounted widget registers one resolved style sheet under a freshly
//! generated random id, so concurrently mounted instances never collide.
//! Sheets are removed again on teardown.

use std::collections::HashMap;

use ratatui::style::{Modifier, Style};
use uuid::Uuid;

use crate::config::WidgetConfig;
use crate::models::RgbColor;

/// Identifier of an injected style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(Uuid);

/// Resolved styles for every visual role of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Background fill of the whole container
    pub container: Style,
    /// Headline style
    pub title: Style,
    /// Subtitle style
    pub subtitle: Style,
    /// Description paragraph style
    pub description: Style,
    /// Hashtag style
    pub hashtag: Style,
    /// Unit label style
    pub label: Style,
    /// Digit face style (panel text on panel background)
    pub digit: Style,
    /// Dimmed digit face used by the flip transition halves
    pub digit_dim: Style,
    /// Flip panel chrome rows
    pub chrome: Style,
    /// Call-to-action button style
    pub cta: Style,
    /// Call-to-action URL style
    pub cta_url: Style,
    /// Flip engine credits footer style
    pub credits: Style,
    /// Suppresses the flip engine's credits footer
    pub credits_hidden: bool,
}

impl StyleSheet {
    /// Resolves a config's palette into concrete styles.
    ///
    /// Widget sheets always suppress the flip engine's credits footer; the
    /// engine would inject it otherwise.
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        let palette = &config.palette;
        let on_container =
            |color: RgbColor| Style::default().fg(color.to_color()).bg(palette.container_background.to_color());

        Self {
            container: Style::default().bg(palette.container_background.to_color()),
            title: on_container(palette.title).add_modifier(Modifier::BOLD),
            subtitle: on_container(palette.subtitle).add_modifier(Modifier::BOLD),
            description: on_container(palette.description),
            hashtag: on_container(palette.hashtag).add_modifier(Modifier::BOLD),
            label: on_container(palette.labels),
            digit: Style::default()
                .fg(palette.panel_text.to_color())
                .bg(palette.panel_background.to_color())
                .add_modifier(Modifier::BOLD),
            digit_dim: Style::default()
                .fg(palette.panel_text.dim(55).to_color())
                .bg(palette.panel_background.dim(55).to_color()),
            chrome: Style::default()
                .fg(palette.panel_text.dim(40).to_color())
                .bg(palette.panel_background.to_color()),
            cta: Style::default()
                .fg(palette.container_background.to_color())
                .bg(palette.title.to_color())
                .add_modifier(Modifier::BOLD),
            cta_url: on_container(palette.description).add_modifier(Modifier::UNDERLINED),
            credits: on_container(palette.labels).add_modifier(Modifier::ITALIC),
            credits_hidden: true,
        }
    }
}

/// Registry of live style sheets keyed by random ids.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    sheets: HashMap<StyleId, StyleSheet>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sheet under a fresh random id.
    pub fn insert(&mut self, sheet: StyleSheet) -> StyleId {
        let id = StyleId(Uuid::new_v4());
        self.sheets.insert(id, sheet);
        id
    }

    /// Looks up a registered sheet.
    #[must_use]
    pub fn get(&self, id: StyleId) -> Option<&StyleSheet> {
        self.sheets.get(&id)
    }

    /// Removes a sheet; `None` when it was already gone.
    pub fn remove(&mut self, id: StyleId) -> Option<StyleSheet> {
        self.sheets.remove(&id)
    }

    /// Number of registered sheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns true when no sheets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WidgetConfig, WidgetOptions};

    #[test]
    fn test_ids_never_collide() {
        let mut registry = StyleRegistry::new();
        let config = WidgetConfig::default();
        let a = registry.insert(StyleSheet::from_config(&config));
        let b = registry.insert(StyleSheet::from_config(&config));

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(a).is_some());
        assert!(registry.get(b).is_some());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = StyleRegistry::new();
        let id = registry.insert(StyleSheet::from_config(&WidgetConfig::default()));

        assert!(registry.remove(id).is_some());
        assert!(registry.remove(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_sheet_hides_credits() {
        let sheet = StyleSheet::from_config(&WidgetConfig::default());
        assert!(sheet.credits_hidden);
    }

    #[test]
    fn test_sheet_follows_palette() {
        let options = WidgetOptions {
            theme: Some("dark".to_string()),
            ..WidgetOptions::default()
        };
        let config = WidgetConfig::resolve(&options);
        let sheet = StyleSheet::from_config(&config);

        assert_eq!(
            sheet.container,
            Style::default().bg(config.palette.container_background.to_color())
        );
        assert_ne!(sheet.digit, sheet.digit_dim);
    }
}
