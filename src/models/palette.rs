//! Theme palettes for widget styling.
//!
//! A palette assigns a color to every visual role of the widget. Three
//! built-in palettes ship with the crate; the `auto` name resolves to the
//! dark or light palette based on the OS theme.

use serde::{Deserialize, Serialize};

use crate::models::RgbColor;

/// Named set of color roles used to style one widget instance.
///
/// Immutable per theme name; caller overrides are merged field-by-field
/// with [`ThemePalette::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    /// Background of each digit/flip panel
    pub panel_background: RgbColor,
    /// Digit color inside each panel
    pub panel_text: RgbColor,
    /// Headline color
    pub title: RgbColor,
    /// Subtitle color
    pub subtitle: RgbColor,
    /// Campaign paragraph color
    pub description: RgbColor,
    /// Hashtag color
    pub hashtag: RgbColor,
    /// Unit label color (DAYS/HOURS/MINUTES/SECONDS)
    pub labels: RgbColor,
    /// Background of the whole widget container
    pub container_background: RgbColor,
}

impl ThemePalette {
    /// Creates the gray palette, the default theme.
    #[must_use]
    pub const fn gray() -> Self {
        Self {
            panel_background: RgbColor::new(0x3d, 0x3d, 0x3d),
            panel_text: RgbColor::new(0xff, 0xff, 0xff),
            title: RgbColor::new(0x3d, 0x3d, 0x3d),
            subtitle: RgbColor::new(0x55, 0x55, 0x55),
            description: RgbColor::new(0x55, 0x55, 0x55),
            hashtag: RgbColor::new(0x3d, 0x3d, 0x3d),
            labels: RgbColor::new(0x88, 0x88, 0x88),
            container_background: RgbColor::new(0xf0, 0xf0, 0xf0),
        }
    }

    /// Creates the dark palette for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            panel_background: RgbColor::new(0x1a, 0x1a, 0x1a),
            panel_text: RgbColor::new(0xff, 0xff, 0xff),
            title: RgbColor::new(0xff, 0xff, 0xff),
            subtitle: RgbColor::new(0xcc, 0xcc, 0xcc),
            description: RgbColor::new(0xaa, 0xaa, 0xaa),
            hashtag: RgbColor::new(0xff, 0xff, 0xff),
            labels: RgbColor::new(0x88, 0x88, 0x88),
            container_background: RgbColor::new(0x2d, 0x2d, 0x2d),
        }
    }

    /// Creates the light palette for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            panel_background: RgbColor::new(0xff, 0xff, 0xff),
            panel_text: RgbColor::new(0x2d, 0x2d, 0x2d),
            title: RgbColor::new(0x2d, 0x2d, 0x2d),
            subtitle: RgbColor::new(0x55, 0x55, 0x55),
            description: RgbColor::new(0x66, 0x66, 0x66),
            hashtag: RgbColor::new(0x2d, 0x2d, 0x2d),
            labels: RgbColor::new(0x99, 0x99, 0x99),
            container_background: RgbColor::new(0xff, 0xff, 0xff),
        }
    }

    /// Detects the OS theme and returns the dark or light palette.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            dark_light::Mode::Light => Self::light(),
            dark_light::Mode::Dark | dark_light::Mode::Default => Self::dark(),
        }
    }

    /// Looks up a built-in palette by theme name.
    ///
    /// Returns `None` for unknown names; callers decide the fallback.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "gray" => Some(Self::gray()),
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "auto" => Some(Self::detect()),
            _ => None,
        }
    }

    /// Returns a copy with any caller-supplied color roles applied on top.
    ///
    /// Merging is field-by-field: a supplied value wins for its role,
    /// unspecified roles keep the palette's value.
    #[must_use]
    pub fn merge(self, overrides: &PaletteOverrides) -> Self {
        Self {
            panel_background: overrides.panel_background.unwrap_or(self.panel_background),
            panel_text: overrides.panel_text.unwrap_or(self.panel_text),
            title: overrides.title.unwrap_or(self.title),
            subtitle: overrides.subtitle.unwrap_or(self.subtitle),
            description: overrides.description.unwrap_or(self.description),
            hashtag: overrides.hashtag.unwrap_or(self.hashtag),
            labels: overrides.labels.unwrap_or(self.labels),
            container_background: overrides
                .container_background
                .unwrap_or(self.container_background),
        }
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::gray()
    }
}

/// Caller-supplied per-role color overrides.
///
/// Every field is optional; hex strings in option files deserialize into
/// [`RgbColor`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    /// Overrides the panel background role
    pub panel_background: Option<RgbColor>,
    /// Overrides the panel text role
    pub panel_text: Option<RgbColor>,
    /// Overrides the title role
    pub title: Option<RgbColor>,
    /// Overrides the subtitle role
    pub subtitle: Option<RgbColor>,
    /// Overrides the description role
    pub description: Option<RgbColor>,
    /// Overrides the hashtag role
    pub hashtag: Option<RgbColor>,
    /// Overrides the unit label role
    pub labels: Option<RgbColor>,
    /// Overrides the container background role
    pub container_background: Option<RgbColor>,
}

impl PaletteOverrides {
    /// Combines two override sets field-wise; `self` wins per role.
    #[must_use]
    pub fn overlay(self, base: Self) -> Self {
        Self {
            panel_background: self.panel_background.or(base.panel_background),
            panel_text: self.panel_text.or(base.panel_text),
            title: self.title.or(base.title),
            subtitle: self.subtitle.or(base.subtitle),
            description: self.description.or(base.description),
            hashtag: self.hashtag.or(base.hashtag),
            labels: self.labels.or(base.labels),
            container_background: self.container_background.or(base.container_background),
        }
    }

    /// Returns true when no role is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.panel_background.is_none()
            && self.panel_text.is_none()
            && self.title.is_none()
            && self.subtitle.is_none()
            && self.description.is_none()
            && self.hashtag.is_none()
            && self.labels.is_none()
            && self.container_background.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes_distinct() {
        assert_ne!(ThemePalette::gray(), ThemePalette::dark());
        assert_ne!(ThemePalette::dark(), ThemePalette::light());
        assert_ne!(ThemePalette::gray(), ThemePalette::light());
    }

    #[test]
    fn test_gray_values() {
        let gray = ThemePalette::gray();
        assert_eq!(gray.panel_background.to_hex(), "#3D3D3D");
        assert_eq!(gray.panel_text.to_hex(), "#FFFFFF");
        assert_eq!(gray.container_background.to_hex(), "#F0F0F0");
    }

    #[test]
    fn test_named_lookup() {
        assert_eq!(ThemePalette::named("gray"), Some(ThemePalette::gray()));
        assert_eq!(ThemePalette::named("dark"), Some(ThemePalette::dark()));
        assert_eq!(ThemePalette::named("light"), Some(ThemePalette::light()));
        assert_eq!(ThemePalette::named("neon"), None);
        // Case sensitive, as theme names are a closed set
        assert_eq!(ThemePalette::named("Dark"), None);
    }

    #[test]
    fn test_named_auto_resolves_to_builtin() {
        let auto = ThemePalette::named("auto").unwrap();
        assert!(auto == ThemePalette::dark() || auto == ThemePalette::light());
    }

    #[test]
    fn test_merge_single_override() {
        let overrides = PaletteOverrides {
            title: Some(RgbColor::new(0xff, 0, 0)),
            ..PaletteOverrides::default()
        };
        let merged = ThemePalette::dark().merge(&overrides);
        let dark = ThemePalette::dark();

        assert_eq!(merged.title, RgbColor::new(0xff, 0, 0));
        assert_eq!(merged.panel_background, dark.panel_background);
        assert_eq!(merged.panel_text, dark.panel_text);
        assert_eq!(merged.subtitle, dark.subtitle);
        assert_eq!(merged.description, dark.description);
        assert_eq!(merged.hashtag, dark.hashtag);
        assert_eq!(merged.labels, dark.labels);
        assert_eq!(merged.container_background, dark.container_background);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let base = ThemePalette::light();
        assert_eq!(base.merge(&PaletteOverrides::default()), base);
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(PaletteOverrides::default().is_empty());
        let overrides = PaletteOverrides {
            labels: Some(RgbColor::new(1, 2, 3)),
            ..PaletteOverrides::default()
        };
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_overrides_from_toml() {
        let overrides: PaletteOverrides =
            toml::from_str("title = \"#FF0000\"\nlabels = \"#010203\"\n").unwrap();
        assert_eq!(overrides.title, Some(RgbColor::new(255, 0, 0)));
        assert_eq!(overrides.labels, Some(RgbColor::new(1, 2, 3)));
        assert_eq!(overrides.panel_background, None);
    }
}
