//! Widget options and configuration resolution.
//!
//! Callers hand the runtime a partial [`WidgetOptions`] record; resolution
//! fills in the documented defaults, looks up the theme palette, and merges
//! color overrides into an immutable [`WidgetConfig`]. Options also load
//! from a TOML file in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::branding::APP_DATA_DIR;
use crate::constants::{DEFAULT_CONTAINER, DEFAULT_THEME};
use crate::models::{PaletteOverrides, ThemePalette};

/// Size category scaling the whole layout uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    /// 0.7x layout
    Compact,
    /// 1.0x layout
    #[default]
    Medium,
    /// 1.3x layout
    Large,
}

impl SizeCategory {
    /// Scale factor applied to every layout metric.
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Compact => 0.7,
            Self::Medium => 1.0,
            Self::Large => 1.3,
        }
    }

    /// Looks up a category by name; `None` for unknown names.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "compact" => Some(Self::Compact),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// Which renderer draws the countdown panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderVariant {
    /// Static digit cells drawn with the built-in font
    #[default]
    Static,
    /// Animated flip panels backed by the flip engine
    Flip,
}

/// Caller-supplied options; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Mount container name (defaults to "sah-countdown")
    pub container: Option<String>,
    /// Theme name: gray, dark, light, or auto (defaults to gray)
    pub theme: Option<String>,
    /// Show the headline (default shown)
    pub show_title: Option<bool>,
    /// Show the subtitle (default shown)
    pub show_subtitle: Option<bool>,
    /// Show the campaign paragraph (default shown)
    pub show_description: Option<bool>,
    /// Show the hashtag (default shown)
    pub show_hashtag: Option<bool>,
    /// Show the call-to-action link (default hidden)
    pub show_cta: Option<bool>,
    /// Size category name: compact, medium, or large (defaults to medium)
    pub size: Option<String>,
    /// Renderer variant (defaults to static)
    pub variant: Option<RenderVariant>,
    /// Per-role color overrides merged over the theme palette
    pub colors: PaletteOverrides,
}

impl WidgetOptions {
    /// Loads options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context(format!(
            "Failed to read options file: {}",
            path.display()
        ))?;
        toml::from_str(&content).context(format!(
            "Failed to parse options file: {}",
            path.display()
        ))
    }

    /// Loads the default options file when one exists.
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Platform-specific path of the default options file.
    ///
    /// - Linux: `~/.config/SAHCountdown/widget.toml`
    /// - macOS: `~/Library/Application Support/SAHCountdown/widget.toml`
    /// - Windows: `%APPDATA%\SAHCountdown\widget.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);
        Ok(dir.join("widget.toml"))
    }

    /// Combines two option sets field-wise; `self` wins per field.
    #[must_use]
    pub fn overlay(self, base: Self) -> Self {
        Self {
            container: self.container.or(base.container),
            theme: self.theme.or(base.theme),
            show_title: self.show_title.or(base.show_title),
            show_subtitle: self.show_subtitle.or(base.show_subtitle),
            show_description: self.show_description.or(base.show_description),
            show_hashtag: self.show_hashtag.or(base.show_hashtag),
            show_cta: self.show_cta.or(base.show_cta),
            size: self.size.or(base.size),
            variant: self.variant.or(base.variant),
            colors: self.colors.overlay(base.colors),
        }
    }
}

/// Resolved, immutable configuration for one widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Mount container name
    pub container: String,
    /// Name of the theme the palette came from
    pub theme: String,
    /// Show the headline
    pub show_title: bool,
    /// Show the subtitle
    pub show_subtitle: bool,
    /// Show the campaign paragraph
    pub show_description: bool,
    /// Show the hashtag
    pub show_hashtag: bool,
    /// Show the call-to-action link
    pub show_cta: bool,
    /// Size category
    pub size: SizeCategory,
    /// Renderer variant
    pub variant: RenderVariant,
    /// Palette after theme lookup and override merge
    pub palette: ThemePalette,
}

impl WidgetConfig {
    /// Resolves caller options into a complete configuration.
    ///
    /// Unknown theme or size names degrade silently to the defaults (a
    /// warning is logged); no error ever reaches the caller. Resolution has
    /// no other effects.
    #[must_use]
    pub fn resolve(options: &WidgetOptions) -> Self {
        let requested = options.theme.as_deref().unwrap_or(DEFAULT_THEME);
        let (theme, palette) = match ThemePalette::named(requested) {
            Some(palette) => (requested.to_string(), palette),
            None => {
                tracing::warn!(
                    theme = requested,
                    "unknown theme; falling back to {DEFAULT_THEME}"
                );
                (DEFAULT_THEME.to_string(), ThemePalette::default())
            }
        };

        let size = options.size.as_deref().map_or_else(SizeCategory::default, |name| {
            SizeCategory::named(name).unwrap_or_else(|| {
                tracing::warn!(size = name, "unknown size; falling back to medium");
                SizeCategory::default()
            })
        });

        Self {
            container: options
                .container
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
            theme,
            show_title: options.show_title.unwrap_or(true),
            show_subtitle: options.show_subtitle.unwrap_or(true),
            show_description: options.show_description.unwrap_or(true),
            show_hashtag: options.show_hashtag.unwrap_or(true),
            show_cta: options.show_cta.unwrap_or(false),
            size,
            variant: options.variant.unwrap_or_default(),
            palette: palette.merge(&options.colors),
        }
    }

    /// Scale factor for layout metrics.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.size.multiplier()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::resolve(&WidgetOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RgbColor;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_defaults() {
        let config = WidgetConfig::resolve(&WidgetOptions::default());
        assert_eq!(config.container, DEFAULT_CONTAINER);
        assert_eq!(config.theme, "gray");
        assert!(config.show_title);
        assert!(config.show_subtitle);
        assert!(config.show_description);
        assert!(config.show_hashtag);
        assert!(!config.show_cta);
        assert_eq!(config.size, SizeCategory::Medium);
        assert_eq!(config.variant, RenderVariant::Static);
        assert_eq!(config.palette, ThemePalette::gray());
    }

    #[test]
    fn test_resolve_unknown_theme_falls_back_whole() {
        let options = WidgetOptions {
            theme: Some("neon".to_string()),
            ..WidgetOptions::default()
        };
        let config = WidgetConfig::resolve(&options);
        assert_eq!(config.theme, "gray");
        // The full default palette, no partial fields
        assert_eq!(config.palette, ThemePalette::gray());
    }

    #[test]
    fn test_resolve_dark_with_title_override() {
        let options = WidgetOptions {
            theme: Some("dark".to_string()),
            colors: PaletteOverrides {
                title: Some(RgbColor::new(0xff, 0, 0)),
                ..PaletteOverrides::default()
            },
            ..WidgetOptions::default()
        };
        let config = WidgetConfig::resolve(&options);
        let dark = ThemePalette::dark();

        assert_eq!(config.palette.title, RgbColor::new(0xff, 0, 0));
        assert_eq!(config.palette.panel_background, dark.panel_background);
        assert_eq!(config.palette.subtitle, dark.subtitle);
        assert_eq!(config.palette.container_background, dark.container_background);
    }

    #[test]
    fn test_resolve_unknown_size_falls_back() {
        let options = WidgetOptions {
            size: Some("enormous".to_string()),
            ..WidgetOptions::default()
        };
        let config = WidgetConfig::resolve(&options);
        assert_eq!(config.size, SizeCategory::Medium);
    }

    #[test]
    fn test_size_multipliers() {
        assert!((SizeCategory::Compact.multiplier() - 0.7).abs() < f32::EPSILON);
        assert!((SizeCategory::Medium.multiplier() - 1.0).abs() < f32::EPSILON);
        assert!((SizeCategory::Large.multiplier() - 1.3).abs() < f32::EPSILON);
        assert_eq!(SizeCategory::named("large"), Some(SizeCategory::Large));
        assert_eq!(SizeCategory::named("Large"), None);
    }

    #[test]
    fn test_overlay_first_wins() {
        let cli = WidgetOptions {
            theme: Some("dark".to_string()),
            show_cta: Some(true),
            ..WidgetOptions::default()
        };
        let file = WidgetOptions {
            theme: Some("light".to_string()),
            size: Some("large".to_string()),
            colors: PaletteOverrides {
                hashtag: Some(RgbColor::new(1, 2, 3)),
                ..PaletteOverrides::default()
            },
            ..WidgetOptions::default()
        };

        let merged = cli.overlay(file);
        assert_eq!(merged.theme.as_deref(), Some("dark"));
        assert_eq!(merged.size.as_deref(), Some("large"));
        assert_eq!(merged.show_cta, Some(true));
        assert_eq!(merged.colors.hashtag, Some(RgbColor::new(1, 2, 3)));
    }

    #[test]
    fn test_load_options_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("widget.toml");
        fs::write(
            &path,
            concat!(
                "theme = \"dark\"\n",
                "size = \"compact\"\n",
                "show_cta = true\n",
                "variant = \"flip\"\n",
                "\n",
                "[colors]\n",
                "title = \"#FF0000\"\n",
            ),
        )
        .unwrap();

        let options = WidgetOptions::load(&path).unwrap();
        assert_eq!(options.theme.as_deref(), Some("dark"));
        assert_eq!(options.size.as_deref(), Some("compact"));
        assert_eq!(options.show_cta, Some(true));
        assert_eq!(options.variant, Some(RenderVariant::Flip));
        assert_eq!(options.colors.title, Some(RgbColor::new(255, 0, 0)));
        // Unset fields stay unset
        assert_eq!(options.show_title, None);
        assert_eq!(options.container, None);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        assert!(WidgetOptions::load(&temp_dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("widget.toml");
        fs::write(&path, "size = [not toml").unwrap();
        assert!(WidgetOptions::load(&path).is_err());
    }

    #[test]
    fn test_options_roundtrip() {
        let options = WidgetOptions {
            theme: Some("light".to_string()),
            show_hashtag: Some(false),
            ..WidgetOptions::default()
        };
        let rendered = toml::to_string(&options).unwrap();
        let parsed: WidgetOptions = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, options);
    }
}
