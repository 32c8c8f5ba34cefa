//! Branding and campaign copy configuration.
//!
//! This module centralizes all branding-related strings (names, campaign
//! copy, URLs) to make future rebranding easier. Change values here to
//! rebrand the entire widget.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "SAH Countdown";

/// The binary/executable name (lowercase, no spaces).
///
/// Used in:
/// - Cargo.toml package name
/// - Command examples in documentation
pub const APP_BINARY_NAME: &str = "sah-countdown";

/// The directory name for application data (options file, logs).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "SAHCountdown";

/// Short description for package metadata and help text.
pub const APP_DESCRIPTION: &str = "Embeddable branded countdown widget for terminal UIs";

/// Headline rendered above the countdown when the title is shown.
pub const WIDGET_TITLE: &str = "Save American Hemp";

/// Line rendered below the countdown when the subtitle is shown.
pub const WIDGET_SUBTITLE: &str = "Until Hemp is ILLEGAL";

/// Campaign paragraph rendered when the description is shown.
pub const WIDGET_DESCRIPTION: &str = "A harmful federal hemp rule is on the \
    horizon - but it's not final. We still have the power to stop it. If you \
    value this industry, your access, or the jobs it supports, now is the \
    moment to act. Contact your legislators and tell them this rule is the \
    wrong move for America. Your voice can change the outcome.";

/// Campaign hashtag rendered when the hashtag is shown.
pub const WIDGET_HASHTAG: &str = "#SAVEAMERICANHEMP";

/// Label for the call-to-action link.
pub const CTA_LABEL: &str = "Contact Your Legislators";

/// Destination of the call-to-action link.
pub const CTA_URL: &str = "https://texashempbusinesscouncil.com/zip/";
