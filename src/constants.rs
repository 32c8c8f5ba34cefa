//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the countdown target and timing parameters.

/// The calendar instant the widget counts down to, in local time.
///
/// Compiled in and not configurable by callers; the widget clamps to zero
/// once this instant has passed.
pub const TARGET_DATE: &str = "2026-11-12T00:00:00";

/// Format string for [`TARGET_DATE`].
pub const TARGET_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Recurring tick period for countdown updates, in milliseconds.
pub const TICK_PERIOD_MS: i64 = 1000;

/// Settle delay between flip engine readiness and panel construction,
/// in milliseconds.
///
/// The flip engine performs its own internal setup after its resources
/// load; panel construction waits this long before touching it.
pub const FLIP_SETTLE_MS: i64 = 100;

/// Delay between flip panel construction and timer activation,
/// in milliseconds.
pub const FLIP_ARM_MS: i64 = 100;

/// Name of the mount container used when the caller does not supply one.
pub const DEFAULT_CONTAINER: &str = "sah-countdown";

/// Default theme name applied when the caller does not supply one, and the
/// fallback for unknown theme names.
pub const DEFAULT_THEME: &str = "gray";
