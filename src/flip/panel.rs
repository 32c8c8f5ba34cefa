//! Animated flip panel for one time unit.
//!
//! A panel displays its unit's whole zero-padded value and owns the
//! character-flip transition: when the value changes, the affected
//! characters fold shut over the first half of the frame budget and swing
//! open showing the new face over the second half. The runtime advances
//! frames on its loop cadence; callers only set values.

use std::sync::Arc;

use anyhow::Result;

use crate::countdown::TimeUnit;
use crate::flip::assets::FlipAssets;

/// Number of loop frames a character flip spans.
pub const FLIP_FRAMES: u8 = 4;

/// Phase of an in-flight flip transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    /// First half: the old face folds shut; the top half of the panel dims
    Closing,
    /// Second half: the new face swings open; the bottom half dims
    Opening,
}

/// One animated panel owning the zero-padded value of a time unit.
#[derive(Debug, Clone)]
pub struct FlipPanel {
    unit: TimeUnit,
    assets: Arc<FlipAssets>,
    value: String,
    previous: Option<String>,
    frame: u8,
}

impl FlipPanel {
    /// Creates a panel primed with zeros, like a freshly mounted display.
    #[must_use]
    pub fn new(unit: TimeUnit, assets: Arc<FlipAssets>) -> Self {
        Self {
            unit,
            assets,
            value: "0".repeat(unit.digit_count()),
            previous: None,
            frame: 0,
        }
    }

    /// The unit this panel displays.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The value the panel is transitioning to (or showing, when settled).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The engine resources backing this panel.
    #[must_use]
    pub const fn assets(&self) -> &Arc<FlipAssets> {
        &self.assets
    }

    /// Sets the displayed value; a change starts the flip transition.
    ///
    /// # Errors
    ///
    /// Rejects values containing non-digit characters; the engine only has
    /// digit faces.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!(
                "{} panel rejected non-digit value {value:?}",
                self.unit.label()
            );
        }
        if value != self.value {
            self.previous = Some(std::mem::replace(&mut self.value, value.to_string()));
            self.frame = 0;
        }
        Ok(())
    }

    /// Advances the transition by one loop frame; no-op when settled.
    pub fn advance(&mut self) {
        if self.previous.is_some() {
            self.frame += 1;
            if self.frame >= FLIP_FRAMES {
                self.previous = None;
                self.frame = 0;
            }
        }
    }

    /// Returns true while a transition is in progress.
    #[must_use]
    pub const fn is_flipping(&self) -> bool {
        self.previous.is_some()
    }

    /// Current transition phase, if one is in flight.
    #[must_use]
    pub fn flip_phase(&self) -> Option<FlipPhase> {
        self.previous.as_ref().map(|_| {
            if self.frame < FLIP_FRAMES / 2 {
                FlipPhase::Closing
            } else {
                FlipPhase::Opening
            }
        })
    }

    /// Number of character panels currently displayed.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.value.chars().count()
    }

    /// The character face shown at `index` right now.
    ///
    /// During the closing phase the old face still shows; from the midpoint
    /// on, the new one does.
    #[must_use]
    pub fn display_char(&self, index: usize) -> char {
        let current = self.value.chars().nth(index).unwrap_or('0');
        match &self.previous {
            Some(prev) if self.frame < FLIP_FRAMES / 2 => prev.chars().nth(index).unwrap_or(current),
            _ => current,
        }
    }
}
