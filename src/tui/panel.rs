//! Static digit-panel display state.
//!
//! The static variant renders each time unit as a row of individually
//! addressable single-character cells (three for days, two for the clock
//! units). The countdown timer rewrites cell characters in place; the
//! markup itself is never rebuilt after mounting.

use anyhow::Result;

use crate::countdown::TimeUnit;

/// One single-character display cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCell {
    value: char,
}

impl DigitCell {
    /// Creates a cell primed with `'0'`.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: '0' }
    }

    /// The character the cell currently displays.
    #[must_use]
    pub const fn value(&self) -> char {
        self.value
    }

    /// Replaces the displayed character.
    pub fn set(&mut self, value: char) {
        self.value = value;
    }
}

impl Default for DigitCell {
    fn default() -> Self {
        Self::new()
    }
}

/// A labelled group of digit cells for one time unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelGroup {
    unit: TimeUnit,
    cells: Vec<DigitCell>,
}

impl PanelGroup {
    /// Creates a group with the unit's cell count, primed with zeros.
    #[must_use]
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            unit,
            cells: vec![DigitCell::new(); unit.digit_count()],
        }
    }

    /// The unit this group displays.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The group's cells, in display order.
    #[must_use]
    pub fn cells(&self) -> &[DigitCell] {
        &self.cells
    }

    /// The currently displayed text, one character per cell.
    #[must_use]
    pub fn text(&self) -> String {
        self.cells.iter().map(DigitCell::value).collect()
    }

    /// Writes a formatted value into the cells, one character each.
    ///
    /// # Errors
    ///
    /// A length mismatch leaves every cell untouched and reports an error;
    /// the caller logs it and moves on to the sibling units.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != self.cells.len() {
            anyhow::bail!(
                "{} group has {} cells but got {text:?}",
                self.unit.label(),
                self.cells.len()
            );
        }
        for (cell, c) in self.cells.iter_mut().zip(chars) {
            cell.set(c);
        }
        Ok(())
    }
}

/// Builds the four standard panel groups in render order.
#[must_use]
pub fn standard_groups() -> Vec<PanelGroup> {
    TimeUnit::ALL.into_iter().map(PanelGroup::new).collect()
}
