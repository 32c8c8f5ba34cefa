//! Embedded flip engine resources.
//!
//! Two files ship with the engine: a glyph atlas describing the digit faces
//! and a panel style file with the chrome characters and the credits footer
//! text. Both are embedded at compile time and parsed when the bootstrap
//! loads the engine.

use anyhow::{Context, Result};
use rust_embed::Embed;
use serde::Deserialize;

/// Glyph width in atlas cells.
pub const GLYPH_WIDTH: usize = 3;
/// Glyph height in atlas cells.
pub const GLYPH_HEIGHT: usize = 5;

/// Embedded engine resource files.
#[derive(Embed)]
#[folder = "assets"]
#[include = "flip_atlas.txt"]
#[include = "flip_panel.toml"]
struct FlipResources;

const ATLAS_FILE: &str = "flip_atlas.txt";
const PANEL_FILE: &str = "flip_panel.toml";

/// One digit face as a 3x5 cell bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipGlyph {
    rows: [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT],
}

impl FlipGlyph {
    /// Returns whether the cell at (row, col) is lit. Out-of-range cells
    /// read as unlit.
    #[must_use]
    pub const fn is_lit(&self, row: usize, col: usize) -> bool {
        row < GLYPH_HEIGHT && col < GLYPH_WIDTH && self.rows[row][col]
    }

    fn parse(digit: usize, rows: &[&str]) -> Result<Self> {
        if rows.len() != GLYPH_HEIGHT {
            anyhow::bail!(
                "glyph {digit}: expected {GLYPH_HEIGHT} rows, got {}",
                rows.len()
            );
        }

        let mut cells = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != GLYPH_WIDTH {
                anyhow::bail!("glyph {digit}: row {r} is not {GLYPH_WIDTH} cells wide");
            }
            for (c, cell) in row.chars().enumerate() {
                cells[r][c] = match cell {
                    '#' => true,
                    '.' => false,
                    other => anyhow::bail!("glyph {digit}: unexpected cell marker {other:?}"),
                };
            }
        }
        Ok(Self { rows: cells })
    }
}

/// Chrome characters drawn around each flip panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PanelChrome {
    /// Character of the row above the digit face
    pub top: char,
    /// Character of the hinge line across the face
    pub hinge: char,
    /// Character of the row below the digit face
    pub bottom: char,
}

#[derive(Debug, Clone, Deserialize)]
struct CreditsSection {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PanelFile {
    panel: PanelChrome,
    credits: CreditsSection,
}

/// Parsed engine resources shared by every flip panel of a runtime.
#[derive(Debug, Clone)]
pub struct FlipAssets {
    glyphs: [FlipGlyph; 10],
    /// Panel chrome characters
    pub chrome: PanelChrome,
    /// Credits footer text the engine injects beneath the panels
    pub credits: String,
}

impl FlipAssets {
    /// Loads and parses both embedded resources.
    pub fn load() -> Result<Self> {
        let atlas = read_embedded(ATLAS_FILE)?;
        let panel = read_embedded(PANEL_FILE)?;

        let glyphs = parse_atlas(&atlas)?;
        let file: PanelFile =
            toml::from_str(&panel).with_context(|| format!("failed to parse {PANEL_FILE}"))?;

        Ok(Self {
            glyphs,
            chrome: file.panel,
            credits: file.credits.text,
        })
    }

    /// Returns the glyph for an ASCII digit character.
    #[must_use]
    pub fn glyph(&self, c: char) -> Option<&FlipGlyph> {
        c.to_digit(10).map(|d| &self.glyphs[d as usize])
    }
}

fn read_embedded(name: &str) -> Result<String> {
    let file = FlipResources::get(name)
        .with_context(|| format!("missing embedded engine resource {name}"))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("engine resource {name} is not valid UTF-8"))
}

fn parse_atlas(text: &str) -> Result<[FlipGlyph; 10]> {
    let mut glyphs: [Option<FlipGlyph>; 10] = [None; 10];

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let mut parts = line.split_whitespace();
        let digit: usize = parts
            .next()
            .with_context(|| format!("atlas line {}: missing digit", lineno + 1))?
            .parse()
            .with_context(|| format!("atlas line {}: invalid digit", lineno + 1))?;
        if digit > 9 {
            anyhow::bail!("atlas line {}: digit {digit} out of range", lineno + 1);
        }

        let rows: Vec<&str> = parts.collect();
        glyphs[digit] = Some(FlipGlyph::parse(digit, &rows)?);
    }

    let mut out = Vec::with_capacity(10);
    for (digit, glyph) in glyphs.into_iter().enumerate() {
        out.push(glyph.with_context(|| format!("atlas is missing the glyph for digit {digit}"))?);
    }
    out.try_into()
        .map_err(|_| anyhow::anyhow!("atlas glyph table has the wrong size"))
}
