//! Widget layout metrics and frame rendering.
//!
//! Rendering replaces the mount container's entire content every frame.
//! Layout is computed from a [`Metrics`] value derived from the size
//! category, so all three sizes are uniform scalings of one layout.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::branding;
use crate::config::WidgetConfig;
use crate::countdown::TimeUnit;
use crate::flip::FlipPanel;
use crate::flip::FlipPhase;
use crate::runtime::instance::DisplayState;
use crate::runtime::styles::StyleSheet;
use crate::tui::digits;
use crate::tui::panel::PanelGroup;

/// Layout metrics derived from the size category's scale factor.
///
/// Every dimension is its base constant times the single factor (rounded,
/// minimum 1), so the size categories are strict uniform scalings of one
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Glyph box width inside a digit cell
    pub digit_width: u16,
    /// Glyph box height
    pub digit_height: u16,
    /// Horizontal padding inside each digit cell
    pub cell_pad_x: u16,
    /// Gap between cells of one group
    pub cell_gap: u16,
    /// Gap between the hour/minute/second groups
    pub group_gap: u16,
    /// Vertical gap between content blocks
    pub row_gap: u16,
    /// Gap between a cell row and its unit label
    pub label_gap: u16,
    /// Horizontal container padding
    pub container_pad_x: u16,
    /// Vertical container padding
    pub container_pad_y: u16,
    /// Maximum width of the description paragraph
    pub description_width: u16,
}

impl Metrics {
    const BASE_DIGIT_WIDTH: u16 = 6;
    const BASE_DIGIT_HEIGHT: u16 = 5;
    const BASE_CELL_PAD_X: u16 = 1;
    const BASE_CELL_GAP: u16 = 1;
    const BASE_GROUP_GAP: u16 = 4;
    const BASE_ROW_GAP: u16 = 1;
    const BASE_LABEL_GAP: u16 = 1;
    const BASE_CONTAINER_PAD_X: u16 = 4;
    const BASE_CONTAINER_PAD_Y: u16 = 2;
    const BASE_DESCRIPTION_WIDTH: u16 = 70;

    /// Derives all metrics from one scale factor.
    #[must_use]
    pub fn from_scale(factor: f32) -> Self {
        Self {
            digit_width: Self::scaled(Self::BASE_DIGIT_WIDTH, factor),
            digit_height: Self::scaled(Self::BASE_DIGIT_HEIGHT, factor),
            cell_pad_x: Self::scaled(Self::BASE_CELL_PAD_X, factor),
            cell_gap: Self::scaled(Self::BASE_CELL_GAP, factor),
            group_gap: Self::scaled(Self::BASE_GROUP_GAP, factor),
            row_gap: Self::scaled(Self::BASE_ROW_GAP, factor),
            label_gap: Self::scaled(Self::BASE_LABEL_GAP, factor),
            container_pad_x: Self::scaled(Self::BASE_CONTAINER_PAD_X, factor),
            container_pad_y: Self::scaled(Self::BASE_CONTAINER_PAD_Y, factor),
            description_width: Self::scaled(Self::BASE_DESCRIPTION_WIDTH, factor),
        }
    }

    fn scaled(base: u16, factor: f32) -> u16 {
        let value = (f32::from(base) * factor).round();
        if value < 1.0 {
            1
        } else {
            value as u16
        }
    }

    /// Full width of one digit cell including padding.
    #[must_use]
    pub const fn cell_width(&self) -> u16 {
        self.digit_width + 2 * self.cell_pad_x
    }

    /// Height of one static digit cell.
    #[must_use]
    pub const fn cell_height(&self) -> u16 {
        self.digit_height
    }

    /// Height of one flip panel (glyph box plus chrome rows).
    #[must_use]
    pub const fn flip_panel_height(&self) -> u16 {
        self.digit_height + 2
    }

    /// Width of a group of `cells` digit cells.
    #[must_use]
    pub const fn group_width(&self, cells: u16) -> u16 {
        if cells == 0 {
            return 0;
        }
        cells * self.cell_width() + (cells - 1) * self.cell_gap
    }

    /// Height of a labelled group with the given panel height.
    #[must_use]
    pub const fn group_height(&self, panel_height: u16) -> u16 {
        panel_height + self.label_gap + 1
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::from_scale(1.0)
    }
}

/// Draws one widget instance into its mount container.
///
/// The container's previous content is fully covered; every content block
/// is gated by the instance's visibility flags.
pub fn render(
    f: &mut Frame,
    area: Rect,
    config: &WidgetConfig,
    metrics: &Metrics,
    display: &DisplayState,
    sheet: &StyleSheet,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    f.render_widget(Block::default().style(sheet.container), area);

    let inner = inset(area, metrics.container_pad_x, metrics.container_pad_y);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut y = 0u16;

    if config.show_title {
        if let Some(rect) = take(inner, &mut y, 1) {
            let title = Paragraph::new(branding::WIDGET_TITLE)
                .alignment(Alignment::Center)
                .style(sheet.title);
            f.render_widget(title, rect);
        }
        y = y.saturating_add(metrics.row_gap);
    }

    render_countdown_rows(f, inner, &mut y, metrics, display, sheet);

    if let DisplayState::Flip(panels) | DisplayState::FlipArming { panels, .. } = display {
        if !sheet.credits_hidden {
            if let Some(rect) = take(inner, &mut y, 1) {
                let credits = Paragraph::new(panels.credits().to_string())
                    .alignment(Alignment::Right)
                    .style(sheet.credits);
                f.render_widget(credits, rect);
            }
            y = y.saturating_add(metrics.row_gap);
        }
    }

    if config.show_subtitle {
        if let Some(rect) = take(inner, &mut y, 1) {
            let subtitle = Paragraph::new(branding::WIDGET_SUBTITLE)
                .alignment(Alignment::Center)
                .style(sheet.subtitle);
            f.render_widget(subtitle, rect);
        }
        y = y.saturating_add(metrics.row_gap);
    }

    if config.show_description {
        let width = metrics.description_width.min(inner.width);
        let lines = (branding::WIDGET_DESCRIPTION.len() as u16).div_ceil(width.max(1)) + 1;
        if let Some(rect) = take(inner, &mut y, lines) {
            let body = Paragraph::new(branding::WIDGET_DESCRIPTION)
                .wrap(Wrap { trim: true })
                .style(sheet.description);
            f.render_widget(body, centered(rect, width));
        }
        y = y.saturating_add(metrics.row_gap);
    }

    if config.show_hashtag {
        if let Some(rect) = take(inner, &mut y, 1) {
            let hashtag = Paragraph::new(branding::WIDGET_HASHTAG)
                .alignment(Alignment::Center)
                .style(sheet.hashtag);
            f.render_widget(hashtag, rect);
        }
        y = y.saturating_add(metrics.row_gap);
    }

    if config.show_cta {
        if let Some(rect) = take(inner, &mut y, 1) {
            let label = Line::from(Span::styled(
                format!("[ {} ]", branding::CTA_LABEL),
                sheet.cta,
            ));
            f.render_widget(Paragraph::new(label).alignment(Alignment::Center), rect);
        }
        if let Some(rect) = take(inner, &mut y, 1) {
            let url = Paragraph::new(branding::CTA_URL)
                .alignment(Alignment::Center)
                .style(sheet.cta_url);
            f.render_widget(url, rect);
        }
    }
}

/// Renders the day row and the hour/minute/second row of the countdown.
fn render_countdown_rows(
    f: &mut Frame,
    inner: Rect,
    y: &mut u16,
    metrics: &Metrics,
    display: &DisplayState,
    sheet: &StyleSheet,
) {
    match display {
        DisplayState::Panels(groups) => {
            let day_groups: Vec<&PanelGroup> = groups
                .iter()
                .filter(|g| g.unit() == TimeUnit::Days)
                .collect();
            let clock_groups: Vec<&PanelGroup> = groups
                .iter()
                .filter(|g| g.unit() != TimeUnit::Days)
                .collect();

            render_static_row(f, inner, y, metrics, &day_groups, sheet);
            *y = y.saturating_add(metrics.row_gap);
            render_static_row(f, inner, y, metrics, &clock_groups, sheet);
            *y = y.saturating_add(metrics.row_gap);
        }
        DisplayState::Flip(panels) | DisplayState::FlipArming { panels, .. } => {
            render_flip_row(f, inner, y, metrics, &[&panels.days], sheet);
            *y = y.saturating_add(metrics.row_gap);
            render_flip_row(
                f,
                inner,
                y,
                metrics,
                &[&panels.hours, &panels.minutes, &panels.seconds],
                sheet,
            );
            *y = y.saturating_add(metrics.row_gap);
        }
        DisplayState::FlipLoading | DisplayState::FlipSettling { .. } => {
            // Engine not ready yet; hold the rows open so the layout is
            // stable once the panels appear
            let height = metrics.group_height(metrics.flip_panel_height());
            let _ = take(inner, y, height);
            *y = y.saturating_add(metrics.row_gap);
            let _ = take(inner, y, height);
            *y = y.saturating_add(metrics.row_gap);
        }
    }
}

/// Renders one centered row of static digit groups with their labels.
fn render_static_row(
    f: &mut Frame,
    inner: Rect,
    y: &mut u16,
    metrics: &Metrics,
    groups: &[&PanelGroup],
    sheet: &StyleSheet,
) {
    if groups.is_empty() {
        return;
    }
    let widths: Vec<u16> = groups
        .iter()
        .map(|g| metrics.group_width(g.cells().len() as u16))
        .collect();
    let total: u16 =
        widths.iter().sum::<u16>() + metrics.group_gap * (groups.len() as u16 - 1);

    let height = metrics.group_height(metrics.cell_height());
    let Some(row) = take(inner, y, height) else {
        return;
    };
    let row = centered(row, total);

    let mut x = row.x;
    for (group, width) in groups.iter().copied().zip(widths) {
        if x >= row.right() {
            break;
        }
        let group_rect = Rect::new(x, row.y, width.min(row.right() - x), row.height);
        render_static_group(f, group_rect, group, metrics, sheet);
        x = x.saturating_add(width + metrics.group_gap);
    }
}

/// Renders one static digit group: its cells, then its unit label.
fn render_static_group(
    f: &mut Frame,
    area: Rect,
    group: &PanelGroup,
    metrics: &Metrics,
    sheet: &StyleSheet,
) {
    let cell_height = metrics.cell_height().min(area.height);
    let mut x = area.x;
    for cell in group.cells() {
        let rect = Rect::new(x, area.y, metrics.cell_width(), cell_height);
        if rect.right() <= area.right() {
            render_digit_cell(f, rect, cell.value(), metrics, sheet);
        }
        x = x.saturating_add(metrics.cell_width() + metrics.cell_gap);
    }

    let label_y = area.y + cell_height + metrics.label_gap;
    if label_y < area.bottom() {
        let label_rect = Rect::new(area.x, label_y, area.width, 1);
        let label = Paragraph::new(group.unit().label())
            .alignment(Alignment::Center)
            .style(sheet.label);
        f.render_widget(label, label_rect);
    }
}

/// Renders one static digit cell: the glyph stretched into the metric box.
fn render_digit_cell(f: &mut Frame, rect: Rect, value: char, metrics: &Metrics, sheet: &StyleSheet) {
    let digit = digits::digit_of_char(value);
    let mut lines = Vec::with_capacity(rect.height as usize);
    for row in 0..rect.height {
        let mut text = String::with_capacity(rect.width as usize);
        for col in 0..rect.width {
            let lit = digit.is_some_and(|d| {
                col >= metrics.cell_pad_x
                    && col < metrics.cell_pad_x + metrics.digit_width
                    && digits::sample(
                        d,
                        row,
                        col - metrics.cell_pad_x,
                        metrics.digit_width,
                        metrics.digit_height,
                    )
            });
            text.push(if lit { '█' } else { ' ' });
        }
        lines.push(Line::from(Span::styled(text, sheet.digit)));
    }
    f.render_widget(Paragraph::new(lines), rect);
}

/// Renders one centered row of flip panels with their labels.
fn render_flip_row(
    f: &mut Frame,
    inner: Rect,
    y: &mut u16,
    metrics: &Metrics,
    panels: &[&FlipPanel],
    sheet: &StyleSheet,
) {
    if panels.is_empty() {
        return;
    }
    let widths: Vec<u16> = panels
        .iter()
        .map(|p| metrics.group_width(p.panel_count() as u16))
        .collect();
    let total: u16 =
        widths.iter().sum::<u16>() + metrics.group_gap * (panels.len() as u16 - 1);

    let height = metrics.group_height(metrics.flip_panel_height());
    let Some(row) = take(inner, y, height) else {
        return;
    };
    let row = centered(row, total);

    let mut x = row.x;
    for (panel, width) in panels.iter().copied().zip(widths) {
        if x >= row.right() {
            break;
        }
        let group_rect = Rect::new(x, row.y, width.min(row.right() - x), row.height);
        render_flip_group(f, group_rect, panel, metrics, sheet);
        x = x.saturating_add(width + metrics.group_gap);
    }
}

/// Renders one flip panel group: a chrome-framed panel per character, then
/// the unit label.
fn render_flip_group(
    f: &mut Frame,
    area: Rect,
    panel: &FlipPanel,
    metrics: &Metrics,
    sheet: &StyleSheet,
) {
    let panel_height = metrics.flip_panel_height().min(area.height);
    let mut x = area.x;
    for index in 0..panel.panel_count() {
        let rect = Rect::new(x, area.y, metrics.cell_width(), panel_height);
        if rect.right() <= area.right() {
            render_flip_char(f, rect, panel, index, metrics, sheet);
        }
        x = x.saturating_add(metrics.cell_width() + metrics.cell_gap);
    }

    let label_y = area.y + panel_height + metrics.label_gap;
    if label_y < area.bottom() {
        let label_rect = Rect::new(area.x, label_y, area.width, 1);
        let label = Paragraph::new(panel.unit().label())
            .alignment(Alignment::Center)
            .style(sheet.label);
        f.render_widget(label, label_rect);
    }
}

/// Renders one flip character panel with chrome, hinge, and transition dim.
fn render_flip_char(
    f: &mut Frame,
    rect: Rect,
    panel: &FlipPanel,
    index: usize,
    metrics: &Metrics,
    sheet: &StyleSheet,
) {
    let assets = panel.assets();
    let chrome = assets.chrome;
    let value = panel.display_char(index);
    let glyph = assets.glyph(value);
    let hinge_row = metrics.digit_height / 2;
    let phase = panel.flip_phase();

    let mut lines = Vec::with_capacity(rect.height as usize);
    lines.push(Line::from(Span::styled(
        chrome.top.to_string().repeat(rect.width as usize),
        sheet.chrome,
    )));

    for row in 0..metrics.digit_height {
        let dimmed = match phase {
            Some(FlipPhase::Closing) => row < hinge_row,
            Some(FlipPhase::Opening) => row > hinge_row,
            None => false,
        };
        let style = if dimmed { sheet.digit_dim } else { sheet.digit };

        let mut text = String::with_capacity(rect.width as usize);
        for col in 0..rect.width {
            let lit = glyph.is_some_and(|g| {
                col >= metrics.cell_pad_x && col < metrics.cell_pad_x + metrics.digit_width && {
                    // Center sampling, matching the static renderer
                    let src_row = (2 * row as usize + 1) * crate::flip::assets::GLYPH_HEIGHT
                        / (2 * metrics.digit_height as usize);
                    let src_col = (2 * (col - metrics.cell_pad_x) as usize + 1)
                        * crate::flip::assets::GLYPH_WIDTH
                        / (2 * metrics.digit_width as usize);
                    g.is_lit(src_row, src_col)
                }
            });
            if lit {
                text.push('█');
            } else if row == hinge_row {
                text.push(chrome.hinge);
            } else {
                text.push(' ');
            }
        }
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(Span::styled(
        chrome.bottom.to_string().repeat(rect.width as usize),
        sheet.chrome,
    )));

    f.render_widget(Paragraph::new(lines), rect);
}

fn inset(area: Rect, pad_x: u16, pad_y: u16) -> Rect {
    Rect::new(
        area.x.saturating_add(pad_x),
        area.y.saturating_add(pad_y),
        area.width.saturating_sub(pad_x * 2),
        area.height.saturating_sub(pad_y * 2),
    )
}

/// Carves a `height`-tall strip out of `inner` at the running offset.
///
/// Clamps to the remaining space and returns `None` once the container is
/// full, so overflowing blocks drop off the bottom instead of panicking.
fn take(inner: Rect, y: &mut u16, height: u16) -> Option<Rect> {
    if *y >= inner.height || height == 0 {
        return None;
    }
    let clamped = height.min(inner.height - *y);
    let rect = Rect::new(inner.x, inner.y + *y, inner.width, clamped);
    *y += clamped;
    Some(rect)
}

fn centered(rect: Rect, width: u16) -> Rect {
    if width >= rect.width {
        return rect;
    }
    Rect::new(rect.x + (rect.width - width) / 2, rect.y, width, rect.height)
}
