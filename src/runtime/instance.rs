//! Mounted widget instances and their display state.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::WidgetConfig;
use crate::constants::{FLIP_ARM_MS, FLIP_SETTLE_MS, TICK_PERIOD_MS};
use crate::countdown::{clock, Countdown, TickTimer, TimeUnit};
use crate::flip::{FlipAssets, FlipPanel};
use crate::runtime::styles::StyleId;
use crate::tui::panel::{standard_groups, PanelGroup};
use crate::tui::widget::Metrics;

/// Opaque handle identifying a mounted widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

/// The four flip panels of an animated instance.
#[derive(Debug, Clone)]
pub struct FlipDisplay {
    /// Day panel (three faces, grows for wide values)
    pub days: FlipPanel,
    /// Hour panel
    pub hours: FlipPanel,
    /// Minute panel
    pub minutes: FlipPanel,
    /// Second panel
    pub seconds: FlipPanel,
}

impl FlipDisplay {
    /// Constructs the four panels against the loaded engine.
    #[must_use]
    pub fn new(assets: &Arc<FlipAssets>) -> Self {
        Self {
            days: FlipPanel::new(TimeUnit::Days, assets.clone()),
            hours: FlipPanel::new(TimeUnit::Hours, assets.clone()),
            minutes: FlipPanel::new(TimeUnit::Minutes, assets.clone()),
            seconds: FlipPanel::new(TimeUnit::Seconds, assets.clone()),
        }
    }

    /// The panels in render order.
    #[must_use]
    pub fn panels(&self) -> [&FlipPanel; 4] {
        [&self.days, &self.hours, &self.minutes, &self.seconds]
    }

    /// Mutable panels in render order.
    pub fn panels_mut(&mut self) -> [&mut FlipPanel; 4] {
        [
            &mut self.days,
            &mut self.hours,
            &mut self.minutes,
            &mut self.seconds,
        ]
    }

    /// Credits footer text the engine injects beneath the panels.
    #[must_use]
    pub fn credits(&self) -> &str {
        &self.days.assets().credits
    }
}

/// What an instance currently displays.
#[derive(Debug, Clone)]
pub enum DisplayState {
    /// Static digit cell groups
    Panels(Vec<PanelGroup>),
    /// Animated variant queued on the engine bootstrap
    FlipLoading,
    /// Engine ready; waiting out the settle delay before construction
    FlipSettling {
        /// When construction may begin
        until_ms: i64,
        /// The loaded engine resources
        assets: Arc<FlipAssets>,
    },
    /// Panels constructed; waiting out the arming delay before the timer starts
    FlipArming {
        /// When the timer may activate
        until_ms: i64,
        /// The constructed panels
        panels: FlipDisplay,
    },
    /// Live animated display
    Flip(FlipDisplay),
}

/// One mounted, independently timed widget instance.
///
/// The instance exclusively owns its timer, its display state, and (via the
/// runtime's registry) its injected style sheet. It is destroyed only by an
/// explicit teardown call.
#[derive(Debug)]
pub struct WidgetInstance {
    id: InstanceId,
    config: WidgetConfig,
    metrics: Metrics,
    style_id: StyleId,
    timer: TickTimer,
    display: DisplayState,
}

impl WidgetInstance {
    /// Mounts a static instance: cells built, timer started, first
    /// countdown displayed immediately.
    pub(crate) fn new_static(
        id: InstanceId,
        config: WidgetConfig,
        metrics: Metrics,
        style_id: StyleId,
        now_ms: i64,
    ) -> Self {
        let mut instance = Self {
            id,
            config,
            metrics,
            style_id,
            timer: TickTimer::new(TICK_PERIOD_MS),
            display: DisplayState::Panels(standard_groups()),
        };
        instance.timer.activate(now_ms);
        if instance.timer.poll(now_ms) {
            instance.run_tick(now_ms);
        }
        instance
    }

    /// Mounts an animated instance still queued on the engine bootstrap.
    pub(crate) fn new_flip(
        id: InstanceId,
        config: WidgetConfig,
        metrics: Metrics,
        style_id: StyleId,
    ) -> Self {
        Self {
            id,
            config,
            metrics,
            style_id,
            timer: TickTimer::new(TICK_PERIOD_MS),
            display: DisplayState::FlipLoading,
        }
    }

    /// Mounts an animated instance against an already loaded engine; the
    /// settle delay starts immediately.
    pub(crate) fn new_flip_ready(
        id: InstanceId,
        config: WidgetConfig,
        metrics: Metrics,
        style_id: StyleId,
        assets: Arc<FlipAssets>,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            config,
            metrics,
            style_id,
            timer: TickTimer::new(TICK_PERIOD_MS),
            display: DisplayState::FlipSettling {
                until_ms: now_ms + FLIP_SETTLE_MS,
                assets,
            },
        }
    }

    /// This instance's handle.
    #[must_use]
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// The resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The layout metrics.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The id of the instance's injected style sheet.
    #[must_use]
    pub const fn style_id(&self) -> StyleId {
        self.style_id
    }

    /// The tick timer.
    #[must_use]
    pub const fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// The current display state.
    #[must_use]
    pub const fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The engine became ready for this instance; the settle delay starts.
    pub(crate) fn engine_ready(&mut self, assets: Arc<FlipAssets>, now_ms: i64) {
        if matches!(self.display, DisplayState::FlipLoading) {
            self.display = DisplayState::FlipSettling {
                until_ms: now_ms + FLIP_SETTLE_MS,
                assets,
            };
        }
    }

    /// Advances bootstrap stages, the tick schedule, and animations for one
    /// loop pass.
    pub(crate) fn advance(&mut self, now_ms: i64) {
        let display = std::mem::replace(&mut self.display, DisplayState::FlipLoading);
        self.display = match display {
            DisplayState::FlipSettling { until_ms, assets } if now_ms >= until_ms => {
                DisplayState::FlipArming {
                    until_ms: now_ms + FLIP_ARM_MS,
                    panels: FlipDisplay::new(&assets),
                }
            }
            DisplayState::FlipArming { until_ms, panels } if now_ms >= until_ms => {
                self.timer.activate(now_ms);
                DisplayState::Flip(panels)
            }
            other => other,
        };

        if self.timer.poll(now_ms) {
            self.run_tick(now_ms);
        }
        self.advance_animation();
    }

    /// Runs one countdown tick against the compiled-in target.
    ///
    /// Once the target has passed, the display clamps to zero and the
    /// timer stops for good.
    pub(crate) fn run_tick(&mut self, now_ms: i64) {
        let remaining = clock::target_millis() - now_ms;
        if remaining < 0 {
            self.apply_countdown(&Countdown::ZERO);
            self.timer.stop();
            return;
        }
        self.apply_countdown(&Countdown::from_remaining_ms(remaining));
    }

    /// Cancels the tick schedule ahead of teardown.
    pub(crate) fn shutdown(&mut self) {
        self.timer.stop();
    }

    /// Pushes formatted values into the display; each unit fails
    /// independently and a failure never reaches the scheduler.
    fn apply_countdown(&mut self, countdown: &Countdown) {
        match &mut self.display {
            DisplayState::Panels(groups) => {
                for group in groups {
                    let text = countdown.unit_text(group.unit());
                    if let Err(err) = group.set_text(&text) {
                        tracing::error!(%err, "display update failed; unit skipped");
                    }
                }
            }
            DisplayState::Flip(panels) => {
                for panel in panels.panels_mut() {
                    let text = countdown.unit_text(panel.unit());
                    if let Err(err) = panel.set_value(&text) {
                        tracing::error!(%err, "display update failed; unit skipped");
                    }
                }
            }
            // Panels not constructed yet; nothing to write into
            _ => tracing::debug!("display not ready; update skipped"),
        }
    }

    /// Advances flip transitions one loop frame.
    fn advance_animation(&mut self) {
        if let DisplayState::Flip(panels) | DisplayState::FlipArming { panels, .. } =
            &mut self.display
        {
            for panel in panels.panels_mut() {
                panel.advance();
            }
        }
    }
}
