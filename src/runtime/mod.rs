//! Widget runtime: mount containers, instance registry, style registry,
//! and the per-loop tick fan-out.
//!
//! All widget state is owned by a constructible [`WidgetRuntime`] rather
//! than ambient globals, so multiple runtimes (one per test, say) never
//! interfere. Instances are registered by `init` and removed by `destroy`;
//! nothing is torn down implicitly.

pub mod instance;
pub mod styles;

pub use instance::{DisplayState, FlipDisplay, InstanceId, WidgetInstance};
pub use styles::{StyleId, StyleRegistry, StyleSheet};

use std::collections::HashMap;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::config::{RenderVariant, WidgetConfig, WidgetOptions};
use crate::flip::{FlipBootstrap, LoadStatus};
use crate::tui::widget::{self, Metrics};

/// Owns every mounted widget and the shared engine bootstrap.
pub struct WidgetRuntime {
    containers: HashMap<String, Rect>,
    instances: Vec<WidgetInstance>,
    styles: StyleRegistry,
    flip: FlipBootstrap,
}

impl WidgetRuntime {
    /// Creates an empty runtime with no containers and no instances.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
            instances: Vec::new(),
            styles: StyleRegistry::new(),
            flip: FlipBootstrap::new(),
        }
    }

    /// Registers (or repositions) a named mount container.
    ///
    /// Containers must exist before `init` targets them; re-registering an
    /// existing name just moves it, which is how resizes propagate.
    pub fn set_container(&mut self, name: impl Into<String>, area: Rect) {
        self.containers.insert(name.into(), area);
    }

    /// Looks up a registered container's area.
    #[must_use]
    pub fn container(&self, name: &str) -> Option<Rect> {
        self.containers.get(name).copied()
    }

    /// Mounts a widget instance.
    ///
    /// Resolves the options, verifies the mount container, registers the
    /// instance's style sheet, builds its display state, and starts its
    /// timer (the animated variant defers the start until the engine
    /// bootstrap releases it). Returns `None`, with a logged error and
    /// nothing registered, when the container is missing.
    pub fn init(&mut self, options: &WidgetOptions, now_ms: i64) -> Option<InstanceId> {
        let config = WidgetConfig::resolve(options);
        if !self.containers.contains_key(&config.container) {
            tracing::error!(
                container = %config.container,
                "container not found; widget not created"
            );
            return None;
        }

        let id = InstanceId::new();
        let metrics = Metrics::from_scale(config.scale());
        let style_id = self.styles.insert(StyleSheet::from_config(&config));

        let instance = match config.variant {
            RenderVariant::Static => {
                WidgetInstance::new_static(id, config, metrics, style_id, now_ms)
            }
            RenderVariant::Flip => match self.flip.request(id) {
                Some(assets) => WidgetInstance::new_flip_ready(
                    id, config, metrics, style_id, assets, now_ms,
                ),
                None => WidgetInstance::new_flip(id, config, metrics, style_id),
            },
        };

        self.instances.push(instance);
        Some(id)
    }

    /// Advances the whole runtime one loop pass.
    ///
    /// Polls the engine bootstrap, releases queued instances in arrival
    /// order, then advances every instance's stages, tick schedule, and
    /// animations. `now_ms` is wall-clock epoch milliseconds.
    pub fn tick(&mut self, now_ms: i64) {
        let released = self.flip.poll();
        if !released.is_empty() {
            if let Some(assets) = self.flip.assets() {
                for id in released {
                    if let Some(inst) = self.instance_mut(id) {
                        inst.engine_ready(assets.clone(), now_ms);
                    }
                }
            }
        }

        for instance in &mut self.instances {
            instance.advance(now_ms);
        }
    }

    /// Tears down an instance: cancels its timer, removes its style sheet,
    /// and unregisters it. The mount container renders empty afterwards.
    ///
    /// Idempotent: an unknown or already-destroyed id is a logged no-op.
    pub fn destroy(&mut self, id: InstanceId) {
        if let Some(pos) = self.instances.iter().position(|i| i.id() == id) {
            let mut instance = self.instances.remove(pos);
            instance.shutdown();
            self.styles.remove(instance.style_id());
        } else {
            tracing::debug!("destroy: unknown or already destroyed instance");
        }
    }

    /// Renders every live instance into its mount container.
    ///
    /// An instance whose container has vanished is skipped with a warning;
    /// its siblings still draw.
    pub fn render(&self, f: &mut Frame) {
        for instance in &self.instances {
            let Some(area) = self.containers.get(&instance.config().container) else {
                tracing::warn!(
                    container = %instance.config().container,
                    "container vanished; instance not drawn"
                );
                continue;
            };
            let Some(sheet) = self.styles.get(instance.style_id()) else {
                continue;
            };
            widget::render(
                f,
                *area,
                instance.config(),
                instance.metrics(),
                instance.display(),
                sheet,
            );
        }
    }

    /// Looks up a live instance by handle.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&WidgetInstance> {
        self.instances.iter().find(|i| i.id() == id)
    }

    fn instance_mut(&mut self, id: InstanceId) -> Option<&mut WidgetInstance> {
        self.instances.iter_mut().find(|i| i.id() == id)
    }

    /// Number of live instances.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of registered style sheets.
    #[must_use]
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Load status of the shared flip engine.
    #[must_use]
    pub const fn flip_status(&self) -> LoadStatus {
        self.flip.status()
    }
}

impl Default for WidgetRuntime {
    fn default() -> Self {
        Self::new()
    }
}
