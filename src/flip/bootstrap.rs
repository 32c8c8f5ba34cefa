//! One-shot background loading of the flip engine resources.
//!
//! The first requester spawns a loader thread; everyone who asks before the
//! load completes queues up and is released, in arrival order, when the
//! resources arrive. Requests after completion get the shared assets back
//! immediately and synchronously. The load happens at most once per runtime.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use anyhow::Result;

use crate::flip::assets::FlipAssets;
use crate::runtime::InstanceId;

/// Load status of the shared flip engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No one has requested the engine yet
    #[default]
    NotLoaded,
    /// Loader thread in flight
    Loading,
    /// Resources parsed and shared
    Ready,
    /// Load failed; queued waiters are never released
    Failed,
}

/// Loads the flip engine resources once and queues waiting instances.
pub struct FlipBootstrap {
    status: LoadStatus,
    assets: Option<Arc<FlipAssets>>,
    receiver: Option<Receiver<Result<FlipAssets>>>,
    waiters: Vec<InstanceId>,
}

impl FlipBootstrap {
    /// Creates an idle bootstrap; nothing loads until the first request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: LoadStatus::NotLoaded,
            assets: None,
            receiver: None,
            waiters: Vec::new(),
        }
    }

    /// Requests the engine on behalf of `waiter`.
    ///
    /// Returns the shared assets when the engine is already loaded (the
    /// caller proceeds synchronously). Otherwise the waiter is queued; the
    /// first request also spawns the loader thread. Waiters queued behind a
    /// failed load are never released.
    pub fn request(&mut self, waiter: InstanceId) -> Option<Arc<FlipAssets>> {
        match self.status {
            LoadStatus::Ready => self.assets.clone(),
            LoadStatus::Loading | LoadStatus::Failed => {
                self.waiters.push(waiter);
                None
            }
            LoadStatus::NotLoaded => {
                self.waiters.push(waiter);
                let (sender, receiver) = channel();
                self.receiver = Some(receiver);
                self.status = LoadStatus::Loading;
                thread::spawn(move || {
                    let _ = sender.send(FlipAssets::load());
                });
                None
            }
        }
    }

    /// Polls the loader thread.
    ///
    /// Returns the waiters released by a completed load, in arrival order;
    /// empty when nothing changed or the load failed.
    pub fn poll(&mut self) -> Vec<InstanceId> {
        let Some(receiver) = &self.receiver else {
            return Vec::new();
        };

        match receiver.try_recv() {
            Ok(Ok(assets)) => {
                self.receiver = None;
                self.status = LoadStatus::Ready;
                self.assets = Some(Arc::new(assets));
                std::mem::take(&mut self.waiters)
            }
            Ok(Err(err)) => {
                self.receiver = None;
                self.status = LoadStatus::Failed;
                tracing::error!(
                    %err,
                    "flip engine resources failed to load; queued widgets stay blank"
                );
                Vec::new()
            }
            Err(TryRecvError::Empty) => Vec::new(),
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                self.status = LoadStatus::Failed;
                tracing::error!("flip engine loader exited without a result");
                Vec::new()
            }
        }
    }

    /// The shared assets, once loaded.
    #[must_use]
    pub fn assets(&self) -> Option<Arc<FlipAssets>> {
        self.assets.clone()
    }

    /// Current load status.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Number of instances queued on the load.
    #[must_use]
    pub fn pending_waiters(&self) -> usize {
        self.waiters.len()
    }
}

impl Default for FlipBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn poll_until_released(bootstrap: &mut FlipBootstrap) -> Vec<InstanceId> {
        for _ in 0..200 {
            let released = bootstrap.poll();
            if !released.is_empty() {
                return released;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("flip bootstrap never completed");
    }

    #[test]
    fn test_waiters_released_in_arrival_order() {
        let mut bootstrap = FlipBootstrap::new();
        let first = InstanceId::new();
        let second = InstanceId::new();

        assert!(bootstrap.request(first).is_none());
        assert_eq!(bootstrap.status(), LoadStatus::Loading);
        assert!(bootstrap.request(second).is_none());
        assert_eq!(bootstrap.pending_waiters(), 2);

        let released = poll_until_released(&mut bootstrap);
        assert_eq!(released, vec![first, second]);
        assert_eq!(bootstrap.status(), LoadStatus::Ready);
        assert_eq!(bootstrap.pending_waiters(), 0);
    }

    #[test]
    fn test_request_after_ready_is_synchronous() {
        let mut bootstrap = FlipBootstrap::new();
        assert!(bootstrap.request(InstanceId::new()).is_none());
        poll_until_released(&mut bootstrap);

        // No queueing, no polling needed
        let assets = bootstrap.request(InstanceId::new());
        assert!(assets.is_some());
        assert_eq!(bootstrap.pending_waiters(), 0);
    }

    #[test]
    fn test_idle_poll_is_noop() {
        let mut bootstrap = FlipBootstrap::new();
        assert!(bootstrap.poll().is_empty());
        assert_eq!(bootstrap.status(), LoadStatus::NotLoaded);
    }
}
