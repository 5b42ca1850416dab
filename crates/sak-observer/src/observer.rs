// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Observer` trait and the built-in null, composite, and logging
//! implementations.

use crate::event::Event;
use async_trait::async_trait;
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A listener that receives lifecycle events from the kernel.
///
/// Implementations are responsible for their own synchronization if they
/// maintain state — the kernel never serializes calls to `emit` beyond
/// the ordering it already guarantees (see [`Event`]'s docs).
#[async_trait]
pub trait Observer: Send + Sync {
    /// Receive one event.
    async fn emit(&self, event: &Event);
}

/// An observer that swallows every event. The default when the caller
/// supplies none.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

#[async_trait]
impl Observer for NullObserver {
    async fn emit(&self, _event: &Event) {}
}

/// Logs every event via `tracing` at `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

#[async_trait]
impl Observer for LoggingObserver {
    async fn emit(&self, event: &Event) {
        debug!(target: "sak.kernel.events", turn = event.turn(), kind = event.kind(), ?event, "kernel event");
    }
}

/// Fans an event out to an ordered list of observers.
///
/// A panic in one observer is caught and does not stop the remaining
/// observers from receiving the event.
pub struct CompositeObserver {
    observers: Vec<Arc<dyn Observer>>,
}

impl CompositeObserver {
    /// Build a composite from an ordered list of observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observer>>) -> Self {
        Self { observers }
    }
}

#[async_trait]
impl Observer for CompositeObserver {
    async fn emit(&self, event: &Event) {
        for (idx, observer) in self.observers.iter().enumerate() {
            let result = std::panic::AssertUnwindSafe(observer.emit(event))
                .catch_unwind()
                .await;
            if result.is_err() {
                warn!(target: "sak.kernel.events", observer_index = idx, "observer panicked handling event; continuing");
            }
        }
    }
}
