// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use chrono::Utc;
use sak_observer::{CompositeObserver, Event, NullObserver, Observer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingObserver {
    count: Arc<AtomicUsize>,
}

#[async_trait]
impl Observer for CountingObserver {
    async fn emit(&self, _event: &Event) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

struct PanickingObserver;

#[async_trait]
impl Observer for PanickingObserver {
    async fn emit(&self, _event: &Event) {
        panic!("boom");
    }
}

fn kernel_start() -> Event {
    Event::KernelStart {
        timestamp: Utc::now(),
        max_turns: 10,
        tools_count: 2,
        initial_messages_count: 1,
    }
}

#[tokio::test]
async fn null_observer_swallows_events() {
    let observer = NullObserver;
    observer.emit(&kernel_start()).await;
}

#[tokio::test]
async fn composite_observer_fans_out_to_all() {
    let count_a = Arc::new(AtomicUsize::new(0));
    let count_b = Arc::new(AtomicUsize::new(0));

    let composite = CompositeObserver::new(vec![
        Arc::new(CountingObserver { count: count_a.clone() }),
        Arc::new(CountingObserver { count: count_b.clone() }),
    ]);

    composite.emit(&kernel_start()).await;

    assert_eq!(count_a.load(Ordering::SeqCst), 1);
    assert_eq!(count_b.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn composite_observer_isolates_panicking_observer() {
    let count = Arc::new(AtomicUsize::new(0));

    let composite = CompositeObserver::new(vec![
        Arc::new(PanickingObserver),
        Arc::new(CountingObserver { count: count.clone() }),
    ]);

    composite.emit(&kernel_start()).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn event_turn_accessor() {
    let start = kernel_start();
    assert_eq!(start.turn(), 0);

    let request = Event::ModelRequest {
        turn: 3,
        timestamp: Utc::now(),
        messages_count: 5,
        tools_count: 1,
        model_label: "qwen".into(),
    };
    assert_eq!(request.turn(), 3);
}
