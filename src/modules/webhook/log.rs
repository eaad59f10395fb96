use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::modules::webhook::model::WebhookEvent;

/// Bounded in-memory view of recently verified webhook events.
///
/// Per-instance, non-durable, best-effort telemetry: the buffer is reset
/// on restart and must never be treated as a source of truth. Handlers
/// run concurrently, so the queue sits behind a mutex.
#[derive(Clone)]
pub struct WebhookLog {
    events: Arc<Mutex<VecDeque<WebhookEvent>>>,
    capacity: usize,
}

impl WebhookLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Appends to the tail, evicting from the head once the capacity is
    /// exceeded.
    pub fn append(&self, event: WebhookEvent) {
        let mut events = self.events.lock().expect("webhook log lock poisoned");
        events.push_back(event);
        while events.len() > self.capacity {
            events.pop_front();
        }
    }

    /// Returns the last `n` events in arrival order, oldest first.
    pub fn recent(&self, n: usize) -> Vec<WebhookEvent> {
        let events = self.events.lock().expect("webhook log lock poisoned");
        events
            .iter()
            .skip(events.len().saturating_sub(n))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("webhook log lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
