//! Cross-document message channel.
//!
//! Stands in for the host window's `message` event target: anything posted is
//! delivered to every listener subscribed at that moment.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `message` event: sender origin plus the structured-cloned payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub origin: String,
    pub data: Value,
}

#[cfg(test)]
impl MessageEvent {
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&MessageEvent) + Send + Sync>;

#[derive(Default)]
pub struct MessageChannel {
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl MessageChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&MessageEvent) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(other, _)| *other != id);
        listeners.len() != before
    }

    /// Deliver an event to every current listener.
    ///
    /// Listeners run outside the lock, so they may subscribe or unsubscribe.
    pub fn post(&self, event: &MessageEvent) {
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_post_reaches_all_listeners() {
        let channel = MessageChannel::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            let hits = Arc::clone(&hits);
            channel.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        channel.post(&MessageEvent::new("https://a.example", json!(null)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let channel = MessageChannel::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = channel.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.post(&MessageEvent::new("https://a.example", json!({})));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    fn test_event_ndjson_shape() {
        let event: MessageEvent =
            serde_json::from_str(r#"{"origin":"https://media.example","data":{"foo":1}}"#)
                .unwrap();
        assert_eq!(event.origin, "https://media.example");
        assert_eq!(event.data, json!({"foo": 1}));
    }
}
