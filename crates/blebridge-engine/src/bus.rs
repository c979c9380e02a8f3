//! Canonical event fan-out
//!
//! An explicit publish/subscribe seam in place of an inheritance-based event
//! emitter: subscribers register a handler and get a handle back, and every
//! published event reaches every live subscriber, synchronously, in
//! subscription order.

use std::sync::{Arc, Mutex};

use tracing::debug;

use blebridge_core::BleEvent;

type Handler = Arc<dyn Fn(&BleEvent) + Send + Sync + 'static>;

// ----------------------------------------------------------------------------
// Subscription Handle
// ----------------------------------------------------------------------------

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
///
/// Dropping the handle does not unsubscribe; the handler stays registered
/// until [`EventBus::unsubscribe`] is called with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

// ----------------------------------------------------------------------------
// Event Bus
// ----------------------------------------------------------------------------

/// Shared fan-out point for canonical events
///
/// Cloning yields another handle to the same bus, so the pump task and the
/// command facade can publish into one subscriber set.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(u64, Handler)>,
}

impl EventBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it is invoked synchronously for every event
    /// published after this call.
    pub fn subscribe(&self, handler: impl Fn(&BleEvent) + Send + Sync + 'static) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(handler)));
        Subscription(id)
    }

    /// Remove a previously registered handler; returns whether it was still
    /// subscribed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(id, _)| *id != subscription.0);
        inner.subscribers.len() != before
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn publish(&self, event: &BleEvent) {
        // Handlers run outside the lock so they may subscribe or publish.
        let handlers: Vec<Handler> = self
            .lock()
            .subscribers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        if handlers.is_empty() {
            debug!("Publishing event with no subscribers");
        }
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BusInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_subscriber_receives_every_event() {
        let bus = EventBus::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_count = Arc::clone(&first);
        bus.subscribe(move |_| {
            first_count.fetch_add(1, Ordering::SeqCst);
        });
        let second_count = Arc::clone(&second);
        bus.subscribe(move |_| {
            second_count.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&BleEvent::ScanStart);
        bus.publish(&BleEvent::ScanStop);

        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe(move |_| order.lock().unwrap().push(label));
        }

        bus.publish(&BleEvent::ScanStart);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let handler_count = Arc::clone(&count);
        let subscription = bus.subscribe(move |_| {
            handler_count.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&BleEvent::ScanStart);
        assert!(bus.unsubscribe(subscription));
        bus.publish(&BleEvent::ScanStop);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!bus.unsubscribe(subscription));
    }
}
