//! Event delivery to registered subscribers.
//!
//! Subscribers are called synchronously from the inbound loop, in
//! registration order, after a line has been fully decoded. A slow
//! subscriber delays the next line; hand work off to a task or channel if
//! it can block.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{IncompleteFields, MalformedMessage};
use crate::event::{Event, EventKind};
use crate::handlers::Dispatch;

/// Receiver of decoded events.
pub trait Subscriber: Send + Sync {
    /// Kinds this subscriber wants. `None` means every kind.
    fn interests(&self) -> Option<&[EventKind]> {
        None
    }

    fn on_event(&self, event: &Event);

    /// A line was dropped because it could not be tokenized.
    fn on_malformed(&self, _error: &MalformedMessage) {}

    /// A line was decoded with some fields defaulted. Called before the
    /// line's events are delivered.
    fn on_incomplete(&self, _report: &IncompleteFields) {}
}

fn wants(subscriber: &dyn Subscriber, kind: EventKind) -> bool {
    subscriber
        .interests()
        .is_none_or(|kinds| kinds.contains(&kind))
}

/// Registered subscribers.
#[derive(Default)]
pub struct Subscribers {
    list: RwLock<Vec<Arc<dyn Subscriber>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, subscriber: Arc<dyn Subscriber>) {
        self.list.write().push(subscriber);
    }

    pub fn len(&self) -> usize {
        self.list.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.read().is_empty()
    }

    pub fn clear(&self) {
        self.list.write().clear();
    }

    // Snapshot so a subscriber may register another without deadlocking.
    fn snapshot(&self) -> Vec<Arc<dyn Subscriber>> {
        self.list.read().clone()
    }

    /// Deliver one decoded line.
    pub fn notify(&self, dispatch: &Dispatch) {
        let subscribers = self.snapshot();
        if let Some(report) = &dispatch.incomplete {
            for subscriber in &subscribers {
                subscriber.on_incomplete(report);
            }
        }
        for event in &dispatch.events {
            let kind = event.kind();
            for subscriber in subscribers.iter().filter(|s| wants(s.as_ref(), kind)) {
                subscriber.on_event(event);
            }
        }
    }

    pub fn malformed(&self, error: &MalformedMessage) {
        for subscriber in self.snapshot() {
            subscriber.on_malformed(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Dispatcher;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        filter: Option<Vec<EventKind>>,
        seen: Mutex<Vec<EventKind>>,
        incomplete: Mutex<usize>,
    }

    impl Subscriber for Recorder {
        fn interests(&self) -> Option<&[EventKind]> {
            self.filter.as_deref()
        }

        fn on_event(&self, event: &Event) {
            self.seen.lock().push(event.kind());
        }

        fn on_incomplete(&self, _report: &IncompleteFields) {
            *self.incomplete.lock() += 1;
        }
    }

    #[test]
    fn filter_limits_delivery() {
        let all = Arc::new(Recorder::default());
        let joins = Arc::new(Recorder {
            filter: Some(vec![EventKind::Join]),
            ..Default::default()
        });
        let subscribers = Subscribers::new();
        subscribers.add(all.clone());
        subscribers.add(joins.clone());

        let mut dispatcher = Dispatcher::new();
        for line in [":a!a@a.tmi.twitch.tv JOIN #ada", "PING :tmi.twitch.tv", "JOIN"] {
            subscribers.notify(&dispatcher.dispatch(line).unwrap());
        }

        assert_eq!(
            *all.seen.lock(),
            [EventKind::Join, EventKind::Ping, EventKind::Join]
        );
        assert_eq!(*joins.seen.lock(), [EventKind::Join, EventKind::Join]);
        assert_eq!(*all.incomplete.lock(), 1);
    }
}
