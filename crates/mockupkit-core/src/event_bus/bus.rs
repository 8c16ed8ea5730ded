//! Event bus implementation.
//!
//! Each editor session publishes to its own `Arc<EventBus>`. Handlers run
//! synchronously on the publishing thread, in subscription order.

use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::events::{AppEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Which events a handler wants.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Events in any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(AppEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: EventHandler,
}

/// Fan-out of editor events to the host.
pub struct EventBus {
    next_id: AtomicU64,
    subscriptions: RwLock<Vec<Subscription>>,
    /// Last events, oldest first. Disabled when `history_limit` is 0.
    history: Mutex<VecDeque<AppEvent>>,
    history_limit: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_history(0)
    }

    /// A bus that also keeps the last `limit` events for late observers.
    pub fn with_history(limit: usize) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscriptions: RwLock::new(Vec::new()),
            history: Mutex::new(VecDeque::with_capacity(limit.min(256))),
            history_limit: limit,
        }
    }

    /// Delivers `event` to every matching handler.
    ///
    /// Returns how many handlers received it.
    pub fn publish(&self, event: AppEvent) -> usize {
        if self.history_limit > 0 {
            let mut history = self.history.lock();
            if history.len() == self.history_limit {
                history.pop_front();
            }
            history.push_back(event.clone());
        }

        let subscriptions = self.subscriptions.read();
        let mut delivered = 0;
        for sub in subscriptions.iter().filter(|s| s.filter.matches(&event)) {
            (sub.handler)(event.clone());
            delivered += 1;
        }
        delivered
    }

    /// Publishes as a side effect of an editor operation.
    pub fn notify(&self, event: AppEvent) {
        tracing::trace!("event: {}", event.description());
        self.publish(event);
    }

    /// Registers `handler` for events matching `filter`.
    ///
    /// Handlers must not subscribe or unsubscribe from inside a callback.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        before != subscriptions.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Retained events, oldest first.
    pub fn history(&self) -> Vec<AppEvent> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("history_limit", &self.history_limit)
            .finish()
    }
}
