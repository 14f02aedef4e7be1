//! Parse completion notifications
//!
//! Observers register either a callback ([`Observers::subscribe`]) or a broadcast
//! receiver ([`Observers::receiver`]). Callbacks run on the task that completed
//! the parse, one after the other; a panicking callback is logged and skipped.

use readability_core::ParseResult;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

/// Capacity of the broadcast channel handed out by [`Observers::receiver`]
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Emitted once for every completed parse call
#[derive(Debug, Clone)]
pub struct ParseEvent {
    pub article_url: String,
    pub result: ParseResult,
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// How a caller-supplied handler finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    Completed,
    Panicked(String),
}

type Handler = Arc<dyn Fn(&ParseEvent) + Send + Sync>;

pub struct Observers {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(SubscriptionId, Handler)>>,
    channel: broadcast::Sender<Arc<ParseEvent>>,
}

impl Default for Observers {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.len())
            .field("receivers", &self.channel.receiver_count())
            .finish()
    }
}

impl Observers {
    pub fn new() -> Self {
        let (channel, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            next_id: AtomicU64::new(1),
            handlers: Mutex::new(Vec::new()),
            channel,
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ParseEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Returns false when the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// New receiver for events emitted after this call.
    ///
    /// A receiver that falls more than [`EVENT_CHANNEL_CAPACITY`] events behind
    /// gets `RecvError::Lagged`; parsing never waits on it.
    pub fn receiver(&self) -> broadcast::Receiver<Arc<ParseEvent>> {
        self.channel.subscribe()
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver an event to every observer. Returns how many callbacks panicked.
    pub fn notify(&self, event: ParseEvent) -> usize {
        // Handlers run without the lock held so they may (un)subscribe.
        let handlers: Vec<(SubscriptionId, Handler)> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut panicked = 0;
        for (id, handler) in handlers {
            if let HandlerOutcome::Panicked(message) = isolate(|| handler(&event)) {
                log::error!("Parse observer {} panicked: {}", id.0, message);
                panicked += 1;
            }
        }

        // Fails only when nobody holds a receiver.
        let _ = self.channel.send(Arc::new(event));

        panicked
    }
}

/// Run a caller-supplied handler, catching any panic it raises
pub fn isolate<F: FnOnce()>(handler: F) -> HandlerOutcome {
    match catch_unwind(AssertUnwindSafe(handler)) {
        Ok(()) => HandlerOutcome::Completed,
        Err(payload) => HandlerOutcome::Panicked(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
