//! Subscriptions to System Real Time messages.

use crate::status::RealtimeStatus;
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{Arc, Weak},
};

type Handler = Arc<Mutex<dyn FnMut(RealtimeStatus) + Send>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: [Vec<(u64, Handler)>; 6],
}

/// A registry of handlers keyed by real-time status.
///
/// Cloning an `Observers` yields another handle to the same registry.
///
/// Handlers run synchronously, in registration order, with the registry unlocked.
/// A handler may subscribe and unsubscribe (itself included) while it runs; the handlers called
/// by a notification are the ones registered when it started.
/// A handler must not notify its own status, which would lock it recursively.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Arc<Mutex<Registry>>,
}
impl Observers {
    #[inline]
    pub fn new() -> Observers {
        Observers::default()
    }

    /// Register a handler called every time a message with the given status is notified.
    pub fn subscribe<F>(&self, status: RealtimeStatus, handler: F) -> Subscription
    where
        F: FnMut(RealtimeStatus) + Send + 'static,
    {
        let mut registry = self.inner.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        let handler: Handler = Arc::new(Mutex::new(handler));
        registry.handlers[status.index()].push((id, handler));
        Subscription {
            status,
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Call every handler registered for `status`, returning how many were called.
    pub fn notify(&self, status: RealtimeStatus) -> usize {
        let handlers = self.inner.lock().handlers[status.index()]
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect::<Vec<_>>();
        for handler in handlers.iter() {
            (&mut *handler.lock())(status);
        }
        handlers.len()
    }

    /// The amount of handlers registered for `status`.
    pub fn handler_count(&self, status: RealtimeStatus) -> usize {
        self.inner.lock().handlers[status.index()].len()
    }
}
impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let registry = self.inner.lock();
        let mut list = f.debug_map();
        for status in RealtimeStatus::ALL.iter() {
            list.entry(status, &registry.handlers[status.index()].len());
        }
        list.finish()
    }
}

/// A handle to a registered handler.
///
/// Dropping the handle does not unsubscribe; call [`unsubscribe`](#method.unsubscribe).
#[derive(Clone, Debug)]
pub struct Subscription {
    status: RealtimeStatus,
    id: u64,
    registry: Weak<Mutex<Registry>>,
}
impl Subscription {
    #[inline]
    pub fn status(&self) -> RealtimeStatus {
        self.status
    }

    /// Remove the handler from its registry.
    ///
    /// Returns whether the handler was still registered. Unsubscribing twice, or after every
    /// handle to the registry was dropped, does nothing.
    pub fn unsubscribe(&self) -> bool {
        let registry = match self.registry.upgrade() {
            Some(registry) => registry,
            None => return false,
        };
        let mut registry = registry.lock();
        let handlers = &mut registry.handlers[self.status.index()];
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != self.id);
        handlers.len() != before
    }
}
