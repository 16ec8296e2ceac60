//! # Subscription: scoped ownership of a listener's place on the bus.
//!
//! A [`Subscription`] is the only way a [`Listener`] receives events. It owns
//! the listener, its [`Inbox`] and its id; dropping it removes every row the
//! listener holds in the subscriber table, on every exit path (including
//! unwinding). The table therefore never refers to a listener that is gone.
//!
//! ```text
//! Bus::attach(listener) ──► Subscription { id, inbox, listener }
//!        │                          │
//!        │  subscribe(category) ────┤ rows: category → (id, inbox)
//!        │  unsubscribe(category) ──┤
//!        │                          ▼
//!        └───────────── Drop ──► Bus::detach(id)   (all categories)
//! ```

use std::sync::Arc;

use tracing::trace;

use crate::events::{Bus, Category};

use super::inbox::Inbox;
use super::listener::{Drain, Listener, ListenerId};

/// Scoped subscription handle owning a listener.
pub struct Subscription<L: Listener> {
    id: ListenerId,
    name: &'static str,
    bus: Bus,
    inbox: Arc<Inbox>,
    listener: L,
}

impl<L: Listener> Subscription<L> {
    pub(crate) fn new(bus: Bus, id: ListenerId, listener: L) -> Self {
        Self {
            id,
            name: listener.name(),
            bus,
            inbox: Arc::new(Inbox::default()),
            listener,
        }
    }

    /// Id of this subscription's rows in the subscriber table.
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Diagnostic name of the wrapped listener.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The bus this subscription belongs to.
    #[inline]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Shared access to the wrapped listener.
    #[inline]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Exclusive access to the wrapped listener.
    #[inline]
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Adds one more subscription row for `category`.
    ///
    /// Rows are not deduplicated: subscribing twice delivers every event twice.
    pub fn subscribe(&self, category: Category) {
        self.bus.subscribe(self.id, self.name, &self.inbox, category);
    }

    /// Removes every row for `category`. Already queued events stay queued.
    pub fn unsubscribe(&self, category: Category) {
        self.bus.unsubscribe(self.id, category);
    }

    /// Removes every row in every category.
    pub fn unsubscribe_all(&self) {
        self.bus.detach(self.id);
    }

    /// Categories this listener currently holds at least one row in.
    pub fn categories(&self) -> Vec<Category> {
        self.bus.categories_of(self.id)
    }

    /// Number of queued references, including ones whose event was already evicted.
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Handles every queued event in arrival order and clears the inbox.
    ///
    /// References to events that were evicted since they arrived are skipped.
    /// Returns the number of events handed to [`Listener::handle`].
    pub fn drain(&mut self) -> usize {
        let queued = self.inbox.take();
        if queued.is_empty() {
            return 0;
        }

        let total = queued.len();
        let mut handled = 0;
        for event in queued.into_iter().filter_map(|weak| weak.upgrade()) {
            self.listener.handle(&event);
            handled += 1;
        }

        trace!(
            listener = self.name,
            handled,
            expired = total - handled,
            "inbox drained"
        );
        handled
    }
}

impl<L: Listener> Drain for Subscription<L> {
    fn drain(&mut self) -> usize {
        Subscription::drain(self)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<L: Listener> Drop for Subscription<L> {
    fn drop(&mut self) {
        self.bus.detach(self.id);
    }
}
