//! Per-subscription inbox of weak event references.
//!
//! The bus keeps the only strong reference to a live event; an inbox entry
//! that outlives the event's eviction simply fails to upgrade.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::events::Event;

#[derive(Default)]
pub(crate) struct Inbox {
    queue: Mutex<VecDeque<Weak<Event>>>,
}

impl Inbox {
    /// Appends a non-owning reference.
    pub(crate) fn receive(&self, event: &Arc<Event>) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Arc::downgrade(event));
    }

    /// Empties the inbox and returns what it held, in arrival order.
    pub(crate) fn take(&self) -> VecDeque<Weak<Event>> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub(crate) fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
