//! # Response store: events addressed to one listener.
//!
//! Broadcast goes through [`Bus::create`]; a *response* is an event meant for a
//! single recipient. [`ResponseStore`] keeps one FIFO queue per recipient and
//! expires entries with the same tick rule as the bus.
//!
//! ```text
//! store(recipient, ..) ──► queues[recipient].push_back
//! take(recipient)      ──► queues[recipient].pop_front
//! sweep()              ──► remaining -= 1 ──► drop expired, drop empty queues
//! ```
//!
//! Responses are not dispatched: the recipient pulls them with [`ResponseStore::take`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::listeners::ListenerId;

use super::bus::Bus;
use super::category::Category;
use super::event::{Event, EventId, Payload};

struct Pending {
    event: Arc<Event>,
    remaining: u8,
}

/// Per-recipient queues of directly addressed events.
///
/// Cheap to clone; clones share the same queues. Event ids come from the
/// owning bus, so responses and broadcasts never share an id.
#[derive(Clone)]
pub struct ResponseStore {
    bus: Bus,
    queues: Arc<Mutex<HashMap<ListenerId, VecDeque<Pending>>>>,
}

impl ResponseStore {
    /// Creates an empty store drawing ids from `bus`.
    pub fn new(bus: &Bus) -> Self {
        Self {
            bus: bus.clone(),
            queues: Arc::default(),
        }
    }

    /// Queues a response for `recipient`, live for `lifetime` sweeps.
    pub fn store(
        &self,
        recipient: ListenerId,
        category: Category,
        lifetime: u8,
        payload: Payload,
    ) -> EventId {
        let id = self.bus.next_event_id();
        let event = Arc::new(Event::new(id, category, payload));

        self.lock()
            .entry(recipient)
            .or_default()
            .push_back(Pending {
                event,
                remaining: lifetime,
            });
        trace!(%recipient, event = %id, "response stored");
        id
    }

    /// Removes and returns the oldest live response for `recipient`.
    pub fn take(&self, recipient: ListenerId) -> Option<Arc<Event>> {
        let mut queues = self.lock();
        let queue = queues.get_mut(&recipient)?;
        let next = queue.pop_front().map(|pending| pending.event);
        if queue.is_empty() {
            queues.remove(&recipient);
        }
        next
    }

    /// Number of responses waiting for `recipient`.
    pub fn pending(&self, recipient: ListenerId) -> usize {
        self.lock().get(&recipient).map_or(0, VecDeque::len)
    }

    /// Total number of stored responses.
    pub fn len(&self) -> usize {
        self.lock().values().map(VecDeque::len).sum()
    }

    /// True when no recipient has a stored response.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every response queued for `recipient`.
    pub fn forget(&self, recipient: ListenerId) {
        self.lock().remove(&recipient);
    }

    /// Advances every response by one tick; returns how many expired.
    pub fn sweep(&self) -> usize {
        let mut queues = self.lock();
        let mut evicted = 0;
        queues.retain(|_, queue| {
            let before = queue.len();
            queue.retain_mut(|pending| {
                pending.remaining = pending.remaining.saturating_sub(1);
                pending.remaining > 0
            });
            evicted += before - queue.len();
            !queue.is_empty()
        });

        if evicted > 0 {
            debug!(evicted, recipients = queues.len(), "responses expired");
        }
        evicted
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ListenerId, VecDeque<Pending>>> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ResponseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStore")
            .field("len", &self.len())
            .finish()
    }
}
