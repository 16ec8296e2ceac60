//! # Event bus: subscriber table, live events, dispatch and sweep.
//!
//! [`Bus`] owns every live [`Event`] and a table mapping each [`Category`] to
//! the subscription rows that want it. Creating an event dispatches it
//! synchronously: before [`Bus::create`] returns, every subscribed inbox holds a
//! weak reference to it.
//!
//! ## Architecture
//! ```text
//! Producer ── create(category, lifetime, payload)
//!                 │
//!                 ├─► live set: Arc<Event> + remaining ticks
//!                 └─► dispatch ──► table[category] ──► Inbox::receive (in row order)
//!
//! Driver ── sweep() ──► remaining -= 1 (saturating) ──► evict remaining == 0
//! ```
//!
//! ## Rules
//! - **Synchronous dispatch**: delivery happens inside `create`.
//! - **Row order**: rows are dispatched in insertion order; duplicates are kept.
//! - **Silent defaults**: no subscribers, `UNKNOWN` category, removing an absent
//!   listener are all no-ops.
//! - **No user code under locks**: dispatch only appends to inboxes, listeners run
//!   later in [`Subscription::drain`].
//! - **Ownership**: the live set holds the only strong reference; an evicted event
//!   is no longer observable through any inbox.
//!
//! ## Lifetime
//! An event created with lifetime `L >= 1` is still live after `L - 1` sweeps and
//! evicted by the `L`-th. Lifetime `0` is evicted by the first sweep.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::error::BusError;
use crate::listeners::{Listener, ListenerId, Subscription};
use crate::listeners::inbox::Inbox;

use super::category::Category;
use super::event::{Event, EventId, Payload};

/// One subscription row.
struct Row {
    listener: ListenerId,
    inbox: Arc<Inbox>,
}

/// A live event and its remaining lifetime in ticks.
struct Live {
    event: Arc<Event>,
    remaining: u8,
}

/// Live events, kept sorted by id (bus ids are assigned under this lock).
#[derive(Default)]
struct LiveSet {
    events: Vec<Live>,
}

impl LiveSet {
    fn position(&self, id: EventId) -> Option<usize> {
        self.events
            .binary_search_by_key(&id, |live| live.event.id)
            .ok()
    }
}

#[derive(Default)]
struct Inner {
    table: RwLock<HashMap<Category, Vec<Row>>>,
    live: Mutex<LiveSet>,
    next_event: AtomicU64,
    next_listener: AtomicU64,
}

/// Publish/subscribe hub for tick-scoped events.
///
/// ### Properties
/// - **Cloneable**: cheap to clone (internally holds an `Arc`).
/// - **Thread-safe**: table and live set are guarded separately.
/// - **Synchronous**: no operation blocks on listener code.
#[derive(Clone, Default)]
pub struct Bus {
    inner: Arc<Inner>,
}

impl Bus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an event, stores it as live and dispatches it to current subscribers.
    ///
    /// The event stays live for `lifetime` calls to [`Bus::sweep`].
    pub fn create(&self, category: Category, lifetime: u8, payload: Payload) -> EventId {
        let event = {
            let mut live = self.lock_live();
            let id = self.next_event_id();

            let event = Arc::new(Event::new(id, category, payload));
            live.events.push(Live {
                event: event.clone(),
                remaining: lifetime,
            });
            event
        };

        self.dispatch(&event);
        event.id
    }

    /// Appends `event` to the inbox of every row subscribed to its category.
    ///
    /// Returns the number of deliveries (rows, not distinct listeners).
    pub fn dispatch(&self, event: &Arc<Event>) -> usize {
        let category = event.category();
        if category.is_unknown() {
            return 0;
        }

        let table = self.inner.table.read().unwrap_or_else(PoisonError::into_inner);
        let Some(rows) = table.get(&category) else {
            trace!(event = %event.id, category = %category, "no subscribers");
            return 0;
        };

        for row in rows {
            row.inbox.receive(event);
        }
        trace!(
            event = %event.id,
            category = %category,
            deliveries = rows.len(),
            "event dispatched"
        );
        rows.len()
    }

    /// Wraps `listener` in a [`Subscription`] subscribed to its declared categories.
    pub fn attach<L: Listener>(&self, listener: L) -> Subscription<L> {
        let categories = listener.categories();
        self.attach_to(listener, categories)
    }

    /// Wraps `listener` in a [`Subscription`] subscribed to `categories`.
    pub fn attach_to<L, I>(&self, listener: L, categories: I) -> Subscription<L>
    where
        L: Listener,
        I: IntoIterator<Item = Category>,
    {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, AtomicOrdering::Relaxed));
        let sub = Subscription::new(self.clone(), id, listener);
        for category in categories {
            sub.subscribe(category);
        }
        sub
    }

    /// Adds a row for `sub` under `category`. Duplicates are allowed.
    pub fn add_listener<L: Listener>(
        &self,
        sub: &Subscription<L>,
        category: Category,
    ) -> Result<(), BusError> {
        self.ensure_own(sub)?;
        sub.subscribe(category);
        Ok(())
    }

    /// Removes every row of `sub` under `category`.
    pub fn remove_listener_from<L: Listener>(
        &self,
        sub: &Subscription<L>,
        category: Category,
    ) -> Result<(), BusError> {
        self.ensure_own(sub)?;
        self.unsubscribe(sub.id(), category);
        Ok(())
    }

    /// Removes every row of `sub` in every category.
    pub fn remove_listener<L: Listener>(&self, sub: &Subscription<L>) -> Result<(), BusError> {
        self.ensure_own(sub)?;
        self.detach(sub.id());
        Ok(())
    }

    /// Advances every live event by one tick and evicts the expired ones.
    ///
    /// Returns the number of evicted events. Eviction is silent.
    pub fn sweep(&self) -> usize {
        let mut live = self.lock_live();
        let before = live.events.len();
        live.events.retain_mut(|entry| {
            entry.remaining = entry.remaining.saturating_sub(1);
            entry.remaining > 0
        });
        let evicted = before - live.events.len();

        if evicted > 0 {
            debug!(evicted, live = live.events.len(), "sweep evicted events");
        }
        evicted
    }

    /// True while the event has not been evicted.
    pub fn is_live(&self, id: EventId) -> bool {
        self.lock_live().position(id).is_some()
    }

    /// Remaining ticks of a live event.
    pub fn remaining(&self, id: EventId) -> Option<u8> {
        let live = self.lock_live();
        live.position(id).map(|idx| live.events[idx].remaining)
    }

    /// Shared handle to a live event.
    pub fn get(&self, id: EventId) -> Option<Arc<Event>> {
        let live = self.lock_live();
        live.position(id).map(|idx| live.events[idx].event.clone())
    }

    /// Number of live events.
    pub fn live_len(&self) -> usize {
        self.lock_live().events.len()
    }

    /// Number of rows subscribed to `category`.
    pub fn subscriber_count(&self, category: Category) -> usize {
        self.read_table().get(&category).map_or(0, Vec::len)
    }

    /// Categories in which `listener` holds at least one row, ascending by id.
    pub fn categories_of(&self, listener: ListenerId) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .read_table()
            .iter()
            .filter(|(_, rows)| rows.iter().any(|row| row.listener == listener))
            .map(|(category, _)| *category)
            .collect();
        categories.sort_unstable_by_key(|c| c.id());
        categories
    }

    // ---------------------------
    // Row management
    // ---------------------------

    pub(crate) fn subscribe(
        &self,
        listener: ListenerId,
        name: &'static str,
        inbox: &Arc<Inbox>,
        category: Category,
    ) {
        if category.is_unknown() {
            debug!(listener = name, "ignoring subscription to UNKNOWN");
            return;
        }

        let mut table = self.write_table();
        table.entry(category).or_default().push(Row {
            listener,
            inbox: inbox.clone(),
        });
        debug!(%listener, listener_name = name, category = %category, "listener subscribed");
    }

    pub(crate) fn unsubscribe(&self, listener: ListenerId, category: Category) {
        let mut table = self.write_table();
        if let Some(rows) = table.get_mut(&category) {
            rows.retain(|row| row.listener != listener);
            if rows.is_empty() {
                table.remove(&category);
            }
        }
    }

    pub(crate) fn detach(&self, listener: ListenerId) {
        let mut table = self.write_table();
        table.retain(|_, rows| {
            rows.retain(|row| row.listener != listener);
            !rows.is_empty()
        });
        trace!(%listener, "listener detached");
    }

    /// Next id in the sequence shared by bus events and stored responses.
    pub(crate) fn next_event_id(&self) -> EventId {
        EventId(self.inner.next_event.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// True if both handles refer to the same bus.
    pub fn same_bus(&self, other: &Bus) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn ensure_own<L: Listener>(&self, sub: &Subscription<L>) -> Result<(), BusError> {
        if self.same_bus(sub.bus()) {
            Ok(())
        } else {
            Err(BusError::ForeignListener {
                listener: sub.name(),
            })
        }
    }

    // ---------------------------
    // Lock helpers
    // ---------------------------

    fn lock_live(&self) -> std::sync::MutexGuard<'_, LiveSet> {
        self.inner.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_table(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Category, Vec<Row>>> {
        self.inner.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Category, Vec<Row>>> {
        self.inner.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("live", &self.live_len())
            .field("categories", &self.read_table().len())
            .finish()
    }
}
