//! # Listener trait.
//!
//! Provides [`Listener`], the extension point for consuming events. A listener
//! never talks to the bus directly: it is wrapped in a
//! [`Subscription`](crate::Subscription), which owns its inbox and its rows in
//! the subscriber table.
//!
//! ## Architecture
//! ```text
//! Bus::create ──► dispatch ──► Inbox::receive (weak ref, per subscription row)
//!                                  │
//!        (application cadence)     ▼
//! Subscription::drain ──► Listener::handle(&Event)  (FIFO, live events only)
//! ```
//!
//! ## Rules
//! - `handle` runs on the caller of `drain`, never while a bus lock is held,
//!   so it may create events itself.
//! - Events evicted before the drain are skipped.
//! - Dropping the subscription unsubscribes the listener from every category.
//!
//! ## Example
//! ```rust
//! use tickhub::{Bus, Category, Event, Listener, Payload};
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl Listener for Counter {
//!     fn handle(&mut self, _event: &Event) {
//!         self.0 += 1;
//!     }
//!
//!     fn categories(&self) -> Vec<Category> {
//!         vec![Category::LOG_INFO]
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//!
//! let bus = Bus::new();
//! let mut sub = bus.attach(Counter::default());
//! bus.create(Category::LOG_INFO, 1, Payload::log("hello"));
//! assert_eq!(sub.drain(), 1);
//! assert_eq!(sub.listener().0, 1);
//! ```

use std::fmt;

use crate::events::{Category, Event};

/// Identifier of a subscription within its bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Event consumer.
///
/// ### Implementation requirements
/// - Keep `handle` non-blocking; it runs inline in the drain loop.
/// - Copy out whatever must outlive the call; the `&Event` is only borrowed.
pub trait Listener {
    /// Processes a single event. Called by `drain` in arrival order.
    fn handle(&mut self, event: &Event);

    /// Categories to subscribe to when attached with [`Bus::attach`](crate::Bus::attach).
    ///
    /// Default: none.
    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }

    /// Name used in diagnostics.
    ///
    /// Defaults to the full type path; short names read better in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Type-erased drain, so a driver can own subscriptions of different listener types.
pub trait Drain {
    /// Handles every queued event; returns how many were handled.
    fn drain(&mut self) -> usize;

    /// Name of the underlying listener.
    fn name(&self) -> &'static str;
}

/// Listener built from a closure; see [`from_fn`].
pub struct FromFn<F>(F);

impl<F> Listener for FromFn<F>
where
    F: FnMut(&Event),
{
    #[inline]
    fn handle(&mut self, event: &Event) {
        (self.0)(event)
    }

    fn name(&self) -> &'static str {
        "from_fn"
    }
}

/// Wraps a closure as a [`Listener`].
///
/// Subscribe it with [`Bus::attach_to`](crate::Bus::attach_to), since a closure
/// declares no categories of its own.
#[inline]
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&Event),
{
    FromFn(f)
}
