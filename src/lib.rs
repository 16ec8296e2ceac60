//! # tickhub
//!
//! **tickhub** is an in-process publish/subscribe event hub with tick-based
//! expiration.
//!
//! Producers create events tagged with an interned [`Category`]; every
//! [`Listener`] subscribed to that category gets a reference in its inbox
//! before [`Bus::create`] returns. Events live for a fixed number of *ticks*
//! and are discarded by [`Bus::sweep`], which a driver (for example
//! [`Ticker`]) calls once per tick.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Producer                Producer               Producer
//!      │ register("CHAT")      │ create(..)            │ respond(..)
//!      ▼                       ▼                       ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Hub (context object, cloned into producers/drivers)              │
//! │  - CategoryRegistry (name → Category, built-ins pre-interned)     │
//! │  - Bus (subscriber table + live events, synchronous dispatch)     │
//! │  - ResponseStore (per-recipient queues)                           │
//! │  - Config (tick, default lifetimes, drain cadence)                │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        │ dispatch         │ dispatch         │ dispatch
//!        ▼                  ▼                  ▼
//!     ┌──────────┐       ┌──────────┐       ┌──────────┐
//!     │  Inbox   │       │  Inbox   │       │  Inbox   │   (weak refs)
//!     └────┬─────┘       └────┬─────┘       └────┬─────┘
//!          ▼ drain()          ▼ drain()          ▼ drain()
//!     Subscription<L>    Subscription<L>    Subscription<L>
//!          │                  │                  │
//!     L::handle(&Event)  L::handle(&Event)  L::handle(&Event)
//! ```
//!
//! ### Lifecycle
//! ```text
//! create(category, lifetime=L) ──► live set ──► dispatched to inboxes
//!
//! every tick:
//!   ├─► owned subscriptions drained (Ticker, drain_every)
//!   └─► sweep: remaining -= 1 (saturating)
//!              └─ remaining == 0 ─► evicted; queued weak refs no longer upgrade
//!
//! drop(Subscription) ──► listener removed from every category
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                     |
//! |-------------------|--------------------------------------------------------------|----------------------------------------|
//! | **Categories**    | Interned, dense event categories with built-in log levels.   | [`Category`], [`CategoryRegistry`]     |
//! | **Dispatch**      | Synchronous fan-out into per-listener inboxes.               | [`Bus`], [`Event`], [`Payload`]        |
//! | **Listeners**     | Pull-based processing with scoped unsubscription.            | [`Listener`], [`Subscription`]         |
//! | **Responses**     | Events addressed to a single recipient.                      | [`ResponseStore`]                      |
//! | **Driver**        | Async tick loop with cancellation.                           | [`Ticker`], [`Hub`]                    |
//! | **Errors**        | Typed configuration and subscription errors.                 | [`ConfigError`], [`BusError`]          |
//!
//! ## Optional features
//! - `logging` _(default)_: exports the built-in console [`LogWriter`].
//!
//! ## Example
//! ```rust
//! use tickhub::{Config, Event, Hub, Listener, Payload};
//!
//! #[derive(Default)]
//! struct Chat(Vec<String>);
//!
//! impl Listener for Chat {
//!     fn handle(&mut self, event: &Event) {
//!         self.0.extend(event.message().map(str::to_owned));
//!     }
//! }
//!
//! let hub = Hub::new(Config::default()).unwrap();
//! let chat = hub.category("CHAT");
//!
//! let mut sub = hub.bus().attach_to(Chat::default(), [chat]);
//! let id = hub.bus().create(chat, 1, Payload::text("hi"));
//!
//! assert_eq!(sub.drain(), 1);
//! assert_eq!(sub.listener().0, ["hi"]);
//!
//! hub.tick();
//! assert!(!hub.bus().is_live(id));
//! ```
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use core::{Config, Hub, SweepReport, Ticker, TickerReport};
pub use error::{BusError, ConfigError};
pub use events::{Bus, Category, CategoryRegistry, Event, EventId, Payload, ResponseStore, Severity};
pub use listeners::{Drain, FromFn, Listener, ListenerId, Subscription, from_fn};

// Optional: a simple built-in console listener.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
