//! # Event listeners.
//!
//! This module provides the [`Listener`] trait, the [`Subscription`] handle
//! that binds a listener to a [`Bus`](crate::Bus), and built-in listeners.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Producer ── create(Event) ──► Bus ──► Inbox (one per subscription)
//!                                            │
//!                          Subscription::drain()
//!                                            │
//!                                   ┌────────┴────────┐
//!                                   ▼                 ▼
//!                               LogWriter          Custom ...
//! ```
//!
//! ## Listener types
//! - **Struct listeners** - implement [`Listener`], declare categories up front.
//! - **Closure listeners** - [`from_fn`], subscribed with [`Bus::attach_to`](crate::Bus::attach_to).

pub(crate) mod inbox;
mod listener;
mod subscription;

#[cfg(feature = "logging")]
mod embedded;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use listener::{Drain, FromFn, Listener, ListenerId, from_fn};
pub use subscription::Subscription;
