//! Events: categories, payloads, the bus and the response store.
//!
//! This module groups the event **data model**, the **registry** that interns
//! category names, and the **bus** that owns live events and dispatches them.
//!
//! ## Contents
//! - [`Category`], [`Severity`] event classification
//! - [`CategoryRegistry`] name → category interning
//! - [`Event`], [`EventId`], [`Payload`] immutable event records
//! - [`Bus`] subscriber table, synchronous dispatch, tick sweep
//! - [`ResponseStore`] per-recipient queues for addressed events
//!
//! ## Quick reference
//! - **Producers**: anything holding a [`Bus`] (or a [`Hub`](crate::Hub)).
//! - **Consumers**: [`Subscription`](crate::Subscription)s drained on the
//!   application's own cadence.
//! - **Driver**: [`Ticker`](crate::Ticker) or any loop calling [`Bus::sweep`].

mod bus;
mod category;
mod event;
mod registry;
mod responses;

pub use bus::Bus;
pub use category::{Category, Severity};
pub use event::{Event, EventId, Payload};
pub use registry::CategoryRegistry;
pub use responses::ResponseStore;
