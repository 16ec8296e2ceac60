//! Runtime core: context object, configuration and the tick driver.
//!
//! The public API from this module is [`Hub`] (shared context), [`Config`]
//! and [`Ticker`] (the periodic driver).
//!
//! Internal modules:
//! - [`config`]: runtime settings and validation;
//! - [`hub`]: registry + bus + response store bundled as one context;
//! - [`ticker`]: async loop that drains subscriptions and sweeps the hub.

mod config;
mod hub;
mod ticker;

pub use config::Config;
pub use hub::{Hub, SweepReport};
pub use ticker::{Ticker, TickerReport};
