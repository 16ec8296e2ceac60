//! # Hub: the context object producers, listeners and drivers share.
//!
//! A [`Hub`] bundles one [`CategoryRegistry`], one [`Bus`] and one
//! [`ResponseStore`] with the [`Config`] they run under. It is constructed
//! once and passed around by clone; there is no process-wide instance, so
//! tests get isolation by building their own hub.
//!
//! ```text
//! Hub ─┬─ registry   register(name) / lookup(name)
//!      ├─ bus        create / attach / sweep
//!      ├─ responses  store / take / sweep
//!      └─ config     tick, default lifetimes, drain cadence
//!
//! Hub::tick() ──► bus.sweep() + responses.sweep()
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::core::config::Config;
use crate::error::ConfigError;
use crate::events::{Bus, Category, CategoryRegistry, EventId, Payload, ResponseStore};
use crate::listeners::ListenerId;

/// Outcome of one [`Hub::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Broadcast events evicted from the bus.
    pub events: usize,
    /// Stored responses that expired.
    pub responses: usize,
}

impl SweepReport {
    /// Events and responses evicted together.
    #[inline]
    pub fn total(&self) -> usize {
        self.events + self.responses
    }
}

/// Shared context: registry, bus, response store and configuration.
#[derive(Clone, Debug)]
pub struct Hub {
    cfg: Arc<Config>,
    registry: Arc<CategoryRegistry>,
    bus: Bus,
    responses: ResponseStore,
}

impl Hub {
    /// Creates a hub after validating `cfg`.
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let bus = Bus::new();
        let responses = ResponseStore::new(&bus);
        debug!(tick = ?cfg.tick, default_lifetime = cfg.default_lifetime, "hub created");

        Ok(Self {
            cfg: Arc::new(cfg),
            registry: Arc::new(CategoryRegistry::new()),
            bus,
            responses,
        })
    }

    /// Configuration the hub was validated with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Category names interned for this hub.
    #[inline]
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Bus producers and subscriptions share.
    #[inline]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Per-recipient response queues.
    #[inline]
    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    /// Shorthand for `registry().register(name)`.
    pub fn category(&self, name: &str) -> Category {
        self.registry.register(name)
    }

    /// Creates and dispatches an event with the configured default lifetime.
    pub fn emit(&self, category: Category, payload: Payload) -> EventId {
        self.bus.create(category, self.cfg.default_lifetime, payload)
    }

    /// Stores a response for `recipient` with the configured response lifetime.
    pub fn respond(&self, recipient: ListenerId, category: Category, payload: Payload) -> EventId {
        self.responses
            .store(recipient, category, self.cfg.response_lifetime, payload)
    }

    /// Advances one tick: sweeps the bus and the response store.
    pub fn tick(&self) -> SweepReport {
        SweepReport {
            events: self.bus.sweep(),
            responses: self.responses.sweep(),
        }
    }
}
