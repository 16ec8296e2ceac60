//! # Hub runtime configuration.
//!
//! Provides [`Config`] centralized settings for a [`Hub`](crate::Hub) and its
//! [`Ticker`](crate::Ticker).
//!
//! Config is used in two ways:
//! 1. **Hub creation**: `Hub::new(config)` validates it once.
//! 2. **Defaults**: `Hub::emit` and `Hub::respond` use the default lifetimes.
//!
//! ## Sentinel values
//! - `drain_every = 0` → the ticker never drains on its own (only on shutdown)

use std::time::Duration;

use crate::error::ConfigError;

/// Global configuration for a hub.
///
/// ## Field semantics
/// - `tick`: Period of one tick when driven by a [`Ticker`](crate::Ticker)
/// - `default_lifetime`: Ticks an event lives when created through `Hub::emit`
/// - `response_lifetime`: Ticks a stored response lives when created through `Hub::respond`
/// - `drain_every`: Ticker drains its subscriptions every `n` ticks (`0` = never)
#[derive(Clone, Debug)]
pub struct Config {
    /// Duration of one tick.
    ///
    /// Must be non-zero; an interval cannot be built from a zero period.
    pub tick: Duration,

    /// Default event lifetime, in ticks.
    pub default_lifetime: u8,

    /// Default response lifetime, in ticks.
    pub response_lifetime: u8,

    /// How many ticks pass between ticker-driven drains.
    ///
    /// - `0` = never (subscriptions are drained once, when the ticker stops)
    /// - `1` = every tick
    pub drain_every: u32,
}

impl Config {
    /// Checks the invariants the hub relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.default_lifetime == 0 {
            return Err(ConfigError::ZeroLifetime {
                field: "default_lifetime",
            });
        }
        if self.response_lifetime == 0 {
            return Err(ConfigError::ZeroLifetime {
                field: "response_lifetime",
            });
        }
        Ok(())
    }

    /// Returns the drain cadence as an `Option`.
    ///
    /// - `None` → never drain on ticks
    /// - `Some(n)` → drain every `n` ticks
    #[inline]
    pub fn drain_interval(&self) -> Option<u32> {
        if self.drain_every == 0 {
            None
        } else {
            Some(self.drain_every)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `tick = 100ms`
    /// - `default_lifetime = 1` (gone after the next sweep)
    /// - `response_lifetime = 8`
    /// - `drain_every = 1` (drain on every tick)
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            default_lifetime: 1,
            response_lifetime: 8,
            drain_every: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let cfg = Config {
            tick: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTick));
    }

    #[test]
    fn zero_lifetimes_are_rejected() {
        let cfg = Config {
            response_lifetime: 0,
            ..Config::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroLifetime {
                field: "response_lifetime"
            })
        );
    }

    #[test]
    fn drain_interval_sentinel() {
        let cfg = Config {
            drain_every: 0,
            ..Config::default()
        };
        assert_eq!(cfg.drain_interval(), None);
        assert_eq!(Config::default().drain_interval(), Some(1));
    }
}
