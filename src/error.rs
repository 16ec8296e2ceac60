//! Error types used by the hub runtime.
//!
//! The event path itself never fails: unknown names resolve to
//! [`Category::UNKNOWN`](crate::Category::UNKNOWN) and dispatch without
//! subscribers is a no-op. Errors only surface at the edges:
//!
//! - [`ConfigError`]: a [`Config`](crate::Config) that cannot drive a hub.
//! - [`BusError`]: a [`Subscription`](crate::Subscription) used with another bus.
//!
//! Both types provide `as_label` for logs/metrics.

use thiserror::Error;

/// # Errors produced while validating a [`Config`](crate::Config).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The tick period is zero; an interval driver cannot be built from it.
    #[error("tick period must be greater than zero")]
    ZeroTick,

    /// A default lifetime is zero, so events would be evicted on the very next sweep.
    #[error("{field} must be at least one tick")]
    ZeroLifetime {
        /// Name of the offending configuration field.
        field: &'static str,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickhub::ConfigError;
    ///
    /// assert_eq!(ConfigError::ZeroTick.as_label(), "config_zero_tick");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::ZeroTick => "config_zero_tick",
            ConfigError::ZeroLifetime { .. } => "config_zero_lifetime",
        }
    }
}

/// # Errors produced by [`Bus`](crate::Bus) subscription management.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The subscription was attached to a different bus instance.
    #[error("listener '{listener}' belongs to another bus")]
    ForeignListener {
        /// Name of the listener behind the subscription.
        listener: &'static str,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::ForeignListener { .. } => "bus_foreign_listener",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            ConfigError::ZeroLifetime { field: "default_lifetime" }.as_label(),
            "config_zero_lifetime"
        );
        assert_eq!(
            BusError::ForeignListener { listener: "x" }.as_label(),
            "bus_foreign_listener"
        );
    }

    #[test]
    fn messages_name_the_field() {
        let err = ConfigError::ZeroLifetime { field: "response_lifetime" };
        assert_eq!(err.to_string(), "response_lifetime must be at least one tick");
    }
}
