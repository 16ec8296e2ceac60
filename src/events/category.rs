//! # Event categories.
//!
//! A [`Category`] is an opaque, densely allocated identifier used to match
//! events against subscriptions. The first few ids are reserved:
//!
//! ```text
//! 0  UNKNOWN      sentinel, never matches a subscription
//! 1  LOG_DEBUG    ┐
//! 2  LOG_INFO     ├─ built-in severities, ordered by id
//! 3  LOG_WARNING  ┘
//! 4… custom       allocated by CategoryRegistry::register
//! ```
//!
//! Severity ordering only exists among the built-ins; it is exposed through
//! [`Category::severity`] so custom ids can never be compared against them.

use std::fmt;

/// Interned identifier of an event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Category(u32);

impl Category {
    /// Sentinel returned for names that were never registered.
    pub const UNKNOWN: Category = Category(0);
    /// Built-in debug log category.
    pub const LOG_DEBUG: Category = Category(1);
    /// Built-in info log category.
    pub const LOG_INFO: Category = Category(2);
    /// Built-in warning log category.
    pub const LOG_WARNING: Category = Category(3);

    /// First id handed out to custom categories.
    pub(crate) const FIRST_CUSTOM: u32 = 4;

    pub(crate) const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Raw numeric id.
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }

    /// True for the [`Category::UNKNOWN`] sentinel.
    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }

    /// True for `UNKNOWN` and the built-in log categories.
    #[inline]
    pub fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_CUSTOM
    }

    /// Severity of a built-in log category, `None` for anything else.
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::LOG_DEBUG => Some(Severity::Debug),
            Self::LOG_INFO => Some(Severity::Info),
            Self::LOG_WARNING => Some(Severity::Warning),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Log severity carried by the built-in log categories, ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 3] = [Severity::Debug, Severity::Info, Severity::Warning];

    /// Category events of this severity are published under.
    pub fn category(self) -> Category {
        match self {
            Severity::Debug => Category::LOG_DEBUG,
            Severity::Info => Category::LOG_INFO,
            Severity::Warning => Category::LOG_WARNING,
        }
    }

    /// Uppercase tag used in log output.
    pub fn as_tag(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_round_trips_through_category() {
        for sev in Severity::ALL {
            assert_eq!(sev.category().severity(), Some(sev));
        }
    }

    #[test]
    fn custom_and_unknown_have_no_severity() {
        assert_eq!(Category::UNKNOWN.severity(), None);
        assert_eq!(Category::from_raw(Category::FIRST_CUSTOM).severity(), None);
        assert!(!Category::from_raw(Category::FIRST_CUSTOM).is_builtin());
    }

    #[test]
    fn severities_are_ordered() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
    }
}
