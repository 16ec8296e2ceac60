//! # Events created through the bus.
//!
//! An [`Event`] pairs a [`Category`] with a [`Payload`]. Events are created by
//! [`Bus::create`](crate::Bus::create), which also assigns the [`EventId`] and
//! tracks the remaining lifetime; the event itself is immutable once built.
//!
//! [`Payload`] is a closed set of kinds. Application-specific data goes into
//! [`Payload::Custom`] and is read back with a checked downcast.
//!
//! ## Example
//! ```rust
//! use tickhub::{Bus, Category, Payload};
//!
//! let bus = Bus::new();
//! let id = bus.create(Category::LOG_INFO, 1, Payload::log("started"));
//! assert!(bus.is_live(id));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use super::category::Category;

/// Bus-assigned identifier, monotonically increasing per bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub(crate) u64);

impl EventId {
    /// Raw sequence number.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ev-{}", self.0)
    }
}

/// Kind-specific data carried by an event.
#[derive(Clone, Default)]
pub enum Payload {
    /// No data; the category alone is the signal.
    #[default]
    Empty,
    /// Log line, published under one of the built-in log categories.
    Log { message: Arc<str> },
    /// Free-form text.
    Text(Arc<str>),
    /// Message addressed from one party to another.
    Message {
        sender: Arc<str>,
        recipient: Arc<str>,
        body: Arc<str>,
    },
    /// Application-defined value; read with [`Event::custom`].
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Payload {
    /// Log line payload, for the built-in log categories.
    pub fn log(message: impl Into<Arc<str>>) -> Self {
        Payload::Log {
            message: message.into(),
        }
    }

    /// Free-form text payload.
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Payload::Text(text.into())
    }

    /// Message from `sender` to `recipient`.
    pub fn message(
        sender: impl Into<Arc<str>>,
        recipient: impl Into<Arc<str>>,
        body: impl Into<Arc<str>>,
    ) -> Self {
        Payload::Message {
            sender: sender.into(),
            recipient: recipient.into(),
            body: body.into(),
        }
    }

    /// Wraps an application value; read it back with [`Event::custom`].
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Payload::Custom(Arc::new(value))
    }

    /// Short stable name of the payload kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Log { .. } => "log",
            Payload::Text(_) => "text",
            Payload::Message { .. } => "message",
            Payload::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Empty => f.write_str("Empty"),
            Payload::Log { message } => f.debug_struct("Log").field("message", message).finish(),
            Payload::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Payload::Message {
                sender,
                recipient,
                body,
            } => f
                .debug_struct("Message")
                .field("sender", sender)
                .field("recipient", recipient)
                .field("body", body)
                .finish(),
            Payload::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Immutable event record.
///
/// - `id`: per-bus sequence, restores creation order
/// - `at`: wall-clock creation time (for logs)
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub at: SystemTime,
    category: Category,
    payload: Payload,
}

impl Event {
    pub(crate) fn new(id: EventId, category: Category, payload: Payload) -> Self {
        Self {
            id,
            at: SystemTime::now(),
            category,
            payload,
        }
    }

    /// Category the event was created under.
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Data carried by the event.
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Human-readable text of `Log`, `Text` and `Message` payloads.
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Log { message } => Some(message),
            Payload::Text(text) => Some(text),
            Payload::Message { body, .. } => Some(body),
            Payload::Empty | Payload::Custom(_) => None,
        }
    }

    /// Typed view of a [`Payload::Custom`] value; `None` on kind or type mismatch.
    pub fn custom<T: Any>(&self) -> Option<&T> {
        match &self.payload {
            Payload::Custom(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}
