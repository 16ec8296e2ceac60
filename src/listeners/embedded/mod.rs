//! # Built-in listeners
//!
//! Small, self-contained implementations useful for demos and debugging.
//!
//! - [`LogWriter`]: prints log events in a human-readable form.

mod log;

pub use log::LogWriter;
