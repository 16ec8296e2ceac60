//! # LogWriter: console log listener
//!
//! Subscribes to the three built-in log categories and prints every event at
//! or above a minimum [`Severity`] to a sink (stdout by default).
//!
//! ## Example output
//! ```text
//! 2026-10-16 09:12:03.114 [DEBUG] loading assets
//! 2026-10-16 09:12:03.120 [INFO] player connected
//! 2026-10-16 09:12:04.002 [WARNING] frame took 41ms
//! ```

use std::io::{self, Write};

use chrono::{DateTime, Local};
use tracing::warn;

use crate::events::{Category, Event, Severity};
use crate::listeners::Listener;

const RESET: &str = "\x1b[0m";

fn color_of(severity: Severity) -> &'static str {
    match severity {
        Severity::Debug => "\x1b[34m",
        Severity::Info => "\x1b[32m",
        Severity::Warning => "\x1b[31m",
    }
}

/// Log event writer.
pub struct LogWriter {
    min: Severity,
    color: bool,
    sink: Box<dyn Write + Send>,
}

impl LogWriter {
    /// Writer to stdout with colors, printing `min` and above.
    #[must_use]
    pub fn new(min: Severity) -> Self {
        Self {
            min,
            color: true,
            sink: Box::new(io::stdout()),
        }
    }

    /// Replaces the output sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Lowest severity that gets written.
    pub fn min_severity(&self) -> Severity {
        self.min
    }

    fn format_line(&self, severity: Severity, at: DateTime<Local>, message: &str) -> String {
        let stamp = at.format("%Y-%m-%d %H:%M:%S%.3f");
        if self.color {
            format!(
                "{stamp} {}[{}]{RESET} {message}\n",
                color_of(severity),
                severity.as_tag()
            )
        } else {
            format!("{stamp} [{}] {message}\n", severity.as_tag())
        }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new(Severity::Debug)
    }
}

impl Listener for LogWriter {
    fn handle(&mut self, event: &Event) {
        let Some(severity) = event.category().severity() else {
            return;
        };
        if severity < self.min {
            return;
        }

        let line = self.format_line(
            severity,
            DateTime::<Local>::from(event.at),
            event.message().unwrap_or("<no message>"),
        );
        if let Err(err) = self
            .sink
            .write_all(line.as_bytes())
            .and_then(|()| self.sink.flush())
        {
            warn!(error = %err, event = %event.id, "log writer failed to write");
        }
    }

    fn categories(&self) -> Vec<Category> {
        Severity::ALL.iter().map(|s| s.category()).collect()
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Bus, Payload};
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    fn writer(min: Severity) -> (LogWriter, SharedBuf) {
        let buf = SharedBuf::default();
        let writer = LogWriter::new(min).with_color(false).with_sink(buf.clone());
        (writer, buf)
    }

    #[rstest]
    #[case(Severity::Debug, 3)]
    #[case(Severity::Info, 2)]
    #[case(Severity::Warning, 1)]
    fn threshold_filters_lower_severities(#[case] min: Severity, #[case] expected: usize) {
        let bus = Bus::new();
        let (writer, buf) = writer(min);
        let mut sub = bus.attach(writer);

        bus.create(Category::LOG_DEBUG, 1, Payload::log("Debug message"));
        bus.create(Category::LOG_INFO, 1, Payload::log("Info message"));
        bus.create(Category::LOG_WARNING, 1, Payload::log("Warning message"));
        assert_eq!(sub.drain(), 3);

        let lines = buf.lines();
        assert_eq!(lines.len(), expected);
        assert!(lines.last().unwrap().ends_with("[WARNING] Warning message"));
    }

    #[test]
    fn subscribes_to_builtin_log_categories() {
        let bus = Bus::new();
        let sub = bus.attach(LogWriter::default().with_sink(io::sink()));
        assert_eq!(
            sub.categories(),
            vec![Category::LOG_DEBUG, Category::LOG_INFO, Category::LOG_WARNING]
        );
    }

    #[test]
    fn colored_output_wraps_the_tag() {
        let buf = SharedBuf::default();
        let bus = Bus::new();
        let mut sub = bus.attach(LogWriter::new(Severity::Info).with_sink(buf.clone()));

        bus.create(Category::LOG_INFO, 1, Payload::log("ready"));
        sub.drain();

        let line = &buf.lines()[0];
        assert!(line.contains("\x1b[32m[INFO]\x1b[0m ready"), "got {line:?}");
    }

    #[test]
    fn non_log_categories_are_ignored() {
        let (mut writer, buf) = writer(Severity::Debug);
        let ev = Event::new(
            crate::events::EventId(0),
            Category::from_raw(Category::FIRST_CUSTOM),
            Payload::text("chat"),
        );
        writer.handle(&ev);
        assert!(buf.lines().is_empty());
    }
}
