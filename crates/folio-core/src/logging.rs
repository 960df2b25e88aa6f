#![forbid(unsafe_code)]

//! Tracing layer that writes one formatted line per event to a sink.
//!
//! The page has no stdout; every diagnostic goes through a [`ConsoleSink`].
//! The web crate supplies a sink that routes by level to the browser console,
//! tests use [`CaptureSink`].
//!
//! # Quick Start
//!
//! ```
//! use folio_core::logging::{CaptureSink, ConsoleLayer};
//! use tracing_subscriber::prelude::*;
//!
//! let sink = CaptureSink::new();
//! let layer = ConsoleLayer::new(sink.clone()).show_time(false);
//! let dispatch = tracing::Dispatch::new(tracing_subscriber::registry().with(layer));
//!
//! tracing::dispatcher::with_default(&dispatch, || {
//!     tracing::warn!(target: "folio", "particle field unavailable");
//! });
//! assert_eq!(sink.lines()[0].1, "WARN  folio: particle field unavailable");
//! ```

use std::fmt::{self, Write as FmtWrite};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

// ============================================================================
// Sink
// ============================================================================

/// Destination for formatted log lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write_line(&self, level: Level, line: &str);
}

/// Sink that records every line, for tests.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines.
    #[must_use]
    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConsoleSink for CaptureSink {
    fn write_line(&self, level: Level, line: &str) {
        let mut lines = match self.lines.lock() {
            Ok(l) => l,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, line.to_string()));
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Which parts of an event end up in the line.
#[derive(Debug, Clone)]
pub struct LogFormat {
    /// Show timestamps. Default: false (the browser console stamps lines).
    pub show_time: bool,
    /// Show the level. Default: true.
    pub show_level: bool,
    /// Show the tracing target. Default: true.
    pub show_target: bool,
    /// Show structured fields beyond `message`. Default: true.
    pub show_fields: bool,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self {
            show_time: false,
            show_level: true,
            show_target: true,
            show_fields: true,
        }
    }
}

/// Format level as a fixed-width string.
fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

// ============================================================================
// Event Visitor
// ============================================================================

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        self.push(field, strip_debug_quotes(&rendered));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

/// Remove surrounding quotes from Debug-formatted strings.
fn strip_debug_quotes(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// HH:MM:SS in UTC.
fn timestamp_now() -> String {
    // std::time panics on wasm32-unknown-unknown.
    let since_epoch = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    let h = (secs / 3600) % 24;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

// ============================================================================
// ConsoleLayer
// ============================================================================

/// A `tracing_subscriber::Layer` that formats events and hands them to a
/// [`ConsoleSink`].
pub struct ConsoleLayer<S> {
    sink: S,
    format: LogFormat,
    max_level: Level,
}

impl<S: ConsoleSink> ConsoleLayer<S> {
    /// Layer with the default format, passing everything up to TRACE.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            format: LogFormat::default(),
            max_level: Level::TRACE,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: drop events more verbose than `level`.
    #[must_use]
    pub fn max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.format.show_time = show;
        self
    }

    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.format.show_target = show;
        self
    }

    #[must_use]
    pub fn show_fields(mut self, show: bool) -> Self {
        self.format.show_fields = show;
        self
    }

    fn format_event(&self, event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        if self.format.show_time {
            line.push_str(&timestamp_now());
            line.push(' ');
        }
        if self.format.show_level {
            line.push_str(level_str(*metadata.level()));
            line.push(' ');
        }
        if self.format.show_target {
            line.push_str(metadata.target());
            line.push_str(": ");
        }
        line.push_str(&visitor.message.unwrap_or_default());
        if self.format.show_fields {
            for (k, v) in &visitor.fields {
                let _ = write!(line, " {k}={v}");
            }
        }
        line
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: ConsoleSink,
    Sub: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, Sub>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let line = self.format_event(event);
        self.sink.write_line(*event.metadata().level(), &line);
    }
}

// ============================================================================
// Tests
// ============================================================================
