//! Render `tracing` events into concise logfmt strings.
//!
//! The message comes first, followed by the remaining fields as `key=value`
//! pairs in the order they were recorded.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult, Write};

use tracing::{
    Event,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// Message followed by `key=value` pairs.
    pub message: String,
}

impl Display for RenderedLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}: {}", self.level, self.target, self.message)
    }
}

/// Collects the message and the other fields of one event.
#[derive(Default)]
struct LogfmtVisitor {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Accumulated non-message fields rendered as `key=value`.
    fields: Vec<String>,
}

impl LogfmtVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.msg = Some(value);
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn finish(self) -> String {
        let mut out = self.msg.unwrap_or_default();
        for pair in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&pair);
        }
        out
    }
}

impl Visit for LogfmtVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" || !value.contains(char::is_whitespace) {
            self.push(field, value.to_string());
        } else {
            self.push(field, format!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let mut s = String::new();
        let _ignored = write!(&mut s, "{value:?}");
        self.push(field, s);
    }
}

/// Extract level, target and a logfmt message from a tracing Event.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta = event.metadata();
    let mut vis = LogfmtVisitor::default();
    event.record(&mut vis);
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: vis.finish(),
    }
}
