//! Record tracing events in memory.
//!
//! [`CaptureLayer`] renders every event it sees with [`fmt::render_event`]
//! and keeps the result, so tests can assert on what was logged. Clones
//! share one buffer: keep a clone, install the other in a subscriber.
//!
//! ```ignore
//! let capture = logging::capture::layer();
//! let subscriber = tracing_subscriber::registry().with(capture.clone());
//! tracing::subscriber::with_default(subscriber, || run());
//! assert!(capture.contains("WARN", "degraded"));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{self, RenderedLog};

/// Tracing layer that stores rendered events.
#[derive(Debug, Clone, Default)]
pub struct CaptureLayer {
    /// Events seen so far, oldest first.
    events: Arc<Mutex<Vec<RenderedLog>>>,
}

impl CaptureLayer {
    /// Snapshot of the captured events.
    pub fn events(&self) -> Vec<RenderedLog> {
        self.events.lock().clone()
    }

    /// Whether an event at `level` (e.g. `"WARN"`) has a message containing
    /// `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| e.level.eq_ignore_ascii_case(level) && e.message.contains(needle))
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let rendered = fmt::render_event(event);
        self.events.lock().push(rendered);
    }
}

/// Create a capture layer with an empty buffer.
pub fn layer() -> CaptureLayer {
    CaptureLayer::default()
}

#[cfg(test)]
mod tests {
    use tracing::{info, subscriber::with_default, warn};
    use tracing_subscriber::{layer::SubscriberExt, registry};

    use super::*;

    #[test]
    fn events_are_rendered_as_logfmt() {
        let capture = layer();
        with_default(registry().with(capture.clone()), || {
            warn!(bits = %format_args!("{:#x}", 3), "anchor: conflicting bits");
            info!(count = 2, label = "two words");
        });
        let events = capture.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, "WARN");
        assert_eq!(events[0].message, "anchor: conflicting bits bits=0x3");
        assert_eq!(events[1].message, "count=2 label=\"two words\"");
        assert!(events[0].target.starts_with("logging"));
        assert!(capture.contains("warn", "bits=0x3"));
        assert!(!capture.contains("INFO", "bits"));
        capture.clear();
        assert!(capture.events().is_empty());
    }
}
