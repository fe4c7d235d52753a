//! Log setup for the binary, and a capturing layer for tests.
//!
//! Logs go to stderr so `sim --json` output on stdout stays clean.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Initialize logging for the application. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    // a second call (e.g. embedding) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// One event seen by a [`LogCapture`].
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Layer that records every event, for asserting on what the engine logs.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    /// Runs `f` with a fresh capture as the thread's subscriber and returns
    /// its result together with the events it logged.
    pub fn run<T>(f: impl FnOnce() -> T) -> (T, Vec<LogEntry>) {
        let capture = Self::default();
        let subscriber = Registry::default().with(capture.clone());
        let out = tracing::subscriber::with_default(subscriber, f);
        let entries = capture
            .entries
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default();
        (out, entries)
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut entry = LogEntry {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: String::new(),
            fields: BTreeMap::new(),
        };
        event.record(&mut FieldVisitor(&mut entry));
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

struct FieldVisitor<'a>(&'a mut LogEntry);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }
}

impl FieldVisitor<'_> {
    fn record(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.0.message = value;
        } else {
            self.0.fields.insert(field.name().to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info};

    #[test]
    fn capture_keeps_levels_messages_and_fields() {
        let ((), entries) = LogCapture::run(|| {
            debug!("dealing");
            info!(hand_id = "20260101-000001", pot = 40u32, "hand settled");
        });

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::DEBUG);
        assert_eq!(entries[1].message, "hand settled");
        assert_eq!(entries[1].field("hand_id"), Some("20260101-000001"));
        assert_eq!(entries[1].field("pot"), Some("40"));
    }
}
