//! Session-scoped logging context.
//!
//! Events are plain `tracing` events with their own fields. A
//! [`StructuredLogger`] only carries the span they hang off, so the
//! installed subscriber sees the session id and page scope on every event.
//! Level filtering and output format belong to the subscriber.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Span;

/// Correlation id for one browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

static SESSION_SEQ: AtomicU32 = AtomicU32::new(0);

impl SessionId {
    /// Generate a new session ID.
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("{:x}-{:x}-{:04x}", nanos, std::process::id(), seq))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Log level, as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, as accepted by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    Json,
    /// Human-readable format (for terminals).
    #[default]
    Human,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "text" | "pretty" => Ok(Self::Human),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Logging context for one browsing session.
///
/// Emit with `tracing::info!(parent: logger.span(), count, "...")`. The span
/// carries the session id and, once [`with_scope`](Self::with_scope) is
/// called, the page context label.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    session_id: SessionId,
    scope: Option<String>,
    span: Span,
}

impl StructuredLogger {
    /// Create a new logger for a session.
    pub fn new(session_id: SessionId) -> Self {
        let span = tracing::info_span!(target: "shelf", "session", session = %session_id);
        Self {
            session_id,
            scope: None,
            span,
        }
    }

    /// Same session, new page context. Replaces any previous label.
    pub fn with_scope(&self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        let span = tracing::info_span!(
            target: "shelf",
            "page",
            session = %self.session_id,
            scope = %scope
        );
        Self {
            session_id: self.session_id.clone(),
            scope: Some(scope),
            span,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Parent span for this logger's events.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a JSON subscriber and return one value per event.
    fn json_events(f: impl FnOnce()) -> Vec<serde_json::Value> {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn event_fields_stay_structured() {
        let events = json_events(|| {
            let logger = StructuredLogger::new(SessionId::from_string("s-1")).with_scope("brand=Venroy");
            tracing::info!(
                parent: logger.span(),
                slot = "page",
                count = 18u64,
                epoch = 3u64,
                "products applied"
            );
        });

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "products applied");
        assert_eq!(event["fields"]["count"], 18);
        assert_eq!(event["fields"]["epoch"], 3);
        assert_eq!(event["fields"]["slot"], "page");
        assert_eq!(event["span"]["name"], "page");
        assert_eq!(event["span"]["session"], "s-1");
        assert_eq!(event["span"]["scope"], "brand=Venroy");
    }

    #[test]
    fn rescoping_replaces_the_label() {
        let events = json_events(|| {
            let logger = StructuredLogger::new(SessionId::from_string("s-2"))
                .with_scope("brand=Venroy")
                .with_scope("brand=Asha Jasper");
            assert_eq!(logger.scope(), Some("brand=Asha Jasper"));
            tracing::warn!(parent: logger.span(), "context changed");
        });

        assert_eq!(events[0]["span"]["session"], "s-2");
        assert_eq!(events[0]["span"]["scope"], "brand=Asha Jasper");
    }

    #[test]
    fn parses_levels_and_formats() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
