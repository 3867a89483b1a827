//! Logging sinks and the service that fans events out to them

use super::events::{LogEvent, LogLevel};
use std::sync::Mutex;
use std::time::UNIX_EPOCH;

/// A destination for log events
pub trait Logger: Send + Sync {
    fn log_event(&self, event: &LogEvent);
}

/// Human-readable stderr sink
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log_event(&self, event: &LogEvent) {
        let mut line = format!(
            "[{} {}] {}",
            event.level.as_str(),
            event.code,
            event.message
        );
        if let Some(span) = event.span {
            line.push_str(&format!(" (column {})", span));
        }
        let mut keys: Vec<&String> = event.context.keys().collect();
        keys.sort();
        for key in keys {
            line.push_str(&format!(" {}={}", key, event.context[key]));
        }
        eprintln!("{}", line);
    }
}

/// Machine-readable JSON-lines stderr sink
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log_event(&self, event: &LogEvent) {
        let timestamp_ms = event
            .timestamp
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis())
            .unwrap_or(0);

        let record = serde_json::json!({
            "timestamp_ms": timestamp_ms as u64,
            "level": event.level.as_str(),
            "code": event.code.as_str(),
            "message": event.message,
            "span": event.span.map(|span| [span.start, span.end]),
            "context": event.context,
        });
        eprintln!("{}", record);
    }
}

/// In-memory sink for tests and embedding hosts that collect diagnostics
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("memory logger poisoned").clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().expect("memory logger poisoned").len()
    }
}

impl Logger for MemoryLogger {
    fn log_event(&self, event: &LogEvent) {
        self.events
            .lock()
            .expect("memory logger poisoned")
            .push(event.clone());
    }
}

/// Level-filtered fan-out over the configured sinks
pub struct LoggingService {
    min_level: LogLevel,
    sinks: Vec<Box<dyn Logger>>,
}

impl LoggingService {
    pub fn new(min_level: LogLevel, sinks: Vec<Box<dyn Logger>>) -> Self {
        Self { min_level, sinks }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if event.level > self.min_level {
            return;
        }
        for sink in &self.sinks {
            sink.log_event(&event);
        }
    }
}

/// Build a service from the `TSE_LOG_*` environment variables.
///
/// `TSE_LOG_LEVEL` selects the minimum level (default: info);
/// `TSE_LOG_STRUCTURED=true` switches the stderr sink to JSON lines.
pub fn create_configured_service() -> LoggingService {
    let min_level = std::env::var("TSE_LOG_LEVEL")
        .ok()
        .and_then(|value| super::events::parse_log_level(&value))
        .unwrap_or(LogLevel::Info);

    let structured = std::env::var("TSE_LOG_STRUCTURED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(false);

    let sink: Box<dyn Logger> = if structured {
        Box::new(StructuredLogger)
    } else {
        Box::new(ConsoleLogger)
    };

    LoggingService::new(min_level, vec![sink])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger_records_events() {
        let logger = MemoryLogger::new();
        logger.log_event(&LogEvent::info("first"));
        logger.log_event(&LogEvent::error(codes::lexical::UNDEFINED_OPERATOR, "second"));

        let events = logger.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].code, codes::lexical::UNDEFINED_OPERATOR);
    }

    #[test]
    fn test_service_filters_below_min_level() {
        let service = LoggingService::new(LogLevel::Warning, vec![]);
        assert_eq!(service.min_level(), LogLevel::Warning);

        // events above min_level are dropped before fan-out; the service
        // with no sinks must also accept events without panicking
        service.log_event(LogEvent::debug("dropped"));
        service.log_event(LogEvent::warning("kept"));
    }
}
