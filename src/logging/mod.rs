//! Global logging module for the expression engine
//!
//! Provides a thread-safe global logging service with stable event codes,
//! structured context, and a clean macro interface. The service is optional:
//! until `init()` is called, every logging macro is a no-op.

pub mod codes;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

use crate::utils::Span;

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize the global logging system from the `TSE_LOG_*` environment.
pub fn init() -> Result<(), String> {
    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    // Validate the code registry before anything relies on it
    let probe_codes = ["ERR001", "E100", "E101", "S100"];
    for &code in &probe_codes {
        if codes::get_description(code) == "Unknown code" {
            return Err(format!("Missing metadata for event code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a custom service (primarily for testing)
pub fn init_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to the global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

fn apply_context(mut event: LogEvent, context: Vec<(&str, String)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, &value);
    }
    event
}

#[doc(hidden)]
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, String)>,
) {
    let mut event = apply_context(LogEvent::error(code, message), context);
    if let Some(span) = span {
        event = event.with_span(span);
    }
    dispatch(event);
}

#[doc(hidden)]
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, String)>) {
    dispatch(apply_context(LogEvent::success(code, message), context));
}

#[doc(hidden)]
pub fn log_info_with_context(message: &str, context: Vec<(&str, String)>) {
    dispatch(apply_context(LogEvent::info(message), context));
}

#[doc(hidden)]
pub fn log_warning_with_context(message: &str, context: Vec<(&str, String)>) {
    dispatch(apply_context(LogEvent::warning(message), context));
}

#[doc(hidden)]
pub fn log_debug_with_context(message: &str, context: Vec<(&str, String)>) {
    if let Some(logger) = try_get_global_logger() {
        if logger.min_level() >= LogLevel::Debug {
            logger.log_event(apply_context(LogEvent::debug(message), context));
        }
    }
}
