//! Pluggable request logging.
//!
//! The handler writes one line per request, plus one per failed stream write,
//! through a [`Logger`]. Nothing is logged unless a logger is injected with
//! [`AgUiHandler::with_logger`](crate::AgUiHandler::with_logger).

use std::fmt;

/// A sink for formatted log lines.
///
/// Call it with [`format_args!`]:
///
/// ```
/// use ag_ui_handler::logging::{Logger, TracingLogger};
///
/// TracingLogger.log(format_args!("[AG-UI] Received {} request", "POST"));
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Discards everything. This is the handler's default logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards each line to `tracing` at info level under the `ag_ui` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "ag_ui", "{}", args);
    }
}
