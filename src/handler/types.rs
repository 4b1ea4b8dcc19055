//! Type definitions for the AG-UI handler.

use actix_web::HttpRequest;

/// Header carrying the caller's user identifier. It is not authenticated.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Per-request information handed to the event source.
///
/// Built once the request body has been decoded and its identifiers
/// normalized, so `thread_id` and `run_id` are never empty.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub thread_id: String,
    pub run_id: String,
    /// Value of the `X-User-ID` header, empty when absent
    pub user_id: String,
    /// The inbound request, for sources that need headers or extensions
    pub request: HttpRequest,
}

/// How the event stream is written back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// One SSE frame per event, flushed as produced
    Stream,
    /// All events collected into a single JSON array
    Json,
}

impl ResponseMode {
    /// Picks the mode from the raw `Accept` header value.
    ///
    /// Only an empty value, `*/*` or `text/event-stream` select streaming.
    /// The comparison is literal; any other value selects JSON.
    pub fn negotiate(accept: &str) -> Self {
        match accept {
            "" | "*/*" | "text/event-stream" => ResponseMode::Stream,
            _ => ResponseMode::Json,
        }
    }
}
