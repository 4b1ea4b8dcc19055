//! Request dispatch for agent runs.
//!
//! [`AgUiHandler`] turns one HTTP request into exactly one response: it
//! validates the method, decodes the [`RunAgentInput`], assigns missing
//! identifiers, asks the event source for the run's events and writes them
//! back either as SSE frames or as a JSON array.

use crate::error::{Error, Result};
use crate::handler::events::{EventSource, EventStream, encode_sse_frame};
use crate::handler::types::{ResponseMode, RunContext, USER_ID_HEADER};
use crate::ids::{IdGenerator, UuidIdGenerator};
use crate::logging::{Logger, NoopLogger};
use crate::protocol::RunAgentInput;

use actix_web::http::Method;
use actix_web::http::header::{
    ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONNECTION,
};
use actix_web::web::{self, BytesMut};
use actix_web::{HttpRequest, HttpResponse};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;

/// Request headers a browser client may send.
pub const ALLOWED_HEADERS: &str = "Content-Type, Accept, Authorization, X-User-ID";

/// Serves AG-UI run requests against an [`EventSource`].
///
/// Cloning is cheap; every clone shares the same source, logger and id
/// generator.
#[derive(Clone)]
pub struct AgUiHandler {
    event_source: Arc<dyn EventSource>,
    logger: Arc<dyn Logger>,
    id_generator: Arc<dyn IdGenerator>,
    app_name: Option<String>,
}

impl AgUiHandler {
    /// Creates a handler that logs nothing and generates UUID-based ids.
    pub fn new(event_source: impl EventSource + 'static) -> Self {
        Self::from_arc(Arc::new(event_source))
    }

    /// Creates a handler around an already shared event source.
    pub fn from_arc(event_source: Arc<dyn EventSource>) -> Self {
        Self {
            event_source,
            logger: Arc::new(NoopLogger),
            id_generator: Arc::new(UuidIdGenerator),
            app_name: None,
        }
    }

    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    pub fn with_id_generator(mut self, id_generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Arc::new(id_generator);
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Handles one request.
    ///
    /// Protocol-usage errors are returned as [`Error`] and rendered by its
    /// `ResponseError` impl. Once streaming has started, failures are only
    /// logged.
    pub async fn handle(&self, req: HttpRequest, payload: web::Payload) -> Result<HttpResponse> {
        let peer = req
            .peer_addr()
            .map_or_else(|| "unknown".to_string(), |addr| addr.to_string());
        self.logger.log(format_args!(
            "[AG-UI] Received {} request from {}",
            req.method(),
            peer
        ));

        if req.method() == Method::OPTIONS {
            return Ok(preflight_response());
        }

        if req.method() != Method::POST {
            return Err(Error::MethodNotAllowed);
        }

        let body = read_body(payload).await?;
        let mut input =
            RunAgentInput::from_slice(&body).map_err(|e| Error::InvalidJson(e.to_string()))?;
        self.assign_ids(&mut input);

        let ctx = RunContext {
            thread_id: input.thread_id.clone(),
            run_id: input.run_id.clone(),
            user_id: header_str(&req, USER_ID_HEADER).to_string(),
            request: req.clone(),
        };

        let mode = ResponseMode::negotiate(header_str(&req, ACCEPT.as_str()));

        tracing::debug!(
            app = self.app_name.as_deref().unwrap_or("ag-ui"),
            thread_id = %ctx.thread_id,
            run_id = %ctx.run_id,
            messages = input.messages.len(),
            mode = ?mode,
            "Starting agent run"
        );

        let events = self.event_source.run(ctx, input);

        Ok(match mode {
            ResponseMode::Stream => self.stream_response(events),
            ResponseMode::Json => json_response(events).await,
        })
    }

    fn assign_ids(&self, input: &mut RunAgentInput) {
        if input.thread_id.is_empty() {
            input.thread_id = self.id_generator.thread_id();
        }
        if input.run_id.is_empty() {
            input.run_id = self.id_generator.run_id();
        }
    }

    /// Writes each event as an SSE frame as soon as the source yields it.
    ///
    /// The next event is only pulled once the previous frame has been handed
    /// to the transport. When the client goes away actix drops the body,
    /// which drops the event stream with it.
    fn stream_response(&self, events: EventStream) -> HttpResponse {
        let logger = Arc::clone(&self.logger);

        let body = async_stream::stream! {
            let mut events = events;
            let mut guard = EmissionGuard::new(Arc::clone(&logger));

            while let Some(event) = events.next().await {
                match encode_sse_frame(&*event) {
                    Ok(frame) => {
                        guard.frames += 1;
                        yield Ok::<_, actix_web::Error>(frame);
                    }
                    Err(e) => {
                        logger.log(format_args!("[AG-UI] Failed to send event: {}", e));
                        break;
                    }
                }
            }

            guard.finish();
        };

        HttpResponse::Ok()
            .content_type("text/event-stream")
            .insert_header((CACHE_CONTROL, "no-cache"))
            .insert_header((CONNECTION, "keep-alive"))
            .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .insert_header(("X-Accel-Buffering", "no"))
            .streaming(body)
    }
}

/// Collects every event, then writes the ones that encode as a JSON array.
async fn json_response(events: EventStream) -> HttpResponse {
    let collected: Vec<_> = events.collect().await;
    let total = collected.len();

    let encoded: Vec<Value> = collected
        .iter()
        .filter_map(|event| match event.to_json() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::trace!(error = %e, "Dropping event that failed to serialize");
                None
            }
        })
        .collect();

    tracing::debug!(
        total = total,
        written = encoded.len(),
        "Writing buffered events"
    );

    HttpResponse::Ok()
        .content_type("application/json")
        .json(encoded)
}

fn preflight_response() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .finish()
}

async fn read_body(mut payload: web::Payload) -> Result<BytesMut> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| Error::BodyRead(e.to_string()))?;
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Returns a header's value, or `""` when it is missing or not visible ASCII.
fn header_str<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Logs a stream that was dropped before the source finished.
struct EmissionGuard {
    logger: Arc<dyn Logger>,
    frames: usize,
    finished: bool,
}

impl EmissionGuard {
    fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            frames: 0,
            finished: false,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        tracing::debug!(frames = self.frames, "SSE stream completed");
    }
}

impl Drop for EmissionGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.logger.log(format_args!(
                "[AG-UI] Failed to send event: client disconnected after {} events",
                self.frames
            ));
        }
    }
}
