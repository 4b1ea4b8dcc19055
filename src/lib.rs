//! # AG-UI Handler
//!
//! An Actix Web adapter that serves AG-UI agent runs over HTTP.
//!
//! ## Overview
//!
//! AG-UI Handler provides functionality to:
//! - Decode AG-UI `RunAgentInput` request bodies, including messages whose
//!   `content` is either a plain string or an array of content parts
//! - Assign thread and run identifiers when the client leaves them empty
//! - Hand each run to a user-supplied [`EventSource`]
//! - Stream the run's events back as Server-Sent Events, or return them as a
//!   single JSON array when the client asks for something other than SSE
//! - Expose a health check and a permissive CORS policy for browser clients
//!
//! The agent itself is out of scope: anything implementing [`EventSource`]
//! (including a plain closure) can be served.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use ag_ui_handler::{AgUiEvent, AgUiHandler, AgUiServer, RunAgentInput, RunContext, Result};
//! use ag_ui_handler::config::ServerConfig;
//! use ag_ui_handler::handler::events::{self, EventStream};
//! use ag_ui_handler::logging::TracingLogger;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = |ctx: RunContext, _input: RunAgentInput| -> EventStream {
//!         events::from_iter(vec![
//!             AgUiEvent::run_started(ctx.thread_id.clone(), ctx.run_id.clone()),
//!             AgUiEvent::run_finished(ctx.thread_id, ctx.run_id),
//!         ])
//!     };
//!
//!     let handler = AgUiHandler::new(source).with_logger(TracingLogger);
//!
//!     // Serve on 127.0.0.1:8080 until Ctrl+C
//!     AgUiServer::run(ServerConfig::default(), handler).await
//! }
//! ```
//!
//! ## Features
//!
//! - **Content negotiation**: `Accept` absent, `*/*` or `text/event-stream`
//!   streams SSE; anything else returns JSON
//! - **Polymorphic message content**: string and array forms decode to one shape
//! - **Injected collaborators**: event source, logger and id generator are traits
//! - **Embeddable**: mount the routes into an existing app with
//!   [`handler::server::configure`]
//!
//! ## License
//!
//! This project is licensed under the terms in the LICENSE file.

pub mod config;
pub mod error;
pub mod handler;
pub mod ids;
pub mod logging;
pub mod protocol;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use handler::{
    AgUiHandler, AgUiServer, AgUiServerHandle, EventSource, EventStream, ResponseMode, RunContext,
};
pub use ids::{IdGenerator, UuidIdGenerator};
pub use logging::{Logger, NoopLogger, TracingLogger};
pub use protocol::{AgUiEvent, ContentPart, Event, Message, RunAgentInput, Tool};
