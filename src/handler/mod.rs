//! AG-UI HTTP handler built on Actix Web.
//!
//! This module turns inbound run requests into calls against an
//! [`EventSource`] and writes the resulting events back to the client, either
//! as Server-Sent Events or as a buffered JSON array, depending on the
//! request's `Accept` header.
//!
//! It provides:
//! - [`AgUiHandler`], the request dispatcher
//! - [`handlers`], the Actix Web entry points for the run and health endpoints
//! - [`cors::CorsHeaders`], a permissive CORS middleware
//! - [`server::AgUiServer`], a ready-made server hosting both endpoints

// Re-export the main types
pub use self::dispatcher::AgUiHandler;
pub use self::events::{EventSender, EventSource, EventStream, event_channel};
pub use self::server::{AgUiServer, AgUiServerHandle};
pub use self::types::{ResponseMode, RunContext};

// Submodules
pub mod actix_error;
pub mod cors;
pub mod dispatcher;
pub mod events;
pub mod handlers;
pub mod server;
pub mod types;
