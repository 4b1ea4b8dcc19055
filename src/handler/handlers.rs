//! HTTP request handlers for the Actix Web-based AG-UI endpoint.
//!
//! - the agent endpoint, routed for every method, which delegates to
//!   [`AgUiHandler::handle`]
//! - `/health` for liveness checks, with its own `OPTIONS` preflight

use crate::error::Result;
use crate::handler::dispatcher::{ALLOWED_HEADERS, AgUiHandler};

use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

/// Protocol name reported by the health endpoint.
pub const PROTOCOL_NAME: &str = "ag-ui";
/// Protocol version reported by the health endpoint.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Body of the health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub protocol: &'static str,
    pub version: &'static str,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy",
            protocol: PROTOCOL_NAME,
            version: PROTOCOL_VERSION,
        }
    }
}

/// Agent run endpoint
///
/// Must be mounted for all methods so that `OPTIONS` preflights and the
/// `405` for other methods are answered here.
pub async fn run_agent(
    handler: web::Data<AgUiHandler>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    handler.handle(req, payload).await
}

/// Health check handler
///
/// # Returns
///
/// `200 OK` with `{"status":"healthy","protocol":"ag-ui","version":"1.0.0"}`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus::default())
}

/// Preflight for the health check, answered even when the CORS middleware
/// is disabled.
pub async fn health_preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"))
        .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .finish()
}
