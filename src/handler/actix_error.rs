//! Actix Web error adapters for handler errors.
//!
//! Protocol-usage errors are surfaced to the caller verbatim as plain text.

use crate::error::Error;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::BodyRead(_) => StatusCode::BAD_REQUEST,
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
