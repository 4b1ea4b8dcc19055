//! CORS middleware for the AG-UI endpoints.
//!
//! Adds a permissive, wildcard-origin CORS policy to every response and
//! answers `OPTIONS` requests directly, for any path.

use crate::handler::dispatcher::ALLOWED_HEADERS;

use actix_web::{
    Error as ActixError, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderMap, HeaderValue,
    },
};
use futures::future::{LocalBoxFuture, Ready, ready};

/// Methods advertised to browsers.
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// CORS middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsHeaders;

impl<S, B> Transform<S, ServiceRequest> for CorsHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Transform = CorsHeadersMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsHeadersMiddleware { service }))
    }
}

/// CORS middleware implementation
pub struct CorsHeadersMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorsHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Preflights never reach the inner service
        if req.method() == Method::OPTIONS {
            let mut response = HttpResponse::Ok().finish();
            apply_cors_headers(response.headers_mut());
            tracing::trace!(path = %req.path(), "Answered CORS preflight");
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            apply_cors_headers(res.headers_mut());
            Ok(res.map_into_left_body())
        })
    }
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}
