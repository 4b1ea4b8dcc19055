//! HTTP server bootstrap for the AG-UI handler.
//!
//! [`AgUiServer`] binds an Actix Web server exposing the agent endpoint and
//! the health check; [`configure`] mounts the same routes in an application
//! the caller already owns.

use crate::config::{ServerConfig, validate_config};
use crate::error::{Error, Result};
use crate::handler::cors::CorsHeaders;
use crate::handler::dispatcher::AgUiHandler;
use crate::handler::handlers;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, middleware, web};
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long [`AgUiServerHandle::stop`] waits for the server task to finish.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Registers the agent endpoint at `path` and the health check at
/// `health_path`.
///
/// The agent endpoint accepts every method; the dispatcher answers
/// `OPTIONS` and rejects everything except `POST`. The health check answers
/// `GET` and `OPTIONS`.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    handler: web::Data<AgUiHandler>,
    path: &str,
    health_path: &str,
) {
    cfg.app_data(handler)
        .service(
            web::resource(health_path)
                .route(web::get().to(handlers::health))
                .route(web::method(Method::OPTIONS).to(handlers::health_preflight)),
        )
        .service(web::resource(path).to(handlers::run_agent));
}

/// Handle to a running server
pub struct AgUiServerHandle {
    server: ServerHandle,
    task: JoinHandle<()>,
    addrs: Vec<SocketAddr>,
}

impl AgUiServerHandle {
    /// Addresses the server is listening on.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Stops the server and waits for its task to finish.
    ///
    /// With `graceful` set, in-flight requests are allowed to complete.
    pub async fn stop(self, graceful: bool) -> Result<()> {
        tracing::info!(graceful = graceful, "Stopping AG-UI server");
        self.server.stop(graceful).await;

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, self.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Error while joining server task: {}", e),
            Err(_) => tracing::warn!("Timeout waiting for server task to finish"),
        }

        tracing::info!("AG-UI server shut down");
        Ok(())
    }
}

/// AG-UI HTTP server
pub struct AgUiServer;

impl AgUiServer {
    /// Starts the server in a background task.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the address cannot
    /// be resolved, or binding fails.
    pub async fn start(config: ServerConfig, handler: AgUiHandler) -> Result<AgUiServerHandle> {
        validate_config(&config)?;

        let addr = resolve_address(&config)?;

        let handler = match &config.app_name {
            Some(name) if handler.app_name().is_none() => handler.with_app_name(name.clone()),
            _ => handler,
        };
        let handler = web::Data::new(handler);
        let path = config.path.clone();
        let health_path = config.health_path.clone();
        let cors = config.cors;

        tracing::info!(address = %addr, path = %path, "Starting AG-UI server with Actix Web");

        let server_builder = HttpServer::new(move || {
            let handler = handler.clone();
            let path = path.clone();
            let health_path = health_path.clone();

            App::new()
                .wrap(middleware::Condition::new(cors, CorsHeaders))
                .wrap(middleware::Logger::default())
                .configure(move |cfg| configure(cfg, handler, &path, &health_path))
        });

        let workers = config.worker_count();
        tracing::info!(workers = workers, "Setting number of Actix Web workers");

        let server_builder = server_builder
            .workers(workers)
            .bind(addr)
            .map_err(|e| Error::Server(format!("Failed to bind server: {}", e)))?;
        let addrs = server_builder.addrs();

        let server = server_builder.run();
        let server_handle = server.handle();

        let task = tokio::spawn(async move {
            if let Err(e) = server.await {
                tracing::error!(error = %e, "Actix server task error");
            }
        });

        tracing::info!(addrs = ?addrs, "AG-UI server started successfully");

        Ok(AgUiServerHandle {
            server: server_handle,
            task,
            addrs,
        })
    }

    /// Starts the server and serves until Ctrl+C, then shuts down gracefully.
    pub async fn run(config: ServerConfig, handler: AgUiHandler) -> Result<()> {
        let handle = Self::start(config, handler).await?;

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::Other(format!("Failed to wait for Ctrl+C: {}", e)))?;

        handle.stop(true).await
    }
}

fn resolve_address(config: &ServerConfig) -> Result<SocketAddr> {
    let addr_str = format!("{}:{}", config.address, config.port);
    addr_str
        .to_socket_addrs()
        .map_err(|e| Error::Server(format!("Failed to parse socket address: {}", e)))?
        .next()
        .ok_or_else(|| Error::Server(format!("Could not parse socket address: {}", addr_str)))
}
