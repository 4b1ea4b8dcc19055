//! Configuration module for the AG-UI server.
//!
//! This module handles parsing and validation of the settings used to bind
//! and route the HTTP server. It supports loading configurations from files
//! or strings in JSON format.
//!
//! # Examples
//!
//! Loading a configuration from a file:
//!
//! ```no_run
//! use ag_ui_handler::config::ServerConfig;
//!
//! let config = ServerConfig::from_file("agui.json").unwrap();
//! println!("Serving runs on {}:{}{}", config.address, config.port, config.path);
//! ```
//!
//! Building one programmatically:
//!
//! ```
//! use ag_ui_handler::config::{ServerConfig, validate_config};
//!
//! let config = ServerConfig {
//!     port: 9000,
//!     path: "/agent".to_string(),
//!     ..ServerConfig::default()
//! };
//! assert!(validate_config(&config).is_ok());
//! ```
mod parser;
pub mod validator;

pub use parser::{DEFAULT_ADDRESS, DEFAULT_PORT, DEFAULT_WORKERS, ServerConfig};
pub use validator::validate_config;
