use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Address the server binds to when none is configured.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
/// Port the server binds to when none is configured.
pub const DEFAULT_PORT: u16 = 8080;
/// Number of Actix Web workers when none is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Settings for the AG-UI HTTP server.
///
/// # JSON Schema
///
/// Every field is optional:
///
/// ```json
/// {
///   "address": "0.0.0.0",
///   "port": 8080,
///   "workers": 4,
///   "path": "/agent",
///   "healthPath": "/health",
///   "appName": "my-agent",
///   "cors": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub address: String,

    /// Port to listen on
    pub port: u16,

    /// Number of Actix Web workers, defaults to [`DEFAULT_WORKERS`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Path of the agent run endpoint
    pub path: String,

    /// Path of the health check endpoint
    pub health_path: String,

    /// Name attached to the handler's diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Whether to wrap every route in the permissive CORS middleware
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            path: "/".to_string(),
            health_path: "/health".to_string(),
            app_name: None,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Loads a configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if:
    /// * The file cannot be read
    /// * The file contents are not valid JSON
    /// * The JSON does not conform to the expected schema
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigParse(format!("Failed to read config file: {}", e)))?;

        Self::parse_from_str(&content)
    }

    /// Parses a configuration from a JSON string.
    pub fn parse_from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::ConfigParse(format!("Failed to parse JSON config: {}", e)))
    }

    /// Number of workers to start.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }
}
