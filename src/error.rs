/// Error handling module for the AG-UI handler.
///
/// This module defines the error types used throughout the library.
/// Errors raised while serving a request are scoped to that request;
/// none of them is fatal to the process.
///
/// # Example
///
/// ```
/// use ag_ui_handler::error::{Error, Result};
///
/// fn handle_error(result: Result<()>) {
///     match result {
///         Ok(_) => println!("Operation succeeded"),
///         Err(Error::InvalidJson(msg)) => println!("Rejected request body: {}", msg),
///         Err(Error::ConfigInvalid(msg)) => println!("Bad configuration: {}", msg),
///         Err(e) => println!("Other error: {}", e),
///     }
/// }
/// ```
use thiserror::Error;

/// Errors that can occur in the ag-ui-handler library.
#[derive(Error, Debug)]
pub enum Error {
    /// The request body could not be read from the transport.
    #[error("Failed to read request body")]
    BodyRead(String),

    /// The request body is not a valid `RunAgentInput`.
    ///
    /// This error occurs when:
    /// - The body is not JSON
    /// - A field has the wrong type
    /// - A message `content` is neither a string nor an array of parts
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The request used a method other than `POST` or `OPTIONS`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Failed to parse configuration from a file or string.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Configuration is valid JSON but contains invalid values.
    ///
    /// This error occurs when:
    /// - The port is zero or the address is empty
    /// - A route path does not start with `/`
    /// - The agent path and the health path collide
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// An event could not be encoded to its wire form.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The HTTP server failed to bind or run.
    #[error("Server error: {0}")]
    Server(String),

    /// Any other error not covered by the above categories.
    #[error("Other error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type for ag-ui-handler operations.
pub type Result<T> = std::result::Result<T, Error>;
