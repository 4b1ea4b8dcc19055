use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// Validates a route path
fn validate_path(field: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::ConfigInvalid(format!(
            "{} '{}' must start with '/'",
            field, path
        )));
    }
    Ok(())
}

/// Full configuration validation
pub fn validate_config(config: &ServerConfig) -> Result<()> {
    if config.address.trim().is_empty() {
        return Err(Error::ConfigInvalid("Address is empty".to_string()));
    }

    if config.port == 0 {
        return Err(Error::ConfigInvalid("Port must be non-zero".to_string()));
    }

    if config.workers == Some(0) {
        return Err(Error::ConfigInvalid(
            "Worker count must be at least 1".to_string(),
        ));
    }

    validate_path("path", &config.path)?;
    validate_path("healthPath", &config.health_path)?;

    if config.path == config.health_path {
        return Err(Error::ConfigInvalid(format!(
            "Agent path and health path are both '{}'",
            config.path
        )));
    }

    Ok(())
}
