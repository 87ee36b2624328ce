//! Configuration validation module
//!
//! This module provides validation functions for client configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{ClientError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate SymphonyX API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(ClientError::Config(
            "API base URL is required".to_string(),
        ));
    }

    url::Url::parse(&config.base_url)
        .map_err(|e| ClientError::Config(format!("Invalid API base URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(ClientError::Config(
            "API timeout must be greater than 0".to_string(),
        ));
    }

    if config.institute_id <= 0 || config.campus_id <= 0 || config.college_id <= 0 {
        return Err(ClientError::Config(
            "Institute, campus and college identifiers must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClientError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ClientError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
