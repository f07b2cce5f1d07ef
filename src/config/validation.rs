use crate::config::types::{Config, HarvestConfig, HttpConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_harvest_config(&config.harvest)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs ({}) cannot exceed timeout-secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates harvest pipeline configuration
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    // concurrency == 0 means "derive from CPU count".
    if config.concurrency > 256 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be <= 256, got {}",
            config.concurrency
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "   ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_connect_timeout_exceeding_timeout_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 5;
        config.http.connect_timeout_secs = 10;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let mut config = Config::default();
        config.harvest.concurrency = 1000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_concurrency_is_allowed() {
        let mut config = Config::default();
        config.harvest.concurrency = 0;
        assert!(validate(&config).is_ok());
    }
}
