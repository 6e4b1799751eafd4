//! Post-load configuration validation.

use crate::AppConfig;
use moto_core::{MotoError, MotoResult};

/// Validates a loaded configuration.
///
/// The cache section carries the invariants the key scheme depends on:
/// a positive TTL, a non-empty collection name, and a separator that can
/// never appear inside the collection name or a numeric identifier.
pub fn validate_config(config: &AppConfig) -> MotoResult<()> {
    if config.cache.ttl_secs == 0 {
        return Err(MotoError::configuration(
            "cache.ttl_secs must be a positive number of seconds",
        ));
    }

    if config.cache.collection.trim().is_empty() {
        return Err(MotoError::configuration(
            "cache.collection must not be empty",
        ));
    }

    let sep = config.cache.key_separator;
    if sep.is_ascii_digit() {
        return Err(MotoError::configuration(
            "cache.key_separator must not be a digit (identifiers are numeric)",
        ));
    }
    if config.cache.collection.contains(sep) {
        return Err(MotoError::configuration(format!(
            "cache.key_separator '{}' appears in cache.collection '{}'",
            sep, config.cache.collection
        )));
    }

    if config.server.port == 0 {
        return Err(MotoError::configuration("server.port must be non-zero"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_collection_rejected() {
        let mut config = AppConfig::default();
        config.cache.collection = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_digit_separator_rejected() {
        let mut config = AppConfig::default();
        config.cache.key_separator = '1';
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_separator_inside_collection_rejected() {
        let mut config = AppConfig::default();
        config.cache.collection = "user:list".to_string();
        config.cache.key_separator = ':';
        assert!(validate_config(&config).is_err());
    }
}
