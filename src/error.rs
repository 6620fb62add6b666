//! Error types for jitterbug
//!
//! Centralized error handling using thiserror. The ticker itself never fails;
//! these errors come from building jitter strategies and loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in jitterbug
#[derive(Debug, Error)]
pub enum JitterbugError {
    /// Jitter strategy parameters cannot be used
    #[error("Invalid jitter: {0}")]
    InvalidJitter(String),

    /// Configuration values are inconsistent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for `Config`
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type alias for jitterbug operations
pub type Result<T> = std::result::Result<T, JitterbugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_jitter_error() {
        let err = JitterbugError::InvalidJitter("mean offset overflows".to_string());
        assert_eq!(err.to_string(), "Invalid jitter: mean offset overflows");
    }

    #[test]
    fn test_invalid_config_error() {
        let err = JitterbugError::InvalidConfig("ticker.interval_ms must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid config: ticker.interval_ms must be > 0");
    }

    #[test]
    fn test_config_read_error_names_file() {
        let err = JitterbugError::ConfigRead {
            path: PathBuf::from("/etc/jitterbug.yml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read config file /etc/jitterbug.yml: file not found"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_parse_error_names_file() {
        let yaml_err = serde_yaml::from_str::<u64>("not a number").unwrap_err();
        let err = JitterbugError::ConfigParse {
            path: PathBuf::from("jitterbug.yml"),
            source: yaml_err,
        };
        assert!(err.to_string().starts_with("Failed to parse config file jitterbug.yml: "));
    }
}
