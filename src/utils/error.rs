// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String), // Empty page sequence, page 0, duplicate or out-of-order pages
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid pattern '{pattern}' for section type {section}: {reason}")]
    InvalidPattern {
        section: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error reading page text: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse page JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not load pages: {0}")]
    Input(#[from] InputError),

    #[error("Identification failed: {0}")]
    Identify(#[from] IdentifyError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_wraps_identify_error() {
        let err: AppError = IdentifyError::InvalidInput("no pages".to_string()).into();
        assert_eq!(err.to_string(), "Identification failed: Invalid input: no pages");
    }

    #[test]
    fn test_invalid_pattern_message_names_section() {
        let err = ConfigError::InvalidPattern {
            section: "Mortgage".to_string(),
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(err.to_string().contains("Mortgage"));
        assert!(err.to_string().contains("'('"));
    }
}
