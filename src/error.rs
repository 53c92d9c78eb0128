//! Error types for emberwallet

use std::fmt;

#[derive(Debug, Clone)]
pub enum WalletError {
    StorageError(String),
    ConfigError(String),
    ValidationError(String),
    SerializationError(String),
    IoError(String),
    NodeNotFound(String),
    NetworkNotFound(String),
    DuplicateToken(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalletError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            WalletError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            WalletError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            WalletError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            WalletError::IoError(msg) => write!(f, "IO error: {}", msg),
            WalletError::NodeNotFound(msg) => write!(f, "Node not found: {}", msg),
            WalletError::NetworkNotFound(msg) => write!(f, "Network not found: {}", msg),
            WalletError::DuplicateToken(msg) => write!(f, "Duplicate token: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::SerializationError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, WalletError>;
