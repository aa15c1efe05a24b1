//! Error types for the deployment tools

use std::fmt;

/// Result type for the deployment tools
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the deployment tools
#[derive(Debug)]
pub enum Error {
    /// Approle login did not yield a client token
    AuthenticationError(String),
    /// Secret has no usable (non-destroyed) version
    LookupError(String),
    /// HTTP failure or non-success status from Vault
    TransportError(String),
    /// Vault response did not match the expected shape
    InvalidResponse(String),
    /// Template references a parameter that was not supplied
    MissingParameterError(String),
    /// Template text is malformed
    TemplateSyntaxError(String),
    /// Template, env file or output path could not be read or written
    FileAccessError(String),
    /// Environment configuration error
    ConfigError(String),
    /// Manifest serialization error
    SerializationError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AuthenticationError(msg) => write!(f, "Authentication error: {}", msg),
            Error::LookupError(msg) => write!(f, "Lookup error: {}", msg),
            Error::TransportError(msg) => write!(f, "Transport error: {}", msg),
            Error::InvalidResponse(msg) => write!(f, "Invalid Vault response: {}", msg),
            Error::MissingParameterError(key) => {
                write!(f, "Missing template parameter: '{}'", key)
            }
            Error::TemplateSyntaxError(msg) => write!(f, "Template syntax error: {}", msg),
            Error::FileAccessError(msg) => write!(f, "File access error: {}", msg),
            Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
