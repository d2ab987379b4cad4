//! Error types for sigcheck
//!
//! This module defines all error types used throughout the library.
//! Loading a registry can fail on I/O, on malformed XML, or on a
//! document that is well-formed XML but not a signature registry.

use std::fmt;
use thiserror::Error;

/// Result type alias using sigcheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sigcheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// Structural error in a registry document
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural error in a signature registry document
///
/// Raised when a well-formed XML document does not satisfy the registry
/// shape: wrong root element, missing required attributes, or a token
/// value that is not an integer.
#[derive(Debug, Clone)]
pub struct RegistryError {
    /// Error message
    pub message: String,
    /// Source line of the offending node, when known
    pub line: Option<usize>,
}

impl RegistryError {
    /// Create a new registry error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Set the source line of the offending node
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }

        Ok(())
    }
}

impl std::error::Error for RegistryError {}
