//! Error types for sabersql.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for sabersql operations.
#[derive(Error, Debug)]
pub enum SaberError {
    /// The database client reported an error (bad credentials, unreachable host,
    /// SQL syntax errors, constraint violations, ...). Every failure detected while
    /// running a statement surfaces as this variant.
    #[error(
        "Failed to connect to MySQL database {database} at {user}@{address}{}: {message}",
        port_suffix(.port)
    )]
    ConnectionFailure {
        database: String,
        user: String,
        address: String,
        port: Option<u16>,
        message: String,
    },

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed data sources or invalid import arguments.
    #[error("Import error: {0}")]
    Import(String),

    /// Local I/O errors (statement files, data files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn port_suffix(port: &Option<u16>) -> String {
    port.map(|p| format!(":{p}")).unwrap_or_default()
}

impl SaberError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an import error with the given message.
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConnectionFailure { .. } => "Connection Error",
            Self::Config(_) => "Configuration Error",
            Self::Import(_) => "Import Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using SaberError.
pub type Result<T> = std::result::Result<T, SaberError>;
