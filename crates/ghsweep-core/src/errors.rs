//! Core error types for ghsweep.

/// Configuration-specific errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config.
    #[error("failed to parse config file {path}: {message}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A config value is out of range or malformed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
