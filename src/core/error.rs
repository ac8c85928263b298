//! Error types for the logger context builder

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Appender failed to write or flush
    #[error("Appender '{name}' failed: {message}")]
    AppenderError { name: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an appender error
    pub fn appender(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderError {
            name: name.into(),
            message: message.into(),
        }
    }
}
