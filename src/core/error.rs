//! Error types for the logger system
//!
//! Only construction and configuration paths return these errors. Logging
//! calls themselves are infallible from the caller's point of view.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Formatter template and component list disagree
    #[error(
        "Formatter template has {placeholders} placeholder(s) but {components} component(s) were supplied"
    )]
    TemplateMismatch {
        placeholders: usize,
        components: usize,
    },

    /// Date pattern could not be compiled
    #[error("Invalid date pattern '{pattern}': {message}")]
    InvalidDatePattern { pattern: String, message: String },

    /// Unknown level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Unknown formatter preset name
    #[error("Invalid formatter preset: '{0}'")]
    InvalidPreset(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink error (generic)
    #[error("Sink error: {0}")]
    SinkError(String),

    /// Output worker is gone
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Flush barrier was not acknowledged in time
    #[error("Timed out after {0:?} waiting for the output worker")]
    FlushTimeout(std::time::Duration),
}

impl LoggerError {
    /// Create a template mismatch error
    pub fn template_mismatch(placeholders: usize, components: usize) -> Self {
        LoggerError::TemplateMismatch {
            placeholders,
            components,
        }
    }

    /// Create a date pattern error
    pub fn date_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidDatePattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }
}
