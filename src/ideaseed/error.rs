use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdeaseedError {
    /// Invalid flag or positional combination, detected before any I/O.
    #[error("{0}")]
    Usage(String),

    #[error("Invalid template {template:?}: {reason}")]
    Template { template: String, reason: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("This account uses two-factor authentication")]
    TwoFactorRequired,

    #[error("Rate limited by {service}: {message}")]
    RateLimited { service: String, message: String },

    #[error("{service} API error ({status}): {message}")]
    Api {
        service: String,
        status: u16,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl IdeaseedError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Errors the user caused by how the command was written (exit code 2).
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::Template { .. })
    }
}

pub type Result<T> = std::result::Result<T, IdeaseedError>;
