use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the presence client.
///
/// Every variant is rendered to the consumer as a short reason string; none
/// of them is fatal to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenceError {
    /// The one-shot fetch failed at the transport level, or its body could
    /// not be decoded.
    #[error("Error connecting to Lanyard API: {0}")]
    Network(String),

    /// The fetch reached the service but it answered `success: false`.
    #[error("Failed to fetch presence data: {0}")]
    ServiceRejected(String),

    /// The live socket failed or closed before the client was deactivated.
    #[error("presence connection error: {0}")]
    Connection(String),

    /// The client was asked to watch an unusable user id.
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    /// An envelope could not be understood.
    #[error("presence protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LanyardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Presence(#[from] PresenceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
