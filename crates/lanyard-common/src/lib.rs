pub mod errors;

pub use errors::{ConfigError, LanyardError, PresenceError};

pub type Result<T> = std::result::Result<T, LanyardError>;
