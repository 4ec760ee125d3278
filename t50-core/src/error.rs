use thiserror::Error;

/// Errors detected while turning CLI input into a validated [`crate::config::Config`].
///
/// Reported before any socket is opened; always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CIDR prefix must be between 0 and 32, got {0}")]
    InvalidCidrBits(u8),

    #[error("destination address is required")]
    MissingDestination,

    #[error("could not resolve destination host {0:?}: {1}")]
    Resolve(String, std::io::Error),

    #[error("--threshold must be > 0 unless --flood is set, got {0}")]
    InvalidThreshold(i32),

    #[error("GRE sub-option {0} requires --gre")]
    GreOptionWithoutGre(&'static str),

    #[error("unknown protocol name {0:?}")]
    UnknownProtocol(String),

    #[error("invalid numeric field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced while acquiring resources or running the injection loop.
///
/// Resource errors and transient send errors are both fatal to the worker
/// that hit them. There is deliberately no retry path.
#[derive(Error, Debug)]
pub enum T50Error {
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),

    #[error("send of {expected} bytes only wrote {actual}")]
    ShortSend { expected: usize, actual: usize },

    #[error("failed to set scheduling priority: {0}")]
    Priority(std::io::Error),

    #[error("process does not have effective root privilege")]
    NotRoot,

    #[error("worker thread panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, T50Error>;
