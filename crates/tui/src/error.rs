use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that stop the program. Everything the remote can do wrong at
/// runtime is a `ClientError` and ends up as a notice instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot start logging: {0}")]
    Logging(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}
