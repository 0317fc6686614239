//! Crate error type

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied value outside what an operation accepts
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Server answered with a 4xx or 5xx status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("no response from {url} within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// DNS, connect, TLS or transport failure
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    #[error("invalid selector `{selector}`: {message}")]
    SelectorSyntax { selector: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
