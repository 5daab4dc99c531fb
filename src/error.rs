use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum AceError {
    #[error("Incorrect password for username `{username}`. Please try again.")]
    AuthFailed { username: String },
    #[error("{} directory exists and -f flag not present. Exiting...", path.display())]
    DestinationExists { path: PathBuf },
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("Connection timeout")]
    ConnectionTimeout,
    #[error("Response body error")]
    ResponseBodyError,
    #[error("Response status not success: {status_code}")]
    ResponseStatusNotSuccess { status_code: String },
    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },
    #[error("Session token is not usable as an HTTP header value")]
    InvalidSessionToken,
    #[error("Standard I/O error: {e}")]
    StdIoError { e: std::io::Error },
    #[error("Task error: {e}")]
    TaskError { e: JoinError },
    #[error("CLI argument error: {message}")]
    CliArgumentError { message: String },
    #[error("Other error: {message}")]
    Other {
        message: String,
        origin: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<reqwest::Error> for AceError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) if !status.is_success() => {
                return Self::ResponseStatusNotSuccess {
                    status_code: status.to_string(),
                };
            }
            _ => {}
        }

        match e.source().and_then(|s| s.downcast_ref::<std::io::Error>()) {
            Some(io_err) if io_err.kind() == std::io::ErrorKind::TimedOut => {
                return Self::ConnectionTimeout;
            }
            _ => {}
        }

        match e.is_timeout() {
            true => Self::ConnectionTimeout,
            false if e.is_body() => Self::ResponseBodyError,
            false if e.is_connect() => Self::ConnectionClosed,
            _ => Self::Other {
                message: e.to_string(),
                origin: Box::new(e),
            },
        }
    }
}

impl From<std::io::Error> for AceError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError { e }
    }
}

impl From<JoinError> for AceError {
    fn from(e: JoinError) -> Self {
        Self::TaskError { e }
    }
}

impl From<url::ParseError> for AceError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl {
            message: e.to_string(),
        }
    }
}

impl From<crate::portal::PortalBuilderError> for AceError {
    fn from(e: crate::portal::PortalBuilderError) -> Self {
        Self::Other {
            message: e.to_string(),
            origin: Box::new(e),
        }
    }
}
