use std::{fmt, io};

use backtrace::Backtrace;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Parse,
    Service,
    ContentSource,
    Config,
    Io,
    Serialization,
}

/// Why the repository content source refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSourceErrorKind {
    NotFound,
    RateLimited,
    Other,
}

impl fmt::Display for ContentSourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSourceErrorKind::NotFound => write!(f, "not found"),
            ContentSourceErrorKind::RateLimited => write!(f, "rate limited"),
            ContentSourceErrorKind::Other => write!(f, "request failed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocError {
    #[error("{0}")]
    Input(String),

    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Text generation failed: {0}")]
    Service(String),

    #[error("Content source {kind}: {message}")]
    ContentSource {
        kind: ContentSourceErrorKind,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DocError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn parse_failure(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ContentSource {
            kind: ContentSourceErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::ContentSource {
            kind: ContentSourceErrorKind::RateLimited,
            message: message.into(),
        }
    }

    pub fn content_source(message: impl Into<String>) -> Self {
        Self::ContentSource {
            kind: ContentSourceErrorKind::Other,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DocError::Input(_) => ErrorKind::Input,
            DocError::Parse { .. } => ErrorKind::Parse,
            DocError::Service(_) => ErrorKind::Service,
            DocError::ContentSource { .. } => ErrorKind::ContentSource,
            DocError::Config(_) => ErrorKind::Config,
            DocError::Io(_) => ErrorKind::Io,
            DocError::Json(_) => ErrorKind::Serialization,
        }
    }

    /// Errors that end a whole run rather than a single file or endpoint.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Input | ErrorKind::Config | ErrorKind::ContentSource
        )
    }
}

/// A fatal error as surfaced to the caller: a user-facing message plus,
/// outside production, a captured trace for diagnosis.
#[derive(Debug)]
pub struct FatalReport {
    pub message: String,
    pub details: Option<String>,
}

impl FatalReport {
    pub fn new(error: &DocError, with_trace: bool) -> Self {
        let details = with_trace.then(|| format!("{:?}", Backtrace::new()));
        Self {
            message: error.to_string(),
            details,
        }
    }
}

impl fmt::Display for FatalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(details) = &self.details {
            write!(f, "\n\n{}", details)?;
        }
        Ok(())
    }
}
