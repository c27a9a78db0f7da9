//! Error types and result aliases for Packagist operations.
//!
//! Every stage of the request pipeline reports through [`PackagistError`].
//! Callers that only care about the broad failure class can match on
//! [`PackagistError::kind`] instead of individual variants.

use thiserror::Error;

/// Unified error type for all Packagist operations
#[derive(Error, Debug)]
pub enum PackagistError {
    // Transport errors
    #[error("Network error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Registry returned status {status} for {url}")]
    Status { status: u16, url: String },

    // Response pipeline errors
    #[error("Failed to parse registry response: {message}")]
    Parse { message: String },

    #[error("Registry response does not match the expected schema: {message}")]
    Mapping { message: String },

    #[error("Operation was cancelled")]
    Cancelled,

    // Request building errors
    #[error("Invalid URI template '{template}': {reason}")]
    Template { template: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Broad failure classes a caller may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or HTTP level failure, including non-2xx responses
    Transport,
    /// Body was not a JSON object
    Parse,
    /// JSON was valid but lacked fields required by the typed result
    Mapping,
    /// Operation was cancelled before it settled
    Cancelled,
    /// The request could not be built
    Request,
    /// Local I/O failure
    Io,
}

/// Result type alias for Packagist operations
pub type PackagistResult<T> = Result<T, PackagistError>;

impl PackagistError {
    /// Create a transport error from any error type
    pub fn transport<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error from a message
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a mapping error from a message
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PackagistError::Transport { .. } | PackagistError::Status { .. } => ErrorKind::Transport,
            PackagistError::Parse { .. } => ErrorKind::Parse,
            PackagistError::Mapping { .. } => ErrorKind::Mapping,
            PackagistError::Cancelled => ErrorKind::Cancelled,
            PackagistError::Template { .. } | PackagistError::InvalidUrl { .. } => {
                ErrorKind::Request
            },
            PackagistError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Check if the registry answered with 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, PackagistError::Status { status: 404, .. })
    }

    /// Check if repeating the same operation could succeed.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PackagistError::Transport { .. } | PackagistError::Io { .. } => true,
            PackagistError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PackagistError::Status { status: 404, .. } => {
                Some("Check the package name spelling or try `packagist search`")
            },
            PackagistError::Transport { .. } => Some("Check your internet connection and try again"),
            PackagistError::Status { .. } => Some("The registry may be unavailable, try again later"),
            PackagistError::Parse { .. } | PackagistError::Mapping { .. } => {
                Some("Make sure the base URL points to a Packagist compatible registry")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_status_with_transport() {
        let err = PackagistError::Status {
            status: 502,
            url: "https://packagist.org/search.json".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_recoverable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = PackagistError::Status {
            status: 404,
            url: "https://packagist.org/packages/clue%2Finvalid.json".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_recoverable());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_pipeline_errors_are_not_recoverable() {
        assert_eq!(PackagistError::parse("bad").kind(), ErrorKind::Parse);
        assert_eq!(PackagistError::mapping("bad").kind(), ErrorKind::Mapping);
        assert_eq!(PackagistError::Cancelled.kind(), ErrorKind::Cancelled);
        assert!(!PackagistError::parse("bad").is_recoverable());
        assert!(!PackagistError::Cancelled.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = PackagistError::mapping("missing field `name`");
        assert_eq!(
            err.to_string(),
            "Registry response does not match the expected schema: missing field `name`"
        );
    }
}
