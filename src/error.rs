//! Error types for the AlchemyLanguage client.
//!
//! Errors fall into four groups: caller misuse (detected before any
//! network I/O), transport failures, decode failures, and failures the
//! service reports inside an otherwise successful response.

use crate::endpoint::SourceKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while calling the AlchemyLanguage service.
#[derive(Error, Debug)]
pub enum AlchemyError {
    /// The operation cannot be called with this kind of content source.
    #[error("operation '{operation}' does not accept {kind} content")]
    UnsupportedSource {
        /// Name of the operation that was called.
        operation: &'static str,
        /// The content source kind that was supplied.
        kind: SourceKind,
    },

    /// Targeted sentiment was requested without any targets.
    #[error("targeted sentiment requires a non-empty 'targets' parameter")]
    MissingTargets,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ConfigFileRead {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Endpoint returned an error status.
    #[error("endpoint returned error status {status}: {body}")]
    EndpointError {
        /// HTTP status code returned.
        status: u16,
        /// Response body content.
        body: String,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode '{operation}' response: {source}")]
    Decode {
        /// Name of the operation whose response failed to decode.
        operation: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with `"status": "ERROR"`.
    #[error("service rejected '{operation}' call: {status_info}")]
    Service {
        /// Name of the operation that was rejected.
        operation: &'static str,
        /// The `statusInfo` reported by the service.
        status_info: String,
    },
}

impl AlchemyError {
    /// Whether the error is a caller programming error raised before any I/O.
    pub fn is_caller_misuse(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSource { .. } | Self::MissingTargets | Self::InvalidConfig(_)
        )
    }

    /// Whether the error came from the HTTP transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpRequest(_) | Self::EndpointError { .. })
    }

    /// Whether the response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// HTTP status code, if the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::EndpointError { status, .. } => Some(*status),
            Self::HttpRequest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for AlchemyLanguage operations.
pub type Result<T> = std::result::Result<T, AlchemyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(AlchemyError::MissingTargets.is_caller_misuse());
        assert!(!AlchemyError::MissingTargets.is_transport());

        let unsupported = AlchemyError::UnsupportedSource {
            operation: "authors",
            kind: SourceKind::Text,
        };
        assert!(unsupported.is_caller_misuse());
        assert_eq!(
            unsupported.to_string(),
            "operation 'authors' does not accept text content"
        );

        let endpoint = AlchemyError::EndpointError {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert!(endpoint.is_transport());
        assert_eq!(endpoint.status(), Some(401));

        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let decode = AlchemyError::Decode {
            operation: "language",
            source,
        };
        assert!(decode.is_decode());
        assert!(!decode.is_transport());
    }
}
