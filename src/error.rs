//! Error types and handling for tesla-fleet
//!
//! Each stage of the fleet_status request cycle fails with its own variant,
//! wrapping the underlying cause as its `source` so callers can render the
//! full chain. Nothing here is retried; that is the caller's decision.

use thiserror::Error;

/// Result type alias for tesla-fleet operations
pub type Result<T> = std::result::Result<T, FleetError>;

/// Main error type for tesla-fleet
#[derive(Debug, Error)]
pub enum FleetError {
    /// Request body could not be serialized
    #[error("failed to serialize request body")]
    EncodeRequest {
        #[source]
        source: serde_json::Error,
    },

    /// Request could not be constructed (e.g. a base URL that cannot carry a path)
    #[error("failed to construct request: {message}")]
    BuildRequest {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Network failure: DNS, connection refused, transport timeout
    #[error("request failed")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be drained
    #[error("failed to read response body")]
    ReadBody {
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with something other than 200
    #[error("status code {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON shape
    #[error("failed to parse response body")]
    DecodeResponse {
        #[source]
        source: serde_json::Error,
    },

    /// Caller-supplied cancellation fired before the response arrived
    #[error("request cancelled")]
    Cancelled,

    /// Configuration-related errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Configuration file (de)serialization errors
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("i/o error: {message}")]
    Io { message: String },
}

impl FleetError {
    /// Create a new request construction error
    pub fn build_request<S: Into<String>>(message: S) -> Self {
        Self::BuildRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// HTTP status code for [`FleetError::Status`], `None` otherwise
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request was abandoned because of caller cancellation
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<std::io::Error> for FleetError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for FleetError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let err = FleetError::config("test config error");
        assert!(matches!(err, FleetError::Config { .. }));

        let err = FleetError::build_request("bad url");
        assert!(matches!(err, FleetError::BuildRequest { .. }));

        let err = FleetError::validation("field", "test validation error");
        assert!(matches!(err, FleetError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = FleetError::Status { status: 403 };
        assert_eq!(err.to_string(), "status code 403");
        assert_eq!(err.status_code(), Some(403));

        let err = FleetError::validation("api.base_url", "invalid value");
        assert_eq!(
            err.to_string(),
            "validation error: api.base_url - invalid value"
        );
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn decode_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FleetError::DecodeResponse { source };
        assert_eq!(err.to_string(), "failed to parse response body");
        assert!(err.source().is_some());
        assert!(!err.is_cancelled());
    }
}
