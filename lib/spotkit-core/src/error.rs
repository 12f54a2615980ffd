//! Error types for spotkit.
//!
//! Every failure of a request, whether local (construction, decoding) or
//! remote (transport, status, server-reported envelopes), is surfaced as a
//! single [`Error`] value.

use std::fmt;

use bytes::Bytes;
use derive_more::{Display, Error, From};
use serde::Deserialize;

// ============================================================================
// Server Error Envelopes
// ============================================================================

/// A structured error reported by the web API.
///
/// Decoded from the envelope `{"error": {"status": <int>, "message": <string>}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status echoed in the envelope.
    pub status: u16,
    /// Human-readable message from the server.
    pub message: String,
    /// Seconds to wait before retrying, when the server rate-limited the call.
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// Decode the API error envelope from a response body.
    ///
    /// Returns `None` when the body has any other shape.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Option<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            error: Inner,
        }

        #[derive(Deserialize)]
        struct Inner {
            status: u16,
            message: String,
        }

        let Envelope { error } = serde_json::from_slice(body).ok()?;
        Some(Self {
            status: error.status,
            message: error.message,
            retry_after: None,
        })
    }

    /// Attach a `Retry-After` hint.
    #[must_use]
    pub const fn with_retry_after(mut self, seconds: Option<u64>) -> Self {
        self.retry_after = seconds;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received a {} ({}) error: {}",
            self.status,
            crate::status::describe(self.status),
            self.message
        )?;
        if let Some(seconds) = self.retry_after {
            write!(f, ". You may retry in {seconds} seconds.")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// A structured error reported by the accounts (authentication) service.
///
/// Decoded from the envelope `{"error": <string>, "error_description": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthError {
    /// Short error code, e.g. `invalid_client`.
    pub error: String,
    /// Longer explanation from the server.
    #[serde(rename = "error_description")]
    pub description: String,
}

impl AuthError {
    /// Decode the authentication error envelope from a response body.
    ///
    /// Returns `None` when the body has any other shape.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "received a \"{}\" error: {}", self.error, self.description)
    }
}

impl std::error::Error for AuthError {}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for spotkit operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The URL does not belong to one of the two permitted hosts.
    #[display("invalid host in URL '{url}': expected the API or accounts host")]
    #[from(skip)]
    InvalidHost {
        /// The rejected URL.
        url: String,
    },

    /// URL parsing or resolution error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The exchange could not be expressed as an HTTP request/response.
    #[display("protocol error: {_0}")]
    #[from(skip)]
    Protocol(#[error(not(source))] String),

    /// The server answered with a status code outside the recognized set.
    #[display("unrecognized status {status}: {}", crate::status::describe(*status))]
    #[from(skip)]
    UnrecognizedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        #[error(not(source))]
        body: Bytes,
    },

    /// Structured error reported by the web API.
    #[display("{_0}")]
    #[from(skip)]
    Api(#[error(not(source))] ApiError),

    /// Structured error reported by the accounts service.
    #[display("{_0}")]
    #[from(skip)]
    Auth(#[error(not(source))] AuthError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// Coding path to the failure (e.g., "albums.items[3].name").
        path: String,
        /// Error message.
        message: String,
    },

    /// A wrapped collection payload was an object without any key.
    #[display("JSON deserialization error at '{path}': JSON object is empty")]
    #[from(skip)]
    EmptyPayload {
        /// Coding path of the empty object.
        path: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid host error.
    #[must_use]
    pub fn invalid_host(url: impl Into<String>) -> Self {
        Self::InvalidHost { url: url.into() }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create an unrecognized status error.
    #[must_use]
    pub fn unrecognized_status(status: u16, body: Bytes) -> Self {
        Self::UnrecognizedStatus { status, body }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the server reported a structured API error.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns `true` if the server reported a structured authentication error.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Returns `true` if a payload could not be decoded.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::JsonDeserialization { .. } | Self::EmptyPayload { .. }
        )
    }

    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status),
            Self::UnrecognizedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the structured API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the decode path if this is a decoding error.
    #[must_use]
    pub fn decode_path(&self) -> Option<&str> {
        match self {
            Self::JsonDeserialization { path, .. } | Self::EmptyPayload { path } => Some(path),
            _ => None,
        }
    }
}
