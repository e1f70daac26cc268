//! Error types for transports, response decoding and the draft editor.
//!
//! None of these cross a store operation boundary: stores turn them into
//! notices and a `bool`/`()` result. The draft editor returns `DraftError`
//! directly because its transitions are synchronous and caller-driven.

use thiserror::Error;

/// The remote call never completed with a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection, DNS, TLS or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// The transport's own timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// A response arrived but its body could not be parsed.
    #[error("unreadable response body: {0}")]
    Decode(String),

    /// No transport is able to serve the request.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// A success status arrived with a body that does not match the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The response has no body but the endpoint needs one.
    #[error("response for {endpoint} has no body")]
    MissingBody { endpoint: &'static str },

    /// The envelope does not contain the payload key.
    #[error("response for {endpoint} has no `{key}` field")]
    MissingKey {
        endpoint: &'static str,
        key: &'static str,
    },

    /// The payload does not deserialize into the expected type.
    #[error("response for {endpoint} has an invalid payload: {message}")]
    InvalidPayload {
        endpoint: &'static str,
        message: String,
    },
}

/// A draft editor transition was applied in the wrong state or with bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("section {0} is already being edited")]
    AlreadyEditing(&'static str),

    #[error("section {0} is not being edited")]
    NotEditing(&'static str),

    #[error("section {section} has no field `{field}`")]
    UnknownField {
        section: &'static str,
        field: String,
    },

    #[error("field `{field}` of section {section} is not a list")]
    NotAList {
        section: &'static str,
        field: String,
    },

    #[error("index {index} is out of range for `{field}` (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("invalid value for section {section}: {message}")]
    InvalidValue {
        section: &'static str,
        message: String,
    },

    #[error("section {0} does not serialize to an object")]
    NotAnObject(&'static str),
}
