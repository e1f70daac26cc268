//! Typed decode step: turn a transport result into a tagged outcome before
//! anything touches the cache.

use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use crate::error::{DecodeError, TransportError};
use crate::transport::Response;

/// Result of interpreting one remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P> {
    /// Success carrying a decoded payload.
    Payload(P),
    /// Success with nothing to decode (204, or an endpoint that ignores bodies).
    NoContent,
    /// 304: the cached value is still current.
    NotModified,
    /// Rejected status, transport failure or malformed body. Holds the
    /// message to show the user.
    Failed(String),
}

impl<P> Outcome<P> {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

/// Interpret a finished call for `endpoint`.
pub fn interpret<P: DeserializeOwned>(
    endpoint: &Endpoint,
    result: Result<Response, TransportError>,
) -> Outcome<P> {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(op = endpoint.name, error = %err, "remote call failed");
            return Outcome::Failed(endpoint.fallback.to_string());
        }
    };

    if !endpoint.accepts(response.status) {
        let message = response
            .server_message()
            .unwrap_or(endpoint.fallback)
            .to_string();
        tracing::warn!(
            op = endpoint.name,
            status = response.status,
            %message,
            "remote call rejected"
        );
        return Outcome::Failed(message);
    }

    if response.status == 304 {
        return Outcome::NotModified;
    }

    match decode_payload(endpoint, &response) {
        Ok(Some(payload)) => Outcome::Payload(payload),
        Ok(None) => Outcome::NoContent,
        Err(err) => {
            tracing::error!(op = endpoint.name, error = %err, "malformed response");
            Outcome::Failed(endpoint.fallback.to_string())
        }
    }
}

/// Extract and deserialize the endpoint's payload from a successful response.
///
/// Returns `Ok(None)` for endpoints without a payload key and for 204 responses.
pub fn decode_payload<P: DeserializeOwned>(
    endpoint: &Endpoint,
    response: &Response,
) -> Result<Option<P>, DecodeError> {
    let Some(key) = endpoint.payload_key else {
        return Ok(None);
    };

    let body = match &response.body {
        Some(body) => body,
        None if response.status == 204 => return Ok(None),
        None => return Err(DecodeError::MissingBody { endpoint: endpoint.name }),
    };

    let payload = body.get(key).ok_or(DecodeError::MissingKey {
        endpoint: endpoint.name,
        key,
    })?;

    serde_json::from_value(payload.clone())
        .map(Some)
        .map_err(|e| DecodeError::InvalidPayload {
            endpoint: endpoint.name,
            message: e.to_string(),
        })
}
