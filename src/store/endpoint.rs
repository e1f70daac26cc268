//! Endpoint - static description of one remote operation.

use crate::transport::{Method, Request};

/// Statuses accepted by read operations (304 means "keep what you have").
pub const READ_OK: &[u16] = &[200, 304];
/// Statuses accepted by create operations.
pub const CREATE_OK: &[u16] = &[201];
/// Statuses accepted by update and delete operations.
pub const WRITE_OK: &[u16] = &[200, 204];

/// What a store needs to know to run and interpret one remote call.
///
/// Paths are built by the domain store since they carry identifiers; the
/// endpoint fixes everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name used in logs (e.g. `"fetch_listings"`).
    pub name: &'static str,
    pub method: Method,
    /// Envelope key holding the payload (e.g. `"listings"`). `None` ignores the body.
    pub payload_key: Option<&'static str>,
    /// Statuses that count as success.
    pub accept: &'static [u16],
    /// Notice raised on success, if any.
    pub success: Option<&'static str>,
    /// Notice raised on failure when the server gave no message.
    pub fallback: &'static str,
}

impl Endpoint {
    pub const fn read(
        name: &'static str,
        payload_key: &'static str,
        fallback: &'static str,
    ) -> Self {
        Self {
            name,
            method: Method::Get,
            payload_key: Some(payload_key),
            accept: READ_OK,
            success: None,
            fallback,
        }
    }

    pub const fn create(
        name: &'static str,
        payload_key: &'static str,
        success: &'static str,
        fallback: &'static str,
    ) -> Self {
        Self {
            name,
            method: Method::Post,
            payload_key: Some(payload_key),
            accept: CREATE_OK,
            success: Some(success),
            fallback,
        }
    }

    pub const fn update(
        name: &'static str,
        payload_key: &'static str,
        success: &'static str,
        fallback: &'static str,
    ) -> Self {
        Self {
            name,
            method: Method::Put,
            payload_key: Some(payload_key),
            accept: WRITE_OK,
            success: Some(success),
            fallback,
        }
    }

    pub const fn delete(name: &'static str, success: &'static str, fallback: &'static str) -> Self {
        Self {
            name,
            method: Method::Delete,
            payload_key: None,
            accept: WRITE_OK,
            success: Some(success),
            fallback,
        }
    }

    /// Override the accepted statuses.
    pub const fn accepting(mut self, accept: &'static [u16]) -> Self {
        self.accept = accept;
        self
    }

    /// Drop the payload key so the body is never decoded.
    pub const fn ignoring_body(mut self) -> Self {
        self.payload_key = None;
        self
    }

    pub fn accepts(&self, status: u16) -> bool {
        self.accept.contains(&status)
    }

    pub fn request(&self, path: impl Into<String>) -> Request {
        Request::new(self.method, path)
    }
}
