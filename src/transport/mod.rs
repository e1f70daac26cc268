//! Transports - the boundary to the remote marketplace API.
//!
//! A store operation builds one `Request`, hands it to a `Transport`, and
//! interprets the `Response` status itself. Transports only report whether
//! a response arrived at all.
//!
//! ## Implementations
//!
//! - `HttpTransport` (feature `http`): reqwest against a configured base URL.
//! - `ScriptedTransport`: replies queued in-process, for tests and demos.

#[cfg(feature = "http")]
mod http;
mod scripted;

use std::fmt;
use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use scripted::{Gate, ScriptedTransport};

/// HTTP method of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remote call: method, path relative to the API root, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` and attach it.
    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }
}

/// A response that arrived, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Parsed JSON body. `None` when the body was empty.
    pub body: Option<Value>,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Human-readable text the server put under `message` or `error`.
    pub fn server_message(&self) -> Option<&str> {
        let body = self.body.as_ref()?;
        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key))
            .filter_map(Value::as_str)
            .find(|message| !message.trim().is_empty())
    }
}

/// Sends requests to the remote side.
///
/// `send` is called synchronously when a store operation is invoked, so the
/// call is issued in invocation order; the returned future must own
/// everything it needs and may not borrow `self`.
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send + 'static + use<Self>;
}
