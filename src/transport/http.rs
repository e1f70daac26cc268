//! HTTP transport backed by reqwest.
//!
//! Requires the `http` feature. Credentials from `ClientConfig` are attached
//! to every request as default headers.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, COOKIE};

use super::{Method, Request, Response, Transport};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Transport that talks JSON over HTTP to the marketplace API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Build a transport for the given config.
    ///
    /// Fails only when a credential is not a valid header value or the
    /// underlying client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| TransportError::Unavailable(format!("invalid auth token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie)
                .map_err(|e| TransportError::Unavailable(format!("invalid session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            TransportError::Unavailable(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send + 'static + use<> {
        let client = self.client.clone();
        let url = self.config.url(&request.path);

        async move {
            tracing::debug!(method = %request.method, %url, "sending request");

            let mut builder = client.request(reqwest_method(request.method), &url);
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;

            let body = if bytes.iter().all(u8::is_ascii_whitespace) {
                None
            } else {
                match serde_json::from_slice(&bytes) {
                    Ok(value) => Some(value),
                    // Error pages are often HTML; the status alone still tells the story.
                    Err(_) if !status.is_success() => None,
                    Err(e) => return Err(TransportError::Decode(e.to_string())),
                }
            };

            Ok(Response {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
