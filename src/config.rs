//! Configuration for the remote client and the draft editor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::draft::SaveFailurePolicy;

/// Default API root used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("marketplace-sync/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP transport.
///
/// Every field has a default so partial config files deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL that endpoint paths are appended to.
    pub base_url: String,

    /// Bearer token attached as `Authorization`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Raw `Cookie` header value for session-cookie deployments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    pub user_agent: String,

    /// Transport timeout. `None` leaves the call unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            session_cookie: None,
            user_agent: USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with everything else defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Build a config from `MARKETPLACE_*` environment variables.
    ///
    /// - `MARKETPLACE_API_URL`
    /// - `MARKETPLACE_API_TOKEN`
    /// - `MARKETPLACE_SESSION_COOKIE`
    /// - `MARKETPLACE_TIMEOUT_SECS` (ignored when not a number)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("MARKETPLACE_API_URL") {
            config.base_url = url;
        }
        config.auth_token = lookup("MARKETPLACE_API_TOKEN").filter(|t| !t.is_empty());
        config.session_cookie = lookup("MARKETPLACE_SESSION_COOKIE").filter(|c| !c.is_empty());
        config.timeout_secs = lookup("MARKETPLACE_TIMEOUT_SECS").and_then(|v| v.parse().ok());
        config
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Join the base URL and an endpoint path with exactly one `/` between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Settings for the draft editor's save flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// What happens to a section whose save was rejected.
    pub save_failure: SaveFailurePolicy,
}
