//! Runtime configuration for the web front-end, assembled from CLI arguments.

use crate::web::session::SessionCheck;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_COOKIE: &str = "token";
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 3600;
pub const DEFAULT_API_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_PROTECTED_PATHS: [&str; 4] = ["/dashboard", "/admin", "/profile", "/posts"];
pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug)]
pub struct WebConfig {
    api_base_url: String,
    api_timeout: Duration,
    session_cookie: String,
    session_ttl_seconds: u64,
    session_check: SessionCheck,
    cookie_secure: bool,
    protected_paths: Vec<String>,
}

impl WebConfig {
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECONDS),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_check: SessionCheck::default(),
            cookie_secure: false,
            protected_paths: DEFAULT_PROTECTED_PATHS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, ttl: u64) -> Self {
        self.session_ttl_seconds = ttl;
        self
    }

    #[must_use]
    pub fn with_session_check(mut self, check: SessionCheck) -> Self {
        self.session_check = check;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Replaces the protected prefixes. Blank entries are dropped.
    #[must_use]
    pub fn with_protected_paths(mut self, paths: impl IntoIterator<Item = String>) -> Self {
        self.protected_paths = paths
            .into_iter()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn api_timeout(&self) -> Duration {
        self.api_timeout
    }

    #[must_use]
    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn session_check(&self) -> SessionCheck {
        self.session_check
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    #[must_use]
    pub fn protected_paths(&self) -> &[String] {
        &self.protected_paths
    }
}
