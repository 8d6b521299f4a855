//! Session credential storage.
//!
//! The bearer token issued by the API lives in a single `HttpOnly` cookie.
//! [`SessionStore`] is the only code that reads or writes that cookie: the
//! route guard and the page handlers both resolve the credential through it,
//! login is the only place that sets it, and logout or a 401 from the API are
//! the only places that clear it.

use crate::web::config::{LOGIN_PATH, WebConfig};
use axum::{
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, InvalidHeaderValue, SET_COOKIE},
    },
    response::{IntoResponse, Redirect, Response},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{
    fmt,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{debug, error};

/// Opaque bearer token for the current visitor.
#[derive(Clone)]
pub struct SessionCredential(SecretString);

impl SessionCredential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential(***)")
    }
}

/// What the guard requires of a cookie before treating it as a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionCheck {
    /// Any non-empty value.
    #[default]
    Presence,
    /// A JWT whose `exp` claim is still in the future. The signature is not
    /// checked here; the API remains the authority.
    Expiry,
}

impl SessionCheck {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Expiry => "expiry",
        }
    }

    #[must_use]
    pub fn accepts(self, token: &str, now_unix: i64) -> bool {
        if token.trim().is_empty() {
            return false;
        }
        match self {
            Self::Presence => true,
            Self::Expiry => jwt_expiry(token).is_some_and(|exp| exp > now_unix),
        }
    }
}

impl FromStr for SessionCheck {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "presence" => Ok(Self::Presence),
            "expiry" => Ok(Self::Expiry),
            other => Err(format!("invalid session check: {other}")),
        }
    }
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Reads the `exp` claim from a JWT payload without verifying the signature.
fn jwt_expiry(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = Base64UrlUnpadded::decode_vec(payload.trim_end_matches('=')).ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    claim.exp.map(|exp| exp.floor() as i64)
}

#[must_use]
pub fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}

/// Single accessor for the session cookie.
#[derive(Clone, Debug)]
pub struct SessionStore {
    cookie_name: String,
    ttl_seconds: u64,
    secure: bool,
    check: SessionCheck,
}

impl SessionStore {
    #[must_use]
    pub fn new(cookie_name: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl_seconds,
            secure: false,
            check: SessionCheck::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &WebConfig) -> Self {
        Self::new(config.session_cookie(), config.session_ttl_seconds())
            .with_secure(config.cookie_secure())
            .with_check(config.session_check())
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: SessionCheck) -> Self {
        self.check = check;
        self
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Resolves the session credential from the request cookies.
    ///
    /// Returns `None` when the cookie is missing, empty, or rejected by the
    /// configured [`SessionCheck`].
    #[must_use]
    pub fn credential(&self, headers: &HeaderMap) -> Option<SessionCredential> {
        let token = self.cookie_value(headers)?;
        if self.check.accepts(&token, now_unix_seconds()) {
            Some(SessionCredential::new(token))
        } else {
            debug!(check = self.check.as_str(), "Session cookie rejected");
            None
        }
    }

    fn cookie_value(&self, headers: &HeaderMap) -> Option<String> {
        for header in headers.get_all(COOKIE) {
            let Ok(value) = header.to_str() else {
                continue;
            };
            for pair in value.split(';') {
                let mut parts = pair.trim().splitn(2, '=');
                let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                    continue;
                };
                let val = val.trim().trim_matches('"');
                if key.trim() == self.cookie_name && !val.is_empty() {
                    return Some(val.to_string());
                }
            }
        }
        None
    }

    /// `Set-Cookie` value that stores the credential.
    ///
    /// # Errors
    /// Returns an error if the token contains characters not allowed in a header.
    pub fn establish_cookie(
        &self,
        credential: &SessionCredential,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            credential.expose(),
            self.ttl_seconds
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` value that removes the credential.
    ///
    /// # Errors
    /// Returns an error if the cookie name is not a valid header value.
    pub fn clear_cookie(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// Stores the credential and redirects to `location`.
    ///
    /// # Errors
    /// Returns an error if the token cannot be carried in a cookie header.
    pub fn sign_in(
        &self,
        credential: &SessionCredential,
        location: &str,
    ) -> Result<Response, InvalidHeaderValue> {
        let cookie = self.establish_cookie(credential)?;
        let mut headers = HeaderMap::new();
        headers.insert(SET_COOKIE, cookie);
        Ok((headers, Redirect::to(location)).into_response())
    }

    /// Clears the credential and redirects to the login page.
    #[must_use]
    pub fn evict_to_login(&self) -> Response {
        let mut headers = HeaderMap::new();
        match self.clear_cookie() {
            Ok(cookie) => {
                headers.insert(SET_COOKIE, cookie);
            }
            Err(err) => error!("Failed to build session clearing cookie: {err}"),
        }
        (headers, Redirect::to(LOGIN_PATH)).into_response()
    }
}
