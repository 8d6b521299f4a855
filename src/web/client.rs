//! Calls to the marketplace API.
//!
//! [`ApiClient::fetch_with_auth`] is the one place that attaches the bearer
//! credential to outbound requests. It never redirects or clears anything on
//! its own: a 401 comes back as [`AuthOutcome::Unauthorized`] and the page
//! handler decides what to do with it.

use crate::{
    APP_USER_AGENT,
    web::{
        errors::AppError,
        session::SessionCredential,
        types::{
            ApiErrorBody, CurrentUser, ForgotPasswordRequest, LoginForm, LoginResponse, Post,
            SignupRequest,
        },
    },
};
use reqwest::{
    Method, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Method, body and extra headers for [`ApiClient::fetch_with_auth`].
#[derive(Clone, Debug)]
pub struct RequestOptions {
    method: Method,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::get()
        }
    }

    /// Serializes `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns [`AppError::Serialization`] if the body cannot be encoded.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, AppError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Some(payload);
        Ok(self)
    }

    /// Adds a caller header. `Authorization` and `Content-Type` are always
    /// replaced by the wrapper.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// Result of an authenticated call. The response body is unread in both arms.
#[derive(Debug)]
pub enum AuthOutcome {
    Authorized(Response),
    Unauthorized(Response),
}

impl AuthOutcome {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            Self::Authorized(response) | Self::Unauthorized(response) => response,
        }
    }
}

/// Typed result of an authenticated call: the payload, or a rejected session.
#[derive(Debug, PartialEq)]
pub enum Authed<T> {
    Ok(T),
    Unauthorized,
}

#[derive(Debug)]
pub enum LoginReply {
    Granted(SessionCredential),
    Denied { status: u16 },
}

#[derive(Debug, PartialEq, Eq)]
pub enum FormReply {
    Accepted,
    Rejected { status: u16, detail: Option<String> },
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    /// Returns [`AppError::Config`] if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL {base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API base URL must use http or https: {base_url}"
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    /// Sends a request decorated with the session credential.
    ///
    /// `Content-Type: application/json` and `Authorization: Bearer <token>`
    /// override caller headers of the same name. Without a credential the
    /// `Authorization` header is left out entirely.
    ///
    /// # Errors
    /// Returns an error only for transport failures; every HTTP status,
    /// including 401, is an `Ok` outcome.
    #[instrument(skip(self, credential, options), fields(method = %options.method))]
    pub async fn fetch_with_auth(
        &self,
        credential: Option<&SessionCredential>,
        path: &str,
        options: RequestOptions,
    ) -> Result<AuthOutcome, AppError> {
        let RequestOptions {
            method,
            body,
            mut headers,
        } = options;

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match credential {
            Some(credential) => {
                let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
                    .map_err(|_| {
                        AppError::Serialization("Session token is not a valid header".to_string())
                    })?;
                bearer.set_sensitive(true);
                headers.insert(AUTHORIZATION, bearer);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }

        let mut request = self.http.request(method, self.url(path)).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(path, "API rejected the session credential");
            Ok(AuthOutcome::Unauthorized(response))
        } else {
            Ok(AuthOutcome::Authorized(response))
        }
    }

    /// Exchanges username and password for a session credential.
    ///
    /// # Errors
    /// Returns an error for transport failures or an unreadable token response.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginReply, AppError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .form(&LoginForm { username, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Login rejected");
            return Ok(LoginReply::Denied {
                status: status.as_u16(),
            });
        }

        let token: LoginResponse = response.json().await?;
        if token.access_token.trim().is_empty() {
            return Err(AppError::Parse(
                "Login response did not include a token".to_string(),
            ));
        }
        Ok(LoginReply::Granted(SessionCredential::new(
            token.access_token,
        )))
    }

    /// # Errors
    /// Returns an error for transport failures.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<FormReply, AppError> {
        self.post_form_json("/auth/signup", request).await
    }

    /// # Errors
    /// Returns an error for transport failures.
    #[instrument(skip(self, request))]
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<FormReply, AppError> {
        self.post_form_json("/auth/forgot-password", request).await
    }

    async fn post_form_json<B: Serialize>(&self, path: &str, body: &B) -> Result<FormReply, AppError> {
        let options = RequestOptions::post().with_json(body)?;
        let response = self
            .fetch_with_auth(None, path, options)
            .await?
            .into_response();

        let status = response.status();
        if status.is_success() {
            return Ok(FormReply::Accepted);
        }

        let body = response.text().await.unwrap_or_default();
        Ok(FormReply::Rejected {
            status: status.as_u16(),
            detail: ApiErrorBody::detail_message(&body),
        })
    }

    /// Tells the API to end the session.
    ///
    /// # Errors
    /// Returns an error for transport failures or a non-success status.
    #[instrument(skip(self, credential))]
    pub async fn logout(&self, credential: &SessionCredential) -> Result<(), AppError> {
        let response = self
            .fetch_with_auth(Some(credential), "/auth/logout", RequestOptions::post())
            .await?
            .into_response();

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::http(status.as_u16(), &body))
        }
    }

    /// # Errors
    /// Returns an error for transport failures, non-success statuses other
    /// than 401, or an unreadable body.
    pub async fn current_user(
        &self,
        credential: &SessionCredential,
    ) -> Result<Authed<CurrentUser>, AppError> {
        self.get_authed(credential, "/auth/me").await
    }

    /// # Errors
    /// Returns an error for transport failures, non-success statuses other
    /// than 401, or an unreadable body.
    pub async fn posts(&self, credential: &SessionCredential) -> Result<Authed<Vec<Post>>, AppError> {
        self.get_authed(credential, "/posts").await
    }

    #[instrument(skip(self, credential))]
    async fn get_authed<T: DeserializeOwned>(
        &self,
        credential: &SessionCredential,
        path: &str,
    ) -> Result<Authed<T>, AppError> {
        let response = match self
            .fetch_with_auth(Some(credential), path, RequestOptions::get())
            .await?
        {
            AuthOutcome::Unauthorized(_) => return Ok(Authed::Unauthorized),
            AuthOutcome::Authorized(response) => response,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::http(status.as_u16(), &body));
        }

        Ok(Authed::Ok(response.json().await?))
    }

    /// Reachability check against the API root.
    ///
    /// # Errors
    /// Returns an error when the API cannot be reached.
    pub async fn ping(&self) -> Result<StatusCode, AppError> {
        let response = self.http.get(self.url("/")).send().await?;
        Ok(response.status())
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
