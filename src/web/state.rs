use crate::web::{
    client::ApiClient,
    config::WebConfig,
    errors::AppError,
    guard::{ProtectedPaths, RouteGuard},
    session::SessionStore,
};

/// Shared, read-only state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    config: WebConfig,
    api: ApiClient,
    sessions: SessionStore,
    guard: RouteGuard,
}

impl AppState {
    /// # Errors
    /// Returns [`AppError::Config`] if the API client cannot be built.
    pub fn new(config: WebConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(config.api_base_url(), config.api_timeout())?;
        let sessions = SessionStore::from_config(&config);
        let guard = RouteGuard::new(ProtectedPaths::new(
            config.protected_paths().iter().cloned(),
        ));

        Ok(Self {
            config,
            api,
            sessions,
            guard,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}
