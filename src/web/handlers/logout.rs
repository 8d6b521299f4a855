use crate::web::state::AppState;
use axum::{extract::State, http::HeaderMap, response::Response};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Ends the session at the API, then clears the cookie whatever the outcome.
#[instrument(skip(state, headers))]
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(credential) = state.sessions().credential(&headers) {
        match state.api().logout(&credential).await {
            Ok(()) => info!("Logged out"),
            Err(err) => warn!("API logout failed, clearing session anyway: {err}"),
        }
    }
    state.sessions().evict_to_login()
}
