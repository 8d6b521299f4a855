use super::DASHBOARD_PATH;
use crate::{
    html::escape,
    web::{client::Authed, state::AppState, views::layout},
};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, instrument};

#[instrument(skip(state, headers))]
pub async fn dashboard(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(credential) = state.sessions().credential(&headers) else {
        return state.sessions().evict_to_login();
    };

    let user = match state.api().current_user(&credential).await {
        Ok(Authed::Ok(user)) => user,
        Ok(Authed::Unauthorized) => return state.sessions().evict_to_login(),
        Err(err) => {
            error!("Failed to load current user: {err}");
            return err.into_response();
        }
    };

    let content = format!(
        r#"<section class="rounded-lg bg-white p-6 shadow"><h2 class="mb-2 text-lg font-semibold">Welcome, {}</h2><p class="text-gray-600">Use the sidebar to browse posts.</p></section>"#,
        escape(&user.username)
    );
    Html(layout::dashboard_shell(
        "Dashboard",
        Some(&user),
        DASHBOARD_PATH,
        &content,
    ))
    .into_response()
}
