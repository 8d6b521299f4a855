//! HTTP front-end: router, middleware and server startup.

pub mod client;
pub mod config;
pub mod errors;
pub mod guard;
pub mod handlers;
pub mod session;
pub mod state;
pub mod types;
pub mod validation;
pub mod views;

use crate::web::{
    config::WebConfig,
    handlers::{dashboard, forgot_password, health, login, logout, posts, root, signup},
    state::AppState,
};
use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, error, info, info_span};
use ulid::Ulid;

/// Builds the router. The route guard wraps every route, including the
/// fallback, so it sees every navigation.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route("/login", get(login::login_page).post(login::login))
        .route("/signup", get(signup::signup_page).post(signup::signup))
        .route(
            "/forgot-password",
            get(forgot_password::forgot_password_page).post(forgot_password::forgot_password),
        )
        .route("/logout", post(logout::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/posts", get(posts::posts))
        .fallback(root::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_session,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
        .with_state(state)
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, config: WebConfig) -> Result<()> {
    let state = AppState::new(config).context("Failed to initialize application state")?;
    info!(
        api = state.config().api_base_url(),
        cookie = state.sessions().cookie_name(),
        "Using marketplace API"
    );

    let app = router(Arc::new(state));

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
