use super::DASHBOARD_PATH;
use crate::web::views::layout;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};

// axum handler for /
pub async fn root() -> impl IntoResponse {
    Redirect::to(DASHBOARD_PATH)
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(layout::not_found_page()))
}
