//! Page handlers. Each one renders HTML from data fetched through
//! [`crate::web::client::ApiClient`] with the credential resolved by
//! [`crate::web::session::SessionStore`].

pub mod dashboard;
pub mod forgot_password;
pub mod health;
pub mod login;
pub mod logout;
pub mod posts;
pub mod root;
pub mod signup;

use crate::web::{errors::AppError, views::forms};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const POSTS_PATH: &str = "/dashboard/posts";

/// Status used when a form must be shown again after a failed API call.
pub(crate) fn form_error_status(err: &AppError) -> StatusCode {
    match err {
        AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Status for a form the API rejected: its own 4xx, otherwise 502.
pub(crate) fn rejected_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(StatusCode::is_client_error)
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

pub(crate) fn login_form_response(status: StatusCode, username: &str, error: &str) -> Response {
    (status, Html(forms::login_page(username, Some(error)))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_status_keeps_client_errors_only() {
        assert_eq!(rejected_status(409), StatusCode::CONFLICT);
        assert_eq!(rejected_status(500), StatusCode::BAD_GATEWAY);
        assert_eq!(rejected_status(200), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn transport_errors_map_to_gateway_statuses() {
        assert_eq!(
            form_error_status(&AppError::Timeout("slow".to_string())),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            form_error_status(&AppError::Network("down".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
