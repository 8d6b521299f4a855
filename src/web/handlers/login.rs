use super::{DASHBOARD_PATH, form_error_status, login_form_response};
use crate::web::{client::LoginReply, errors::AppError, state::AppState, views::forms};
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub async fn login_page() -> Html<String> {
    Html(forms::login_page("", None))
}

#[instrument(skip(state, input), fields(username = %input.username))]
pub async fn login(State(state): State<Arc<AppState>>, Form(input): Form<LoginInput>) -> Response {
    let username = input.username.trim();

    match state.api().login(username, &input.password).await {
        Ok(LoginReply::Granted(credential)) => {
            info!("Login succeeded");
            state
                .sessions()
                .sign_in(&credential, DASHBOARD_PATH)
                .unwrap_or_else(|err| {
                    error!("Failed to store session cookie: {err}");
                    AppError::Parse("The login response could not be stored.".to_string())
                        .into_response()
                })
        }
        Ok(LoginReply::Denied { status }) => {
            info!(status, "Login denied");
            login_form_response(StatusCode::UNAUTHORIZED, username, INVALID_CREDENTIALS)
        }
        Err(err) => {
            error!("Login request failed: {err}");
            login_form_response(form_error_status(&err), username, &err.to_string())
        }
    }
}
