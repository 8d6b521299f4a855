use super::{form_error_status, rejected_status};
use crate::web::{
    client::FormReply,
    config::LOGIN_PATH,
    state::AppState,
    types::SignupRequest,
    validation,
    views::forms::{self, SignupValues},
};
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const SIGNUP_FAILED: &str = "Signup failed. Please try again.";

#[derive(Deserialize)]
pub struct SignupInput {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
    #[serde(default)]
    city: String,
}

pub async fn signup_page() -> Html<String> {
    Html(forms::signup_page(&SignupValues::default(), None))
}

fn form_response(status: StatusCode, input: &SignupInput, error: &str) -> Response {
    let values = SignupValues {
        username: input.username.trim(),
        city: input.city.trim(),
    };
    (status, Html(forms::signup_page(&values, Some(error)))).into_response()
}

#[instrument(skip(state, input), fields(username = %input.username))]
pub async fn signup(State(state): State<Arc<AppState>>, Form(input): Form<SignupInput>) -> Response {
    if let Some(message) = validation::signup_error(&input.password, &input.confirm_password) {
        debug!("Signup rejected locally: {message}");
        return form_response(StatusCode::UNPROCESSABLE_ENTITY, &input, message);
    }

    let request = SignupRequest {
        username: input.username.trim().to_string(),
        password: input.password.clone(),
        confirm_password: input.confirm_password.clone(),
        city: input.city.trim().to_string(),
    };

    match state.api().signup(&request).await {
        Ok(FormReply::Accepted) => {
            info!("Signup succeeded");
            Redirect::to(LOGIN_PATH).into_response()
        }
        Ok(FormReply::Rejected { status, detail }) => {
            info!(status, "Signup rejected by API");
            let message = detail.as_deref().unwrap_or(SIGNUP_FAILED);
            form_response(rejected_status(status), &input, message)
        }
        Err(err) => {
            error!("Signup request failed: {err}");
            form_response(form_error_status(&err), &input, &err.to_string())
        }
    }
}
