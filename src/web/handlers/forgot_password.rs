use super::{form_error_status, rejected_status};
use crate::web::{
    client::FormReply,
    state::AppState,
    types::ForgotPasswordRequest,
    validation,
    views::{AlertKind, forms},
};
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const RESET_LINK_SENT: &str = "If this email is registered, a reset link has been sent.";
pub const RESET_FAILED: &str = "Something went wrong. Try again.";

#[derive(Deserialize)]
pub struct ForgotPasswordInput {
    #[serde(default)]
    email: String,
}

pub async fn forgot_password_page() -> Html<String> {
    Html(forms::forgot_password_page("", None))
}

#[instrument(skip(state, input))]
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Form(input): Form<ForgotPasswordInput>,
) -> Response {
    let email = input.email.trim();
    if !validation::valid_email(email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(forms::forgot_password_page(
                email,
                Some((AlertKind::Error, validation::INVALID_EMAIL)),
            )),
        )
            .into_response();
    }

    let request = ForgotPasswordRequest {
        email: email.to_string(),
    };
    let (status, outcome) = match state.api().forgot_password(&request).await {
        Ok(FormReply::Accepted) => {
            info!("Password reset requested");
            (StatusCode::OK, (AlertKind::Success, RESET_LINK_SENT))
        }
        Ok(FormReply::Rejected { status, .. }) => {
            info!(status, "Password reset rejected by API");
            (rejected_status(status), (AlertKind::Error, RESET_FAILED))
        }
        Err(err) => {
            error!("Password reset request failed: {err}");
            (form_error_status(&err), (AlertKind::Error, RESET_FAILED))
        }
    };

    (status, Html(forms::forgot_password_page(email, Some(outcome)))).into_response()
}
