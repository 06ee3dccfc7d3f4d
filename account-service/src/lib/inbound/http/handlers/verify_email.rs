use axum::extract::Query;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;

use crate::account::ports::AccountServicePort;
use crate::inbound::http::pages::PageError;
use crate::inbound::http::router::AppState;

/// Target of the link in the verification email. Answers with HTML pages.
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<Html<String>, PageError> {
    let token = params
        .token
        .filter(|token| !token.is_empty())
        .ok_or(PageError::InvalidToken)?;

    let outcome = state.account_service.verify_email(&token).await?;

    Ok(state.pages.confirmation(outcome))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyEmailParams {
    token: Option<String>,
}
