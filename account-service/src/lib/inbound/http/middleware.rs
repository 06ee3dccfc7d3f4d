use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Extension type to store the bearer's identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Middleware that validates identity tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_service.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "Identity token rejected");
        unauthorized("Invalid or expired token")
    })?;

    let account_id = AccountId::from_string(&claims.id).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse account ID from token");
        unauthorized("Invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "message": message
        })),
    )
        .into_response()
}
