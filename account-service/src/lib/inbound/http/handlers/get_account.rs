use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<GetAccountResponseData>, ApiError> {
    state
        .account_service
        .get_account(&caller.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetAccountResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub verified: bool,
}

impl From<&Account> for GetAccountResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            verified: account.verified,
        }
    }
}
