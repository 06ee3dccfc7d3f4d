use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::account::models::LoginCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let outcome = state
        .account_service
        .login(LoginCommand::new(body.email, body.password))
        .await
        .map_err(|e| ApiError::from(e).failed("Login failed"))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            message: "Login successful".to_string(),
            token: outcome.token,
            user: (&outcome.account).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub token: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub name: String,
    pub email: String,
}

impl From<&Account> for UserData {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
        }
    }
}
