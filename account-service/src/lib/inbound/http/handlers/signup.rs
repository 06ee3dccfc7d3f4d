use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::errors::AccountNameError;
use crate::account::errors::EmailError;
use crate::account::models::AccountName;
use crate::account::models::EmailAddress;
use crate::account::models::SignupCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    state
        .account_service
        .signup(body.try_into_command()?)
        .await
        .map_err(|e| ApiError::from(e).failed("Signup failed"))
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                SignupResponseData {
                    message: "Signup successful. Verification email sent.".to_string(),
                },
            )
        })
}

/// HTTP request body for signing up (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] AccountNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let name = AccountName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(SignupCommand::new(name, email, self.password))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// The token is only delivered by email, never in this response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub message: String,
}
