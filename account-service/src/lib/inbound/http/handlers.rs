use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;

pub mod get_account;
pub mod login;
pub mod signup;
pub mod verify_email;

/// JSON request body whose rejections are answered with an [`ApiError`] body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error returned by JSON endpoints.
///
/// Internal errors keep a caller-facing summary and the underlying cause
/// separately; both are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError { message: String, error: String },
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Replace the summary of an internal error with an operation-specific one.
    ///
    /// Other variants are returned unchanged.
    pub fn failed(self, summary: &str) -> Self {
        match self {
            ApiError::InternalServerError { error, .. } => ApiError::InternalServerError {
                message: summary.to_string(),
                error,
            },
            other => other,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError { message, error } => {
                tracing::error!(message = %message, error = %error, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorData {
                        message,
                        error: Some(error),
                    },
                )
            }
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ApiErrorData::new(msg))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiErrorData::new(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorData::new(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiErrorData::new(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiErrorData::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::AccountExists { .. } | AccountError::DuplicateEmail { .. } => {
                ApiError::Conflict("User already exists".to_string())
            }
            AccountError::InvalidCredentials | AccountError::EmailNotVerified => {
                ApiError::Unauthorized(err.to_string())
            }
            AccountError::InvalidOrExpiredToken(_) => ApiError::BadRequest(err.to_string()),
            AccountError::AccountNotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::InvalidName(_) | AccountError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::SignupFailed(ref cause) => ApiError::InternalServerError {
                message: "Signup failed".to_string(),
                error: cause.to_string(),
            },
            AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_) => ApiError::InternalServerError {
                message: "Internal server error".to_string(),
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorData {
    pub fn new(message: String) -> Self {
        Self {
            message,
            error: None,
        }
    }
}
