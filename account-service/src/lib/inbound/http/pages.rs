use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::errors::AccountError;
use crate::account::models::VerificationOutcome;

/// HTML pages shown to someone who clicked a verification link.
#[derive(Debug, Clone)]
pub struct VerificationPages {
    login_url: String,
    redirect_delay: Duration,
}

impl VerificationPages {
    pub fn new(login_url: impl Into<String>, redirect_delay: Duration) -> Self {
        Self {
            login_url: login_url.into(),
            redirect_delay,
        }
    }

    /// Confirmation page; both outcomes redirect to the login page after the delay.
    pub fn confirmation(&self, outcome: VerificationOutcome) -> Html<String> {
        let heading = match outcome {
            VerificationOutcome::Verified => "✅ Email verified! Redirecting to login...",
            VerificationOutcome::AlreadyVerified => "Email already verified! Redirecting to login...",
        };

        // JSON string literal is a valid, escaped JS string literal
        let target = serde_json::Value::String(self.login_url.clone()).to_string();

        Html(format!(
            r#"<html>
<head><meta charset="utf-8"><title>Email verification</title></head>
<body>
<h2>{heading}</h2>
<p>If you are not redirected, <a href="{href}">continue to login</a>.</p>
<script>setTimeout(() => {{ window.location.href = {target}; }}, {delay});</script>
</body>
</html>"#,
            href = html_escape::encode_double_quoted_attribute(&self.login_url),
            delay = self.redirect_delay.as_millis(),
        ))
    }
}

/// Failure of the verification page, rendered as HTML rather than JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    InvalidToken,
    NotFound,
    Internal(String),
}

impl From<AccountError> for PageError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidOrExpiredToken(_) => PageError::InvalidToken,
            AccountError::AccountNotFound(_) => PageError::NotFound,
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PageError::InvalidToken => (StatusCode::BAD_REQUEST, "❌ Invalid or expired token"),
            PageError::NotFound => (StatusCode::NOT_FOUND, "User not found"),
            PageError::Internal(error) => {
                tracing::error!(error = %error, "Email verification failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Verification failed, please try again later")
            }
        };

        (
            status,
            Html(format!(
                "<html>\n<head><meta charset=\"utf-8\"><title>Email verification</title></head>\n<body>\n<h2>{}</h2>\n</body>\n</html>",
                message
            )),
        )
            .into_response()
    }
}
