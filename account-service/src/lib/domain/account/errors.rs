use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for AccountName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountNameError {
    #[error("Name must not be blank")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failure to hand a verification email to the mail transport.
///
/// Every variant carries the underlying cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    MessageBuild(String),

    #[error("Mail transport failed: {0}")]
    Transport(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid name: {0}")]
    InvalidName(#[from] AccountNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Workflow errors
    #[error("User already exists")]
    AccountExists { email: String },

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please verify your email first.")]
    EmailNotVerified,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken(String),

    #[error("User not found")]
    AccountNotFound(String),

    #[error("Verification email could not be sent: {0}")]
    SignupFailed(DeliveryError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
