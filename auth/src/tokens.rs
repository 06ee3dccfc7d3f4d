use chrono::Duration;
use chrono::Utc;

use crate::jwt::IdentityClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and validates identity tokens.
///
/// Stateless: a token is a pure function of the signing secret, the account
/// identity and the issuance time. There is no refresh or revocation.
pub struct TokenService {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenService {
    /// Lifetime applied by [`TokenService::with_default_ttl`].
    pub const DEFAULT_TTL_HOURS: i64 = 1;

    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of every issued token
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Create a token service whose tokens expire one hour after issuance.
    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Issue a signed token for an account.
    ///
    /// # Arguments
    /// * `id` - Account identifier
    /// * `email` - Account email address
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, id: impl ToString, email: impl ToString) -> Result<String, JwtError> {
        let claims = IdentityClaims::new(id, email, Utc::now(), self.ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and return its identity claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or malformed token
    /// * `TokenExpired` - Current time is past the encoded expiry
    pub fn validate(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
