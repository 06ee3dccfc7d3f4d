use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of an identity token.
///
/// Carries the account identifier and email address plus the registered
/// `iat`/`exp` timestamps (Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Account identifier
    pub id: String,

    /// Account email address
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    /// Build claims issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `id` - Account identifier
    /// * `email` - Account email address
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn new(
        id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}
