use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::AccountNameError;
use crate::account::errors::EmailError;

/// Account aggregate entity.
///
/// The only persisted record. `verified` starts false and only ever moves to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Mark the account's email address as confirmed.
    ///
    /// # Returns
    /// True if the flag changed, false if the account was already verified
    pub fn mark_verified(&mut self) -> bool {
        if self.verified {
            return false;
        }
        self.verified = true;
        true
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    ///
    /// # Returns
    /// AccountId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Non-blank after trimming, at most 100 characters. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, AccountNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(AccountNameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(AccountNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The address is kept
/// exactly as supplied; uniqueness is by exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Fields required to create an account record. The store assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub name: AccountName,
    pub email: EmailAddress,
    pub password: String,
}

impl SignupCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(name: AccountName, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to log in with raw credentials.
///
/// The email is deliberately not validated: a malformed address fails the same
/// way as an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Successful login: a fresh identity token and the account it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub account: Account,
}

/// Result of following a verification link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The account was unverified and is now verified
    Verified,
    /// The account had already been verified; nothing was written
    AlreadyVerified,
}
