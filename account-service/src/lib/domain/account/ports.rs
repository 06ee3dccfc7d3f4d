use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::DeliveryError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountName;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::LoginOutcome;
use crate::account::models::NewAccount;
use crate::account::models::SignupCommand;
use crate::account::models::VerificationOutcome;

/// Port for account workflow operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new, unverified account and email it a verification link.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `AccountExists` - Email is already registered (including a lost creation race)
    /// * `SignupFailed` - Account was stored but the email could not be sent
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<Account, AccountError>;

    /// Check credentials of a verified account and issue an identity token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `EmailNotVerified` - Credentials are correct but the email is not confirmed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;

    /// Confirm the email address encoded in a verification token.
    ///
    /// Idempotent: a token for an already verified account succeeds without writing.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - Token signature, payload or expiry check failed
    /// * `AccountNotFound` - No account matches the token's id
    /// * `DatabaseError` - Database operation failed
    async fn verify_email(&self, token: &str) -> Result<VerificationOutcome, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `AccountNotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Persist a new unverified account, assigning its id.
    ///
    /// Email uniqueness is enforced here; of two concurrent creates for the same
    /// address exactly one succeeds.
    ///
    /// # Errors
    /// * `DuplicateEmail` - An account with this email already exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Persist mutations of an existing account.
    ///
    /// # Returns
    /// Account as stored after the write
    ///
    /// # Errors
    /// * `AccountNotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, account: Account) -> Result<Account, AccountError>;
}

/// Outbound delivery of verification emails.
#[async_trait]
pub trait VerificationMailer: Send + Sync + 'static {
    /// Make one delivery attempt of a verification email.
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `recipient_name` - Name used in the greeting
    /// * `verification_link` - Absolute URL the recipient must open
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender or recipient address rejected
    /// * `MessageBuild` - Message could not be assembled
    /// * `Transport` - Authentication, connection or relay failure
    async fn send_verification_email(
        &self,
        to: &EmailAddress,
        recipient_name: &AccountName,
        verification_link: &str,
    ) -> Result<(), DeliveryError>;
}
