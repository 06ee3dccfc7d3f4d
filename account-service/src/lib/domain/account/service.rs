use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::LoginCommand;
use crate::account::models::LoginOutcome;
use crate::account::models::NewAccount;
use crate::account::models::SignupCommand;
use crate::account::models::VerificationOutcome;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::VerificationMailer;

/// Argon2id hash (production parameters) checked when no account matches a login,
/// so unknown emails cost the same as wrong passwords.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$bm8tc3VjaC1hY2NvdW50IQ$17eV9BlGzAB5ALFpPwX4IH2GGyau4d734FL2lIcYIPo";

/// Domain service implementation for the account workflow.
///
/// Composes the credential store, the token service and the verification mailer.
/// Holds no mutable state of its own.
pub struct AccountService<AR, VM>
where
    AR: AccountRepository,
    VM: VerificationMailer,
{
    repository: Arc<AR>,
    mailer: Arc<VM>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
    public_url: String,
}

impl<AR, VM> AccountService<AR, VM>
where
    AR: AccountRepository,
    VM: VerificationMailer,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `mailer` - Verification email delivery implementation
    /// * `token_service` - Identity token issuer/validator
    /// * `public_url` - Externally reachable base URL used to build verification links
    pub fn new(
        repository: Arc<AR>,
        mailer: Arc<VM>,
        token_service: Arc<TokenService>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            mailer,
            token_service,
            password_hasher: PasswordHasher::new(),
            public_url: public_url.into(),
        }
    }

    /// Replace the password hasher (used to lower the work factor in tests).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/verify?token={}",
            self.public_url.trim_end_matches('/'),
            token
        )
    }
}

#[async_trait]
impl<AR, VM> AccountServicePort for AccountService<AR, VM>
where
    AR: AccountRepository,
    VM: VerificationMailer,
{
    async fn signup(&self, command: SignupCommand) -> Result<Account, AccountError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            tracing::info!(email = %command.email, "Signup rejected, email already registered");
            return Err(AccountError::AccountExists {
                email: command.email.to_string(),
            });
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let account = self
            .repository
            .create(NewAccount {
                name: command.name,
                email: command.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AccountError::DuplicateEmail { email } => {
                    tracing::info!(email = %email, "Signup lost creation race for email");
                    AccountError::AccountExists { email }
                }
                other => other,
            })?;

        let token = self
            .token_service
            .issue(account.id, account.email.as_str())?;
        let link = self.verification_link(&token);

        // The account stays stored unverified when delivery fails
        self.mailer
            .send_verification_email(&account.email, &account.name, &link)
            .await
            .map_err(|e| {
                tracing::error!(
                    account_id = %account.id,
                    email = %account.email,
                    error = %e,
                    "Failed to send verification email"
                );
                AccountError::SignupFailed(e)
            })?;

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            "Account created, verification email sent"
        );

        Ok(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let Some(account) = self.repository.find_by_email(&command.email).await? else {
            let _ = self
                .password_hasher
                .verify(&command.password, DUMMY_PASSWORD_HASH);
            return Err(AccountError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(&command.password, &account.password_hash)?
        {
            return Err(AccountError::InvalidCredentials);
        }

        if !account.verified {
            tracing::info!(account_id = %account.id, "Login refused, email not verified");
            return Err(AccountError::EmailNotVerified);
        }

        let token = self
            .token_service
            .issue(account.id, account.email.as_str())?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(LoginOutcome { token, account })
    }

    async fn verify_email(&self, token: &str) -> Result<VerificationOutcome, AccountError> {
        let claims = self.token_service.validate(token).map_err(|e| {
            tracing::warn!(error = %e, "Verification token rejected");
            AccountError::InvalidOrExpiredToken(e.to_string())
        })?;

        let id = AccountId::from_string(&claims.id)
            .map_err(|e| AccountError::InvalidOrExpiredToken(e.to_string()))?;

        let mut account = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(AccountError::AccountNotFound(id.to_string()))?;

        if !account.mark_verified() {
            tracing::debug!(account_id = %id, "Account already verified");
            return Ok(VerificationOutcome::AlreadyVerified);
        }

        self.repository.save(account).await?;
        tracing::info!(account_id = %id, "Email verified");

        Ok(VerificationOutcome::Verified)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::AccountNotFound(id.to_string()))
    }
}
