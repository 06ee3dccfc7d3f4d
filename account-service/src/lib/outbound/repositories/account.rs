use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountName;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::ports::AccountRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRecord {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRecord> for Account {
    type Error = AccountError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(record.id),
            name: AccountName::new(record.name)?,
            email: EmailAddress::new(record.email)?,
            password_hash: record.password_hash,
            verified: record.verified,
            created_at: record.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, name, email, password_hash, verified, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .map(Account::try_from)
        .transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, name, email, password_hash, verified, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .map(Account::try_from)
        .transpose()
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            INSERT INTO accounts (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, verified, created_at
            "#,
        )
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AccountError::DuplicateEmail {
                        email: account.email.to_string(),
                    };
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Account::try_from(record)
    }

    async fn save(&self, account: Account) -> Result<Account, AccountError> {
        // Only the verification flag is mutable, and it never goes back to false
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            UPDATE accounts
            SET verified = accounts.verified OR $2
            WHERE id = $1
            RETURNING id, name, email, password_hash, verified, created_at
            "#,
        )
        .bind(account.id.0)
        .bind(account.verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?
        .ok_or(AccountError::AccountNotFound(account.id.to_string()))?;

        Account::try_from(record)
    }
}
