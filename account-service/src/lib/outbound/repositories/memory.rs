use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::NewAccount;
use crate::account::ports::AccountRepository;

/// Process-local account store.
///
/// Backs tests and local runs without PostgreSQL. The email uniqueness check and
/// the insert happen under the same write lock.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::DuplicateEmail {
                email: account.email.to_string(),
            });
        }

        let created = Account {
            id: AccountId::new(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            verified: false,
            created_at: Utc::now(),
        };
        accounts.insert(created.id, created.clone());

        Ok(created)
    }

    async fn save(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        let stored = accounts
            .get_mut(&account.id)
            .ok_or(AccountError::AccountNotFound(account.id.to_string()))?;
        stored.verified |= account.verified;

        Ok(stored.clone())
    }
}
