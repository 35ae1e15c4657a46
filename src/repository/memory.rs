//! In-process credential store
//!
//! Same uniqueness and session semantics as the Postgres repository. Backs the
//! test-suite and local runs without a database.

use crate::{
    error::AppError,
    models::account::{Account, AccountDraft, SessionState},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, HealthStatus};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Account>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }

        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.current_token.as_deref() == Some(token))
            .cloned())
    }

    async fn insert(&self, draft: AccountDraft) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;

        // 检查与插入在同一把写锁内完成
        if accounts
            .values()
            .any(|a| a.email == draft.email || a.username == draft.username)
        {
            return Err(AppError::DuplicateAccount);
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            username: draft.username,
            email: draft.email,
            password_hash: draft.password_hash,
            name: draft.name,
            lastname: draft.lastname,
            role: draft.role,
            is_logged_in: false,
            current_token: None,
            created_at: now,
            updated_at: now,
        };

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn set_session(&self, id: Uuid, session: SessionState) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or(AppError::SessionNotFound)?;

        account.is_logged_in = session.is_logged_in();
        account.current_token = session.token().map(str::to_string);
        account.updated_at = Utc::now();

        Ok(account.clone())
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
