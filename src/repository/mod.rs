//! Credential persistence layer
//!
//! [`CredentialStore`] is the seam between the auth core and storage. Each
//! operation is atomic with respect to a single account record; there is no
//! lock spanning the whole collection.

pub mod account_repo;
pub mod catalog;
pub mod memory;

pub use account_repo::AccountRepository;
pub use catalog::CatalogStore;
pub use memory::InMemoryCredentialStore;

use crate::{
    error::AppError,
    models::account::{Account, AccountDraft, SessionState},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Result of probing a store's backing service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// Account currently holding `token` as its session, if any.
    /// An empty token never matches.
    async fn find_by_token(&self, token: &str) -> Result<Option<Account>, AppError>;

    /// Fails with [`AppError::DuplicateAccount`] when email or username is taken.
    async fn insert(&self, draft: AccountDraft) -> Result<Account, AppError>;

    /// Overwrite the session pair of one account. Last write wins.
    async fn set_session(&self, id: Uuid, session: SessionState) -> Result<Account, AppError>;

    async fn health_check(&self) -> HealthStatus;
}
