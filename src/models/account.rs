//! Account domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored account record
///
/// Deliberately not `Serialize`: the password hash and session token must
/// leave the service only through [`AccountResponse`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub lastname: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,

    // Session state, always written together through SessionState
    pub is_logged_in: bool,
    pub current_token: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Whether `token` is the session this account currently holds.
    pub fn holds_session(&self, token: &str) -> bool {
        self.is_logged_in && !token.is_empty() && self.current_token.as_deref() == Some(token)
    }
}

/// Fields required to create an account
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub role: Role,
}

/// Session half of an account; `token` and `is_logged_in` can only change as a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Active(String),
    Cleared,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Active(token) => Some(token),
            SessionState::Cleared => None,
        }
    }
}

/// Account response (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub role: Role,
    pub is_logged_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            name: account.name,
            lastname: account.lastname,
            role: account.role,
            is_logged_in: account.is_logged_in,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
