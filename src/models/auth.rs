//! Authentication-related models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::account::{AccountResponse, Role};

/// Optional display attributes accepted at registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub lastname: Option<String>,
}

/// Register request
///
/// Every field is optional at the wire level so that missing values surface
/// as a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email address is invalid."))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login result: the account plus the freshly issued bearer token
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub account: AccountResponse,
    pub token: String,
}

/// Standard success envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Identity returned by the look-up endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub role: Role,
    pub email: String,
}

impl From<AccountResponse> for LookupResponse {
    fn from(account: AccountResponse) -> Self {
        Self {
            name: account.name,
            lastname: account.lastname,
            role: account.role,
            email: account.email,
        }
    }
}
