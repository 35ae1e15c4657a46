//! Session token issuance and verification
//! Compact HS256 tokens carrying the account identity and an expiry

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID, keeps two tokens issued in the same second distinct
    pub jti: String,
}

impl Claims {
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }
}

/// Why a token failed verification
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthorized()
    }
}

/// Token issuer
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenIssuer {
    /// Create issuer from a signing secret; an empty secret is a startup error
    pub fn new(secret: &Secret<String>, default_ttl: Duration) -> Result<Self, AppError> {
        let secret = secret.expose_secret();

        if secret.trim().is_empty() {
            return Err(AppError::Config("JWT secret must not be empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl,
        })
    }

    /// Create issuer from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            &config.security.jwt_secret,
            Duration::seconds(config.security.token_ttl_secs as i64),
        )
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for the account, valid for `ttl` from now
    pub fn issue(&self, account_id: Uuid, email: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + ttl;

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal(format!("Failed to encode session token: {}", e))
        })
    }

    /// Validate and decode token
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::ImmatureSignature => TokenError::Invalid,
                    _ => TokenError::Malformed,
                }
            })
    }
}
