//! 会话绑定的认证中间件
//!
//! 令牌除了签名有效，还必须是账户当前保存的会话令牌。重新登录或登出之后，
//! 旧令牌即使尚未过期也会被拒绝。

use crate::{
    auth::jwt::TokenIssuer,
    error::{AppError, AuthFailure},
    models::account::Account,
    repository::CredentialStore,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 通过 SessionGuard 的账户（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}

/// 从 Authorization 头提取 Bearer 令牌（认证方案不区分大小写）
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

pub struct SessionGuard {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenIssuer>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self { store, tokens }
    }

    /// 校验请求头中的令牌并解析出账户
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Account, AppError> {
        let token = extract_token(headers)
            .ok_or(AppError::Authentication(AuthFailure::TokenRequired))?;

        // 签名、过期、格式错误统一返回 unauthorized
        let claims = self.tokens.verify(&token).map_err(|e| {
            tracing::debug!(reason = %e, "Session token rejected");
            AppError::from(e)
        })?;
        let account_id = claims.account_id()?;

        let account = self
            .store
            .find_by_id(account_id)
            .await?
            .filter(|account| account.holds_session(&token))
            .ok_or_else(|| {
                tracing::debug!(%account_id, "Token does not match a live session");
                AppError::unauthorized()
            })?;

        Ok(account)
    }
}

/// SessionGuard 中间件 - 必须认证
pub async fn session_guard_middleware(
    State(guard): State<Arc<SessionGuard>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let account = guard.authorize(req.headers()).await.map_err(|e| {
        if matches!(e, AppError::Authentication(_)) {
            metrics::counter!("session_guard_rejections_total").increment(1);
        }
        e
    })?;

    req.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        assert_eq!(extract_token(&headers).as_deref(), Some("test_token_123"));
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_none());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "InvalidFormat".parse().unwrap());
        assert!(extract_token(&headers).is_none());

        headers.insert("authorization", "Bearer ".parse().unwrap());
        assert!(extract_token(&headers).is_none());

        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(extract_token(&headers).is_none());
    }

    #[test]
    fn test_extract_token_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();

        for value in ["bearer abc", "BEARER abc", "Bearer   abc  "] {
            headers.insert("authorization", value.parse().unwrap());
            assert_eq!(extract_token(&headers).as_deref(), Some("abc"), "{value:?}");
        }
    }
}
