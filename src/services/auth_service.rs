//! 认证服务：注册、登录、登出、当前账户查询

use crate::{
    auth::{jwt::TokenIssuer, password::PasswordHasher},
    error::{AppError, AuthFailure},
    models::{
        account::{AccountDraft, AccountResponse, Role, SessionState},
        auth::{LoginRequest, LoginResult, RegisterRequest},
    },
    repository::CredentialStore,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// 注册账户
    pub async fn register(&self, req: RegisterRequest) -> Result<AccountResponse, AppError> {
        let email = required(req.email.as_deref());
        let password = required(req.password.as_deref());
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AppError::Validation("Email and password are required.".to_string()));
        };

        req.validate()
            .map_err(|_| AppError::Validation("Email address is invalid.".to_string()))?;

        if self.store.find_by_email(email).await?.is_some() {
            tracing::warn!("Registration rejected: email already registered");
            return Err(AppError::DuplicateAccount);
        }

        let password_hash = self.hash_password(password.to_string()).await?;

        // 未提供用户名时使用邮箱
        let username = required(req.username.as_deref()).unwrap_or(email);

        let draft = AccountDraft {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            name: req.profile.name,
            lastname: req.profile.lastname,
            role: Role::User,
        };

        let account = self.store.insert(draft).await.map_err(|e| log_failure("register", e))?;

        metrics::counter!("auth_register_total").increment(1);
        tracing::info!(account_id = %account.id, "Account registered");

        Ok(AccountResponse::from(account))
    }

    /// 账户登录，新令牌会覆盖此前的会话
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResult, AppError> {
        let (Some(email), Some(password)) =
            (required(req.email.as_deref()), required(req.password.as_deref()))
        else {
            return Err(AppError::Validation("Email and password are required.".to_string()));
        };

        // 账户不存在与密码错误返回同一个错误
        let Some(account) = self.store.find_by_email(email).await? else {
            return Err(reject_login());
        };

        if !self
            .verify_password(password.to_string(), account.password_hash.clone())
            .await?
        {
            return Err(reject_login());
        }

        let token = self
            .tokens
            .issue(account.id, &account.email, self.tokens.default_ttl())
            .map_err(|e| log_failure("login", e))?;

        let account = self
            .store
            .set_session(account.id, SessionState::Active(token.clone()))
            .await
            .map_err(|e| log_failure("login", e))?;

        metrics::counter!("auth_login_total", "outcome" => "success").increment(1);
        tracing::info!(account_id = %account.id, "Account logged in");

        Ok(LoginResult {
            account: AccountResponse::from(account),
            token,
        })
    }

    /// 登出：清除令牌所属账户的会话
    pub async fn logout(&self, token: Option<&str>) -> Result<AccountResponse, AppError> {
        let Some(token) = required(token) else {
            return Err(AppError::Validation("Token is required to log out.".to_string()));
        };

        let Some(account) = self.store.find_by_token(token).await? else {
            return Err(AppError::SessionNotFound);
        };

        let account = self
            .store
            .set_session(account.id, SessionState::Cleared)
            .await
            .map_err(|e| log_failure("logout", e))?;

        metrics::counter!("auth_logout_total").increment(1);
        tracing::info!(account_id = %account.id, "Account logged out");

        Ok(AccountResponse::from(account))
    }

    /// 当前令牌对应的账户
    ///
    /// 查询失败与未认证都返回 None，调用方一律按未认证处理。
    pub async fn current_account(&self, token: &str) -> Option<AccountResponse> {
        match self.store.find_by_token(token).await {
            Ok(Some(account)) => Some(AccountResponse::from(account)),
            Ok(None) => {
                tracing::debug!("No account holds the presented token");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Current account lookup failed");
                None
            }
        }
    }

    /// 哈希计算在阻塞线程池中执行
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| log_failure("register", e))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| log_failure("login", e))
    }
}

/// 空字符串视为缺失
fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn reject_login() -> AppError {
    metrics::counter!("auth_login_total", "outcome" => "failure").increment(1);
    tracing::warn!("Login rejected: invalid credentials");
    AppError::Authentication(AuthFailure::InvalidCredentials)
}

fn log_failure(operation: &'static str, e: AppError) -> AppError {
    if e.status_code().is_server_error() {
        tracing::error!(operation, error = %e, "Auth operation failed");
    }
    e
}
