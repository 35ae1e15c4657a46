//! Account repository (数据库访问层)

use crate::{
    error::AppError,
    models::account::{Account, AccountDraft, SessionState},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CredentialStore, HealthStatus};

pub struct AccountRepository {
    db: PgPool,
}

impl AccountRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// 唯一约束冲突映射为 DuplicateAccount
fn map_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::debug!(
                constraint = db_err.constraint().unwrap_or("unknown"),
                "Account insert hit unique constraint"
            );
            AppError::DuplicateAccount
        }
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl CredentialStore for AccountRepository {
    /// 根据邮箱查找账户
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(account)
    }

    /// 根据 ID 查找账户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(account)
    }

    /// 根据当前会话令牌查找账户
    async fn find_by_token(&self, token: &str) -> Result<Option<Account>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }

        let account =
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE current_token = $1 LIMIT 1")
                .bind(token)
                .fetch_optional(&self.db)
                .await?;

        Ok(account)
    }

    /// 创建账户
    async fn insert(&self, draft: AccountDraft) -> Result<Account, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, name, lastname, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.username)
        .bind(&draft.email)
        .bind(&draft.password_hash)
        .bind(&draft.name)
        .bind(&draft.lastname)
        .bind(draft.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)?;

        Ok(account)
    }

    /// 更新会话状态（令牌与登录标记同时写入）
    async fn set_session(&self, id: Uuid, session: SessionState) -> Result<Account, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET
                current_token = $2,
                is_logged_in = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(session.token())
        .bind(session.is_logged_in())
        .fetch_optional(&self.db)
        .await?;

        account.ok_or(AppError::SessionNotFound)
    }

    /// 探测连接并上报连接池用量
    async fn health_check(&self) -> HealthStatus {
        metrics::gauge!("db_pool_connections").set(self.db.size() as f64);
        metrics::gauge!("db_pool_idle_connections").set(self.db.num_idle() as f64);

        match sqlx::query("SELECT 1").execute(&self.db).await {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Account database probe failed");
                HealthStatus::Unhealthy(e.to_string())
            }
        }
    }
}
