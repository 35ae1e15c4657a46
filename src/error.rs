//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 认证失败的具体原因
///
/// 对外只暴露这三种固定消息，不透露是哪一步校验失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// 邮箱不存在或密码错误
    InvalidCredentials,
    /// 请求未携带令牌
    TokenRequired,
    /// 令牌无效、过期、格式错误或会话已失效
    Unauthorized,
}

impl AuthFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "invalid credentials",
            AuthFailure::TokenRequired => "token required",
            AuthFailure::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Account already exists")]
    DuplicateAccount,

    #[error("Authentication failed: {0}")]
    Authentication(AuthFailure),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateAccount => StatusCode::CONFLICT,
            AppError::Authentication(_) | AppError::SessionNotFound => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::DuplicateAccount => "Account already exists".to_string(),
            AppError::Authentication(reason) => reason.to_string(),
            AppError::SessionNotFound => "session not found".to_string(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    pub fn unauthorized() -> Self {
        AppError::Authentication(AuthFailure::Unauthorized)
    }
}

/// 错误响应 DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
                request_id,
            },
        };

        // 内部错误只记录在服务端
        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Application error"
            );
        } else {
            tracing::warn!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        (status, Json(error_response)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Validation("test".to_string()).code(), 400);
        assert_eq!(AppError::DuplicateAccount.code(), 409);
        assert_eq!(AppError::unauthorized().code(), 401);
        assert_eq!(AppError::SessionNotFound.code(), 401);
        assert_eq!(AppError::Internal("boom".to_string()).code(), 500);
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let message = error.user_message();
        assert_eq!(message, "Internal server error");
        assert!(!message.contains("sqlx"));

        let error = AppError::Internal("argon2 params rejected".to_string());
        assert_eq!(error.user_message(), "Internal server error");
    }

    #[test]
    fn test_auth_failure_messages() {
        assert_eq!(
            AppError::Authentication(AuthFailure::TokenRequired).user_message(),
            "token required"
        );
        assert_eq!(AppError::unauthorized().user_message(), "unauthorized");
        assert_eq!(
            AppError::Authentication(AuthFailure::InvalidCredentials).user_message(),
            "invalid credentials"
        );
    }
}
