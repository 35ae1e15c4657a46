//! 认证相关的 HTTP 处理器

use crate::{
    auth::{extract_token, CurrentAccount},
    error::AppError,
    middleware::AppState,
    models::{
        account::AccountResponse,
        auth::{ApiResponse, LoginRequest, LookupResponse, RegisterRequest},
    },
};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};

use super::extract::JsonBody;
use std::sync::Arc;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.auth_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Account created successfully", account)),
    ))
}

/// 登录，令牌通过 Authorization 响应头返回
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.auth_service.login(req).await?;

    let bearer = HeaderValue::from_str(&format!("Bearer {}", result.token))
        .map_err(|e| AppError::Internal(format!("Token is not a valid header value: {}", e)))?;

    Ok((
        [(header::AUTHORIZATION, bearer)],
        Json(ApiResponse::new("Logged in successfully", result.account)),
    ))
}

/// 登出
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let token = extract_token(&headers);
    let account = state.auth_service.logout(token.as_deref()).await?;

    Ok(Json(ApiResponse::new("Logged out successfully", account)))
}

/// 获取当前账户信息（需通过 SessionGuard）
pub async fn look_up(
    State(state): State<Arc<AppState>>,
    CurrentAccount(_): CurrentAccount,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<LookupResponse>>, AppError> {
    let token = extract_token(&headers).ok_or_else(AppError::unauthorized)?;

    let account = state
        .auth_service
        .current_account(&token)
        .await
        .ok_or_else(AppError::unauthorized)?;

    Ok(Json(ApiResponse::new("Account details", LookupResponse::from(account))))
}
