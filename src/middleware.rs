//! HTTP 中间件与应用状态
//! 请求追踪、指标记录

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    auth::{PasswordHasher, SessionGuard, TokenIssuer},
    config::AppConfig,
    error::AppError,
    repository::CredentialStore,
    services::AuthService,
};

/// 应用状态
///
/// 服务都用 Arc 包装，请求之间共享同一实例，Clone 只是指针拷贝。
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub auth_service: Arc<AuthService>,
    pub session_guard: Arc<SessionGuard>,
}

impl AppState {
    /// 根据配置构建所有服务，签名密钥或哈希参数无效时直接失败
    pub fn new(config: &AppConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenIssuer::from_config(config)?);
        let hasher = Arc::new(PasswordHasher::new(config.security.password_hash_cost)?);

        let auth_service = Arc::new(AuthService::new(store.clone(), hasher, tokens.clone()));
        let session_guard = Arc::new(SessionGuard::new(store.clone(), tokens));

        Ok(Self {
            store,
            auth_service,
            session_guard,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        metrics::counter!(
            "http_requests_total",
            "method" => method.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中添加 trace_id
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
