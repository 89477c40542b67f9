//! 공개 엔드포인트와 관리자 전용 데모 데이터
//!
//! - `GET /health` - 헬스체크
//! - `GET /hello`, `GET /data` - 인증 불필요
//! - `GET /realdata` - admin 역할 필요

use actix_web::{HttpResponse, get};
use serde_json::json;

use crate::domain::entities::Role;
use crate::middlewares::AuthMiddleware;

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// ```bash
/// curl http://localhost:8000/health
/// ```
#[utoipa::path(get, path = "/health", tag = "general", responses((status = 200, description = "Service is healthy")))]
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "acsams",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[utoipa::path(get, path = "/hello", tag = "general", responses((status = 200, body = String)))]
#[get("/hello")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json("Hello World")
}

#[utoipa::path(get, path = "/data", tag = "general", responses((status = 200, description = "Public data")))]
#[get("/data")]
pub async fn data() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "data": "This is important data" }))
}

/// 관리자만 볼 수 있는 데이터
#[utoipa::path(
    get,
    path = "/realdata",
    tag = "general",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin only data"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "You don't have enough permissions"),
    )
)]
#[get("/realdata", wrap = "AuthMiddleware::required_with_role(Role::Admin)")]
pub async fn real_data() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "data": "This is REALLY important data" }))
}
