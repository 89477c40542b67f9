//! # Application Error Handling System
//!
//! 접근 관리 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 모든 핸들러가 `Result<HttpResponse, AppError>`만 반환하면 되도록 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 구독 전제 조건 위반 |
//! | `AuthenticationError` | 401 Unauthorized | 토큰 없음/만료/위조, 로그인 실패 |
//! | `AuthorizationError` | 403 Forbidden | 역할 부족 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 중복 엔드포인트, 의존 관계로 잠긴 리소스 |
//! | `QuotaExceeded` | 429 Too Many Requests | 플랜의 호출 한도 초과 |
//! | `DatabaseError` | 500 | MongoDB 오류 |
//! | `RedisError` | 500 | Redis 오류 |
//! | `ConfigError` | 500 | 설정 누락/형식 오류 |
//! | `InternalError` | 500 | 예상치 못한 오류 |
//!
//! 응답 본문은 항상 다음 형식입니다.
//!
//! ```json
//! { "error": "Validation error: Plan needs at least one API limit" }
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    ///
    /// 잘못된 ObjectId, 빈 API 한도 목록, 구독하지 않은 사용자의 조회 등
    /// 클라이언트가 고쳐서 다시 보낼 수 있는 모든 요청 오류에 사용합니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌 에러 (409 Conflict)
    ///
    /// 같은 엔드포인트를 가진 권한이 이미 있거나, 플랜이 참조 중인 권한 /
    /// 사용자가 구독 중인 플랜을 수정·삭제하려는 경우입니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 플랜 호출 한도 초과 (429 Too Many Requests)
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// 설정 에러 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 401 응답에는 OAuth2 Bearer 규약대로 `WWW-Authenticate: Bearer` 헤더를 붙입니다.
    /// 5xx 에러는 서버 로그에 남깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        let mut builder = actix_web::HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }

        builder.json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let bytes = std::fs::read(path).context("Failed to read seed file")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
