//! Authentication HTTP Handlers
//!
//! 로그인, 토큰 회전, 로그아웃 엔드포인트입니다.
//!
//! - `POST /token` - 폼(`username`, `password`)으로 로그인
//! - `POST /refresh` - 리프레시 토큰으로 새 토큰 쌍 발급 (이전 토큰은 폐기)
//! - `POST /logout` - 리프레시 토큰 폐기
//!
//! 리프레시 토큰은 `Authorization: Bearer <refresh_token>` 헤더 또는
//! JSON 본문 `{"refresh_token": "..."}`으로 전달합니다. 헤더가 우선합니다.
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, post, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::auth::{LoginForm, RefreshTokenRequest, TokenResponse};
use crate::handlers::body::optional_json;

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /token` (`application/x-www-form-urlencoded`)
#[utoipa::path(
    post,
    path = "/token",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = TokenResponse),
        (status = 400, description = "Incorrect username or password"),
    )
)]
#[post("/token")]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    form.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = state.auth.login(&form.username, &form.password).await?;

    log::info!("로그인 성공: {}", form.username);
    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

/// 토큰 갱신 핸들러
///
/// 사용한 리프레시 토큰은 즉시 폐기되므로 같은 토큰으로 두 번 갱신할 수 없습니다.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "auth",
    request_body(content = RefreshTokenRequest, description = "Used when no Bearer header is sent", content_type = "application/json"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = TokenResponse),
        (status = 401, description = "Invalid, expired or revoked refresh token"),
    )
)]
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let refresh_token = refresh_token_from(&req, &state, &body)?;
    let pair = state.auth.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

/// 로그아웃 핸들러
///
/// 이미 폐기된 토큰이어도 204를 반환합니다.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    request_body(content = RefreshTokenRequest, description = "Used when no Bearer header is sent", content_type = "application/json"),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Refresh token revoked"),
        (status = 401, description = "Invalid refresh token"),
    )
)]
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let refresh_token = refresh_token_from(&req, &state, &body)?;
    state.auth.logout(&refresh_token).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 헤더 또는 본문에서 리프레시 토큰을 꺼냅니다.
fn refresh_token_from(
    req: &HttpRequest,
    state: &AppState,
    body: &web::Bytes,
) -> Result<String, AppError> {
    if let Some(auth_header) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        let token = state.auth.token_service().extract_bearer_token(auth_header)?;
        return Ok(token.to_string());
    }

    match optional_json::<RefreshTokenRequest>(body)? {
        Some(body) => {
            body.validate()
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            Ok(body.refresh_token)
        }
        None => Err(AppError::AuthenticationError("Not authenticated".to_string())),
    }
}
