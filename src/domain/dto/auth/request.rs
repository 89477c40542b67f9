use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// 로그인 폼 (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// 토큰 갱신/로그아웃 요청 본문
///
/// `Authorization: Bearer <refresh_token>` 헤더 대신 사용할 수 있습니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}
