//! JWT 인증 토큰 클레임과 토큰 쌍
//!
//! 액세스 토큰과 리프레시 토큰은 같은 클레임 구조를 쓰고 `token_type`으로 구분합니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::Role;

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 이름
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    pub token_type: TokenType,
    /// 토큰 고유 ID (uuid v4)
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 발급된 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
    /// 리프레시 토큰 수명 (초)
    pub refresh_expires_in: i64,
}
