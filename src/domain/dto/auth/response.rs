use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::models::token::TokenPair;

/// 토큰 발급 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// 항상 `"bearer"`
    pub token_type: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_string(),
            expires_in: pair.expires_in,
        }
    }
}
