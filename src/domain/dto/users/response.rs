use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::plans::plan::UsageMap;
use crate::domain::entities::users::user::{Role, User};

/// 사용자 응답 DTO (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub subscribed_plan_id: Option<String>,
    #[schema(value_type = std::collections::HashMap<String, i64>)]
    pub current_api_usage: UsageMap,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            role,
            subscribed_plan_id,
            current_api_usage,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            role,
            subscribed_plan_id,
            current_api_usage,
        }
    }
}

/// 시드 가져오기 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub inserted: usize,
    /// 이미 같은 username이 있어 건너뛴 레코드 수
    pub skipped: usize,
}
