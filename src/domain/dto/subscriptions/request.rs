use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::entities::plans::plan::UsageMap;

/// 관리자의 사용자 플랜/사용량 조정 요청
///
/// 경로의 플랜이 사용자의 현재 플랜과 같으면 `current_api_usage`로 사용량을 덮어씁니다.
/// 다르면 본문은 무시되고 사용자를 새 플랜에 구독시킵니다.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUsageRequest {
    #[serde(default)]
    #[schema(value_type = Option<std::collections::HashMap<String, i64>>)]
    pub current_api_usage: Option<UsageMap>,
}
