use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::entities::plans::plan::{PlanChanges, UsageMap};
use crate::utils::string_utils::deserialize_optional_string;

/// 플랜 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    /// 권한 id → API 호출 한도
    #[schema(value_type = std::collections::HashMap<String, i64>)]
    pub apilimit: UsageMap,
}

/// 플랜 부분 수정 요청. `null`이거나 빠진 필드는 바꾸지 않습니다.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    #[schema(value_type = Option<std::collections::HashMap<String, i64>>)]
    pub apilimit: Option<UsageMap>,
}

impl From<UpdatePlanRequest> for PlanChanges {
    fn from(request: UpdatePlanRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            apilimit: request.apilimit,
        }
    }
}
