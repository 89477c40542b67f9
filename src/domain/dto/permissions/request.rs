use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::entities::endpoint::ApiEndpoint;
use crate::domain::entities::permissions::permission::PermissionChanges;
use crate::utils::string_utils::deserialize_optional_string;

/// 권한 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePermissionRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    /// `/random1` … `/random6`
    pub endpoint: ApiEndpoint,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// 권한 부분 수정 요청. `null`이거나 빠진 필드는 바꾸지 않습니다.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePermissionRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    pub endpoint: Option<ApiEndpoint>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl From<UpdatePermissionRequest> for PermissionChanges {
    fn from(request: UpdatePermissionRequest) -> Self {
        Self {
            name: request.name,
            endpoint: request.endpoint,
            description: request.description,
        }
    }
}
