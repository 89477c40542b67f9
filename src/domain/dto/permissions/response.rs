use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::endpoint::ApiEndpoint;
use crate::domain::entities::permissions::permission::Permission;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionResponse {
    pub id: String,
    pub name: String,
    pub endpoint: ApiEndpoint,
    pub description: Option<String>,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: permission.name,
            endpoint: permission.endpoint,
            description: permission.description,
        }
    }
}
