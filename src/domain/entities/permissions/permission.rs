//! Permission Entity
//!
//! 권한 하나는 클라우드 엔드포인트 하나에 대한 접근을 나타냅니다.
//! 같은 엔드포인트를 가진 권한은 둘 이상 존재할 수 없습니다.

use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::endpoint::ApiEndpoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub endpoint: ApiEndpoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    pub fn new(name: String, endpoint: ApiEndpoint, description: Option<String>) -> Self {
        Self {
            id: None,
            name,
            endpoint,
            description,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 변경 사항을 적용합니다. `None`인 필드는 그대로 둡니다.
    pub fn apply(&mut self, changes: &PermissionChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(endpoint) = changes.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
    }
}

/// 권한 부분 수정
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionChanges {
    pub name: Option<String>,
    pub endpoint: Option<ApiEndpoint>,
    pub description: Option<String>,
}

impl PermissionChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.endpoint.is_none() && self.description.is_none()
    }

    /// MongoDB `$set` 문서
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(endpoint) = self.endpoint {
            set.insert("endpoint", endpoint.path());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        set
    }
}
