//! Plan Entity
//!
//! 플랜은 권한 id와 해당 권한의 API 호출 한도를 묶은 구독 단위입니다.

use std::collections::BTreeMap;

use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 권한 id (hex) → 정수 값 (플랜에서는 한도, 사용자에게서는 사용량)
pub type UsageMap = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 권한 id → 호출 한도
    pub apilimit: UsageMap,
}

impl Plan {
    pub fn new(name: String, description: Option<String>, apilimit: UsageMap) -> Self {
        Self {
            id: None,
            name,
            description,
            apilimit,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 권한별 한도
    pub fn limit_for(&self, permission_id: &str) -> Option<i64> {
        self.apilimit.get(permission_id).copied()
    }

    /// 새로 구독할 때의 사용량 맵 (모든 권한 0)
    pub fn fresh_usage(&self) -> UsageMap {
        self.apilimit.keys().map(|id| (id.clone(), 0)).collect()
    }

    pub fn apply(&mut self, changes: &PlanChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
        if let Some(apilimit) = &changes.apilimit {
            self.apilimit = apilimit.clone();
        }
    }
}

/// 플랜 부분 수정
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub apilimit: Option<UsageMap>,
}

impl PlanChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.apilimit.is_none()
    }

    /// MongoDB `$set` 문서
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        if let Some(apilimit) = &self.apilimit {
            set.insert("apilimit", usage_document(apilimit));
        }
        set
    }
}

/// 사용량/한도 맵을 BSON 문서로 변환합니다.
pub fn usage_document(map: &UsageMap) -> Document {
    map.iter()
        .map(|(id, value)| (id.clone(), Bson::Int64(*value)))
        .collect()
}
