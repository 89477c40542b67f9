//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 역할(RBAC), 구독 중인 플랜, 플랜 권한별 API 사용량을 함께 보관합니다.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::plans::plan::UsageMap;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 권한/플랜을 관리하고 사용자 플랜을 조정할 수 있습니다.
    Admin,
    /// 플랜을 구독하고 클라우드 엔드포인트를 호출합니다.
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자 엔티티
///
/// `current_api_usage`의 키는 구독 중인 플랜의 권한 id와 정확히 일치해야 합니다.
/// 예전 샘플 데이터처럼 `password` 필드에 평문이 들어 있는 문서도 읽을 수 있으며,
/// 이 경우 첫 로그인 때 bcrypt 해시로 교체됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 이름 (unique)
    pub username: String,
    /// bcrypt 해시
    #[serde(alias = "password")]
    pub password_hash: String,
    pub role: Role,
    /// 구독 중인 플랜 id (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed_plan_id: Option<String>,
    /// 권한 id (hex) → 현재까지의 호출 횟수
    #[serde(default)]
    pub current_api_usage: UsageMap,
}

impl User {
    pub fn new(username: String, password_hash: String, role: Role) -> Self {
        Self {
            id: None,
            username,
            password_hash,
            role,
            subscribed_plan_id: None,
            current_api_usage: UsageMap::new(),
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 플랜을 구독 중인지 확인
    ///
    /// 플랜 id가 있고 사용량 맵이 비어 있지 않아야 구독 상태로 봅니다.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed_plan_id.is_some() && !self.current_api_usage.is_empty()
    }

    /// 저장된 비밀번호가 bcrypt 해시 형식인지 확인
    pub fn has_hashed_password(&self) -> bool {
        is_bcrypt_hash(&self.password_hash)
    }
}

/// `$2a$`, `$2b$`, `$2x$`, `$2y$` 접두사를 가진 60자 문자열을 bcrypt 해시로 봅니다.
pub fn is_bcrypt_hash(value: &str) -> bool {
    value.len() == 60
        && ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| value.starts_with(prefix))
}
