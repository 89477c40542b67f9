use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::plans::plan::UsageMap;
use crate::domain::entities::users::user::Role;

/// 시드 파일(`sample/ACAMS.user.json`)의 사용자 레코드
///
/// `_id`, `subscribed_plan_id`는 hex 문자열 또는 MongoDB Extended JSON
/// (`{"$oid": "..."}`) 형식을 모두 받습니다.
/// 비밀번호는 평문(`password`) 또는 bcrypt 해시(`password_hash`) 중 하나가 있어야 합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUserRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<Value>,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub subscribed_plan_id: Option<Value>,
    #[serde(default)]
    pub current_api_usage: UsageMap,
}

impl SeedUserRecord {
    pub fn id_hex(&self) -> Option<String> {
        self.id.as_ref().and_then(object_id_hex)
    }

    pub fn subscribed_plan_hex(&self) -> Option<String> {
        self.subscribed_plan_id.as_ref().and_then(object_id_hex)
    }
}

/// `"hex"` 또는 `{"$oid": "hex"}`에서 hex 문자열을 꺼냅니다.
fn object_id_hex(value: &Value) -> Option<String> {
    match value {
        Value::String(hex) => Some(hex.clone()),
        Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
