//! # 문자열 유틸리티
//!
//! 요청 값 정리와 ObjectId 파싱에 쓰는 공통 함수들입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Basic  ", "name").unwrap(), "Basic");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} must not be empty",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
///
/// ```text
/// {"description": "  Alice  "} → Some("Alice")
/// {"description": ""}          → None
/// {"description": null}        → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// hex 문자열을 ObjectId로 파싱합니다. 형식이 잘못되면 400입니다.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid id format: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            optional_field: Option<String>,
        }

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": "  Hello  "}"#).unwrap();
        assert_eq!(result.optional_field, Some("Hello".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": "  "}"#).unwrap();
        assert_eq!(result.optional_field, None);

        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.optional_field, None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();

        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(AppError::ValidationError(_))
        ));
    }
}
