//! 선택적 JSON 본문 파싱
//!
//! 본문이 없으면 `None`, 있으면 JSON으로 해석하고 실패 시 400을 반환합니다.
use actix_web::web;
use serde::de::DeserializeOwned;

use crate::core::errors::AppError;

/// 비어 있지 않은 본문만 JSON으로 해석합니다.
pub fn optional_json<T: DeserializeOwned>(body: &web::Bytes) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::ValidationError(format!("Invalid JSON body: {}", e)))
}
