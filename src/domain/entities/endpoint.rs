//! 클라우드 서비스 엔드포인트
//!
//! 권한 하나는 정확히 하나의 엔드포인트에 대한 접근을 부여합니다.
//! 엔드포인트 목록은 고정되어 있으며 경로 문자열(`/random1`)로 직렬화됩니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::AppError;

/// 사용량 제한 대상 클라우드 엔드포인트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum ApiEndpoint {
    #[serde(rename = "/random1")]
    Random1,
    #[serde(rename = "/random2")]
    Random2,
    #[serde(rename = "/random3")]
    Random3,
    #[serde(rename = "/random4")]
    Random4,
    #[serde(rename = "/random5")]
    Random5,
    #[serde(rename = "/random6")]
    Random6,
}

impl ApiEndpoint {
    pub const ALL: [ApiEndpoint; 6] = [
        ApiEndpoint::Random1,
        ApiEndpoint::Random2,
        ApiEndpoint::Random3,
        ApiEndpoint::Random4,
        ApiEndpoint::Random5,
        ApiEndpoint::Random6,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ApiEndpoint::Random1 => "/random1",
            ApiEndpoint::Random2 => "/random2",
            ApiEndpoint::Random3 => "/random3",
            ApiEndpoint::Random4 => "/random4",
            ApiEndpoint::Random5 => "/random5",
            ApiEndpoint::Random6 => "/random6",
        }
    }

    /// 엔드포인트 번호 (1-6)
    pub fn number(&self) -> u8 {
        match self {
            ApiEndpoint::Random1 => 1,
            ApiEndpoint::Random2 => 2,
            ApiEndpoint::Random3 => 3,
            ApiEndpoint::Random4 => 4,
            ApiEndpoint::Random5 => 5,
            ApiEndpoint::Random6 => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.number() == number)
    }

    /// 요청 경로에서 엔드포인트를 찾습니다. 끝의 `/`는 무시합니다.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|endpoint| endpoint.path() == trimmed)
    }

    /// 엔드포인트 호출 결과 본문
    pub fn result_text(&self) -> String {
        format!("Random {}", self.number())
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ApiEndpoint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s.trim())
            .ok_or_else(|| AppError::ValidationError(format!("Unknown endpoint: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(ApiEndpoint::from_path("/random3"), Some(ApiEndpoint::Random3));
        assert_eq!(ApiEndpoint::from_path("/random6/"), Some(ApiEndpoint::Random6));
        assert_eq!(ApiEndpoint::from_path("/random7"), None);
        assert_eq!(ApiEndpoint::from_path("random1"), None);
    }

    #[test]
    fn test_serializes_as_path() {
        let json = serde_json::to_string(&ApiEndpoint::Random2).unwrap();
        assert_eq!(json, "\"/random2\"");

        let parsed: ApiEndpoint = serde_json::from_str("\"/random5\"").unwrap();
        assert_eq!(parsed, ApiEndpoint::Random5);
    }

    #[test]
    fn test_result_text() {
        assert_eq!(ApiEndpoint::Random4.result_text(), "Random 4");
    }

    #[test]
    fn test_parse_unknown_is_validation_error() {
        assert!(matches!(
            "/admin".parse::<ApiEndpoint>(),
            Err(AppError::ValidationError(_))
        ));
    }
}
