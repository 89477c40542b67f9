//! 플랜 관리 서비스
//!
//! 플랜의 `apilimit`은 비어 있을 수 없고, 모든 키는 존재하는 권한 id여야 합니다.

pub mod plan_service;

pub use plan_service::*;
