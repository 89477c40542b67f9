//! 클라우드 엔드포인트(`/random1` ~ `/random6`) 접근 제어
//!
//! 사용자의 구독 플랜에 엔드포인트 권한이 있는지 확인하고, 호출마다 사용량을 1 증가시킵니다.

pub mod access_service;

pub use access_service::*;
