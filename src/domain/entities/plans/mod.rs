//! 플랜 엔티티 모듈

pub mod plan;
