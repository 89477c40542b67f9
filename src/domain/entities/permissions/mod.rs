//! 권한 엔티티 모듈

pub mod permission;
