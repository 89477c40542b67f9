//! 권한(Permission) 관리 서비스

pub mod permission_service;

pub use permission_service::*;
