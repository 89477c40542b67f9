//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 구조체입니다.
//! 요청 DTO는 `validator`로 검증하고, 모든 DTO는 OpenAPI 스키마(`utoipa::ToSchema`)를 가집니다.
//! 응답 DTO에는 비밀번호 해시가 절대 포함되지 않습니다.

pub mod auth;
pub mod permissions;
pub mod plans;
pub mod subscriptions;
pub mod users;
