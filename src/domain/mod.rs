//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 저장되는 엔티티와 API 경계의 DTO,
//! 요청 단위 모델을 담고 있습니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서 (User, Permission, Plan) 와 ApiEndpoint
//! ├── dto       - 요청/응답 구조체 (validator + utoipa 스키마)
//! └── models    - 인증 사용자, 인증 모드, JWT 클레임
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 의존 관계 규칙
//!
//! ```text
//! Plan.apilimit ──참조──▶ Permission._id
//! User.subscribed_plan_id ──참조──▶ Plan._id
//! User.current_api_usage ──키──▶ Permission._id
//! ```
//!
//! 참조되는 쪽(권한, 플랜)은 참조가 사라지기 전까지 수정하거나 삭제할 수 없습니다.
//!
//! ## 예제
//!
//! ```rust,ignore
//! use acsams::domain::{ApiEndpoint, Permission};
//!
//! let permission = Permission::new("Random 1".to_string(), ApiEndpoint::Random1, None);
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
