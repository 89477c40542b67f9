//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응되는 도메인 엔티티들입니다.
//!
//! ```text
//! users        ← users::User        (역할, 구독 플랜, 엔드포인트별 사용량)
//! permissions  ← permissions::Permission (클라우드 엔드포인트 하나에 대한 권한)
//! plans        ← plans::Plan        (권한 id → 호출 한도)
//! ```
//!
//! 권한과 플랜, 사용자 사이에는 의존 관계가 있습니다.
//! 플랜이 참조하는 권한, 사용자가 구독 중인 플랜은 수정하거나 삭제할 수 없습니다.
//!
//! 모든 엔티티는 다음 특징을 가집니다:
//! - **ObjectId 지원**: MongoDB의 `_id` 필드와 매핑 (저장 전에는 `None`)
//! - **문자열 참조**: 다른 문서는 ObjectId의 hex 문자열로 참조

pub mod endpoint;
pub mod permissions;
pub mod plans;
pub mod users;

pub use endpoint::ApiEndpoint;
pub use permissions::permission::{Permission, PermissionChanges};
pub use plans::plan::{Plan, PlanChanges, UsageMap};
pub use users::user::{Role, User};
