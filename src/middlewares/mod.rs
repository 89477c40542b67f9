//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 토큰의 사용자가 아직 존재하는지 확인
//! - 역할 검사 (실패 시 403 `You don't have enough permissions`)
//! - 사용자 정보를 request extension에 저장 ([`AuthenticatedUser`] 추출자로 사용)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::domain::entities::Role;
//!
//! App::new()
//!     .service(
//!         web::scope("/admin")
//!             .wrap(AuthMiddleware::required_with_role(Role::Admin))
//!             .route("/permissions", web::get().to(list_permissions))
//!     )
//! ```
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::AuthMiddleware;
