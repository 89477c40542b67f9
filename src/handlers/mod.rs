//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 각 핸들러는
//! `web::Data<AppState>`에서 서비스를 꺼내 쓰고 `Result<HttpResponse, AppError>`를 반환합니다.
//!
//! ```text
//! Client ──HTTP──▶ routes ──▶ middlewares (JWT, 역할) ──▶ handlers ──▶ services ──▶ repositories
//! ```
//!
//! ## 모듈 구성
//!
//! - **`general`**: `/health`, `/hello`, `/data`, `/realdata`
//! - **`auth`**: `/token`, `/refresh`, `/logout`
//! - **`users`**: `/me`, `/admin/users/...`
//! - **`subscriptions`**: `/me/plan`, `/me/usage`, `/me/subscription/{plan_id}`
//! - **`permissions`**: `/admin/permissions/...`
//! - **`plans`**: `/plans/...`, `/admin/plans/...`
//! - **`services`**: `/random1` … `/random6`
//! - **`docs`**: `/openapi.json`, `/docs`
//!
//! 요청 DTO는 `validator`로 검증하고 실패하면 400을 반환합니다.
//!
//! ```rust,ignore
//! payload.validate()
//!     .map_err(|e| AppError::ValidationError(e.to_string()))?;
//! ```

pub mod auth;
mod body;
pub mod docs;
pub mod general;
pub mod permissions;
pub mod plans;
pub mod services;
pub mod subscriptions;
pub mod users;
