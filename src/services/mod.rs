//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 저장소 trait 객체(`Arc<dyn ...Repository>`)만 알고 있으며,
//! [`crate::core::state::AppState`]에 묶여 `web::Data`로 핸들러에 주입됩니다.
//!
//! # Features
//!
//! - [`auth`] - 로그인, JWT 발급/검증, 토큰 회전, 로그아웃
//! - [`users`] - 사용자 조회, 시드 가져오기
//! - [`permissions`] - 권한 CRUD (플랜이 참조 중이면 잠김)
//! - [`plans`] - 플랜 CRUD (구독자가 있으면 잠김)
//! - [`subscriptions`] - 구독, 플랜 상세, 사용량 통계, 관리자 사용량 조정
//! - [`access`] - 엔드포인트 호출 시 권한/한도 검사
//!
//! # Examples
//!
//! ```rust,ignore
//! let state = AppState::new(Repositories::in_memory(), jwt_settings);
//! let plans = state.plans.list_plans().await?;
//! ```

pub mod access;
pub mod auth;
pub mod permissions;
pub mod plans;
pub mod subscriptions;
pub mod users;
