//! # Core Module
//!
//! - [`errors`] - 전역 에러 타입 [`AppError`]와 HTTP 응답 매핑
//! - [`state`] - 서비스 묶음 [`state::AppState`]

pub mod errors;
pub mod state;

pub use errors::*;
