//! 인증 및 보안 서비스 모듈
//!
//! JWT 토큰 발급/검증과 로그인, 토큰 회전, 로그아웃을 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256/384/512 토큰 서명
//! - 토큰 종류(`access`/`refresh`) 검증
//! - 리프레시 토큰 1회 사용 (Redis `DEL` 결과로 판정)
//!
//! # Examples
//!
//! ```rust,ignore
//! let pair = state.auth.login("alice", "secret").await?;
//! let user = state.auth.current_user(&pair.access_token).await?;
//! let rotated = state.auth.refresh(&pair.refresh_token).await?;
//! ```

pub mod auth_service;
pub mod token_service;

pub use auth_service::*;
pub use token_service::*;
