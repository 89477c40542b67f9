//! # Domain Models Module
//!
//! 영속성이 없는 도메인 모델과 값 객체입니다.
//!
//! - [`auth`] - 요청에 연결되는 인증 사용자, 인증 모드와 역할 요구사항
//! - [`token`] - JWT 클레임과 토큰 쌍

pub mod auth;
pub mod token;
