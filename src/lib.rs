//! ACSAMS: 클라우드 서비스 접근 관리 시스템
//!
//! 구독 플랜 기반으로 클라우드 엔드포인트 호출을 허용하고 사용량을 제한하는
//! Rust 백엔드입니다.
//!
//! # Features
//!
//! - **RBAC**: `admin` / `user` 두 역할, 스코프 단위 JWT 인증 미들웨어
//! - **권한/플랜 관리**: 권한 하나는 엔드포인트 하나, 플랜은 권한별 호출 한도
//! - **구독**: 사용자는 플랜 하나를 구독하고 권한별 사용량을 가짐
//! - **호출 한도**: `/random1` … `/random6` 호출마다 원자적으로 사용량 증가
//! - **JWT 인증**: 액세스/리프레시 토큰, 리프레시 토큰 1회 사용(회전)
//! - **MongoDB**: 사용자, 권한, 플랜 저장
//! - **Redis**: 리프레시 토큰 저장
//! - **메모리 저장소**: 로컬 개발과 테스트용
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AppState)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 저장소 trait (MongoDB/Redis 또는 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use acsams::core::state::AppState;
//! use acsams::repositories::Repositories;
//!
//! let state = AppState::new(Repositories::in_memory(), jwt_settings);
//! let tokens = state.auth.login("admin", "admin").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
