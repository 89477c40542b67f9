//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증/정리, ObjectId 파싱
//! - [`display_terminal`] - 시작 배너와 진행 단계 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{parse_object_id, validate_required_string};
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let oid = parse_object_id("65f1c2a9e4b0a1b2c3d4e5f6")?;
//! let name = validate_required_string("  basic  ", "name")?;
//!
//! print_boxed_title("ACSAMS Starting");
//! ```

pub mod string_utils;
pub mod display_terminal;
