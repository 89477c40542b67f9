//! 리프레시 토큰 레지스트리 (Redis)
//!
//! 발급된 리프레시 토큰을 TTL 키로 저장합니다. 토큰 원문 대신 SHA-256 해시를 키로 씁니다.
//!
//! ```text
//! refresh_token:{sha256(token) hex} = "1"  (TTL = 리프레시 토큰 수명)
//! ```

pub mod token_repository;

pub use token_repository::*;
