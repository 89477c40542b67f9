//! 캐싱 계층 모듈
//!
//! Redis 연결 래퍼를 제공합니다. 리프레시 토큰 레지스트리
//! ([`crate::repositories::tokens::RedisRefreshTokenStore`])가 TTL 키 저장소로 사용합니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
