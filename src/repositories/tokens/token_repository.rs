use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, AppResult};
use crate::repositories::RefreshTokenStore;

const KEY_PREFIX: &str = "refresh_token";

/// 토큰 원문의 SHA-256 해시 (hex)
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Redis 키 `refresh_token:{hash}`
pub fn refresh_token_key(token: &str) -> String {
    format!("{}:{}", KEY_PREFIX, hash_token(token))
}

/// Redis 기반 리프레시 토큰 레지스트리
#[derive(Clone)]
pub struct RedisRefreshTokenStore {
    redis: RedisClient,
}

impl RedisRefreshTokenStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    async fn store(&self, token: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Err(AppError::InternalError("TTL cannot be zero".to_string()));
        }

        self.redis
            .set_with_expiry(&refresh_token_key(token), "1", ttl_seconds)
            .await?;

        log::debug!("Refresh token 저장 완료 - ttl: {}초", ttl_seconds);
        Ok(())
    }

    async fn consume(&self, token: &str) -> AppResult<bool> {
        self.redis.delete(&refresh_token_key(token)).await
    }
}
