//! # Repository Layer
//!
//! 데이터 접근 계층입니다. 서비스는 구체 타입이 아닌 trait 객체
//! (`Arc<dyn UserRepository>` 등)에만 의존하므로 저장소를 바꿔 끼울 수 있습니다.
//!
//! | Trait | MongoDB/Redis 구현 | 메모리 구현 |
//! |-------|--------------------|-------------|
//! | [`UserRepository`] | [`users::MongoUserRepository`] | [`memory::InMemoryUserRepository`] |
//! | [`PermissionRepository`] | [`permissions::MongoPermissionRepository`] | [`memory::InMemoryPermissionRepository`] |
//! | [`PlanRepository`] | [`plans::MongoPlanRepository`] | [`memory::InMemoryPlanRepository`] |
//! | [`RefreshTokenStore`] | [`tokens::RedisRefreshTokenStore`] | [`memory::InMemoryRefreshTokenStore`] |
//!
//! ## 원자성
//!
//! - 사용량 증가([`UserRepository::try_increment_usage`])는 한도 검사와 증가를
//!   저장소 연산 하나로 수행합니다.
//! - 리프레시 토큰 소비([`RefreshTokenStore::consume`])는 한 번만 성공합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::caching::redis::RedisClient;
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::{
    ApiEndpoint, Permission, PermissionChanges, Plan, PlanChanges, UsageMap, User,
};

pub mod memory;
pub mod permissions;
pub mod plans;
pub mod tokens;
pub mod users;

/// `users` 컬렉션
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// 새 사용자를 저장합니다. 같은 username이 있으면 `ConflictError`입니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<()>;

    /// 구독 플랜과 사용량 맵을 함께 교체합니다. 사용자가 없으면 `None`입니다.
    async fn set_plan(&self, id: &ObjectId, plan_id: &str, usage: &UsageMap) -> AppResult<Option<User>>;

    /// 해당 플랜을 구독 중인 사용자 수
    async fn count_subscribers(&self, plan_id: &str) -> AppResult<u64>;

    /// 사용자가 `plan_id`를 구독 중이고 `permission_id` 사용량이 `limit` 미만일 때만
    /// 1 증가시키고 증가 후 값을 반환합니다. 조건이 맞지 않으면 `None`입니다.
    async fn try_increment_usage(
        &self,
        id: &ObjectId,
        plan_id: &str,
        permission_id: &str,
        limit: i64,
    ) -> AppResult<Option<i64>>;
}

/// `permissions` 컬렉션
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Permission>>;

    async fn find_by_endpoint(&self, endpoint: ApiEndpoint) -> AppResult<Option<Permission>>;

    async fn find_all(&self) -> AppResult<Vec<Permission>>;

    /// 같은 엔드포인트의 권한이 있으면 `ConflictError`입니다.
    async fn insert(&self, permission: Permission) -> AppResult<Permission>;

    async fn update(&self, id: &ObjectId, changes: &PermissionChanges) -> AppResult<Option<Permission>>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

/// `plans` 컬렉션
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Plan>>;

    async fn find_all(&self) -> AppResult<Vec<Plan>>;

    async fn insert(&self, plan: Plan) -> AppResult<Plan>;

    async fn update(&self, id: &ObjectId, changes: &PlanChanges) -> AppResult<Option<Plan>>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;

    /// `apilimit`에 해당 권한을 가진 플랜 수
    async fn count_using_permission(&self, permission_id: &str) -> AppResult<u64>;
}

/// 유효한 리프레시 토큰 목록
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// 토큰을 `ttl_seconds` 동안 유효한 것으로 등록합니다.
    async fn store(&self, token: &str, ttl_seconds: u64) -> AppResult<()>;

    /// 토큰을 제거합니다. 이 호출이 실제로 제거했을 때만 `true`입니다.
    async fn consume(&self, token: &str) -> AppResult<bool>;
}

/// 서비스 계층에 주입되는 저장소 묶음
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub permissions: Arc<dyn PermissionRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
}

impl Repositories {
    /// MongoDB 컬렉션과 Redis 토큰 저장소를 사용합니다. 유니크 인덱스도 생성합니다.
    pub async fn mongodb(database: &Database, redis: RedisClient) -> AppResult<Self> {
        let users = users::MongoUserRepository::new(database);
        let permissions = permissions::MongoPermissionRepository::new(database);
        let plans = plans::MongoPlanRepository::new(database);

        users.create_indexes().await?;
        permissions.create_indexes().await?;

        Ok(Self {
            users: Arc::new(users),
            permissions: Arc::new(permissions),
            plans: Arc::new(plans),
            refresh_tokens: Arc::new(tokens::RedisRefreshTokenStore::new(redis)),
        })
    }

    /// 모든 데이터를 프로세스 메모리에 둡니다.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::InMemoryUserRepository::default()),
            permissions: Arc::new(memory::InMemoryPermissionRepository::default()),
            plans: Arc::new(memory::InMemoryPlanRepository::default()),
            refresh_tokens: Arc::new(memory::InMemoryRefreshTokenStore::default()),
        }
    }
}
