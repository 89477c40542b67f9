//! 메모리 저장소
//!
//! `STORAGE_BACKEND=memory`일 때와 테스트에서 사용합니다.
//! MongoDB 구현과 같은 제약(유니크 username/endpoint, 조건부 사용량 증가)을
//! 쓰기 잠금 하나 안에서 지킵니다.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{
    ApiEndpoint, Permission, PermissionChanges, Plan, PlanChanges, UsageMap, User,
};
use crate::repositories::tokens::hash_token;
use crate::repositories::{PermissionRepository, PlanRepository, RefreshTokenStore, UserRepository};

fn read<T>(lock: &RwLock<T>) -> AppResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| AppError::InternalError("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> AppResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| AppError::InternalError("in-memory store lock poisoned".to_string()))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(read(&self.users)?.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(read(&self.users)?.iter().find(|u| u.username == username).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(read(&self.users)?.clone())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = write(&self.users)?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::ConflictError(format!(
                "Username {} is already taken",
                user.username
            )));
        }

        let id = *user.id.get_or_insert_with(ObjectId::new);
        if users.iter().any(|u| u.id == Some(id)) {
            return Err(AppError::ConflictError(format!("User id {} already exists", id)));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<()> {
        let mut users = write(&self.users)?;
        if let Some(user) = users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn set_plan(&self, id: &ObjectId, plan_id: &str, usage: &UsageMap) -> AppResult<Option<User>> {
        let mut users = write(&self.users)?;

        Ok(users.iter_mut().find(|u| u.id.as_ref() == Some(id)).map(|user| {
            user.subscribed_plan_id = Some(plan_id.to_string());
            user.current_api_usage = usage.clone();
            user.clone()
        }))
    }

    async fn count_subscribers(&self, plan_id: &str) -> AppResult<u64> {
        Ok(read(&self.users)?
            .iter()
            .filter(|u| u.subscribed_plan_id.as_deref() == Some(plan_id))
            .count() as u64)
    }

    async fn try_increment_usage(
        &self,
        id: &ObjectId,
        plan_id: &str,
        permission_id: &str,
        limit: i64,
    ) -> AppResult<Option<i64>> {
        let mut users = write(&self.users)?;

        let Some(user) = users.iter_mut().find(|u| u.id.as_ref() == Some(id)) else {
            return Ok(None);
        };
        if user.subscribed_plan_id.as_deref() != Some(plan_id) {
            return Ok(None);
        }

        match user.current_api_usage.get_mut(permission_id) {
            Some(used) if *used < limit => {
                *used += 1;
                Ok(Some(*used))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct InMemoryPermissionRepository {
    permissions: RwLock<Vec<Permission>>,
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Permission>> {
        Ok(read(&self.permissions)?
            .iter()
            .find(|p| p.id.as_ref() == Some(id))
            .cloned())
    }

    async fn find_by_endpoint(&self, endpoint: ApiEndpoint) -> AppResult<Option<Permission>> {
        Ok(read(&self.permissions)?
            .iter()
            .find(|p| p.endpoint == endpoint)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Permission>> {
        Ok(read(&self.permissions)?.clone())
    }

    async fn insert(&self, mut permission: Permission) -> AppResult<Permission> {
        let mut permissions = write(&self.permissions)?;

        if permissions.iter().any(|p| p.endpoint == permission.endpoint) {
            return Err(AppError::ConflictError(format!(
                "Endpoint {} already exists in a permission",
                permission.endpoint
            )));
        }

        permission.id = Some(ObjectId::new());
        permissions.push(permission.clone());
        Ok(permission)
    }

    async fn update(&self, id: &ObjectId, changes: &PermissionChanges) -> AppResult<Option<Permission>> {
        let mut permissions = write(&self.permissions)?;

        if let Some(endpoint) = changes.endpoint {
            let taken = permissions
                .iter()
                .any(|p| p.endpoint == endpoint && p.id.as_ref() != Some(id));
            if taken {
                return Err(AppError::ConflictError(format!(
                    "Endpoint {} already exists in a permission",
                    endpoint
                )));
            }
        }

        Ok(permissions
            .iter_mut()
            .find(|p| p.id.as_ref() == Some(id))
            .map(|permission| {
                permission.apply(changes);
                permission.clone()
            }))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut permissions = write(&self.permissions)?;
        let before = permissions.len();
        permissions.retain(|p| p.id.as_ref() != Some(id));
        Ok(permissions.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<Vec<Plan>>,
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Plan>> {
        Ok(read(&self.plans)?.iter().find(|p| p.id.as_ref() == Some(id)).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Plan>> {
        Ok(read(&self.plans)?.clone())
    }

    async fn insert(&self, mut plan: Plan) -> AppResult<Plan> {
        plan.id = Some(ObjectId::new());
        write(&self.plans)?.push(plan.clone());
        Ok(plan)
    }

    async fn update(&self, id: &ObjectId, changes: &PlanChanges) -> AppResult<Option<Plan>> {
        let mut plans = write(&self.plans)?;

        Ok(plans.iter_mut().find(|p| p.id.as_ref() == Some(id)).map(|plan| {
            plan.apply(changes);
            plan.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut plans = write(&self.plans)?;
        let before = plans.len();
        plans.retain(|p| p.id.as_ref() != Some(id));
        Ok(plans.len() < before)
    }

    async fn count_using_permission(&self, permission_id: &str) -> AppResult<u64> {
        Ok(read(&self.plans)?
            .iter()
            .filter(|p| p.apilimit.contains_key(permission_id))
            .count() as u64)
    }
}

/// 토큰 해시 → 만료 시각 (unix seconds)
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: RwLock<HashMap<String, i64>>,
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn store(&self, token: &str, ttl_seconds: u64) -> AppResult<()> {
        let now = Utc::now().timestamp();
        let expires_at = now + ttl_seconds as i64;

        let mut tokens = write(&self.tokens)?;
        tokens.retain(|_, exp| *exp > now);
        tokens.insert(hash_token(token), expires_at);
        Ok(())
    }

    async fn consume(&self, token: &str) -> AppResult<bool> {
        let removed = write(&self.tokens)?.remove(&hash_token(token));
        Ok(matches!(removed, Some(expires_at) if expires_at > Utc::now().timestamp()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;

    fn subscribed_user(plan_id: &str, permission_id: &str, used: i64) -> User {
        let mut user = User::new("alice".to_string(), "hash".to_string(), Role::User);
        user.subscribed_plan_id = Some(plan_id.to_string());
        user.current_api_usage.insert(permission_id.to_string(), used);
        user
    }

    #[actix_web::test]
    async fn test_username_is_unique() {
        let repo = InMemoryUserRepository::default();
        repo.insert(User::new("alice".to_string(), "h".to_string(), Role::User))
            .await
            .unwrap();

        let duplicate = repo
            .insert(User::new("alice".to_string(), "h".to_string(), Role::Admin))
            .await;

        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_increment_stops_at_limit() {
        let repo = InMemoryUserRepository::default();
        let user = repo.insert(subscribed_user("plan", "perm", 0)).await.unwrap();
        let id = user.id.unwrap();

        assert_eq!(repo.try_increment_usage(&id, "plan", "perm", 2).await.unwrap(), Some(1));
        assert_eq!(repo.try_increment_usage(&id, "plan", "perm", 2).await.unwrap(), Some(2));
        assert_eq!(repo.try_increment_usage(&id, "plan", "perm", 2).await.unwrap(), None);
        assert_eq!(repo.try_increment_usage(&id, "other", "perm", 5).await.unwrap(), None);
        assert_eq!(repo.try_increment_usage(&id, "plan", "missing", 5).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_permission_endpoint_is_unique_on_update() {
        let repo = InMemoryPermissionRepository::default();
        repo.insert(Permission::new("one".to_string(), ApiEndpoint::Random1, None))
            .await
            .unwrap();
        let second = repo
            .insert(Permission::new("two".to_string(), ApiEndpoint::Random2, None))
            .await
            .unwrap();

        let changes = PermissionChanges {
            endpoint: Some(ApiEndpoint::Random1),
            ..Default::default()
        };

        assert!(matches!(
            repo.update(second.id.as_ref().unwrap(), &changes).await,
            Err(AppError::ConflictError(_))
        ));
    }

    #[actix_web::test]
    async fn test_refresh_token_consumed_once() {
        let store = InMemoryRefreshTokenStore::default();
        store.store("token-a", 60).await.unwrap();

        assert!(store.consume("token-a").await.unwrap());
        assert!(!store.consume("token-a").await.unwrap());
        assert!(!store.consume("never-stored").await.unwrap());
    }
}
