//! 구독 관리 서비스
//!
//! 사용자의 플랜 구독, 플랜 상세/사용량 조회, 관리자의 사용량 조정을 담당합니다.
//! `admin` 역할 사용자는 플랜을 구독할 수 없습니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::plans::PlanResponse;
use crate::domain::dto::subscriptions::{
    PermissionUsage, PlanDetailsResponse, PlanPermissionLimit, SubscriptionResponse,
    UpdateUsageRequest, UsageStatisticsResponse,
};
use crate::domain::dto::users::UserResponse;
use crate::domain::entities::permissions::permission::Permission;
use crate::domain::entities::plans::plan::{Plan, UsageMap};
use crate::domain::entities::users::user::{Role, User};
use crate::repositories::{PermissionRepository, PlanRepository, UserRepository};
use crate::utils::string_utils::parse_object_id;

#[derive(Clone)]
pub struct SubscriptionService {
    user_repo: Arc<dyn UserRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    permission_repo: Arc<dyn PermissionRepository>,
}

impl SubscriptionService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        permission_repo: Arc<dyn PermissionRepository>,
    ) -> Self {
        Self {
            user_repo,
            plan_repo,
            permission_repo,
        }
    }

    /// 플랜 구독
    ///
    /// 구독 플랜을 바꾸고 플랜의 모든 권한 사용량을 0으로 초기화합니다.
    /// 이미 같은 플랜을 구독 중이어도 사용량은 초기화됩니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 플랜 또는 사용자 없음
    /// * `ValidationError` - 관리자 계정, 잘못된 id 형식
    pub async fn subscribe(&self, user_id: &str, plan_id: &str) -> AppResult<SubscriptionResponse> {
        let plan_oid = parse_object_id(plan_id)?;
        let plan = self
            .plan_repo
            .find_by_id(&plan_oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No plan with object id {} exist", plan_id)))?;

        let user_oid = parse_object_id(user_id)?;
        let user = self.find_user(&user_oid, user_id).await?;
        ensure_not_admin(&user, user_id)?;

        let updated = self
            .user_repo
            .set_plan(&user_oid, &plan_oid.to_hex(), &plan.fresh_usage())
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        log::info!("플랜 구독: {} -> {}", updated.username, plan.name);

        Ok(SubscriptionResponse {
            message: format!("Subscribed to plan {}", plan.name),
            user: UserResponse::from(updated),
        })
    }

    /// 구독 플랜 상세 (권한별 한도 포함)
    pub async fn plan_details(&self, user_id: &str) -> AppResult<PlanDetailsResponse> {
        let (user, plan) = self.subscribed_user(user_id).await?;

        let mut permissions = Vec::with_capacity(plan.apilimit.len());
        for (permission_id, limit) in &plan.apilimit {
            let permission = self.plan_permission(&plan, permission_id).await?;

            permissions.push(PlanPermissionLimit {
                id: permission_id.clone(),
                name: permission.name,
                endpoint: permission.endpoint,
                description: permission.description,
                limit: *limit,
            });
        }

        Ok(PlanDetailsResponse {
            user: UserResponse::from(user),
            plan: PlanResponse::from(plan),
            permissions,
        })
    }

    /// 권한별 사용량 통계
    pub async fn usage_statistics(&self, user_id: &str) -> AppResult<UsageStatisticsResponse> {
        let (user, plan) = self.subscribed_user(user_id).await?;

        let mut usage = Vec::with_capacity(user.current_api_usage.len());
        for (permission_id, used) in &user.current_api_usage {
            let permission = self.plan_permission(&plan, permission_id).await?;
            let limit = plan.limit_for(permission_id).unwrap_or(0);

            usage.push(PermissionUsage {
                id: permission_id.clone(),
                name: permission.name,
                endpoint: permission.endpoint,
                description: permission.description,
                used: *used,
                limit,
                remaining: (limit - used).max(0),
            });
        }

        Ok(UsageStatisticsResponse {
            plan_id: plan.id_string().unwrap_or_default(),
            plan_name: plan.name,
            user: UserResponse::from(user),
            usage,
        })
    }

    /// 관리자의 사용자 플랜 조정
    ///
    /// - `plan_id`가 현재 플랜과 같으면 `current_api_usage`로 사용량을 교체합니다.
    ///   새 사용량은 현재 사용량과 정확히 같은 권한 키를 가져야 합니다.
    /// - 다르면 새 플랜으로 구독을 바꿉니다(사용량 초기화).
    pub async fn update_user_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        request: UpdateUsageRequest,
    ) -> AppResult<SubscriptionResponse> {
        let (user, plan) = self.subscribed_user(user_id).await?;
        let target_plan = parse_object_id(plan_id)?;

        if plan.id != Some(target_plan) {
            return self.subscribe(user_id, plan_id).await;
        }

        let new_usage = request.current_api_usage.ok_or_else(|| {
            AppError::ValidationError(
                "current_api_usage is required to update usage on the subscribed plan".to_string(),
            )
        })?;
        validate_usage(&new_usage, &user.current_api_usage)?;

        let user_oid = parse_object_id(user_id)?;
        let updated = self
            .user_repo
            .set_plan(&user_oid, &target_plan.to_hex(), &new_usage)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        log::info!("사용량 조정: {} ({})", updated.username, plan.name);

        Ok(SubscriptionResponse {
            message: format!("Updated API usage on plan {}", plan.name),
            user: UserResponse::from(updated),
        })
    }

    /// 구독 중인 일반 사용자와 그 플랜
    async fn subscribed_user(&self, user_id: &str) -> AppResult<(User, Plan)> {
        let user_oid = parse_object_id(user_id)?;
        let user = self.find_user(&user_oid, user_id).await?;
        ensure_not_admin(&user, user_id)?;

        let plan_id = match (&user.subscribed_plan_id, user.is_subscribed()) {
            (Some(plan_id), true) => plan_id.clone(),
            _ => {
                return Err(AppError::ValidationError(format!(
                    "User id {} doesn't have a subscribed plan",
                    user_id
                )));
            }
        };

        let plan = self
            .plan_repo
            .find_by_id(&parse_object_id(&plan_id)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No plan with object id {} exist", plan_id)))?;

        Ok((user, plan))
    }

    async fn find_user(&self, oid: &ObjectId, user_id: &str) -> AppResult<User> {
        self.user_repo
            .find_by_id(oid)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn plan_permission(&self, plan: &Plan, permission_id: &str) -> AppResult<Permission> {
        let missing = || {
            AppError::InternalError(format!(
                "Permission with id {} doesn't exist; it should not be in plan {}",
                permission_id,
                plan.id_string().unwrap_or_default()
            ))
        };

        let oid = parse_object_id(permission_id).map_err(|_| missing())?;
        self.permission_repo.find_by_id(&oid).await?.ok_or_else(missing)
    }
}

fn user_not_found(user_id: &str) -> AppError {
    AppError::NotFound(format!("No user with object id {} exist", user_id))
}

fn ensure_not_admin(user: &User, user_id: &str) -> AppResult<()> {
    if user.role == Role::Admin {
        return Err(AppError::ValidationError(format!(
            "User with object id {} is an Admin and cannot subscribe to plans",
            user_id
        )));
    }
    Ok(())
}

/// 사용량 맵이 `current`와 같은 권한 키를 갖고 음수가 없는지 검사합니다.
pub(crate) fn validate_usage(new_usage: &UsageMap, current: &UsageMap) -> AppResult<()> {
    if !new_usage.keys().eq(current.keys()) {
        return Err(AppError::ValidationError(
            "current_api_usage must contain exactly the permissions of the subscribed plan"
                .to_string(),
        ));
    }

    if let Some((permission_id, _)) = new_usage.iter().find(|(_, used)| **used < 0) {
        return Err(AppError::ValidationError(format!(
            "API usage for permission {} must not be negative",
            permission_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::endpoint::ApiEndpoint;
    use crate::repositories::memory::{
        InMemoryPermissionRepository, InMemoryPlanRepository, InMemoryUserRepository,
    };

    struct Fixture {
        service: SubscriptionService,
        user_id: String,
        admin_id: String,
        basic_plan: String,
        pro_plan: String,
        random1: String,
        random2: String,
    }

    async fn setup() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::default());
        let plans = Arc::new(InMemoryPlanRepository::default());
        let permissions = Arc::new(InMemoryPermissionRepository::default());

        let random1 = permissions
            .insert(Permission::new("one".to_string(), ApiEndpoint::Random1, None))
            .await
            .unwrap()
            .id_string()
            .unwrap();
        let random2 = permissions
            .insert(Permission::new("two".to_string(), ApiEndpoint::Random2, None))
            .await
            .unwrap()
            .id_string()
            .unwrap();

        let basic_plan = plans
            .insert(Plan::new(
                "basic".to_string(),
                None,
                UsageMap::from([(random1.clone(), 2)]),
            ))
            .await
            .unwrap()
            .id_string()
            .unwrap();
        let pro_plan = plans
            .insert(Plan::new(
                "pro".to_string(),
                None,
                UsageMap::from([(random1.clone(), 10), (random2.clone(), 10)]),
            ))
            .await
            .unwrap()
            .id_string()
            .unwrap();

        let user_id = users
            .insert(User::new("alice".to_string(), "h".to_string(), Role::User))
            .await
            .unwrap()
            .id_string()
            .unwrap();
        let admin_id = users
            .insert(User::new("root".to_string(), "h".to_string(), Role::Admin))
            .await
            .unwrap()
            .id_string()
            .unwrap();

        Fixture {
            service: SubscriptionService::new(users, plans, permissions),
            user_id,
            admin_id,
            basic_plan,
            pro_plan,
            random1,
            random2,
        }
    }

    #[actix_web::test]
    async fn test_subscribe_resets_usage() {
        let f = setup().await;

        let response = f.service.subscribe(&f.user_id, &f.pro_plan).await.unwrap();

        assert_eq!(response.user.subscribed_plan_id.as_deref(), Some(f.pro_plan.as_str()));
        assert_eq!(
            response.user.current_api_usage,
            UsageMap::from([(f.random1.clone(), 0), (f.random2.clone(), 0)])
        );
    }

    #[actix_web::test]
    async fn test_admin_cannot_subscribe() {
        let f = setup().await;

        let result = f.service.subscribe(&f.admin_id, &f.basic_plan).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_details_require_subscription() {
        let f = setup().await;

        assert!(matches!(
            f.service.plan_details(&f.user_id).await,
            Err(AppError::ValidationError(_))
        ));

        f.service.subscribe(&f.user_id, &f.basic_plan).await.unwrap();
        let details = f.service.plan_details(&f.user_id).await.unwrap();

        assert_eq!(details.plan.name, "basic");
        assert_eq!(details.permissions.len(), 1);
        assert_eq!(details.permissions[0].endpoint, ApiEndpoint::Random1);
        assert_eq!(details.permissions[0].limit, 2);
    }

    #[actix_web::test]
    async fn test_usage_statistics_report_remaining() {
        let f = setup().await;
        f.service.subscribe(&f.user_id, &f.basic_plan).await.unwrap();
        f.service
            .update_user_plan(
                &f.user_id,
                &f.basic_plan,
                UpdateUsageRequest {
                    current_api_usage: Some(UsageMap::from([(f.random1.clone(), 1)])),
                },
            )
            .await
            .unwrap();

        let stats = f.service.usage_statistics(&f.user_id).await.unwrap();

        assert_eq!(stats.plan_name, "basic");
        assert_eq!(stats.usage[0].used, 1);
        assert_eq!(stats.usage[0].limit, 2);
        assert_eq!(stats.usage[0].remaining, 1);
    }

    #[actix_web::test]
    async fn test_update_user_plan_rules() {
        let f = setup().await;
        f.service.subscribe(&f.user_id, &f.basic_plan).await.unwrap();

        let missing_usage = f
            .service
            .update_user_plan(&f.user_id, &f.basic_plan, UpdateUsageRequest::default())
            .await;
        assert!(matches!(missing_usage, Err(AppError::ValidationError(_))));

        let wrong_keys = f
            .service
            .update_user_plan(
                &f.user_id,
                &f.basic_plan,
                UpdateUsageRequest {
                    current_api_usage: Some(UsageMap::from([(f.random2.clone(), 0)])),
                },
            )
            .await;
        assert!(matches!(wrong_keys, Err(AppError::ValidationError(_))));

        let switched = f
            .service
            .update_user_plan(&f.user_id, &f.pro_plan, UpdateUsageRequest::default())
            .await
            .unwrap();
        assert_eq!(switched.user.subscribed_plan_id.as_deref(), Some(f.pro_plan.as_str()));
        assert_eq!(switched.user.current_api_usage.len(), 2);
    }
}
