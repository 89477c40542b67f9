use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::subscriptions::ServiceCallResponse;
use crate::domain::entities::endpoint::ApiEndpoint;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::{PermissionRepository, PlanRepository, UserRepository};
use crate::utils::string_utils::parse_object_id;

/// 클라우드 엔드포인트 호출 권한/한도 검사
#[derive(Clone)]
pub struct AccessService {
    user_repo: Arc<dyn UserRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    permission_repo: Arc<dyn PermissionRepository>,
}

impl AccessService {
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

    /// 엔드포인트 호출 1회를 사용량에 기록합니다.
    ///
    /// 한도 검사와 증가는 저장소의 단일 연산이므로 동시에 호출되어도
    /// 사용량이 한도를 넘지 않습니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 구독 플랜 없음, 플랜에 없는 엔드포인트
    /// * `NotFound` - 엔드포인트에 해당하는 권한 없음
    /// * `QuotaExceeded` - 한도 도달
    pub async fn consume(&self, caller: &AuthenticatedUser, endpoint: ApiEndpoint) -> AppResult<ServiceCallResponse> {
        let user_oid = parse_object_id(&caller.user_id)?;
        let user = self
            .user_repo
            .find_by_id(&user_oid)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Could not validate credentials".to_string()))?;

        let plan_id = match (&user.subscribed_plan_id, user.is_subscribed()) {
            (Some(plan_id), true) => plan_id.clone(),
            _ => {
                return Err(AppError::ValidationError(
                    "User is not subscribed to a plan".to_string(),
                ));
            }
        };

        let permission = self
            .permission_repo
            .find_by_endpoint(endpoint)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No permission exists for endpoint {}", endpoint)))?;
        let permission_id = permission.id_string().unwrap_or_default();

        let not_in_plan = || {
            AppError::ValidationError(format!(
                "Endpoint {} is not available as per the user's subscribed plan",
                endpoint
            ))
        };

        if !user.current_api_usage.contains_key(&permission_id) {
            return Err(not_in_plan());
        }

        let plan = self
            .plan_repo
            .find_by_id(&parse_object_id(&plan_id)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No plan with object id {} exist", plan_id)))?;
        let limit = plan.limit_for(&permission_id).ok_or_else(not_in_plan)?;

        let Some(used) = self
            .user_repo
            .try_increment_usage(&user_oid, &plan_id, &permission_id, limit)
            .await?
        else {
            log::info!("호출 한도 도달: {} {} ({})", user.username, endpoint, limit);
            return Err(AppError::QuotaExceeded(format!(
                "API limit of {} calls reached for endpoint {}",
                limit, endpoint
            )));
        };

        log::debug!("{} 호출: {} ({}/{})", endpoint, user.username, used, limit);

        Ok(ServiceCallResponse {
            endpoint,
            result: endpoint.result_text(),
            used,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::permissions::permission::Permission;
    use crate::domain::entities::plans::plan::{Plan, UsageMap};
    use crate::domain::entities::users::user::{Role, User};
    use crate::repositories::memory::{
        InMemoryPermissionRepository, InMemoryPlanRepository, InMemoryUserRepository,
    };

    async fn setup(limit: i64) -> (AccessService, AuthenticatedUser, AuthenticatedUser) {
        let users = Arc::new(InMemoryUserRepository::default());
        let plans = Arc::new(InMemoryPlanRepository::default());
        let permissions = Arc::new(InMemoryPermissionRepository::default());

        let random1 = permissions
            .insert(Permission::new("one".to_string(), ApiEndpoint::Random1, None))
            .await
            .unwrap()
            .id_string()
            .unwrap();
        permissions
            .insert(Permission::new("two".to_string(), ApiEndpoint::Random2, None))
            .await
            .unwrap();

        let plan = plans
            .insert(Plan::new("basic".to_string(), None, UsageMap::from([(random1.clone(), limit)])))
            .await
            .unwrap();

        let mut subscriber = User::new("alice".to_string(), "h".to_string(), Role::User);
        subscriber.subscribed_plan_id = plan.id_string();
        subscriber.current_api_usage = plan.fresh_usage();
        let subscriber = users.insert(subscriber).await.unwrap();

        let idle = users
            .insert(User::new("bob".to_string(), "h".to_string(), Role::User))
            .await
            .unwrap();

        (
            AccessService::new(users, plans, permissions),
            AuthenticatedUser::try_from(&subscriber).unwrap(),
            AuthenticatedUser::try_from(&idle).unwrap(),
        )
    }

    #[actix_web::test]
    async fn test_calls_are_counted_until_limit() {
        let (service, alice, _) = setup(2).await;

        let first = service.consume(&alice, ApiEndpoint::Random1).await.unwrap();
        let second = service.consume(&alice, ApiEndpoint::Random1).await.unwrap();
        let third = service.consume(&alice, ApiEndpoint::Random1).await;

        assert_eq!((first.used, first.limit), (1, 2));
        assert_eq!(second.result, "Random 1");
        assert!(matches!(third, Err(AppError::QuotaExceeded(_))));
    }

    #[actix_web::test]
    async fn test_endpoint_outside_plan() {
        let (service, alice, _) = setup(2).await;

        let outside = service.consume(&alice, ApiEndpoint::Random2).await;
        let unknown = service.consume(&alice, ApiEndpoint::Random6).await;

        assert!(matches!(outside, Err(AppError::ValidationError(msg)) if msg.contains("/random2")));
        assert!(matches!(unknown, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_unsubscribed_user_rejected() {
        let (service, _, bob) = setup(2).await;

        let result = service.consume(&bob, ApiEndpoint::Random1).await;

        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg == "User is not subscribed to a plan"));
    }

    #[actix_web::test]
    async fn test_concurrent_calls_never_exceed_limit() {
        let (service, alice, _) = setup(5).await;

        let calls = (0..20).map(|_| service.consume(&alice, ApiEndpoint::Random1));
        let results = futures_util::future::join_all(calls).await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 5);
    }
}
