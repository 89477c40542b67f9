use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::plans::{CreatePlanRequest, PlanResponse, UpdatePlanRequest};
use crate::domain::entities::plans::plan::{Plan, PlanChanges, UsageMap};
use crate::repositories::{PermissionRepository, PlanRepository, UserRepository};
use crate::utils::string_utils::{clean_optional_string, parse_object_id, validate_required_string};

/// 플랜 관리 서비스
///
/// 사용자가 구독 중인 플랜은 수정하거나 삭제할 수 없습니다.
#[derive(Clone)]
pub struct PlanService {
    plan_repo: Arc<dyn PlanRepository>,
    permission_repo: Arc<dyn PermissionRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl PlanService {
    pub fn new(
        plan_repo: Arc<dyn PlanRepository>,
        permission_repo: Arc<dyn PermissionRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            plan_repo,
            permission_repo,
            user_repo,
        }
    }

    /// 플랜 생성
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 빈 이름, 빈 `apilimit`, 음수 한도, 존재하지 않는 권한 id
    pub async fn create_plan(&self, request: CreatePlanRequest) -> AppResult<PlanResponse> {
        let name = validate_required_string(&request.name, "name")?;
        let apilimit = self.validate_apilimit(request.apilimit).await?;

        let plan = Plan::new(name, clean_optional_string(request.description), apilimit);
        let created = self.plan_repo.insert(plan).await?;

        log::info!("플랜 생성: {} (권한 {}개)", created.name, created.apilimit.len());
        Ok(PlanResponse::from(created))
    }

    pub async fn list_plans(&self) -> AppResult<Vec<PlanResponse>> {
        let plans = self.plan_repo.find_all().await?;
        Ok(plans.into_iter().map(PlanResponse::from).collect())
    }

    pub async fn get_plan(&self, id: &str) -> AppResult<PlanResponse> {
        let oid = parse_object_id(id)?;

        self.plan_repo
            .find_by_id(&oid)
            .await?
            .map(PlanResponse::from)
            .ok_or_else(|| not_found(id))
    }

    /// 플랜 부분 수정
    ///
    /// # Errors
    ///
    /// * `NotFound` - 플랜 없음
    /// * `ConflictError` - 구독 중인 사용자가 있음
    /// * `ValidationError` - 새 `apilimit`이 비었거나 존재하지 않는 권한을 참조
    pub async fn update_plan(&self, id: &str, request: UpdatePlanRequest) -> AppResult<PlanResponse> {
        let oid = parse_object_id(id)?;

        if self.plan_repo.find_by_id(&oid).await?.is_none() {
            return Err(not_found(id));
        }
        self.ensure_unsubscribed(&oid.to_hex()).await?;

        let mut changes = PlanChanges::from(request);
        if let Some(name) = changes.name.take() {
            changes.name = Some(validate_required_string(&name, "name")?);
        }
        changes.description = clean_optional_string(changes.description);
        if let Some(apilimit) = changes.apilimit.take() {
            changes.apilimit = Some(self.validate_apilimit(apilimit).await?);
        }

        let updated = self
            .plan_repo
            .update(&oid, &changes)
            .await?
            .ok_or_else(|| not_found(id))?;

        log::info!("플랜 수정: {}", id);
        Ok(PlanResponse::from(updated))
    }

    /// 플랜 삭제
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 구독 중인 사용자가 있음
    /// * `NotFound` - 플랜 없음
    pub async fn delete_plan(&self, id: &str) -> AppResult<()> {
        let oid = parse_object_id(id)?;
        self.ensure_unsubscribed(&oid.to_hex()).await?;

        if !self.plan_repo.delete(&oid).await? {
            return Err(not_found(id));
        }

        log::info!("플랜 삭제: {}", id);
        Ok(())
    }

    /// 한도 맵을 검증하고 키를 정규화된 hex id로 바꿉니다.
    async fn validate_apilimit(&self, apilimit: UsageMap) -> AppResult<UsageMap> {
        if apilimit.is_empty() {
            return Err(AppError::ValidationError(
                "Plan needs at least one API limit".to_string(),
            ));
        }

        let mut normalized = UsageMap::new();
        for (permission_id, limit) in apilimit {
            if limit < 0 {
                return Err(AppError::ValidationError(format!(
                    "API limit for permission {} must not be negative",
                    permission_id
                )));
            }

            let missing = || {
                AppError::ValidationError(format!(
                    "Permission with id {} doesn't exist; so cannot be attached to plan",
                    permission_id
                ))
            };

            let oid = parse_object_id(&permission_id).map_err(|_| missing())?;
            if self.permission_repo.find_by_id(&oid).await?.is_none() {
                return Err(missing());
            }

            normalized.insert(oid.to_hex(), limit);
        }

        Ok(normalized)
    }

    async fn ensure_unsubscribed(&self, id: &str) -> AppResult<()> {
        let subscribers = self.user_repo.count_subscribers(id).await?;

        if subscribers > 0 {
            return Err(AppError::ConflictError(format!(
                "Plan with object id {} is subscribed to by {} user(s)",
                id, subscribers
            )));
        }

        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("No plan with object id {} exist", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::endpoint::ApiEndpoint;
    use crate::domain::entities::permissions::permission::Permission;
    use crate::domain::entities::users::user::{Role, User};
    use crate::repositories::memory::{
        InMemoryPermissionRepository, InMemoryPlanRepository, InMemoryUserRepository,
    };

    struct Fixture {
        service: PlanService,
        users: Arc<InMemoryUserRepository>,
        permission_id: String,
    }

    async fn setup() -> Fixture {
        let permissions = Arc::new(InMemoryPermissionRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let permission = permissions
            .insert(Permission::new("random 1".to_string(), ApiEndpoint::Random1, None))
            .await
            .unwrap();

        Fixture {
            service: PlanService::new(
                Arc::new(InMemoryPlanRepository::default()),
                permissions,
                users.clone(),
            ),
            users,
            permission_id: permission.id_string().unwrap(),
        }
    }

    fn request(name: &str, apilimit: UsageMap) -> CreatePlanRequest {
        CreatePlanRequest {
            name: name.to_string(),
            description: None,
            apilimit,
        }
    }

    #[actix_web::test]
    async fn test_create_plan_validates_limits() {
        let fixture = setup().await;

        let empty = fixture.service.create_plan(request("empty", UsageMap::new())).await;
        assert!(matches!(empty, Err(AppError::ValidationError(msg)) if msg == "Plan needs at least one API limit"));

        let unknown = UsageMap::from([("65a1b2c3d4e5f6a7b8c9d0e1".to_string(), 3)]);
        let unknown = fixture.service.create_plan(request("unknown", unknown)).await;
        assert!(matches!(unknown, Err(AppError::ValidationError(_))));

        let negative = UsageMap::from([(fixture.permission_id.clone(), -1)]);
        let negative = fixture.service.create_plan(request("negative", negative)).await;
        assert!(matches!(negative, Err(AppError::ValidationError(_))));

        let valid = UsageMap::from([(fixture.permission_id.clone(), 3)]);
        let created = fixture.service.create_plan(request("basic", valid)).await.unwrap();
        assert_eq!(created.apilimit.get(&fixture.permission_id), Some(&3));
    }

    #[actix_web::test]
    async fn test_subscribed_plan_is_locked() {
        let fixture = setup().await;
        let limits = UsageMap::from([(fixture.permission_id.clone(), 3)]);
        let plan = fixture.service.create_plan(request("basic", limits)).await.unwrap();

        let mut user = User::new("alice".to_string(), "hash".to_string(), Role::User);
        user.subscribed_plan_id = Some(plan.id.clone());
        user.current_api_usage.insert(fixture.permission_id.clone(), 0);
        fixture.users.insert(user).await.unwrap();

        let update = fixture
            .service
            .update_plan(
                &plan.id,
                UpdatePlanRequest {
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await;
        let delete = fixture.service.delete_plan(&plan.id).await;

        assert!(matches!(update, Err(AppError::ConflictError(_))));
        assert!(matches!(delete, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_update_and_delete_unsubscribed_plan() {
        let fixture = setup().await;
        let limits = UsageMap::from([(fixture.permission_id.clone(), 3)]);
        let plan = fixture.service.create_plan(request("basic", limits)).await.unwrap();

        let updated = fixture
            .service
            .update_plan(
                &plan.id,
                UpdatePlanRequest {
                    description: Some("three calls".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "basic");
        assert_eq!(updated.description.as_deref(), Some("three calls"));

        fixture.service.delete_plan(&plan.id).await.unwrap();
        assert!(matches!(
            fixture.service.get_plan(&plan.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
