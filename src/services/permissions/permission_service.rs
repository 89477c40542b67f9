use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::permissions::{CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest};
use crate::domain::entities::permissions::permission::{Permission, PermissionChanges};
use crate::repositories::{PermissionRepository, PlanRepository};
use crate::utils::string_utils::{clean_optional_string, parse_object_id, validate_required_string};

/// 권한 관리 서비스
///
/// 플랜의 `apilimit`이 참조 중인 권한은 수정하거나 삭제할 수 없습니다.
#[derive(Clone)]
pub struct PermissionService {
    permission_repo: Arc<dyn PermissionRepository>,
    plan_repo: Arc<dyn PlanRepository>,
}

impl PermissionService {
    pub fn new(permission_repo: Arc<dyn PermissionRepository>, plan_repo: Arc<dyn PlanRepository>) -> Self {
        Self {
            permission_repo,
            plan_repo,
        }
    }

    /// 권한 생성
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 빈 이름
    /// * `ConflictError` - 같은 엔드포인트의 권한이 이미 존재
    pub async fn create_permission(&self, request: CreatePermissionRequest) -> AppResult<PermissionResponse> {
        let name = validate_required_string(&request.name, "name")?;
        let permission = Permission::new(name, request.endpoint, clean_optional_string(request.description));

        let created = self.permission_repo.insert(permission).await?;
        log::info!("권한 생성: {} -> {}", created.name, created.endpoint);

        Ok(PermissionResponse::from(created))
    }

    pub async fn list_permissions(&self) -> AppResult<Vec<PermissionResponse>> {
        let permissions = self.permission_repo.find_all().await?;
        Ok(permissions.into_iter().map(PermissionResponse::from).collect())
    }

    pub async fn get_permission(&self, id: &str) -> AppResult<PermissionResponse> {
        let oid = parse_object_id(id)?;

        self.permission_repo
            .find_by_id(&oid)
            .await?
            .map(PermissionResponse::from)
            .ok_or_else(|| not_found(id))
    }

    /// 권한 부분 수정
    ///
    /// `None`인 필드는 그대로 둡니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 권한 없음
    /// * `ConflictError` - 플랜이 참조 중이거나, 바꾸려는 엔드포인트를 다른 권한이 사용 중
    pub async fn update_permission(
        &self,
        id: &str,
        request: UpdatePermissionRequest,
    ) -> AppResult<PermissionResponse> {
        let oid = parse_object_id(id)?;

        if self.permission_repo.find_by_id(&oid).await?.is_none() {
            return Err(not_found(id));
        }
        self.ensure_unreferenced(&oid.to_hex()).await?;

        let mut changes = PermissionChanges::from(request);
        if let Some(name) = changes.name.take() {
            changes.name = Some(validate_required_string(&name, "name")?);
        }
        changes.description = clean_optional_string(changes.description);

        let updated = self
            .permission_repo
            .update(&oid, &changes)
            .await?
            .ok_or_else(|| not_found(id))?;

        log::info!("권한 수정: {}", id);
        Ok(PermissionResponse::from(updated))
    }

    /// 권한 삭제
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 플랜이 참조 중
    /// * `NotFound` - 권한 없음
    pub async fn delete_permission(&self, id: &str) -> AppResult<()> {
        let oid = parse_object_id(id)?;
        self.ensure_unreferenced(&oid.to_hex()).await?;

        if !self.permission_repo.delete(&oid).await? {
            return Err(not_found(id));
        }

        log::info!("권한 삭제: {}", id);
        Ok(())
    }

    async fn ensure_unreferenced(&self, id: &str) -> AppResult<()> {
        let plans = self.plan_repo.count_using_permission(id).await?;

        if plans > 0 {
            return Err(AppError::ConflictError(format!(
                "Permission with object id {} is used in {} plan(s)",
                id, plans
            )));
        }

        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("API Permission {} not found", id))
}
