//! 권한 관리 핸들러 (`/admin` 스코프)
//!
//! 플랜이 참조 중인 권한은 수정/삭제할 수 없습니다(409).
use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::permissions::{
    CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest,
};

#[utoipa::path(
    get,
    path = "/admin/permissions",
    tag = "permissions",
    security(("bearer_auth" = [])),
    responses((status = 200, body = Vec<PermissionResponse>))
)]
#[get("/permissions")]
pub async fn list_permissions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let permissions = state.permissions.list_permissions().await?;
    Ok(HttpResponse::Ok().json(permissions))
}

/// 권한 생성
///
/// 엔드포인트 하나에는 권한 하나만 만들 수 있습니다.
#[utoipa::path(
    post,
    path = "/admin/permissions",
    tag = "permissions",
    request_body = CreatePermissionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = PermissionResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Endpoint already exists in a permission"),
    )
)]
#[post("/permissions")]
pub async fn create_permission(
    state: web::Data<AppState>,
    payload: web::Json<CreatePermissionRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let permission = state.permissions.create_permission(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(permission))
}

#[utoipa::path(
    get,
    path = "/admin/permissions/{id}",
    tag = "permissions",
    params(("id" = String, Path, description = "Permission ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses((status = 200, body = PermissionResponse), (status = 404, description = "Permission not found"))
)]
#[get("/permissions/{id}")]
pub async fn get_permission(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let permission = state.permissions.get_permission(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(permission))
}

#[utoipa::path(
    put,
    path = "/admin/permissions/{id}",
    tag = "permissions",
    params(("id" = String, Path, description = "Permission ObjectId (hex)")),
    request_body = UpdatePermissionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = PermissionResponse),
        (status = 404, description = "Permission not found"),
        (status = 409, description = "Permission is used by a plan"),
    )
)]
#[put("/permissions/{id}")]
pub async fn update_permission(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePermissionRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let permission = state
        .permissions
        .update_permission(&path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(permission))
}

#[utoipa::path(
    delete,
    path = "/admin/permissions/{id}",
    tag = "permissions",
    params(("id" = String, Path, description = "Permission ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Permission deleted"),
        (status = 404, description = "Permission not found"),
        (status = 409, description = "Permission is used by a plan"),
    )
)]
#[delete("/permissions/{id}")]
pub async fn delete_permission(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.permissions.delete_permission(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
