//! 플랜 핸들러
//!
//! 조회는 `/plans` 스코프(user, admin), 생성/수정/삭제는 `/admin` 스코프입니다.
//! 구독 중인 사용자가 있는 플랜은 수정/삭제할 수 없습니다(409).
use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::plans::{CreatePlanRequest, PlanResponse, UpdatePlanRequest};

#[utoipa::path(
    get,
    path = "/plans",
    tag = "plans",
    security(("bearer_auth" = [])),
    responses((status = 200, body = Vec<PlanResponse>))
)]
#[get("")]
pub async fn list_plans(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let plans = state.plans.list_plans().await?;
    Ok(HttpResponse::Ok().json(plans))
}

#[utoipa::path(
    get,
    path = "/plans/{id}",
    tag = "plans",
    params(("id" = String, Path, description = "Plan ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses((status = 200, body = PlanResponse), (status = 404, description = "Plan not found"))
)]
#[get("/{id}")]
pub async fn get_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let plan = state.plans.get_plan(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(plan))
}

/// 플랜 생성
///
/// `apilimit`의 모든 키는 존재하는 권한 id여야 합니다.
#[utoipa::path(
    post,
    path = "/admin/plans",
    tag = "plans",
    request_body = CreatePlanRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = PlanResponse),
        (status = 400, description = "Empty apilimit or unknown permission"),
    )
)]
#[post("/plans")]
pub async fn create_plan(
    state: web::Data<AppState>,
    payload: web::Json<CreatePlanRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let plan = state.plans.create_plan(payload.into_inner()).await?;

    log::info!("플랜 생성: {} ({})", plan.name, plan.id);
    Ok(HttpResponse::Created().json(plan))
}

#[utoipa::path(
    put,
    path = "/admin/plans/{id}",
    tag = "plans",
    params(("id" = String, Path, description = "Plan ObjectId (hex)")),
    request_body = UpdatePlanRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = PlanResponse),
        (status = 400, description = "Empty apilimit or unknown permission"),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "Plan has subscribers"),
    )
)]
#[put("/plans/{id}")]
pub async fn update_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePlanRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let plan = state
        .plans
        .update_plan(&path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(plan))
}

#[utoipa::path(
    delete,
    path = "/admin/plans/{id}",
    tag = "plans",
    params(("id" = String, Path, description = "Plan ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "Plan has subscribers"),
    )
)]
#[delete("/plans/{id}")]
pub async fn delete_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.plans.delete_plan(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
