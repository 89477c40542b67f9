//! 사용자 조회 핸들러
//!
//! - `GET /me` - 본인 프로필 (user, admin)
//! - `GET /admin/users`, `GET /admin/users/{id}` - 사용자 목록/조회 (admin)
//! - `GET /admin/users/{id}/plan`, `GET /admin/users/{id}/usage` - 사용자의 플랜/사용량 (admin)
//! - `PUT /admin/users/{id}/plan/{plan_id}` - 사용량 조정 또는 플랜 변경 (admin)
use actix_web::{HttpResponse, get, put, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::subscriptions::{
    PlanDetailsResponse, SubscriptionResponse, UpdateUsageRequest, UsageStatisticsResponse,
};
use crate::domain::dto::users::UserResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::body::optional_json;

/// 현재 로그인한 사용자 정보
#[utoipa::path(
    get,
    path = "/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses((status = 200, body = UserResponse), (status = 401, description = "Not authenticated"))
)]
#[get("")]
pub async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.users.get_user_by_id(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, body = Vec<UserResponse>))
)]
#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses((status = 200, body = UserResponse), (status = 404, description = "User not found"))
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.get_user_by_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}/plan",
    tag = "admin",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses((status = 200, body = PlanDetailsResponse), (status = 400, description = "User has no subscribed plan"))
)]
#[get("/users/{id}/plan")]
pub async fn get_user_plan(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let details = state.subscriptions.plan_details(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}/usage",
    tag = "admin",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses((status = 200, body = UsageStatisticsResponse), (status = 400, description = "User has no subscribed plan"))
)]
#[get("/users/{id}/usage")]
pub async fn get_user_usage(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let usage = state.subscriptions.usage_statistics(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(usage))
}

/// 사용자 플랜/사용량 조정
///
/// `plan_id`가 현재 플랜과 같으면 본문의 `current_api_usage`로 사용량을 덮어쓰고,
/// 다르면 본문 없이 새 플랜으로 구독을 바꿉니다.
#[utoipa::path(
    put,
    path = "/admin/users/{id}/plan/{plan_id}",
    tag = "admin",
    params(
        ("id" = String, Path, description = "User ObjectId (hex)"),
        ("plan_id" = String, Path, description = "Plan ObjectId (hex)"),
    ),
    request_body(content = UpdateUsageRequest, description = "Only read when plan_id is the current plan", content_type = "application/json"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = SubscriptionResponse),
        (status = 400, description = "Invalid usage or user not subscribed"),
        (status = 404, description = "User or plan not found"),
    )
)]
#[put("/users/{id}/plan/{plan_id}")]
pub async fn update_user_plan(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let (user_id, plan_id) = path.into_inner();
    let request = optional_json::<UpdateUsageRequest>(&body)?.unwrap_or_default();

    let response = state
        .subscriptions
        .update_user_plan(&user_id, &plan_id, request)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
