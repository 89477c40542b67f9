//! 본인 구독 핸들러 (`/me` 스코프, user 역할 전용)
use actix_web::{HttpResponse, get, post, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::subscriptions::{
    PlanDetailsResponse, SubscriptionResponse, UsageStatisticsResponse,
};
use crate::domain::entities::Role;
use crate::domain::models::auth::AuthenticatedUser;

/// 구독 중인 플랜 상세
#[utoipa::path(
    get,
    path = "/me/plan",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = PlanDetailsResponse),
        (status = 400, description = "User has no subscribed plan"),
        (status = 403, description = "You don't have enough permissions"),
    )
)]
#[get("/plan")]
pub async fn my_plan(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    user.require_role(Role::User)?;

    let details = state.subscriptions.plan_details(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(details))
}

/// 권한별 사용량과 남은 호출 수
#[utoipa::path(
    get,
    path = "/me/usage",
    tag = "subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = UsageStatisticsResponse),
        (status = 400, description = "User has no subscribed plan"),
        (status = 403, description = "You don't have enough permissions"),
    )
)]
#[get("/usage")]
pub async fn my_usage(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    user.require_role(Role::User)?;

    let usage = state.subscriptions.usage_statistics(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(usage))
}

/// 플랜 구독
///
/// 이미 다른 플랜을 구독 중이면 새 플랜으로 바뀌고 사용량은 0으로 초기화됩니다.
#[utoipa::path(
    post,
    path = "/me/subscription/{plan_id}",
    tag = "subscriptions",
    params(("plan_id" = String, Path, description = "Plan ObjectId (hex)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = SubscriptionResponse),
        (status = 404, description = "Plan not found"),
    )
)]
#[post("/subscription/{plan_id}")]
pub async fn subscribe(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_role(Role::User)?;

    let response = state
        .subscriptions
        .subscribe(&user.user_id, &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
