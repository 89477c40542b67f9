//! 사용량 제한 클라우드 엔드포인트 (`/random1` … `/random6`)
//!
//! 호출할 때마다 구독 플랜의 한도를 검사하고 사용량을 1 올립니다.
use actix_web::{HttpResponse, get, web};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::subscriptions::ServiceCallResponse;
use crate::domain::entities::{ApiEndpoint, Role};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;

#[utoipa::path(
    get,
    path = "/random{number}",
    tag = "services",
    params(("number" = u8, Path, description = "Endpoint number (1-6)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = ServiceCallResponse),
        (status = 400, description = "Not subscribed or endpoint not in plan"),
        (status = 404, description = "No permission exists for endpoint"),
        (status = 429, description = "API limit reached"),
    )
)]
#[get(
    "/random{number:[1-6]}",
    wrap = "AuthMiddleware::required_with_roles(&[Role::User, Role::Admin])"
)]
pub async fn call_endpoint(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u8>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();
    let endpoint = ApiEndpoint::from_number(number)
        .ok_or_else(|| AppError::NotFound(format!("Unknown endpoint /random{}", number)))?;

    let response = state.access.consume(&user, endpoint).await?;
    Ok(HttpResponse::Ok().json(response))
}
