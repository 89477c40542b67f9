//! OpenAPI 문서와 Swagger UI
//!
//! - `GET /openapi.json` - utoipa가 생성한 OpenAPI 3 문서
//! - `GET /docs` - Swagger UI 페이지 (CDN 정적 자원 사용)
use actix_web::{HttpResponse, get, http::header::ContentType};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::dto::auth::{LoginForm, RefreshTokenRequest, TokenResponse};
use crate::domain::dto::permissions::{
    CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest,
};
use crate::domain::dto::plans::{CreatePlanRequest, PlanResponse, UpdatePlanRequest};
use crate::domain::dto::subscriptions::{
    PermissionUsage, PlanDetailsResponse, PlanPermissionLimit, ServiceCallResponse,
    SubscriptionResponse, UpdateUsageRequest, UsageStatisticsResponse,
};
use crate::domain::dto::users::UserResponse;
use crate::domain::entities::{ApiEndpoint, Role};
use crate::handlers::{auth, general, permissions, plans, services, subscriptions, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ACSAMS",
        description = "Cloud service access management: RBAC, subscription plans and per-endpoint usage limits"
    ),
    paths(
        general::health_check,
        general::hello,
        general::data,
        general::real_data,
        auth::login,
        auth::refresh,
        auth::logout,
        users::get_me,
        users::list_users,
        users::get_user,
        users::get_user_plan,
        users::get_user_usage,
        users::update_user_plan,
        subscriptions::my_plan,
        subscriptions::my_usage,
        subscriptions::subscribe,
        permissions::list_permissions,
        permissions::create_permission,
        permissions::get_permission,
        permissions::update_permission,
        permissions::delete_permission,
        plans::list_plans,
        plans::get_plan,
        plans::create_plan,
        plans::update_plan,
        plans::delete_plan,
        services::call_endpoint,
    ),
    components(schemas(
        ApiEndpoint,
        Role,
        LoginForm,
        RefreshTokenRequest,
        TokenResponse,
        UserResponse,
        CreatePermissionRequest,
        UpdatePermissionRequest,
        PermissionResponse,
        CreatePlanRequest,
        UpdatePlanRequest,
        PlanResponse,
        UpdateUsageRequest,
        PlanPermissionLimit,
        PlanDetailsResponse,
        PermissionUsage,
        UsageStatisticsResponse,
        SubscriptionResponse,
        ServiceCallResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "general", description = "Public and demo endpoints"),
        (name = "auth", description = "Login and token rotation"),
        (name = "users", description = "Own profile"),
        (name = "subscriptions", description = "Own plan subscription and usage"),
        (name = "plans", description = "Subscription plans"),
        (name = "permissions", description = "Endpoint permissions"),
        (name = "admin", description = "User administration"),
        (name = "services", description = "Usage limited cloud endpoints"),
    )
)]
pub struct ApiDoc;

/// `bearer_auth` 보안 스키마 (JWT 액세스 토큰)
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>ACSAMS API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[get("/docs")]
pub async fn swagger_ui() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(SWAGGER_UI_HTML)
}
