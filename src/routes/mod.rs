//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 접근 수준별 스코프로 묶어 등록합니다.
//!
//! # Route Groups
//!
//! | 스코프 | 접근 | 미들웨어 |
//! |--------|------|----------|
//! | `/health`, `/hello`, `/data`, `/docs`, `/openapi.json`, `/token`, `/refresh`, `/logout` | 공개 | 없음 |
//! | `/realdata` | admin | 핸들러 단위 `AuthMiddleware` |
//! | `/random1` … `/random6` | user, admin + 호출 한도 | 핸들러 단위 `AuthMiddleware` |
//! | `/me/...`, `/plans/...` | user, admin | `AuthMiddleware::required_with_roles` |
//! | `/admin/...` | admin | `AuthMiddleware::required_with_role` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{HttpRequest, error, web};

use crate::core::errors::AppError;
use crate::domain::entities::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// 추출기(JSON, 폼, 경로) 오류도 여기서 `ValidationError`(400)로 통일합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    configure_public_routes(cfg);
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_plan_routes(cfg);
    configure_admin_routes(cfg);
    configure_service_routes(cfg);
}

fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("JSON 본문 오류: {}", err);
    AppError::ValidationError(err.to_string()).into()
}

fn form_error(err: error::UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("폼 본문 오류: {}", err);
    AppError::ValidationError(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// 헬스체크, 데모 데이터, API 문서
fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::general::health_check)
        .service(handlers::general::hello)
        .service(handlers::general::data)
        .service(handlers::general::real_data)
        .service(handlers::docs::openapi_json)
        .service(handlers::docs::swagger_ui);
}

/// 로그인과 토큰 회전
///
/// ```bash
/// curl -X POST http://localhost:8000/token \
///   -d 'username=admin&password=admin'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::login)
        .service(handlers::auth::refresh)
        .service(handlers::auth::logout);
}

/// 본인 프로필과 구독 (`/me`)
///
/// 스코프는 user, admin 모두 통과시키고 구독 관련 핸들러는 user 역할만 허용합니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/me")
            .wrap(AuthMiddleware::required_with_roles(&[Role::User, Role::Admin]))
            .service(handlers::users::get_me)
            .service(handlers::subscriptions::my_plan)
            .service(handlers::subscriptions::my_usage)
            .service(handlers::subscriptions::subscribe),
    );
}

fn configure_plan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/plans")
            .wrap(AuthMiddleware::required_with_roles(&[Role::User, Role::Admin]))
            .service(handlers::plans::list_plans)
            .service(handlers::plans::get_plan),
    );
}

/// 관리자 전용 라우트 (`/admin`)
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::required_with_role(Role::Admin))
            // 권한
            .service(handlers::permissions::list_permissions)
            .service(handlers::permissions::create_permission)
            .service(handlers::permissions::get_permission)
            .service(handlers::permissions::update_permission)
            .service(handlers::permissions::delete_permission)
            // 플랜
            .service(handlers::plans::create_plan)
            .service(handlers::plans::update_plan)
            .service(handlers::plans::delete_plan)
            // 사용자
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::get_user_plan)
            .service(handlers::users::get_user_usage)
            .service(handlers::users::update_user_plan),
    );
}

/// 사용량 제한 클라우드 엔드포인트
fn configure_service_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::services::call_endpoint);
}
