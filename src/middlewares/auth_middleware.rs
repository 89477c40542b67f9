//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// 유효한 액세스 토큰이 없으면 401, 역할이 맞지 않으면 403으로 응답합니다.
pub struct AuthMiddleware {
    /// 접근에 필요한 역할
    required_role: RequiredRole,
}

impl AuthMiddleware {
    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: Role) -> Self {
        Self {
            required_role: RequiredRole::Single(role),
        }
    }

    /// 복수 역할 중 하나 요구 인증 미들웨어 생성
    pub fn required_with_roles(roles: &[Role]) -> Self {
        Self {
            required_role: RequiredRole::Any(roles.to_vec()),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};
    use jsonwebtoken::Algorithm;

    use super::*;
    use crate::config::JwtSettings;
    use crate::core::state::AppState;
    use crate::domain::entities::users::user::User;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::repositories::{Repositories, UserRepository};

    async fn state_with_users() -> AppState {
        let repos = Repositories::in_memory();
        let hash = bcrypt::hash("pw", 4).unwrap();
        repos
            .users
            .insert(User::new("alice".to_string(), hash.clone(), Role::User))
            .await
            .unwrap();
        repos
            .users
            .insert(User::new("root".to_string(), hash, Role::Admin))
            .await
            .unwrap();

        AppState::with_bcrypt_cost(
            repos,
            JwtSettings::new("middleware-secret", Algorithm::HS256, 15, 120),
            4,
        )
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    #[actix_web::test]
    async fn test_role_guard() {
        let state = state_with_users().await;
        let user_token = state.auth.login("alice", "pw").await.unwrap().access_token;
        let admin_token = state.auth.login("root", "pw").await.unwrap().access_token;

        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::required_with_role(Role::Admin))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/admin/whoami").to_request();
        let res = test::call_service(&app, anonymous).await;
        assert_eq!(res.status(), 401);
        assert_eq!(res.headers().get("www-authenticate").unwrap(), "Bearer");

        let as_user = test::TestRequest::get()
            .uri("/admin/whoami")
            .insert_header(("Authorization", format!("Bearer {}", user_token)))
            .to_request();
        assert_eq!(test::call_service(&app, as_user).await.status(), 403);

        let as_admin = test::TestRequest::get()
            .uri("/admin/whoami")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .to_request();
        let body = test::call_and_read_body(&app, as_admin).await;
        assert_eq!(body, "root");
    }

    #[actix_web::test]
    async fn test_any_of_roles_guard() {
        let state = state_with_users().await;
        let user_token = state.auth.login("alice", "pw").await.unwrap().access_token;
        let admin_token = state.auth.login("root", "pw").await.unwrap().access_token;

        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required_with_roles(&[Role::User, Role::Admin]))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        for (token, name) in [(&user_token, "alice"), (&admin_token, "root")] {
            let req = test::TestRequest::get()
                .uri("/me")
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_request();
            assert_eq!(test::call_and_read_body(&app, req).await, name);
        }

        let bad_token = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        assert_eq!(test::call_service(&app, bad_token).await.status(), 401);
    }
}
