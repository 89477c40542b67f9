//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::core::state::AppState;
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: RequiredRole,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let user = match authenticate_request(&req).await {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
            };

            if !required_role.is_satisfied(user.role) {
                log::warn!(
                    "권한 부족: 사용자 {} ({}), 필요 권한: {:?}",
                    user.username,
                    user.role,
                    required_role
                );
                let err = AppError::AuthorizationError(
                    "You don't have enough permissions".to_string(),
                );
                return Ok(reject(req, err));
            }

            log::debug!("인증 성공: {} ({})", user.username, user.role);
            req.extensions_mut().insert(user);

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청의 Bearer 토큰을 검증하고 사용자를 확인합니다.
async fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("AppState is not registered".to_string()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Not authenticated".to_string()))?;

    let token = state.auth.token_service().extract_bearer_token(auth_header)?;

    state.auth.current_user(token).await
}
