use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::users::user::{Role, User};

/// 인증 미들웨어가 요청 Extensions에 저장하는 사용자 정보
///
/// 역할은 토큰이 아닌 저장소의 현재 사용자 문서에서 가져옵니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (hex)
    pub user_id: String,

    /// 로그인 이름 (JWT `sub`)
    pub username: String,

    pub role: Role,
}

impl AuthenticatedUser {
    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 역할이 맞지 않으면 403 에러를 반환합니다.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(
                "You don't have enough permissions".to_string(),
            ))
        }
    }
}

impl TryFrom<&User> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        Ok(Self {
            user_id,
            username: user.username.clone(),
            role: user.role,
        })
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `AuthMiddleware`가 앞에서 저장한 값을 꺼냅니다. 없으면 401입니다.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Could not validate credentials".to_string(),
            ))),
        }
    }
}
