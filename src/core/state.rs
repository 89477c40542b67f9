//! 애플리케이션 공유 상태
//!
//! 모든 서비스를 한 번 생성해 `web::Data<AppState>`로 워커 간에 공유합니다.

use std::sync::Arc;

use crate::config::{JwtSettings, PasswordConfig};
use crate::repositories::Repositories;
use crate::services::access::AccessService;
use crate::services::auth::{AuthService, TokenService};
use crate::services::permissions::PermissionService;
use crate::services::plans::PlanService;
use crate::services::subscriptions::SubscriptionService;
use crate::services::users::UserService;

/// 핸들러와 미들웨어가 사용하는 서비스 묶음
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub permissions: PermissionService,
    pub plans: PlanService,
    pub subscriptions: SubscriptionService,
    pub access: AccessService,
}

impl AppState {
    pub fn new(repos: Repositories, jwt: JwtSettings) -> Self {
        Self::with_bcrypt_cost(repos, jwt, PasswordConfig::bcrypt_cost())
    }

    /// bcrypt cost를 직접 지정합니다. (테스트에서 4 사용)
    pub fn with_bcrypt_cost(repos: Repositories, jwt: JwtSettings, bcrypt_cost: u32) -> Self {
        let token_service = Arc::new(TokenService::new(jwt));

        Self {
            auth: AuthService::new(
                repos.users.clone(),
                repos.refresh_tokens.clone(),
                token_service,
                bcrypt_cost,
            ),
            users: UserService::new(repos.users.clone(), repos.plans.clone(), bcrypt_cost),
            permissions: PermissionService::new(repos.permissions.clone(), repos.plans.clone()),
            plans: PlanService::new(
                repos.plans.clone(),
                repos.permissions.clone(),
                repos.users.clone(),
            ),
            subscriptions: SubscriptionService::new(
                repos.users.clone(),
                repos.plans.clone(),
                repos.permissions.clone(),
            ),
            access: AccessService::new(repos.users, repos.plans, repos.permissions),
        }
    }
}
